//! Core type definitions for ptrsweep.
//!
//! Newtypes around the CIDR block being swept and the set of blocks selected
//! on the command line.

mod cidr;
mod target;

pub use cidr::CidrBlock;
pub use target::{TargetSet, K8S_RANGES, PRIVATE_RANGES};
