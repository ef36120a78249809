//! # ptrsweep - A Concurrent Reverse DNS Sweeper
//!
//! ptrsweep walks one or more IPv4 CIDR ranges and sends a PTR query for
//! every address to a chosen resolver, printing each answer as it arrives.
//!
//! ## Features
//!
//! - **Bounded concurrency**: a fixed pool of workers drains a job queue
//! - **Any resolver**: explicit `host[:port]` or the system nameserver
//! - **Cooperative cancellation**: one stop signal halts dispatch and workers
//! - **Preset targets**: private ranges or Kubernetes service ranges
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use ptrsweep::config::ScanConfig;
//! use ptrsweep::output::Reporter;
//! use ptrsweep::resolver::DnsPtrResolver;
//! use ptrsweep::scanner::ScanController;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig::new("192.168.1.1:53".parse().unwrap()).with_workers(32);
//!     let resolver = Arc::new(DnsPtrResolver::new(&config));
//!     let controller = ScanController::new(config, resolver, Reporter::stdout());
//!
//!     let summary = controller.run(&["192.168.1.0/24"]).await.unwrap();
//!     println!("{} answers", summary.stats.answered);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - CIDR blocks and target presets
//! - [`resolver`] - The `PtrResolver` trait and its DNS implementation
//! - [`scanner`] - Sweep engine, controller and cancellation signal
//! - [`config`] - Sweep configuration, settings file, resolver discovery
//! - [`output`] - Serialized result stream
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{ScanError, ScanResult};
pub use resolver::{DnsPtrResolver, LookupOutcome, PtrResolver};
pub use scanner::{CancelSignal, ScanController, ScanEngine, SweepSummary};
pub use types::{CidrBlock, TargetSet};
