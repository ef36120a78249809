//! Output module.
//!
//! The [`Reporter`] owns the stdout result stream; `plain` holds the styled
//! stderr helpers used by the binary.

mod plain;
mod reporter;

pub use plain::{print_error, print_warning};
pub use reporter::{Reporter, SharedBuffer};
