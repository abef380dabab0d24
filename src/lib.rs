//! Book catalog client library
//!
//! The form controller, its REST client and the terminal front end used by
//! the shelf binaries.

pub mod modules;
pub mod session;
pub mod terminal;

/// Re-export commonly used types
pub use modules::*;
