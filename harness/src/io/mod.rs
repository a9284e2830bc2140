//! I/O helpers: configuration, descriptors, ledger, and user source files.

pub mod config;
pub mod descriptor;
pub mod ledger;
pub mod source;
