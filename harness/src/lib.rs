//! Evaluation harness for small coding exercises.
//!
//! Each exercise pairs a [`runners::Runner`] compiled into this crate with a
//! user implementation loaded at evaluation time from a compiled WebAssembly
//! artifact. The runner generates inputs, invokes the user code, computes a
//! reference answer, and reports one [`core::case_result::CaseResult`] per case.
//!
//! - **[`core`]**: Pure values, results, and tallies. No I/O.
//! - **[`io`]**: Configuration, descriptors, the completion ledger, user source.
//! - **[`loader`]**: Fresh-per-call loading of compiled artifacts.
//! - **[`repository`]**: Discovery and ownership of [`project::Project`]s.
//!
//! [`evaluate`] ties these together for the CLI.

pub mod core;
pub mod error;
pub mod evaluate;
pub mod exit_codes;
pub mod io;
pub mod loader;
pub mod logging;
pub mod project;
pub mod repository;
pub mod runners;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
