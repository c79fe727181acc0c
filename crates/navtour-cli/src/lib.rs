//! navtour CLI library.
//!
//! Shared pieces of the `navtour` binary that are worth testing on their own:
//! output format selection and report printing.

pub mod output;
