//! The tools module provides helper functions for huffzip.
//!
//! The tools are:
//! - cli: Command line interface and the options it produces.
//! - freq_count: Frequency count of the 256 byte values, and its header form.
//!
pub mod cli;
pub mod freq_count;
