//! The tools module provides the byte level stages and helpers.
//!
//! The tools are:
//! - cli: Command line interface for the packer.
//! - freq_count: Frequency count of byte values.
//! - mtf: Move-To-Front transform.
//! - rle: Escape byte Run-Length-Encoding.
//!
pub mod cli;
pub mod freq_count;
pub mod mtf;
pub mod rle;
