//! The compression module holds the entropy coder and ties the stages together.
//!
//! The classic chain, for the best ratio on embedded payloads, is:
//! - Burrows Wheeler Transform: Sort the data to increase the probability of runs of identical bytes.
//! - Move To Front transform: Turn those runs into runs of small values, mostly zeros.
//! - Run Length Encoding: Collapse runs of six or more identical bytes into a three byte escape.
//! - Arithmetic coding: Spend fewer bits on frequent byte values, using one static table per buffer.
//!
//! Any subset works, in any order, as long as unpacking uses the same stages. Unpacking runs
//! the inverse of each stage, last stage first.
//!

pub mod codec;
pub mod pipeline;
pub mod range_coder;
