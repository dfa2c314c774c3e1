//! The bwt_algorithms module holds the block sorting stage.
//!
//! The Burrows-Wheeler Transform prepares data for compression. It permutes the block so that
//! bytes sharing the same following context end up next to each other, which makes runs of
//! similar bytes more likely.
//!
//! The whole buffer is sorted as one block. Its sorted position (the key) is appended to the
//! output so the transform can be undone.
//!
//! Rotations are ordered with a comparison sort, so highly repetitive blocks (a long run of
//! one byte) cost O(N^2 log N). A suffix array construction such as SA-IS would bring that
//! down to linear time.
//!
pub mod bwt_sort;
