//! Lossless codecs for shrinking binary payloads embedded in size constrained executables.
//!
//! Four independent stages, each a pure `pack`/`unpack` pair over in-memory buffers:
//! - Burrows-Wheeler block sort ([`bwt_algorithms::bwt_sort`])
//! - Move-to-front rank transform ([`tools::mtf`])
//! - Escape byte run-length coding ([`tools::rle`])
//! - Static order-0 arithmetic coding ([`compression::range_coder`])
//!
//! Stages can be used alone or chained with a [`Pipeline`]:
//!
//! ```
//! use stagepack::Pipeline;
//!
//! let pipeline = Pipeline::classic(0xff);
//! let packed = pipeline.pack(b"abracadabra abracadabra").unwrap();
//! assert_eq!(pipeline.unpack(&packed).unwrap(), b"abracadabra abracadabra");
//! ```
//!
pub mod bitstream;
pub mod bwt_algorithms;
pub mod compression;
pub mod error;
pub mod tools;

pub use compression::codec::{BlockSort, Codec, MoveToFront, RangeCoder, RunLength};
pub use compression::pipeline::{parse_stages, Pipeline, Stage};
pub use error::{PackError, Result};
