//! The bitstream module is the I/O subsystem shared by the codec stages.
//!
//! Every stage works on fully materialized in-memory buffers, so the writer packs into a
//! `Vec<u8>` and the reader walks a borrowed slice. Bits are packed most significant bit
//! first within each byte, and the last partial byte is padded with zeros. Integers are
//! written little-endian.
//!
//! Only the range coder needs bit granularity; the other stages write whole bytes.
//!
pub mod bitreader;
pub mod bitwriter;
