use crate::bwt_algorithms::bwt_sort::{bwt_pack, bwt_unpack};
use crate::compression::range_coder::{arith_decode, arith_encode};
use crate::error::Result;
use crate::tools::mtf::{mtf_decode, mtf_encode};
use crate::tools::rle::{rle_decode, rle_encode};

/// One reversible stage. Every call is self-contained: tables are built per call and
/// nothing is shared between calls, so a codec can be used from several threads at once.
pub trait Codec {
    fn pack(&self, data: &[u8]) -> Result<Vec<u8>>;
    fn unpack(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Escape-byte run-length coding. The escape byte is configuration, not part of the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunLength {
    pub escape: u8,
}

impl RunLength {
    pub fn new(escape: u8) -> Self {
        Self { escape }
    }
}

impl Codec for RunLength {
    fn pack(&self, data: &[u8]) -> Result<Vec<u8>> {
        rle_encode(data, self.escape)
    }

    fn unpack(&self, data: &[u8]) -> Result<Vec<u8>> {
        rle_decode(data, self.escape)
    }
}

/// Move-to-front rank transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveToFront;

impl Codec for MoveToFront {
    fn pack(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(mtf_encode(data))
    }

    fn unpack(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(mtf_decode(data))
    }
}

/// Burrows-Wheeler block sort over the whole buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockSort;

impl Codec for BlockSort {
    fn pack(&self, data: &[u8]) -> Result<Vec<u8>> {
        bwt_pack(data)
    }

    fn unpack(&self, data: &[u8]) -> Result<Vec<u8>> {
        bwt_unpack(data)
    }
}

/// Static order-0 arithmetic coder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeCoder;

impl Codec for RangeCoder {
    fn pack(&self, data: &[u8]) -> Result<Vec<u8>> {
        arith_encode(data)
    }

    fn unpack(&self, data: &[u8]) -> Result<Vec<u8>> {
        arith_decode(data)
    }
}
