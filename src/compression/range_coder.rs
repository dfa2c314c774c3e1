//! Static order-0 arithmetic coder over bytes.
//!
//! Stream layout: a little-endian u32 symbol count, 256 little-endian u32 per-symbol counts,
//! then the renormalized bit payload (most significant bit first, zero padded).
//!
//! Interval arithmetic runs in 31 bits. Encoder and decoder test the `HALF` and `QUARTER`
//! scaling conditions with the same strict `>`, so both see identical renormalization steps.
//! Each step moves exactly one payload bit, which fixes the payload at `steps + 2` bits.

use log::{debug, trace};

use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{PackError, Result};
use crate::tools::freq_count::freqs;

/// Upper end of the coding interval (31 bits set).
pub const TOP: u32 = 0x7fff_ffff;
pub const HALF: u32 = TOP / 2 + 1;
pub const QUARTER: u32 = HALF / 2;
pub const THREE_QUARTERS: u32 = 3 * QUARTER;

/// Total count plus 256 symbol counts, four bytes each.
pub const HEADER_LEN: usize = 4 + 256 * 4;

/// Longest input the coder accepts. After renormalization the interval is always wider
/// than `QUARTER`, so every symbol still gets a step of at least one.
pub const MAX_SYMBOLS: usize = QUARTER as usize;

/// Zero bits the decoder may pull from past the payload before it gives up early. Well-formed
/// streams need at most 29; the exact length check after decoding catches the rest.
pub const MAX_TRAILING_BITS: usize = 32;

/// Cumulative `[low, high)` range of every byte value, in value order.
struct SymbolRanges {
    low: [u32; 256],
    high: [u32; 256],
}

impl SymbolRanges {
    fn new(counts: &[u32; 256]) -> Self {
        let mut low = [0_u32; 256];
        let mut high = [0_u32; 256];
        let mut sum = 0_u32;
        for (s, &count) in counts.iter().enumerate() {
            low[s] = sum;
            sum += count;
            high[s] = sum;
        }
        Self { low, high }
    }

    fn get(&self, s: u8) -> (u32, u32) {
        (self.low[s as usize], self.high[s as usize])
    }

    /// The symbol whose range holds `scaled`, if any.
    fn find(&self, scaled: u32) -> Option<u8> {
        // Upper bounds are non-decreasing, so the first one above `scaled` is the only
        // candidate. Empty ranges sort before it and are skipped.
        let s = self.high.partition_point(|&h| h <= scaled);
        if s < 256 && self.low[s] <= scaled {
            Some(s as u8)
        } else {
            None
        }
    }
}

/// Narrow `[low, high]` to the slot of one symbol.
fn narrow(low: &mut u32, high: &mut u32, sym_low: u32, sym_high: u32, total: u32) {
    let step = (*high - *low + 1) / total;
    *high = *low + step * sym_high - 1;
    *low += step * sym_low;
}

/// Encode data with a static order-0 model. The frequency table travels in the header.
pub fn arith_encode(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > MAX_SYMBOLS {
        return Err(PackError::InputTooLarge {
            len: data.len(),
            max: MAX_SYMBOLS,
        });
    }
    let total = data.len() as u32;
    let counts = freqs(data);
    let ranges = SymbolRanges::new(&counts);

    let mut bw = BitWriter::new(HEADER_LEN + data.len());
    bw.out32_le(total);
    counts.iter().for_each(|&c| bw.out32_le(c));

    let mut low = 0_u32;
    let mut high = TOP;
    let mut underflow = 0_u32;

    for &s in data {
        let (sym_low, sym_high) = ranges.get(s);
        narrow(&mut low, &mut high, sym_low, sym_high, total);

        loop {
            if high < HALF {
                // E1: [0, 0.5) -> [0, 1)
                bw.out_bit(false);
                bw.out_bits(true, underflow);
                underflow = 0;
            } else if low > HALF {
                // E2: [0.5, 1) -> [0, 1)
                bw.out_bit(true);
                bw.out_bits(false, underflow);
                underflow = 0;
                low -= HALF;
                high -= HALF;
            } else if low > QUARTER && high < THREE_QUARTERS {
                // E3: [0.25, 0.75) -> [0, 1), the bit is settled later
                underflow += 1;
                low -= QUARTER;
                high -= QUARTER;
            } else {
                break;
            }
            low <<= 1;
            high = (high << 1) | 1;
        }
    }

    // Flush: two bits (plus the pending ones) pin a value inside the final interval
    if low < QUARTER {
        bw.out_bit(false);
        bw.out_bits(true, underflow + 1);
    } else {
        bw.out_bit(true);
        bw.out_bits(false, underflow + 1);
    }

    debug!(
        "Arithmetic coded {} symbols into {} payload bits",
        total,
        bw.bit_len() - HEADER_LEN * 8
    );
    Ok(bw.finish())
}

/// Decode a stream made by arith_encode.
pub fn arith_decode(packed: &[u8]) -> Result<Vec<u8>> {
    if packed.len() < HEADER_LEN {
        return Err(PackError::UnexpectedEndOfStream {
            offset: packed.len(),
        });
    }
    let mut br = BitReader::new(packed);
    let eos = || PackError::UnexpectedEndOfStream {
        offset: packed.len(),
    };

    // Read the header and rebuild the model
    let total = br.u32_le().ok_or_else(eos)?;
    let mut counts = [0_u32; 256];
    for c in counts.iter_mut() {
        *c = br.u32_le().ok_or_else(eos)?;
    }
    if total as usize > MAX_SYMBOLS {
        return Err(PackError::corrupt(format!(
            "declared {} symbols, more than the coder can hold",
            total
        )));
    }
    let sum = counts.iter().map(|&c| c as u64).sum::<u64>();
    if sum != total as u64 {
        return Err(PackError::corrupt(format!(
            "symbol counts add up to {}, header declares {}",
            sum, total
        )));
    }
    let ranges = SymbolRanges::new(&counts);
    debug!("Arithmetic header declares {} symbols", total);

    let mut low = 0_u32;
    let mut high = TOP;
    let mut value = 0_u32;
    for i in 0..31 {
        value |= br.bit_or_zero() << (30 - i);
    }

    let corrupt = |at: usize| PackError::corrupt(format!("payload invalid at symbol {}", at));
    let mut out = Vec::with_capacity(total as usize);
    let mut steps = 0_usize;

    for i in 0..total as usize {
        let step = (high - low + 1) / total;
        let scaled = value.checked_sub(low).ok_or_else(|| corrupt(i))? / step;
        let s = ranges.find(scaled).ok_or_else(|| corrupt(i))?;
        out.push(s);

        let (sym_low, sym_high) = ranges.get(s);
        narrow(&mut low, &mut high, sym_low, sym_high, total);

        loop {
            if high < HALF {
                // E1
            } else if low > HALF {
                // E2
                low -= HALF;
                high -= HALF;
                value = value.checked_sub(HALF).ok_or_else(|| corrupt(i))?;
            } else if low > QUARTER && high < THREE_QUARTERS {
                // E3
                low -= QUARTER;
                high -= QUARTER;
                value = value.checked_sub(QUARTER).ok_or_else(|| corrupt(i))?;
            } else {
                break;
            }
            low <<= 1;
            high = (high << 1) | 1;
            value = (value << 1) | br.bit_or_zero();
            steps += 1;
        }
        if br.phantom_bits() > MAX_TRAILING_BITS {
            return Err(eos());
        }
    }
    trace!("Arithmetic decoder stopped at {}", br.loc());

    // The encoder wrote one bit per step plus two flush bits
    let payload_len = packed.len() - HEADER_LEN;
    let expected = (steps + 2 + 7) / 8;
    if payload_len < expected {
        return Err(eos());
    }
    if payload_len > expected {
        return Err(PackError::corrupt(format!(
            "{} trailing bytes after the payload",
            payload_len - expected
        )));
    }
    if freqs(&out) != counts {
        return Err(PackError::corrupt(
            "decoded symbols do not match the header counts",
        ));
    }
    Ok(out)
}

/// Size in bytes that arith_encode would produce for the data.
pub fn estimate_packed_len(data: &[u8]) -> Result<usize> {
    arith_encode(data).map(|packed| packed.len())
}
