use log::{debug, trace, warn};

use crate::error::{PackError, Result};

/// Longest run held by one escape sequence. The length travels in a single byte, so a run
/// of 256 or more is split and the remainder is encoded on its own.
pub const MAX_RUN: usize = 255;

/// Runs up to this long are cheaper as literal copies than as [escape][len][value].
pub const MAX_LITERAL_RUN: usize = 5;

/// Run-length encode the input. Runs of up to five bytes are copied through, longer runs
/// become `[escape][length][value]`. The escape byte must not occur in the input.
pub fn rle_encode(data: &[u8], escape: u8) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::with_capacity(data.len());
    let mut escapes = 0_usize;
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        if byte == escape {
            return Err(PackError::EscapeByteCollision { escape, offset: i });
        }
        // Count the run, capped so the length always fits the length byte
        let run = data[i..]
            .iter()
            .take(MAX_RUN)
            .position(|&x| x != byte)
            .unwrap_or_else(|| (data.len() - i).min(MAX_RUN));

        if run <= MAX_LITERAL_RUN {
            out.extend(std::iter::repeat(byte).take(run));
        } else {
            out.extend_from_slice(&[escape, run as u8, byte]);
            escapes += 1;
        }
        i += run;
    }
    debug!(
        "RLE packed {} bytes into {} using {} escape runs",
        data.len(),
        out.len(),
        escapes
    );
    Ok(out)
}

/// Expand data made by rle_encode with the same escape byte.
pub fn rle_decode(data: &[u8], escape: u8) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::with_capacity(data.len() * 2);
    let mut i = 0;

    while i < data.len() {
        let byte = data[i];
        i += 1;
        if byte != escape {
            out.push(byte);
            continue;
        }
        // An escape needs its length and value bytes
        let (run, value) = match data.get(i..i + 2) {
            Some(&[run, value]) => (run, value),
            _ => return Err(PackError::UnexpectedEndOfStream { offset: data.len() }),
        };
        if value == escape {
            return Err(PackError::corrupt(format!(
                "escape sequence at offset {} repeats the escape byte",
                i - 1
            )));
        }
        if run == 0 {
            warn!("Zero length run at offset {}", i - 1);
        }
        out.extend(std::iter::repeat(value).take(run as usize));
        i += 2;
    }
    trace!("RLE expanded {} bytes into {}", data.len(), out.len());
    Ok(out)
}
