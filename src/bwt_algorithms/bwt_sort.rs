use std::cmp::Ordering;

use log::{debug, trace};

use crate::error::{PackError, Result};

/// Bytes taken by the primary index that follows the transformed block.
pub const KEY_LEN: usize = 4;

/// Burrows-Wheeler-Transform of the whole buffer as one block.
/// This returns a u32 key (the sorted position of the unrotated input) and a u8 vec of the
/// BWT data.
pub fn bwt_encode(block: &[u8]) -> Result<(u32, Vec<u8>)> {
    if block.len() > u32::MAX as usize {
        return Err(PackError::InputTooLarge {
            len: block.len(),
            max: u32::MAX as usize,
        });
    }
    // Create index into block. Index is u32, which should be more than enough
    let mut index = (0_u32..block.len() as u32).collect::<Vec<u32>>();

    // Stable sort, so equal rotations keep ascending start order
    index.sort_by(|a, b| block_compare(*a as usize, *b as usize, block));

    // Get key and BWT output: the byte preceding each sorted rotation
    let mut key = 0_u32;
    let mut bwt = Vec::with_capacity(block.len());
    for (i, &start) in index.iter().enumerate() {
        if start == 0 {
            key = i as u32;
            bwt.push(block[block.len() - 1]);
        } else {
            bwt.push(block[start as usize - 1]);
        }
    }
    debug!("BWT key is {} for {} bytes", key, block.len());
    Ok((key, bwt))
}

/// Compare the rotations starting at a and b over the full length of the block.
fn block_compare(a: usize, b: usize, block: &[u8]) -> Ordering {
    let min = std::cmp::min(block[a..].len(), block[b..].len());

    // Lexicographical comparison
    let mut result = block[a..a + min].cmp(&block[b..b + min]);

    // Implement wraparound if needed
    if result == Ordering::Equal {
        if a < b {
            let to_end = block.len() - a - min;
            result = block[(a + min)..].cmp(&block[..to_end]);
            if result == Ordering::Equal {
                let rest_of_block = block.len() - to_end - min;
                return block[..rest_of_block].cmp(&block[to_end..(to_end + rest_of_block)]);
            }
        } else {
            let to_end = block.len() - b - min;
            result = block[..to_end].cmp(&block[(b + min)..]);
            if result == Ordering::Equal {
                let rest_of_block = block.len() - to_end - min;
                return block[to_end..(to_end + rest_of_block)].cmp(&block[..rest_of_block]);
            }
        }
    }
    result
}

/// Decode a Burrows-Wheeler-Transform with LF-mapping: walk backwards from the key, each
/// step jumping to where the current byte sits in the sorted first column.
pub fn bwt_decode(key: u32, bwt_in: &[u8]) -> Result<Vec<u8>> {
    let end = bwt_in.len();
    if end == 0 {
        return match key {
            0 => Ok(Vec::new()),
            _ => Err(PackError::corrupt(format!("key {} for an empty block", key))),
        };
    }
    if key as usize >= end {
        return Err(PackError::corrupt(format!(
            "key {} out of range for a {} byte block",
            key, end
        )));
    }

    // Occurrences of each byte before each position
    let mut rank = vec![0_u32; end];
    let mut base = [0_u32; 256];
    for (i, &s) in bwt_in.iter().enumerate() {
        rank[i] = base[s as usize];
        base[s as usize] += 1;
    }

    // Convert frequency count to a cumulative sum of frequencies
    let mut sum = 0;
    for slot in base.iter_mut() {
        let count = *slot;
        *slot = sum;
        sum += count;
    }

    let mut out = vec![0_u8; end];
    let mut j = key as usize;
    for slot in out.iter_mut().rev() {
        let s = bwt_in[j];
        *slot = s;
        j = (rank[j] + base[s as usize]) as usize;
    }
    trace!("BWT decoded {} bytes", end);
    Ok(out)
}

/// Transform the block and append the key, little-endian.
pub fn bwt_pack(block: &[u8]) -> Result<Vec<u8>> {
    let (key, mut bwt) = bwt_encode(block)?;
    bwt.extend_from_slice(&key.to_le_bytes());
    Ok(bwt)
}

/// Split off the trailing key and invert the transform.
pub fn bwt_unpack(packed: &[u8]) -> Result<Vec<u8>> {
    if packed.len() < KEY_LEN {
        return Err(PackError::UnexpectedEndOfStream {
            offset: packed.len(),
        });
    }
    let (bwt, key) = packed.split_at(packed.len() - KEY_LEN);
    let key = u32::from_le_bytes([key[0], key[1], key[2], key[3]]);
    bwt_decode(key, bwt)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn abab_test() {
        let (key, bwt) = bwt_encode(b"ABAB").unwrap();
        assert_eq!(bwt, b"BBAA".to_vec());
        assert_eq!(key, 0);
        assert_eq!(bwt_decode(0, b"BBAA").unwrap(), b"ABAB".to_vec());
    }

    #[test]
    fn banana_test() {
        let (key, bwt) = bwt_encode(b"banana").unwrap();
        assert_eq!(bwt, b"nnbaaa".to_vec());
        assert_eq!(key, 3);
        assert_eq!(bwt_decode(key, &bwt).unwrap(), b"banana".to_vec());
    }

    #[test]
    fn pack_appends_key_test() {
        let packed = bwt_pack(b"banana").unwrap();
        assert_eq!(packed.len(), 6 + KEY_LEN);
        assert_eq!(&packed[6..], &[3, 0, 0, 0]);
        assert_eq!(bwt_unpack(&packed).unwrap(), b"banana".to_vec());
    }

    #[test]
    fn compare_wraps_test() {
        assert_eq!(block_compare(0, 2, b"abab"), Ordering::Equal);
        assert_eq!(block_compare(1, 2, b"abab"), Ordering::Greater);
        assert_eq!(block_compare(0, 1, b"aab"), Ordering::Less);
        assert_eq!(block_compare(2, 0, b"aab"), Ordering::Greater);
        assert_eq!(block_compare(1, 1, b"xyz"), Ordering::Equal);
    }

    #[test]
    fn small_blocks_test() {
        assert_eq!(bwt_pack(&[]).unwrap(), vec![0, 0, 0, 0]);
        assert!(bwt_unpack(&[0, 0, 0, 0]).unwrap().is_empty());
        assert_eq!(bwt_pack(b"x").unwrap(), vec![b'x', 0, 0, 0, 0]);
        assert_eq!(bwt_unpack(&[b'x', 0, 0, 0, 0]).unwrap(), b"x".to_vec());
    }

    #[test]
    fn all_equal_test() {
        let data = vec![b'z'; 1000];
        let (key, bwt) = bwt_encode(&data).unwrap();
        assert_eq!(key, 0);
        assert_eq!(bwt, data);
        assert_eq!(bwt_decode(key, &bwt).unwrap(), data);
    }

    #[test]
    fn text_round_trip_test() {
        let data = "Peter Piper picked a peck of pickled peppers. \
                    A peck of pickled peppers Peter Piper picked."
            .as_bytes();
        let packed = bwt_pack(data).unwrap();
        assert_eq!(packed.len(), data.len() + KEY_LEN);
        assert_eq!(bwt_unpack(&packed).unwrap(), data.to_vec());
    }

    #[test]
    fn binary_round_trip_test() {
        let data = (0..4000_u32)
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8)
            .collect::<Vec<u8>>();
        assert_eq!(bwt_unpack(&bwt_pack(&data).unwrap()).unwrap(), data);
    }

    #[test]
    fn short_input_test() {
        assert!(matches!(
            bwt_unpack(&[1, 2, 3]),
            Err(PackError::UnexpectedEndOfStream { offset: 3 })
        ));
    }

    #[test]
    fn bad_key_test() {
        assert!(matches!(
            bwt_unpack(&[b'a', b'b', 2, 0, 0, 0]),
            Err(PackError::CorruptStream(_))
        ));
        assert!(matches!(
            bwt_unpack(&[1, 0, 0, 0]),
            Err(PackError::CorruptStream(_))
        ));
    }
}
