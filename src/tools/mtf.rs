use log::trace;

/// Encode data using the Move To Front transform. Every byte is replaced by its current
/// position in a recency index, which then moves that byte to the front.
pub fn mtf_encode(data: &[u8]) -> Vec<u8> {
    // The index starts as the identity permutation and lives only for this call
    let mut index = identity();
    let mut out = Vec::with_capacity(data.len());

    for &byte in data {
        // Every byte value is always somewhere in the index
        let idx = index.iter().position(|&c| c == byte).unwrap_or_default();
        out.push(idx as u8);
        move_to_front(&mut index, idx);
    }
    trace!("MTF encoded {} bytes", out.len());
    out
}

/// Decode Move To Front indecies back to the symbols they stand for.
pub fn mtf_decode(data: &[u8]) -> Vec<u8> {
    let mut index = identity();
    let mut out = Vec::with_capacity(data.len());

    for &rank in data {
        let idx = rank as usize;
        out.push(index[idx]);
        move_to_front(&mut index, idx);
    }
    trace!("MTF decoded {} bytes", out.len());
    out
}

fn identity() -> [u8; 256] {
    let mut index = [0_u8; 256];
    for (i, slot) in index.iter_mut().enumerate() {
        *slot = i as u8;
    }
    index
}

/// Shift every symbol in front of idx back one slot, then put the symbol at idx in front.
/// Skipped-over symbols keep their relative order.
fn move_to_front(index: &mut [u8; 256], idx: usize) {
    let temp_sym = index[idx];
    index.copy_within(0..idx, 1);
    index[0] = temp_sym;
}
