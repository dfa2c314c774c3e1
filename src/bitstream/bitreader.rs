//! BitReader: reads a packed bitstream produced by the BitWriter.
//!
//! Reads from a borrowed in-memory buffer. Bits are taken most significant bit first.
//! The range decoder is allowed to look past the end of its payload; those reads come
//! back as zeros and are counted so the caller can tell a short tail from a truncation.
//!

/// Reads a packed in-memory bitstream.
#[derive(Debug)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    cursor: usize,
    bit_index: usize,
    /// Zero bits handed out after the buffer ran dry.
    phantom: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new BitReader over the buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            bit_index: 0,
            phantom: 0,
        }
    }

    /// Return bit as Option<u32> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<u32> {
        let byte = *self.buffer.get(self.cursor)?;
        let bit = (byte >> (7 - self.bit_index)) & 1;
        self.bit_index += 1;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
        Some(bit as u32)
    }

    /// Return the next bit, or 0 once the buffer is exhausted.
    pub fn bit_or_zero(&mut self) -> u32 {
        match self.bit() {
            Some(bit) => bit,
            None => {
                self.phantom += 1;
                0
            }
        }
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read.
    pub fn byte(&mut self) -> Option<u8> {
        // Whole bytes are the common case (headers are written before any bit data)
        if self.bit_index == 0 {
            let byte = *self.buffer.get(self.cursor)?;
            self.cursor += 1;
            return Some(byte);
        }
        if self.remaining_bits() < 8 {
            return None;
        }
        let mut result = 0_u8;
        for _ in 0..8 {
            result = result << 1 | self.bit()? as u8;
        }
        Some(result)
    }

    /// Returns a little-endian u32, or None if fewer than 32 bits remain.
    pub fn u32_le(&mut self) -> Option<u32> {
        if self.remaining_bits() < 32 {
            return None;
        }
        let mut bytes = [0_u8; 4];
        for b in bytes.iter_mut() {
            *b = self.byte()?;
        }
        Some(u32::from_le_bytes(bytes))
    }

    /// Bits left before the end of the buffer.
    pub fn remaining_bits(&self) -> usize {
        self.buffer.len() * 8 - (self.cursor * 8 + self.bit_index)
    }

    /// Count of zero bits returned by bit_or_zero past the end of the buffer.
    pub fn phantom_bits(&self) -> usize {
        self.phantom
    }

    /// Current byte offset into the buffer.
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bit(), Some(1));
        for _ in 0..6 {
            assert_eq!(br.bit(), Some(0));
        }
        assert_eq!(br.bit(), Some(1));
        assert_eq!(br.bit(), None);
    }

    #[test]
    fn bit_or_zero_test() {
        let x = [0b1100_0000_u8];
        let mut br = BitReader::new(&x);
        assert_eq!(br.bit_or_zero(), 1);
        assert_eq!(br.bit_or_zero(), 1);
        for _ in 0..6 {
            assert_eq!(br.bit_or_zero(), 0);
        }
        assert_eq!(br.phantom_bits(), 0);
        assert_eq!(br.bit_or_zero(), 0);
        assert_eq!(br.bit_or_zero(), 0);
        assert_eq!(br.phantom_bits(), 2);
    }

    #[test]
    fn byte_test() {
        let x = "Hello".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.byte(), Some(b'H'));
        assert_eq!(br.byte(), Some(b'e'));
        assert_eq!(br.offset(), 2);
    }

    #[test]
    fn unaligned_byte_test() {
        let x = [0b1111_0000_u8, 0b1010_0000];
        let mut br = BitReader::new(&x);
        br.bit();
        assert_eq!(br.byte(), Some(0b1110_0001));
        assert_eq!(br.loc(), "[1.1]");
        assert_eq!(br.byte(), None);
    }

    #[test]
    fn u32_le_test() {
        let x = [1_u8, 2, 3, 4, 5];
        let mut br = BitReader::new(&x);
        assert_eq!(br.u32_le(), Some(0x0403_0201));
        assert_eq!(br.u32_le(), None);
        assert_eq!(br.remaining_bits(), 8);
    }
}
