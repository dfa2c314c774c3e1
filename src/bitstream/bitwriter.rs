/// Creates a bitstream for output.
pub struct BitWriter {
    /// Output buffer used to write the bitstream.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
}

impl BitWriter {
    /// Create a new BitWriter with an output buffer of the capacity specified. Call finish()
    /// to flush the bit queue and take the packed bytes.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal bitstream write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Put a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        self.write_stream();
    }

    /// Put `count` copies of the same bit on the stream.
    pub fn out_bits(&mut self, bit: bool, mut count: u32) {
        // At most 32 at a time so the queue (which holds up to 7 leftover bits) never overflows
        while count > 0 {
            let depth = count.min(32) as u8;
            self.queue <<= depth;
            if bit {
                self.queue |= (1_u64 << depth) - 1;
            }
            self.q_bits += depth;
            self.write_stream();
            count -= depth as u32;
        }
    }

    /// Put a byte on the stream.
    pub fn out8(&mut self, data: u8) {
        self.queue <<= 8; //shift queue by one byte
        self.queue |= data as u64; //add the byte to queue
        self.q_bits += 8; //update depth of queue bits
        self.write_stream();
    }

    /// Put a 32 bit word on the stream, least significant byte first.
    pub fn out32_le(&mut self, data: u32) {
        data.to_le_bytes().iter().for_each(|&b| self.out8(b));
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits.
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.write_stream();
        }
    }

    /// Flush and hand back the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.output
    }

    /// Number of bits written so far, including those still queued.
    pub fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.q_bits as usize
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bit_len() / 8, self.bit_len() % 8)
    }
}
