use log::error;

use crate::huffman_coding::huffman_codes::Code;

/// Packs variable length codes into a byte stream, most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Meaningful bits (1-8) in the final byte once finish() has run; 0 if
    /// no bits were ever appended.
    pub last_bits: u8,
    queue: u64,
    q_bits: u32,
    total_bits: u64,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of size specified. Call finish() to
    /// flush the bit queue to the buffer once the last code has been appended.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            last_bits: 0,
            queue: 0,
            q_bits: 0,
            total_bits: 0,
        }
    }

    /// Internal bitstream write function common to all append calls.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Put up to 56 bits on the queue. Only the `len` low bits of `bits` are used.
    fn push_bits(&mut self, bits: u64, len: u32) {
        if len == 0 {
            return;
        }
        self.queue <<= len; //shift queue by bit length
        self.queue |= bits & (u64::MAX >> (64 - len)); //add data portion to queue
        self.q_bits += len; //update depth of queue bits
        self.total_bits += len as u64;
        self.write_stream();
    }

    /// Append one code to the stream.
    pub fn append(&mut self, code: Code) {
        // The queue holds at most 7 pending bits, so long codes go in two halves.
        if code.len > 56 {
            self.push_bits(code.bits >> 32, code.len - 32);
            self.push_bits(code.bits, 32);
        } else {
            self.push_bits(code.bits, code.len);
        }
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// signficant bits, and records how many bits of the last byte are data.
    pub fn finish(&mut self) {
        self.last_bits = match self.total_bits {
            0 => 0,
            bits => ((bits + 7) % 8 + 1) as u8,
        };
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits = 8;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Hand over the completed bytes, leaving the output buffer empty.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Total number of bits appended so far.
    pub fn bits(&self) -> u64 {
        self.total_bits
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.total_bits / 8, self.total_bits % 8)
    }
}
