use crate::constants::{DRAW_SCALE, MIN_SEED_BYTES, MULBERRY_INCREMENT};
use crate::error::ScrambleError;

/// Mulberry32 generator shared with the tile-scrambling backend.
/// Every step is 32-bit wrapping arithmetic so the stream matches the
/// JavaScript `Math.imul` / `>>>` implementation bit for bit.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Build a generator from decoded seed bytes. Only the first four bytes
    /// are read, as a big-endian word.
    pub fn from_seed_bytes(bytes: &[u8]) -> Result<Self, ScrambleError> {
        if bytes.len() < MIN_SEED_BYTES {
            return Err(ScrambleError::SeedTooShort {
                actual: bytes.len(),
                min: MIN_SEED_BYTES,
            });
        }

        let word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        Ok(Self {
            state: word ^ MULBERRY_INCREMENT,
        })
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(a | 1);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
        t ^ (t >> 14)
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / DRAW_SCALE
    }

    /// `floor(next_f64() * bound)`, the index pick used by the shuffle.
    pub fn next_index(&mut self, bound: usize) -> usize {
        (self.next_f64() * bound as f64) as usize
    }
}
