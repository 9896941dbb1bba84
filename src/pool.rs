//! The entropy pool: a permanent seed read once from the seed supplier, and
//! a mutable region into which entropy samples are XORed.
//!
//! Both halves live in one 64 byte image, which is what gets hashed into the
//! working key:
//!
//! | bytes     | content                                             |
//! |-----------|-----------------------------------------------------|
//! | `0..32`   | permanent seed, never modified after construction   |
//! | `32..64`  | collected entropy, eight little-endian `u32` words  |

use zeroize::Zeroize;

/// Size of the whole pool image, as filled by the seed supplier
pub const SEED_LENGTH: usize = 64;
pub const PERMANENT_SEED_LENGTH: usize = 32;
/// Number of `u32` words in the collected entropy region
pub const ENTROPY_WORDS: usize = 8;

pub struct EntropyPool {
    image: [u8; SEED_LENGTH],
}

impl EntropyPool {
    /// A zeroed pool, to be filled by a seed supplier
    #[must_use]
    pub const fn new() -> Self {
        Self {
            image: [0_u8; SEED_LENGTH],
        }
    }

    /// Mutable access to the full image, for the seed supplier only
    pub(crate) fn image_mut(&mut self) -> &mut [u8; SEED_LENGTH] {
        &mut self.image
    }

    /// The full image, as hashed into the working key
    #[must_use]
    pub const fn image(&self) -> &[u8; SEED_LENGTH] {
        &self.image
    }

    #[must_use]
    pub fn permanent_seed(&self) -> &[u8] {
        &self.image[..PERMANENT_SEED_LENGTH]
    }

    #[must_use]
    pub fn collected_entropy(&self) -> &[u8] {
        &self.image[PERMANENT_SEED_LENGTH..]
    }

    /// Read word `index` of the collected entropy region
    #[must_use]
    pub fn entropy_word(&self, index: usize) -> u32 {
        let offset = PERMANENT_SEED_LENGTH + 4 * (index % ENTROPY_WORDS);
        let mut word = [0_u8; 4];
        word.copy_from_slice(&self.image[offset..offset + 4]);
        u32::from_le_bytes(word)
    }

    /// XOR `value` into word `index` of the collected entropy region.
    ///
    /// XOR can never lower the entropy already collected: a zero sample
    /// leaves the word unchanged.
    pub fn mix_word(&mut self, index: usize, value: u32) {
        let offset = PERMANENT_SEED_LENGTH + 4 * (index % ENTROPY_WORDS);
        for (b, v) in self.image[offset..offset + 4]
            .iter_mut()
            .zip(value.to_le_bytes())
        {
            *b ^= v;
        }
    }
}

impl Default for EntropyPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Zeroize for EntropyPool {
    fn zeroize(&mut self) {
        self.image.zeroize();
    }
}

impl Drop for EntropyPool {
    fn drop(&mut self) {
        self.zeroize();
    }
}
