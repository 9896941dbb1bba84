use zeroize::Zeroize;

use super::RandomSeed;
use crate::{pool::SEED_LENGTH, Error};

/// Returns a caller supplied pool image.
///
/// The generator built from it is fully deterministic: only use it for
/// reproducible streams and known answer tests.
pub struct FixedRandomSeed {
    image: [u8; SEED_LENGTH],
}

impl FixedRandomSeed {
    #[must_use]
    pub const fn new(image: [u8; SEED_LENGTH]) -> Self {
        Self { image }
    }

    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let mut image = [0_u8; SEED_LENGTH];
        if bytes.len() != SEED_LENGTH {
            return Err(Error::SizeError {
                given: bytes.len(),
                expected: SEED_LENGTH,
            });
        }
        image.copy_from_slice(bytes);
        Ok(Self { image })
    }
}

impl RandomSeed for FixedRandomSeed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn get(&mut self, buffer: &mut [u8; SEED_LENGTH]) -> Result<(), Error> {
        buffer.copy_from_slice(&self.image);
        Ok(())
    }
}

impl Drop for FixedRandomSeed {
    fn drop(&mut self) {
        self.image.zeroize();
    }
}
