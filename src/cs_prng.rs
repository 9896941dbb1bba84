use rand_core::{impls, CryptoRng, RngCore};

use crate::Random;

impl RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    // large requests XOR over the destination: start from zeros so the
    // output does not depend on what the caller's buffer held
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
        self.bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for Random {}
