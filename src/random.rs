//! The random generator.
//!
//! A permanent seed read once from a [`RandomSeed`] is combined with entropy
//! collected through [`Random::add_random`]; the whole pool is hashed with
//! SHA-256 into a temporary seed, which keys a Salsa20 keystream indexed by a
//! 64 bit nonce.
//!
//! - The nonce is incremented on every use of the keystream and never reset,
//!   so feeding the same entropy again can never make the output repeat.
//! - The temporary seed is re-derived every [`RESEED_INTERVAL`] calls to
//!   [`Random::add_random`]. An attacker who learns the internal state can
//!   predict the output only until the next re-derivation, and must guess a
//!   full 256 bit value per interval.
//! - Entropy samples are XORed into the pool, so samples carrying no entropy
//!   cannot remove entropy already collected; the permanent seed is never
//!   altered, so a broken entropy feed only costs forward secrecy.
//!
//! Small requests are served from a [`BUFFER_SIZE`] byte buffer so that
//! they do not each run the cipher.

use std::fmt::Debug;

use tracing::{debug, error, trace};
use zeroize::Zeroize;

use crate::{
    entropy::{RandomSeed, SystemRandomSeed},
    kdf::sha256_derive,
    pool::{EntropyPool, ENTROPY_WORDS},
    symmetric_crypto::{
        nonce::Nonce,
        salsa20_stream::{Key, Salsa20Stream},
    },
    Error,
};

/// Size of the output buffer used to serve small requests
pub const BUFFER_SIZE: usize = 128;

/// Number of calls to [`Random::add_random`] between two derivations of the
/// temporary seed
pub const RESEED_INTERVAL: u32 = 256;

/// A cryptographically secure pseudo random generator: Salsa20 keyed from
/// a permanent seed and a self-healing entropy pool
pub struct Random {
    /// Key of the keystream, derived from the pool
    temp_seed: Key,
    /// Incremented every time the keystream is used, never reset
    nonce: Nonce,
    /// Keystream generated by the last stir
    buffer: [u8; BUFFER_SIZE],
    /// Next unread byte of `buffer`
    cursor: usize,
    /// Calls to `add_random` since the last derivation
    entropy_counter: u32,
    pool: EntropyPool,
}

impl Random {
    /// Build a generator seeded from the operating system sources
    pub fn new() -> Result<Self, Error> {
        Self::with_seed(&mut SystemRandomSeed::new())
    }

    /// Build a generator from the seed material provided by `seed`.
    ///
    /// The seed supplier is called exactly once. The generator is returned
    /// with its temporary seed derived and its output buffer filled.
    pub fn with_seed<S: RandomSeed + ?Sized>(seed: &mut S) -> Result<Self, Error> {
        let mut pool = EntropyPool::new();
        if let Err(e) = seed.get(pool.image_mut()) {
            error!("Unable to initialize secure random number generator: {}", e);
            return Err(match e {
                Error::Initialization(_) => e,
                e => Error::Initialization(e.to_string()),
            });
        }

        let mut random = Self {
            temp_seed: Key::zero(),
            nonce: Nonce::default(),
            buffer: [0_u8; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            entropy_counter: RESEED_INTERVAL - 1,
            pool,
        };
        // crosses the reseed threshold: first derivation of the temporary seed
        random.add_random(0);
        random.stir();
        debug!("random generator seeded from {}", seed.name());
        Ok(random)
    }

    /// Add a sample to the entropy pool.
    ///
    /// The sample is rotated and XORed into one word of the collected
    /// entropy. It is valued at 1 bit of entropy: every
    /// [`RESEED_INTERVAL`] calls, the temporary seed is derived again from
    /// the permanent seed and the collected entropy.
    pub fn add_random(&mut self, sample: u32) {
        let counter = self.entropy_counter;
        let rotated = sample.rotate_left((counter / 8) % 31);
        self.pool.mix_word(counter as usize % ENTROPY_WORDS, rotated);
        self.entropy_counter += 1;
        if self.entropy_counter >= RESEED_INTERVAL {
            self.reseed();
            self.entropy_counter = 0;
        }
    }

    fn reseed(&mut self) {
        self.temp_seed = sha256_derive(self.pool.image());
        debug!("temporary seed derived, nonce at {}", self.nonce);
    }

    /// Refill the output buffer.
    ///
    /// The keystream is XORed over what the buffer already holds, so every
    /// refill also carries the previous block.
    fn stir(&mut self) {
        let nonce = self.nonce.advance();
        Salsa20Stream::apply_keystream(&self.temp_seed, &nonce.to_le_bytes(), &mut self.buffer);
        self.cursor = 0;
        trace!("output buffer stirred with nonce {}", nonce);
    }

    /// Copy as many unread buffered bytes as fit in `dest`
    fn copy_buffered(&mut self, dest: &mut [u8]) -> usize {
        let len = dest.len().min(BUFFER_SIZE - self.cursor);
        dest[..len].copy_from_slice(&self.buffer[self.cursor..self.cursor + len]);
        self.cursor += len;
        len
    }

    /// Fill `dest` with random bytes.
    ///
    /// Requests larger than [`BUFFER_SIZE`] are served straight from the
    /// keystream, leaving the buffered bytes untouched: the keystream is then
    /// XORed over the content of `dest`, so callers wanting plain keystream
    /// pass a zeroed buffer.
    pub fn bytes(&mut self, dest: &mut [u8]) {
        if dest.len() > BUFFER_SIZE {
            // big request, don't buffer it
            let nonce = self.nonce.advance();
            // TODO: this path encodes the nonce in host byte order while
            // stir() uses little-endian; the two only agree on
            // little-endian hosts.
            Salsa20Stream::apply_keystream(&self.temp_seed, &nonce.to_ne_bytes(), dest);
            return;
        }

        let mut offset = 0_usize;
        loop {
            offset += self.copy_buffered(&mut dest[offset..]);
            if offset == dest.len() {
                return;
            }
            self.stir();
        }
    }

    /// Generate a vector of random bytes
    pub fn random_bytes(&mut self, len: usize) -> Vec<u8> {
        let mut bytes = vec![0_u8; len];
        self.bytes(&mut bytes);
        bytes
    }
}

impl Debug for Random {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Random")
            .field("nonce", &self.nonce)
            .field("cursor", &self.cursor)
            .field("entropy_counter", &self.entropy_counter)
            .finish_non_exhaustive()
    }
}

impl Drop for Random {
    fn drop(&mut self) {
        self.buffer.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::{Random, BUFFER_SIZE, RESEED_INTERVAL};
    use crate::{
        entropy::{FixedRandomSeed, RandomSeed},
        pool::SEED_LENGTH,
        symmetric_crypto::nonce::Nonce,
        Error,
    };

    fn zero_seeded() -> Random {
        Random::with_seed(&mut FixedRandomSeed::new([0_u8; SEED_LENGTH])).unwrap()
    }

    fn numbered_seed() -> FixedRandomSeed {
        let mut image = [0_u8; SEED_LENGTH];
        for (i, b) in image.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        FixedRandomSeed::new(image)
    }

    struct FailingSeed;

    impl RandomSeed for FailingSeed {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn get(&mut self, _buffer: &mut [u8; SEED_LENGTH]) -> Result<(), Error> {
            Err(Error::SeedSource {
                source_name: "failing",
                reason: "no entropy".to_string(),
            })
        }
    }

    #[test]
    fn test_construction_state() {
        let random = zero_seeded();
        assert_eq!(random.nonce, Nonce::new(1));
        assert_eq!(random.cursor, 0);
        assert_eq!(random.entropy_counter, 0);
        assert_eq!(
            hex::encode(random.temp_seed.as_array()),
            // SHA-256 of 64 zero bytes
            "f5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b"
        );
    }

    #[test]
    fn test_known_answer_zero_seed() {
        let mut random = zero_seeded();
        let mut out = [0_u8; 16];
        random.bytes(&mut out);
        // Salsa20 keystream under SHA-256(0^64), nonce 0
        assert_eq!(hex::encode(out), "21c7819c191657227fcff3660ed6c312");
    }

    #[test]
    fn test_refill_chains_previous_block() {
        let mut random = zero_seeded();
        let first = random.random_bytes(BUFFER_SIZE);
        assert_eq!(
            hex::encode(&first[..16]),
            "21c7819c191657227fcff3660ed6c312"
        );
        // keystream(nonce 1) XOR keystream(nonce 0)
        let next = random.random_bytes(16);
        assert_eq!(hex::encode(next), "46e04bd8387e3985c761a191cebf2c97");
        assert_eq!(random.nonce, Nonce::new(2));
    }

    #[test]
    fn test_determinism() {
        let sizes = [1_usize, 7, 128, 300, 16, 0, 129, 64, 127, 2, 1000, 33];
        let mut a = Random::with_seed(&mut numbered_seed()).unwrap();
        let mut b = Random::with_seed(&mut numbered_seed()).unwrap();
        for (i, size) in sizes.iter().enumerate() {
            a.add_random(i as u32);
            b.add_random(i as u32);
            assert_eq!(a.random_bytes(*size), b.random_bytes(*size));
        }
        assert_eq!(a.nonce, b.nonce);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = zero_seeded();
        let mut b = Random::with_seed(&mut numbered_seed()).unwrap();
        assert_ne!(a.random_bytes(32), b.random_bytes(32));
    }

    #[test]
    fn test_reseed_timing() {
        let mut random = zero_seeded();
        let initial = *random.temp_seed.as_array();
        for i in 1..RESEED_INTERVAL {
            random.add_random(i.wrapping_mul(0x9e37_79b9));
            assert_eq!(random.temp_seed.as_array(), &initial, "injection {}", i);
        }
        random.add_random(0);
        let second = *random.temp_seed.as_array();
        assert_ne!(second, initial);
        assert_eq!(random.entropy_counter, 0);

        for i in 1..RESEED_INTERVAL {
            random.add_random(i);
            assert_eq!(random.temp_seed.as_array(), &second);
        }
        random.add_random(7);
        assert_ne!(random.temp_seed.as_array(), &second);
    }

    #[test]
    fn test_reseed_even_with_zero_entropy() {
        // the key is derived again from the same pool image
        let mut random = Random::with_seed(&mut numbered_seed()).unwrap();
        let initial = *random.temp_seed.as_array();
        for _ in 0..RESEED_INTERVAL {
            random.add_random(0);
        }
        assert_eq!(random.temp_seed.as_array(), &initial);
        assert_eq!(random.entropy_counter, 0);
    }

    #[test]
    fn test_zero_injection_keeps_collected_entropy() {
        let mut random = Random::with_seed(&mut numbered_seed()).unwrap();
        let before = *random.pool.image();
        for _ in 0..1000 {
            random.add_random(0);
        }
        assert_eq!(random.pool.image(), &before);
    }

    #[test]
    fn test_injection_rotation() {
        let mut random = zero_seeded();
        // counter 0: word 0, no rotation
        random.add_random(1);
        assert_eq!(random.pool.entropy_word(0), 1);
        // counters 1..8 leave word 0 alone
        for _ in 1..8 {
            random.add_random(0);
        }
        // counter 8: word 0, rotated by 1
        random.add_random(1);
        assert_eq!(random.pool.entropy_word(0), 1 ^ 2);
        // counter 9: word 1, rotation wraps the high bit
        random.add_random(0x8000_0000);
        assert_eq!(random.pool.entropy_word(1), 1);
        // counter 248: rotation (248 / 8) % 31 == 0
        for _ in 10..248 {
            random.add_random(0);
        }
        assert_eq!(random.entropy_counter, 248);
        random.add_random(0x10);
        assert_eq!(random.pool.entropy_word(0), 1 ^ 2 ^ 0x10);
        // the permanent seed is never touched
        assert_eq!(random.pool.permanent_seed(), &[0_u8; 32][..]);
    }

    #[test]
    fn test_zero_length_request() {
        let mut random = zero_seeded();
        random.bytes(&mut [0_u8; 5]);
        let buffer = random.buffer;
        let mut empty: [u8; 0] = [];
        random.bytes(&mut empty);
        assert_eq!(random.nonce, Nonce::new(1));
        assert_eq!(random.cursor, 5);
        assert_eq!(random.buffer, buffer);
    }

    #[test]
    fn test_full_buffer_request() {
        let mut random = zero_seeded();
        // buffer full: drained without a stir
        random.random_bytes(BUFFER_SIZE);
        assert_eq!(random.nonce, Nonce::new(1));
        assert_eq!(random.cursor, BUFFER_SIZE);
        // buffer empty: exactly one stir
        random.random_bytes(BUFFER_SIZE);
        assert_eq!(random.nonce, Nonce::new(2));
        assert_eq!(random.cursor, BUFFER_SIZE);
        // partly read buffer: one stir
        random.random_bytes(BUFFER_SIZE);
        random.random_bytes(10);
        let nonce = random.nonce;
        random.random_bytes(BUFFER_SIZE);
        assert_eq!(random.nonce.value(), nonce.value() + 1);
        assert_eq!(random.cursor, 10);
    }

    #[test]
    fn test_large_request_bypasses_buffer() {
        let mut a = Random::with_seed(&mut numbered_seed()).unwrap();
        let mut b = Random::with_seed(&mut numbered_seed()).unwrap();
        assert_eq!(a.random_bytes(20), b.random_bytes(20));

        let buffer = a.buffer;
        let large = a.random_bytes(BUFFER_SIZE + 1);
        assert_eq!(large.len(), BUFFER_SIZE + 1);
        assert_eq!(a.buffer, buffer);
        assert_eq!(a.cursor, 20);
        assert_eq!(a.nonce.value(), b.nonce.value() + 1);

        // the small requests continue where they were
        assert_eq!(a.random_bytes(50), b.random_bytes(50));
    }

    #[test]
    fn test_large_request_xors_destination() {
        let mut a = zero_seeded();
        let mut b = zero_seeded();
        let mut zeros = [0_u8; 200];
        let mut ones = [0xff_u8; 200];
        a.bytes(&mut zeros);
        b.bytes(&mut ones);
        for (z, o) in zeros.iter().zip(ones.iter()) {
            assert_eq!(*o, *z ^ 0xff);
        }
        assert_eq!(a.nonce, b.nonce);
    }

    #[test]
    fn test_small_request_overwrites_destination() {
        let mut a = zero_seeded();
        let mut b = zero_seeded();
        let mut zeros = [0_u8; BUFFER_SIZE];
        let mut ones = [0xff_u8; BUFFER_SIZE];
        a.bytes(&mut zeros);
        b.bytes(&mut ones);
        assert_eq!(zeros, ones);
    }

    #[cfg(target_endian = "little")]
    #[test]
    fn test_large_request_known_answer() {
        let mut random = zero_seeded();
        let out = random.random_bytes(200);
        // Salsa20 keystream under SHA-256(0^64), nonce 1
        assert_eq!(hex::encode(&out[..16]), "6727ca4421686ea7b8ae52f7c069ef85");
        assert_eq!(random.nonce, Nonce::new(2));
    }

    #[test]
    fn test_output_does_not_repeat() {
        let mut random = zero_seeded();
        let mut blocks = Vec::new();
        for _ in 0..64 {
            blocks.push(random.random_bytes(BUFFER_SIZE));
        }
        for i in 0..blocks.len() {
            for j in i + 1..blocks.len() {
                assert_ne!(blocks[i], blocks[j]);
            }
        }
    }

    #[test]
    fn test_failing_seed() {
        let res = Random::with_seed(&mut FailingSeed);
        assert!(matches!(res, Err(Error::Initialization(_))));
    }

    #[test]
    fn test_default_construction() {
        let mut a = Random::new().unwrap();
        let mut b = Random::new().unwrap();
        assert_ne!(a.random_bytes(32), b.random_bytes(32));
    }

    #[test]
    fn test_debug_hides_state() {
        let random = zero_seeded();
        let printed = format!("{:?}", random);
        assert!(printed.contains("nonce"));
        assert!(!printed.contains("temp_seed"));
        assert!(!printed.contains("buffer"));
    }
}
