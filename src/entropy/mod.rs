//! Seed suppliers.
//!
//! A [`RandomSeed`] fills the 64 byte pool image once, when the generator is
//! built. [`SystemRandomSeed`] combines every available operating system
//! source, plus any caller provided ones, through a rolling SHA-512 hash so
//! that a single weak source cannot weaken the result.

mod fixed;
mod os;
#[cfg(all(unix, feature = "dev-urandom"))]
mod urandom;

pub use fixed::FixedRandomSeed;
pub use os::OsRandomSeed;
#[cfg(all(unix, feature = "dev-urandom"))]
pub use urandom::DevUrandomSeed;

use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::{kdf::sha512_roll, pool::SEED_LENGTH, Error};

/// A provider of the permanent seed material
pub trait RandomSeed {
    /// A short name, used in logs and errors
    fn name(&self) -> &'static str;

    /// Fill `buffer` with seed material
    fn get(&mut self, buffer: &mut [u8; SEED_LENGTH]) -> Result<(), Error>;
}

impl<T: RandomSeed + ?Sized> RandomSeed for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn get(&mut self, buffer: &mut [u8; SEED_LENGTH]) -> Result<(), Error> {
        (**self).get(buffer)
    }
}

/// Combines several seed sources.
///
/// Each source that succeeds is folded into a rolling SHA-512 state; sources
/// that fail are logged and skipped. The combination fails only when no
/// source at all succeeds.
pub struct SystemRandomSeed {
    sources: Vec<Box<dyn RandomSeed + Send>>,
}

impl SystemRandomSeed {
    /// The operating system sources
    #[must_use]
    pub fn new() -> Self {
        let mut seed = Self::empty();
        seed.add_source(OsRandomSeed);
        #[cfg(all(unix, feature = "dev-urandom"))]
        seed.add_source(DevUrandomSeed::default());
        seed
    }

    /// No source at all, to be completed with [`Self::with_source`]
    #[must_use]
    pub fn empty() -> Self {
        Self { sources: vec![] }
    }

    /// Append an additional source
    #[must_use]
    pub fn with_source<S: RandomSeed + Send + 'static>(mut self, source: S) -> Self {
        self.add_source(source);
        self
    }

    pub fn add_source<S: RandomSeed + Send + 'static>(&mut self, source: S) {
        self.sources.push(Box::new(source));
    }

    #[must_use]
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }
}

impl Default for SystemRandomSeed {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSeed for SystemRandomSeed {
    fn name(&self) -> &'static str {
        "system"
    }

    fn get(&mut self, buffer: &mut [u8; SEED_LENGTH]) -> Result<(), Error> {
        let mut state = [0_u8; SEED_LENGTH];
        let mut sample = [0_u8; SEED_LENGTH];
        let mut successes = 0_usize;
        for source in &mut self.sources {
            match source.get(&mut sample) {
                Ok(()) => {
                    sha512_roll(&mut state, &sample);
                    successes += 1;
                }
                Err(e) => warn!("seed source {} failed: {}", source.name(), e),
            }
        }
        sample.zeroize();
        if successes == 0 {
            state.zeroize();
            return Err(Error::Initialization(format!(
                "none of the {} seed sources succeeded",
                self.sources.len()
            )));
        }
        debug!(
            "seed material gathered from {}/{} sources",
            successes,
            self.sources.len()
        );
        buffer.copy_from_slice(&state);
        state.zeroize();
        Ok(())
    }
}
