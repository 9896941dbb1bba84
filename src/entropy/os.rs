use super::RandomSeed;
use crate::{pool::SEED_LENGTH, Error};

/// Seed material from the operating system CSPRNG, through `getrandom`
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomSeed;

impl RandomSeed for OsRandomSeed {
    fn name(&self) -> &'static str {
        "getrandom"
    }

    fn get(&mut self, buffer: &mut [u8; SEED_LENGTH]) -> Result<(), Error> {
        getrandom::getrandom(buffer)?;
        Ok(())
    }
}
