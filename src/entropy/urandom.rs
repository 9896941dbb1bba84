use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use super::RandomSeed;
use crate::{pool::SEED_LENGTH, Error};

const DEV_URANDOM: &str = "/dev/urandom";

/// Seed material read from a random device file, `/dev/urandom` by default
#[derive(Debug, Clone)]
pub struct DevUrandomSeed {
    path: PathBuf,
}

impl DevUrandomSeed {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for DevUrandomSeed {
    fn default() -> Self {
        Self::new(DEV_URANDOM)
    }
}

impl RandomSeed for DevUrandomSeed {
    fn name(&self) -> &'static str {
        "/dev/urandom"
    }

    fn get(&mut self, buffer: &mut [u8; SEED_LENGTH]) -> Result<(), Error> {
        File::open(&self.path)?.read_exact(buffer)?;
        Ok(())
    }
}
