use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to initialize secure random number generator: {0}")]
    Initialization(String),
    #[error("Seed source {source_name} failed: {reason}")]
    SeedSource {
        source_name: &'static str,
        reason: String,
    },
    #[error("Wrong size: {given} given should be {expected}")]
    SizeError { given: usize, expected: usize },
    #[error("Not enough space in the output buffer for base32 encoding")]
    Base32TooBig,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<getrandom::Error> for Error {
    fn from(e: getrandom::Error) -> Self {
        Error::SeedSource {
            source_name: "getrandom",
            reason: e.to_string(),
        }
    }
}
