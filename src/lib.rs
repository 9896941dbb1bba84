mod error;

pub mod base32;
pub mod cs_prng;
pub mod entropy;
pub mod kdf;
pub mod pool;
pub mod random;
pub mod symmetric_crypto;
pub mod token;

pub use crate::entropy::{RandomSeed, SystemRandomSeed};
pub use crate::error::Error;
pub use crate::random::Random;
pub use crate::token::Token;

