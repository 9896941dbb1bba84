//! Stream cipher primitives used to expand the working key into random
//! bytes.
//!
//! The keystream is indexed by a 64 bit counter [`nonce::Nonce`]; keys are
//! [`key::Key`] values which are wiped on drop.

pub mod key;
pub mod nonce;
pub mod salsa20_stream;
