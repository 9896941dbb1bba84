use ::salsa20::{
    cipher::{KeyIvInit, StreamCipher},
    Salsa20,
};

pub const KEY_LENGTH: usize = 32;
pub const NONCE_LENGTH: usize = super::nonce::Nonce::LENGTH;

pub type Key = crate::symmetric_crypto::key::Key<KEY_LENGTH>;

/// Salsa20/20 keystream with a 256 bit key and a 64 bit nonce,
/// block counter starting at zero
#[derive(Debug)]
pub struct Salsa20Stream;

impl Salsa20Stream {
    /// XOR the keystream for `(key, nonce)` into `bytes`, in place
    pub fn apply_keystream(key: &Key, nonce: &[u8; NONCE_LENGTH], bytes: &mut [u8]) {
        let mut cipher = Salsa20::new(
            ::salsa20::Key::from_slice(key.as_array()),
            ::salsa20::Nonce::from_slice(nonce),
        );
        cipher.apply_keystream(bytes);
    }
}
