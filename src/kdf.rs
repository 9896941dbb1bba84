use sha2::{Digest, Sha256, Sha512};

use crate::symmetric_crypto::salsa20_stream::{Key, KEY_LENGTH};

/// Derive the working stream key from the full entropy pool image.
///
/// - `pool_image` : the permanent seed followed by the collected entropy
pub fn sha256_derive(pool_image: &[u8]) -> Key {
    let digest: [u8; KEY_LENGTH] = Sha256::digest(pool_image).into();
    Key::from(digest)
}

/// Fold `sample` into a rolling SHA-512 `state`:
/// `state = SHA-512(state || sample)`
pub fn sha512_roll(state: &mut [u8; 64], sample: &[u8]) {
    let mut hasher = Sha512::new();
    hasher.update(&state[..]);
    hasher.update(sample);
    state.copy_from_slice(&hasher.finalize());
}
