use std::fmt::Debug;
use zeroize::Zeroize;

/// A fixed size secret key, wiped from memory when dropped.
///
/// No `PartialEq`: compare [`Key::as_array`] explicitly where needed.
pub struct Key<const KEY_LENGTH: usize>([u8; KEY_LENGTH]);

impl<const KEY_LENGTH: usize> Key<KEY_LENGTH> {
    /// An all-zero key, used as a placeholder until the first derivation
    #[must_use]
    pub const fn zero() -> Self {
        Self([0_u8; KEY_LENGTH])
    }

    #[must_use]
    pub const fn as_array(&self) -> &[u8; KEY_LENGTH] {
        &self.0
    }
}

impl<const KEY_LENGTH: usize> From<[u8; KEY_LENGTH]> for Key<KEY_LENGTH> {
    fn from(b: [u8; KEY_LENGTH]) -> Self {
        Self(b)
    }
}

// never print key material
impl<const KEY_LENGTH: usize> Debug for Key<KEY_LENGTH> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key<{}>(..)", KEY_LENGTH)
    }
}

impl<const KEY_LENGTH: usize> Zeroize for Key<KEY_LENGTH> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<const KEY_LENGTH: usize> Drop for Key<KEY_LENGTH> {
    fn drop(&mut self) {
        self.zeroize();
    }
}
