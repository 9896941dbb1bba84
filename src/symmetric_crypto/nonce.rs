use std::fmt::Display;

/// A 64 bit stream cipher nonce used as a counter.
///
/// The counter is incremented after every keystream it indexes and is never
/// reset, so a key is never used twice with the same nonce. It is assumed
/// never to wrap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Nonce(u64);

impl Nonce {
    pub const LENGTH: usize = 8;

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Little-endian encoding of the counter
    #[must_use]
    pub const fn to_le_bytes(&self) -> [u8; Self::LENGTH] {
        self.0.to_le_bytes()
    }

    /// Host byte order encoding of the counter
    #[must_use]
    pub const fn to_ne_bytes(&self) -> [u8; Self::LENGTH] {
        self.0.to_ne_bytes()
    }

    /// Returns the current value and moves the counter forward by one
    pub fn advance(&mut self) -> Self {
        let current = *self;
        self.0 = self.0.wrapping_add(1);
        current
    }
}

impl From<u64> for Nonce {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl Display for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
