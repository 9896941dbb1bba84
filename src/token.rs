use std::fmt::Display;

use crate::{base32, Random};

/// Number of random bytes drawn for each base32 chunk of a token
pub const TOKEN_BLOCK: usize = 16;

/// A NUL terminated random base32 string
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token(Vec<u8>);

impl Token {
    /// The token bytes, including the final NUL
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.0
    }

    /// The token text, without the final NUL
    #[must_use]
    pub fn as_str(&self) -> &str {
        let text = self.0.split_last().map_or(&[][..], |(_, text)| text);
        // only ever holds base32 alphabet characters
        std::str::from_utf8(text).unwrap_or_default()
    }

    /// Length in bytes, including the final NUL
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Token> for Vec<u8> {
    fn from(t: Token) -> Vec<u8> {
        t.0
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Random {
    /// Generate a random base32 token of exactly `length` bytes, the last
    /// one being a NUL terminator.
    ///
    /// Chunks of [`TOKEN_BLOCK`] random bytes are encoded one after the
    /// other until the output is full.
    pub fn base32(&mut self, length: usize) -> Token {
        if length == 0 {
            return Token(vec![]);
        }
        let mut output = vec![0_u8; length];
        let mut index = 0_usize;
        loop {
            let mut bin = [0_u8; TOKEN_BLOCK];
            self.bytes(&mut bin);
            // stop when the output is full or too small for another chunk
            match base32::encode(&mut output[index..], &bin) {
                Ok(written) if index + written < length => index += written,
                _ => break,
            }
        }
        output[length - 1] = 0;
        Token(output)
    }
}
