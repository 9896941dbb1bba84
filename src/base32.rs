//! Base32 with the alphabet `0123456789bcdfghjklmnpqrstuvwxyz`.
//!
//! Bits are consumed least significant first: each input byte is appended
//! above the bits left over from the previous one, and characters are
//! emitted from the low 5 bits of that accumulator. A trailing partial group
//! is emitted as one last character.

use crate::Error;

pub const ALPHABET: &[u8; 32] = b"0123456789bcdfghjklmnpqrstuvwxyz";

/// Number of characters needed to encode `input_length` bytes
#[must_use]
pub const fn encoded_length(input_length: usize) -> usize {
    (input_length * 8 + 4) / 5
}

/// Encode `input` into `output`, returning the number of characters written.
///
/// If `output` has room left after the encoding, a NUL is written right
/// after the last character (and not counted).
///
/// Returns [`Error::Base32TooBig`] when `output` is too small; `output` is
/// then completely filled with the leading characters of the encoding.
pub fn encode(output: &mut [u8], input: &[u8]) -> Result<usize, Error> {
    let mut out_index = 0_usize;
    let mut work = 0_u32;
    let mut bits = 0_u32;
    let mut emit = |work: &mut u32, bits: &mut u32| -> Result<(), Error> {
        let slot = output.get_mut(out_index).ok_or(Error::Base32TooBig)?;
        *slot = ALPHABET[(*work & 31) as usize];
        out_index += 1;
        *work >>= 5;
        *bits = bits.saturating_sub(5);
        Ok(())
    };
    for &byte in input {
        work |= u32::from(byte) << bits;
        bits += 8;
        while bits >= 5 {
            emit(&mut work, &mut bits)?;
        }
    }
    if bits > 0 {
        emit(&mut work, &mut bits)?;
    }
    if let Some(terminator) = output.get_mut(out_index) {
        *terminator = 0;
    }
    Ok(out_index)
}

/// Encode `input` into a newly allocated `String`
#[must_use]
pub fn encode_to_string(input: &[u8]) -> String {
    let mut out = vec![0_u8; encoded_length(input.len())];
    // the buffer is sized exactly, the encoding cannot run out of space
    let written = encode(&mut out, input).unwrap_or(out.len());
    out.truncate(written);
    out.into_iter().map(char::from).collect()
}
