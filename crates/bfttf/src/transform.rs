//! In-place BFTTF scrambling and descrambling
//!
//! The transform XORs every little-endian 32-bit word from byte offset 8
//! through the end of the buffer with [`KEY`](crate::KEY). The first 8 bytes
//! are an opaque header and are left untouched.

use tracing::trace;

use crate::{Error, HEADER_LEN, KEY, Result};

/// Check the transform preconditions without touching the buffer.
///
/// A valid BFTTF buffer is longer than the 8-byte header and a whole number
/// of 32-bit words.
fn check(data: &[u8]) -> Result<()> {
    if data.len() <= HEADER_LEN {
        return Err(Error::TooSmall {
            len: data.len(),
            min: HEADER_LEN,
        });
    }
    if data.len() % 4 != 0 {
        return Err(Error::Misaligned { len: data.len() });
    }
    Ok(())
}

/// Descramble a BFTTF buffer in place.
///
/// On error the buffer is left byte-for-byte unmodified.
pub fn descramble(data: &mut [u8]) -> Result<()> {
    check(data)?;

    trace!("descrambling {} payload bytes", data.len() - HEADER_LEN);

    for word in data[HEADER_LEN..].chunks_exact_mut(4) {
        let value = u32::from_le_bytes([word[0], word[1], word[2], word[3]]) ^ KEY;
        word.copy_from_slice(&value.to_le_bytes());
    }

    Ok(())
}

/// Scramble a raw font buffer in place.
///
/// The XOR transform is an involution, so this is the same operation as
/// [`descramble`]; both names are kept so call sites read correctly.
pub fn scramble(data: &mut [u8]) -> Result<()> {
    descramble(data)
}

/// The font payload of a (descrambled) BFTTF buffer, header stripped.
pub fn payload(data: &[u8]) -> Result<&[u8]> {
    if data.len() <= HEADER_LEN {
        return Err(Error::TooSmall {
            len: data.len(),
            min: HEADER_LEN,
        });
    }
    Ok(&data[HEADER_LEN..])
}
