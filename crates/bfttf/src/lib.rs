//! BFTTF (scrambled system font) transform
//!
//! Nintendo Switch system fonts are stored as BFTTF files: a standard TTF
//! payload behind an opaque 8-byte header, with every 32-bit word of the
//! payload XORed against a fixed key. The XOR is its own inverse, so the
//! same routine both scrambles and descrambles.

pub mod error;
pub mod transform;

pub use error::{Error, Result};
pub use transform::{descramble, payload, scramble};

/// Fixed 32-bit key the payload words are XORed with.
pub const KEY: u32 = 0x06186249;

/// Length of the opaque header preceding the font payload.
pub const HEADER_LEN: usize = 8;
