//! Common types for system-font storage

use std::fmt;
use std::sync::Arc;

/// System title identifier, displayed as 16 uppercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TitleId(pub u64);

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}

/// Logical system font, one per slot of the font table.
///
/// Variant order is table order: fonts sharing a source container are kept
/// adjacent so the container is opened once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FontKind {
    Standard = 0,
    NintendoExtension = 1,
    NintendoExtension2 = 2,
    Korean = 3,
    ChineseSimplified = 4,
    ChineseSimplifiedExtension = 5,
    ChineseTraditional = 6,
}

impl FontKind {
    /// Number of font slots.
    pub const COUNT: usize = 7;

    /// All fonts, in table order.
    pub const ALL: [FontKind; FontKind::COUNT] = [
        FontKind::Standard,
        FontKind::NintendoExtension,
        FontKind::NintendoExtension2,
        FontKind::Korean,
        FontKind::ChineseSimplified,
        FontKind::ChineseSimplifiedExtension,
        FontKind::ChineseTraditional,
    ];

    /// Slot index of this font.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontKind::Standard => "Standard",
            FontKind::NintendoExtension => "NintendoExtension",
            FontKind::NintendoExtension2 => "NintendoExtension2",
            FontKind::Korean => "Korean",
            FontKind::ChineseSimplified => "ChineseSimplified",
            FontKind::ChineseSimplifiedExtension => "ChineseSimplifiedExtension",
            FontKind::ChineseTraditional => "ChineseTraditional",
        }
    }
}

impl fmt::Display for FontKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to one decoded font.
///
/// Holds shared ownership of the decoded buffer, so a handle obtained from
/// [`FontStore::font`](crate::FontStore::font) stays valid even after the
/// store is cleared.
#[derive(Debug, Clone)]
pub struct FontData {
    kind: FontKind,
    raw: Arc<Vec<u8>>,
}

impl FontData {
    /// Invariant: `raw.len()` is greater than the 8-byte header.
    pub(crate) fn new(kind: FontKind, raw: Arc<Vec<u8>>) -> Self {
        debug_assert!(raw.len() > bfttf::HEADER_LEN);
        Self { kind, raw }
    }

    pub fn kind(&self) -> FontKind {
        self.kind
    }

    /// The decoded TTF bytes, with the opaque 8-byte header stripped.
    pub fn bytes(&self) -> &[u8] {
        &self.raw[bfttf::HEADER_LEN..]
    }

    /// Length of [`bytes`](Self::bytes).
    pub fn len(&self) -> usize {
        self.raw.len() - bfttf::HEADER_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_id_displays_as_padded_hex() {
        assert_eq!(TitleId(0x0100000000000811).to_string(), "0100000000000811");
        assert_eq!(TitleId(0x42).to_string(), "0000000000000042");
    }

    #[test]
    fn font_kind_all_matches_slot_indices() {
        for (i, kind) in FontKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
