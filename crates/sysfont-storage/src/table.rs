//! Static system-font table
//!
//! Maps each [`FontKind`] to the system title holding it and the BFTTF path
//! inside that title's data archive. Lookup is an exhaustive match, so a
//! font without a table entry cannot compile.

use crate::types::{FontKind, TitleId};

/// Shared-font system titles.
pub const TITLE_FONT_STANDARD: TitleId = TitleId(0x0100000000000811);
pub const TITLE_FONT_NINTENDO_EXTENSION: TitleId = TitleId(0x0100000000000810);
pub const TITLE_FONT_KOREAN: TitleId = TitleId(0x0100000000000812);
pub const TITLE_FONT_CHINESE_TRADITIONAL: TitleId = TitleId(0x0100000000000813);
pub const TITLE_FONT_CHINESE_SIMPLIFIED: TitleId = TitleId(0x0100000000000814);

/// One entry of the font table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontDescriptor {
    /// System title whose data archive holds the font.
    pub title_id: TitleId,
    /// Path of the BFTTF file inside that archive.
    pub path: &'static str,
}

impl FontKind {
    /// Table entry for this font.
    pub fn descriptor(self) -> FontDescriptor {
        match self {
            FontKind::Standard => FontDescriptor {
                title_id: TITLE_FONT_STANDARD,
                path: "/nintendo_udsg-r_std_003.bfttf",
            },
            FontKind::NintendoExtension => FontDescriptor {
                title_id: TITLE_FONT_NINTENDO_EXTENSION,
                path: "/nintendo_ext_003.bfttf",
            },
            FontKind::NintendoExtension2 => FontDescriptor {
                title_id: TITLE_FONT_NINTENDO_EXTENSION,
                path: "/nintendo_ext2_003.bfttf",
            },
            FontKind::Korean => FontDescriptor {
                title_id: TITLE_FONT_KOREAN,
                path: "/nintendo_udsg-r_ko_003.bfttf",
            },
            FontKind::ChineseSimplified => FontDescriptor {
                title_id: TITLE_FONT_CHINESE_SIMPLIFIED,
                path: "/nintendo_udsg-r_org_zh-cn_003.bfttf",
            },
            FontKind::ChineseSimplifiedExtension => FontDescriptor {
                title_id: TITLE_FONT_CHINESE_SIMPLIFIED,
                path: "/nintendo_udsg-r_ext_zh-cn_003.bfttf",
            },
            FontKind::ChineseTraditional => FontDescriptor {
                title_id: TITLE_FONT_CHINESE_TRADITIONAL,
                path: "/nintendo_udjxh-db_zh-tw_003.bfttf",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Entries sharing a container must be adjacent so `load` opens each
    /// container exactly once per run.
    #[test]
    fn shared_containers_are_grouped() {
        let mut seen = HashSet::new();
        let mut prev = None;
        for kind in FontKind::ALL {
            let title_id = kind.descriptor().title_id;
            if prev != Some(title_id) {
                assert!(seen.insert(title_id), "container {title_id} split across runs");
                prev = Some(title_id);
            }
        }
    }

    #[test]
    fn paths_are_unique_and_absolute() {
        let mut paths = HashSet::new();
        for kind in FontKind::ALL {
            let path = kind.descriptor().path;
            assert!(path.starts_with('/'));
            assert!(paths.insert(path));
        }
    }
}
