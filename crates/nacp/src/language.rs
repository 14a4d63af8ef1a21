//! NACP title languages
//!
//! The NACP holds one title record per language, in this fixed order. The
//! same indices double as bit positions in the supported-language mask.

/// Language slot of a NACP title record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Language {
    AmericanEnglish = 0,
    BritishEnglish = 1,
    Japanese = 2,
    French = 3,
    German = 4,
    LatinAmericanSpanish = 5,
    Spanish = 6,
    Italian = 7,
    Dutch = 8,
    CanadianFrench = 9,
    Portuguese = 10,
    Russian = 11,
    Korean = 12,
    TraditionalChinese = 13,
    SimplifiedChinese = 14,
    BrazilianPortuguese = 15,
}

impl Language {
    /// All languages, in title-record order.
    pub const ALL: [Language; 16] = [
        Language::AmericanEnglish,
        Language::BritishEnglish,
        Language::Japanese,
        Language::French,
        Language::German,
        Language::LatinAmericanSpanish,
        Language::Spanish,
        Language::Italian,
        Language::Dutch,
        Language::CanadianFrench,
        Language::Portuguese,
        Language::Russian,
        Language::Korean,
        Language::TraditionalChinese,
        Language::SimplifiedChinese,
        Language::BrazilianPortuguese,
    ];

    /// Language for a raw title-record index.
    pub fn from_index(index: usize) -> Option<Language> {
        Language::ALL.get(index).copied()
    }

    /// Index of this language's title record (also its bit in the
    /// supported-language mask).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::AmericanEnglish => "AmericanEnglish",
            Language::BritishEnglish => "BritishEnglish",
            Language::Japanese => "Japanese",
            Language::French => "French",
            Language::German => "German",
            Language::LatinAmericanSpanish => "LatinAmericanSpanish",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
            Language::Dutch => "Dutch",
            Language::CanadianFrench => "CanadianFrench",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Korean => "Korean",
            Language::TraditionalChinese => "TraditionalChinese",
            Language::SimplifiedChinese => "SimplifiedChinese",
            Language::BrazilianPortuguese => "BrazilianPortuguese",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
