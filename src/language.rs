//! Languages the translation intent can target.

/// Source language code that asks the translation service to detect the input language.
pub const AUTO_DETECT_SOURCE: &str = "auto";

/// A target language offered by the bot, keyed by the name the `language` slot resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    French,
    German,
    Chinese,
    Japanese,
    Norwegian,
    Spanish,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 6] = [
        TargetLanguage::French,
        TargetLanguage::German,
        TargetLanguage::Chinese,
        TargetLanguage::Japanese,
        TargetLanguage::Norwegian,
        TargetLanguage::Spanish,
    ];

    /// Look up a language by its slot value. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "French" => Some(TargetLanguage::French),
            "German" => Some(TargetLanguage::German),
            "Chinese" => Some(TargetLanguage::Chinese),
            "Japanese" => Some(TargetLanguage::Japanese),
            "Norwegian" => Some(TargetLanguage::Norwegian),
            "Spanish" => Some(TargetLanguage::Spanish),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TargetLanguage::French => "French",
            TargetLanguage::German => "German",
            TargetLanguage::Chinese => "Chinese",
            TargetLanguage::Japanese => "Japanese",
            TargetLanguage::Norwegian => "Norwegian",
            TargetLanguage::Spanish => "Spanish",
        }
    }

    /// Two-letter code understood by the translation service.
    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::French => "fr",
            TargetLanguage::German => "de",
            TargetLanguage::Chinese => "zh",
            TargetLanguage::Japanese => "ja",
            TargetLanguage::Norwegian => "no",
            TargetLanguage::Spanish => "es",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
