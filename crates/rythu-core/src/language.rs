//! Display languages supported by the assistant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

use crate::error::RythuError;

/// A display language. Drives greeting text, the speech locale and the
/// language hint sent to the AI backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Telugu,
    English,
    Hindi,
}

impl Language {
    /// Language a fresh install starts in.
    pub const DEFAULT: Language = Language::Telugu;

    /// Language consulted when a key is missing from the active table.
    pub const FALLBACK: Language = Language::English;

    /// BCP-47 tag handed to the speech recognizer.
    pub fn speech_locale(self) -> &'static str {
        match self {
            Language::Telugu => "te-IN",
            Language::Hindi => "hi-IN",
            Language::English => "en-US",
        }
    }

    /// Lowercase name, also the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Language::Telugu => "telugu",
            Language::English => "english",
            Language::Hindi => "hindi",
        }
    }

    /// Name of the language written in its own script.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Telugu => "తెలుగు",
            Language::English => "English",
            Language::Hindi => "हिन्दी",
        }
    }

    pub fn all() -> impl Iterator<Item = Language> {
        Language::iter()
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = RythuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "te" | "telugu" => Ok(Language::Telugu),
            "en" | "english" => Ok(Language::English),
            "hi" | "hindi" => Ok(Language::Hindi),
            other => Err(RythuError::invalid_input(format!(
                "Unknown language '{other}' (expected te, en or hi)"
            ))),
        }
    }
}
