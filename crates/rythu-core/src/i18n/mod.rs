//! Localization: typed text keys, per-language tables and the translator.
//!
//! Lookups follow a fixed order: the active language, then
//! [`Language::FALLBACK`], then the key's own name.

mod tables;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use strum::{EnumIter, IntoStaticStr};

use crate::language::Language;

/// Every piece of display text the core knows about.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TextKey {
    // Chat
    ChatbotName,
    ChatbotInitialMessage,
    ChatbotQuickQuestions,
    ChatbotSuggestedQuestion1,
    ChatbotSuggestedQuestion2,
    ChatbotSuggestedQuestion3,
    InputPlaceholder,
    SendMessage,
    SearchSources,
    ErrorFetchingResponse,
    ApiKeyNotConfigured,
    ApiKeyInvalid,
    RequestInFlight,
    LanguageChanged,

    // Voice
    VoiceInput,
    Listening,
    VoiceUnsupported,
    VoiceStartFailed,
    VoiceRecognitionError,

    // Market
    MandiRates,
    MyCrops,
    All,
    Grains,
    Vegetables,
    Pulses,
    Other,
    TrendUp,
    TrendDown,
    TrendStable,

    // Crops
    Cotton,
    Paddy,
    Turmeric,
    Maize,
    RedGram,
    Tomato,
    Soybean,
    Chilli,

    // Markets
    NizamabadMarket,
    KarimnagarMarket,
    WarangalMarket,
    AdilabadMarket,
    HyderabadMarket,

    // Crop guide
    CropGuide,
    Kharif,
    Rabi,
    SowingJuneJuly,
    SowingOctNov,
    Duration100Days,
    Duration120Days,
    Duration150Days,
    AiHighlySuitable,
    AiSuitable,

    // Home
    WeatherTitle,
    Forecast,
    Today,
    Tomorrow,
    DayAfterTomorrow,
    Sunny,
    PartlyCloudy,
    Cloudy,
    RainExpected,
    MyCropAlertTitle,
    MarketReport,
    AiTipTitle,
    TipCottonPinkBollwormTitle,
    TipCottonPinkBollwormContent,
}

impl TextKey {
    /// The key's camelCase name, used as last-resort display text.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Per-language string tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    tables: HashMap<Language, HashMap<TextKey, String>>,
}

impl Catalog {
    /// An empty catalog; every lookup falls through to the key name.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The tables shipped with the application.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for language in Language::all() {
            for (key, text) in tables::entries(language) {
                catalog.insert(language, *key, *text);
            }
        }
        catalog
    }

    pub fn insert(&mut self, language: Language, key: TextKey, text: impl Into<String>) {
        self.tables
            .entry(language)
            .or_default()
            .insert(key, text.into());
    }

    pub fn get(&self, language: Language, key: TextKey) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|table| table.get(&key))
            .map(String::as_str)
    }
}

/// Resolves [`TextKey`]s for one active language.
#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    catalog: Arc<Catalog>,
}

impl Translator {
    pub fn new(language: Language, catalog: Arc<Catalog>) -> Self {
        Self { language, catalog }
    }

    /// Translator over the builtin tables.
    pub fn builtin(language: Language) -> Self {
        Self::new(language, Arc::new(Catalog::builtin()))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Same catalog, different active language.
    pub fn with_language(&self, language: Language) -> Self {
        Self {
            language,
            catalog: Arc::clone(&self.catalog),
        }
    }

    pub fn t(&self, key: TextKey) -> String {
        self.catalog
            .get(self.language, key)
            .or_else(|| self.catalog.get(Language::FALLBACK, key))
            .unwrap_or_else(|| key.name())
            .to_string()
    }

    /// Like [`Translator::t`], then replaces `{0}`, `{1}`, ... with `args`.
    /// Each placeholder is substituted at its first occurrence only.
    pub fn t_args(&self, key: TextKey, args: &[&dyn Display]) -> String {
        let mut text = self.t(key);
        for (index, arg) in args.iter().enumerate() {
            text = text.replacen(&format!("{{{index}}}"), &arg.to_string(), 1);
        }
        text
    }
}
