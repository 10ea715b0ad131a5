use serde::{Deserialize, Serialize};

use self::CropSeason::{Kharif, Rabi};
use crate::error::{Result, RythuError};
use crate::i18n::{TextKey, Translator};
use crate::i18n::TextKey::{
    AiHighlySuitable, AiSuitable, Duration100Days, Duration120Days, Duration150Days,
    SowingJuneJuly, SowingOctNov,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropSeason {
    Kharif,
    Rabi,
}

impl CropSeason {
    pub fn text_key(self) -> TextKey {
        match self {
            CropSeason::Kharif => TextKey::Kharif,
            CropSeason::Rabi => TextKey::Rabi,
        }
    }
}

impl std::str::FromStr for CropSeason {
    type Err = RythuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kharif" => Ok(CropSeason::Kharif),
            "rabi" => Ok(CropSeason::Rabi),
            other => Err(RythuError::invalid_input(format!("Unknown season '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropGuideItem {
    pub id: &'static str,
    pub name: TextKey,
    pub season: CropSeason,
    pub sowing_period: TextKey,
    pub duration: TextKey,
    pub suitability: TextKey,
}

impl CropGuideItem {
    const fn new(
        id: &'static str,
        name: TextKey,
        season: CropSeason,
        sowing_period: TextKey,
        duration: TextKey,
        suitability: TextKey,
    ) -> Self {
        Self {
            id,
            name,
            season,
            sowing_period,
            duration,
            suitability,
        }
    }

    /// Rabi entries carry the season in their name, e.g. "Paddy (Rabi)".
    pub fn display_name(&self, t: &Translator) -> String {
        match self.season {
            CropSeason::Kharif => t.t(self.name),
            CropSeason::Rabi => format!("{} ({})", t.t(self.name), t.t(TextKey::Rabi)),
        }
    }
}

const GUIDE: &[CropGuideItem] = &[
    CropGuideItem::new(
        "c1",
        TextKey::Cotton,
        Kharif,
        SowingJuneJuly,
        Duration150Days,
        AiHighlySuitable,
    ),
    CropGuideItem::new(
        "c2",
        TextKey::Paddy,
        Kharif,
        SowingJuneJuly,
        Duration120Days,
        AiSuitable,
    ),
    CropGuideItem::new(
        "c3",
        TextKey::Maize,
        Kharif,
        SowingJuneJuly,
        Duration100Days,
        AiSuitable,
    ),
    CropGuideItem::new(
        "c4",
        TextKey::RedGram,
        Kharif,
        SowingJuneJuly,
        Duration150Days,
        AiHighlySuitable,
    ),
    CropGuideItem::new(
        "c5",
        TextKey::Soybean,
        Kharif,
        SowingJuneJuly,
        Duration100Days,
        AiSuitable,
    ),
    CropGuideItem::new(
        "c6",
        TextKey::Paddy,
        Rabi,
        SowingOctNov,
        Duration120Days,
        AiSuitable,
    ),
    CropGuideItem::new(
        "c7",
        TextKey::Maize,
        Rabi,
        SowingOctNov,
        Duration100Days,
        AiSuitable,
    ),
    CropGuideItem::new(
        "c8",
        TextKey::Chilli,
        Rabi,
        SowingOctNov,
        Duration150Days,
        AiHighlySuitable,
    ),
];

pub fn crop_guide() -> &'static [CropGuideItem] {
    GUIDE
}

pub fn crops_for_season(season: CropSeason) -> Vec<&'static CropGuideItem> {
    GUIDE.iter().filter(|item| item.season == season).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    #[test]
    fn test_season_filter() {
        let kharif = crops_for_season(CropSeason::Kharif);
        let rabi = crops_for_season(CropSeason::Rabi);
        assert_eq!(kharif.len(), 5);
        assert_eq!(rabi.len(), 3);
        assert!(rabi.iter().all(|c| c.sowing_period == SowingOctNov));
        assert_eq!(kharif.len() + rabi.len(), crop_guide().len());
    }

    #[test]
    fn test_rabi_display_name() {
        let t = Translator::builtin(Language::English);
        let rabi = crops_for_season(CropSeason::Rabi);
        assert_eq!(rabi[0].display_name(&t), "Paddy (Rabi)");

        let te = t.with_language(Language::Telugu);
        assert_eq!(rabi[0].display_name(&te), "వరి (యాసంగి)");
        assert_eq!(crops_for_season(CropSeason::Kharif)[0].display_name(&te), "పత్తి");
    }

    #[test]
    fn test_parse_season() {
        assert_eq!("Rabi".parse::<CropSeason>().unwrap(), CropSeason::Rabi);
        assert!("summer".parse::<CropSeason>().is_err());
    }
}
