//! Home screen cards: local weather, the user's crop alert and the AI tip.

use serde::{Deserialize, Serialize};

use crate::i18n::{TextKey, Translator};
use crate::market::{MandiRate, TrendDirection, format_inr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    RainExpected,
}

impl WeatherCondition {
    pub fn text_key(self) -> TextKey {
        match self {
            WeatherCondition::Sunny => TextKey::Sunny,
            WeatherCondition::PartlyCloudy => TextKey::PartlyCloudy,
            WeatherCondition::Cloudy => TextKey::Cloudy,
            WeatherCondition::RainExpected => TextKey::RainExpected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForecastDay {
    pub day: TextKey,
    /// Degrees Celsius.
    pub temperature_c: i32,
    pub condition: WeatherCondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherInfo {
    pub temperature_c: i32,
    pub condition: WeatherCondition,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherInfo {
    /// Localized current conditions, e.g. `32°C, Sunny`.
    pub fn summary(&self, t: &Translator) -> String {
        format!("{}°C, {}", self.temperature_c, t.t(self.condition.text_key()))
    }
}

impl ForecastDay {
    pub fn summary(&self, t: &Translator) -> String {
        format!(
            "{}: {}°C, {}",
            t.t(self.day),
            self.temperature_c,
            t.t(self.condition.text_key())
        )
    }
}

/// Static weather card. There is no live weather source.
pub fn weather() -> WeatherInfo {
    let day = |day, temperature_c, condition| ForecastDay {
        day,
        temperature_c,
        condition,
    };
    WeatherInfo {
        temperature_c: 32,
        condition: WeatherCondition::Sunny,
        forecast: vec![
            day(TextKey::Today, 32, WeatherCondition::Sunny),
            day(TextKey::Tomorrow, 30, WeatherCondition::PartlyCloudy),
            day(TextKey::DayAfterTomorrow, 28, WeatherCondition::RainExpected),
        ],
    }
}

/// Latest price and direction for the user's first crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MyCropAlert {
    pub crop: TextKey,
    pub market: TextKey,
    /// Rupees per quintal.
    pub price: u32,
    pub trend: TrendDirection,
}

impl MyCropAlert {
    pub fn summary(&self, t: &Translator) -> String {
        format!(
            "{} @ {}: {} ({})",
            t.t(self.crop),
            t.t(self.market),
            format_inr(self.price),
            t.t(self.trend.text_key())
        )
    }
}

/// Builds the alert from the first rate marked as the user's crop.
pub fn my_crop_alert(rates: &[MandiRate]) -> Option<MyCropAlert> {
    rates
        .iter()
        .find(|rate| rate.is_user_crop)
        .map(|rate| MyCropAlert {
            crop: rate.crop,
            market: rate.market,
            price: rate.price(),
            trend: rate.trend_direction(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiTip {
    pub id: &'static str,
    pub title: TextKey,
    pub content: TextKey,
}

pub fn ai_tip() -> AiTip {
    AiTip {
        id: "tip1",
        title: TextKey::TipCottonPinkBollwormTitle,
        content: TextKey::TipCottonPinkBollwormContent,
    }
}
