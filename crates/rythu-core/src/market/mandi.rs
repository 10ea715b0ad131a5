use std::f64::consts::PI;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RythuError};
use crate::i18n::{Catalog, TextKey, Translator};
use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropCategory {
    Grains,
    Vegetables,
    Pulses,
    Other,
}

impl CropCategory {
    pub fn text_key(self) -> TextKey {
        match self {
            CropCategory::Grains => TextKey::Grains,
            CropCategory::Vegetables => TextKey::Vegetables,
            CropCategory::Pulses => TextKey::Pulses,
            CropCategory::Other => TextKey::Other,
        }
    }
}

impl std::str::FromStr for CropCategory {
    type Err = RythuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "grains" => Ok(CropCategory::Grains),
            "vegetables" => Ok(CropCategory::Vegetables),
            "pulses" => Ok(CropCategory::Pulses),
            "other" => Ok(CropCategory::Other),
            other => Err(RythuError::invalid_input(format!("Unknown crop category '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub day: u32,
    /// Rupees per quintal.
    pub price: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn text_key(self) -> TextKey {
        match self {
            TrendDirection::Up => TextKey::TrendUp,
            TrendDirection::Down => TextKey::TrendDown,
            TrendDirection::Stable => TextKey::TrendStable,
        }
    }
}

/// One crop's prices at one market for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandiRate {
    pub id: String,
    pub crop: TextKey,
    pub market: TextKey,
    pub category: CropCategory,
    pub is_user_crop: bool,
    pub trend: Vec<PricePoint>,
}

impl MandiRate {
    /// Price on the last day of the month.
    pub fn price(&self) -> u32 {
        self.trend.last().map(|p| p.price).unwrap_or_default()
    }

    /// Direction of the last day against the day before.
    pub fn trend_direction(&self) -> TrendDirection {
        match self.trend.as_slice() {
            [.., prev, last] if last.price > prev.price => TrendDirection::Up,
            [.., prev, last] if last.price < prev.price => TrendDirection::Down,
            _ => TrendDirection::Stable,
        }
    }
}

struct CropBase {
    id: &'static str,
    base_price: f64,
    crop: TextKey,
    market: TextKey,
    category: CropCategory,
    is_user_crop: bool,
}

const CROP_BASES: &[CropBase] = &[
    CropBase {
        id: "1",
        base_price: 7500.0,
        crop: TextKey::Cotton,
        market: TextKey::NizamabadMarket,
        category: CropCategory::Other,
        is_user_crop: true,
    },
    CropBase {
        id: "2",
        base_price: 2100.0,
        crop: TextKey::Paddy,
        market: TextKey::KarimnagarMarket,
        category: CropCategory::Grains,
        is_user_crop: true,
    },
    CropBase {
        id: "3",
        base_price: 8800.0,
        crop: TextKey::Turmeric,
        market: TextKey::NizamabadMarket,
        category: CropCategory::Other,
        is_user_crop: false,
    },
    CropBase {
        id: "4",
        base_price: 1900.0,
        crop: TextKey::Maize,
        market: TextKey::WarangalMarket,
        category: CropCategory::Grains,
        is_user_crop: false,
    },
    CropBase {
        id: "5",
        base_price: 6500.0,
        crop: TextKey::RedGram,
        market: TextKey::AdilabadMarket,
        category: CropCategory::Pulses,
        is_user_crop: false,
    },
    CropBase {
        id: "6",
        base_price: 1200.0,
        crop: TextKey::Tomato,
        market: TextKey::HyderabadMarket,
        category: CropCategory::Vegetables,
        is_user_crop: false,
    },
];

/// Lowest price the board will ever show.
const PRICE_FLOOR: i64 = 500;

/// Daily price: small intra-month swing, a seasonal swing (cotton is more
/// volatile), 1% drift per year away from `reference_year`, rounded to 10.
fn daily_price(base: f64, day: u32, month0: u32, year_offset: i32, volatile: bool) -> u32 {
    let mut price = base;
    price += (f64::from(day) * PI / 15.0).sin() * (base * 0.02);
    let seasonal = if volatile { 1.2 } else { 1.0 };
    price += (f64::from(month0) * PI / 6.0).cos() * (base * 0.05 * seasonal);
    price *= 1.0 + f64::from(year_offset) * 0.01;
    let rounded = ((price / 10.0).round() * 10.0) as i64;
    rounded.max(PRICE_FLOOR) as u32
}

fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| RythuError::invalid_input(format!("Invalid month {year}-{month}")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| RythuError::invalid_input(format!("Invalid month {year}-{month}")))?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Price board for `month` (1-12) of `year`, one point per day.
pub fn mandi_rates(year: i32, month: u32, reference_year: i32) -> Result<Vec<MandiRate>> {
    let days = days_in_month(year, month)?;
    let month0 = month - 1;
    let year_offset = year - reference_year;

    Ok(CROP_BASES
        .iter()
        .map(|base| {
            let volatile = base.crop == TextKey::Cotton;
            let trend = (1..=days)
                .map(|day| PricePoint {
                    day,
                    price: daily_price(base.base_price, day, month0, year_offset, volatile),
                })
                .collect();
            MandiRate {
                id: base.id.to_string(),
                crop: base.crop,
                market: base.market,
                category: base.category,
                is_user_crop: base.is_user_crop,
                trend,
            }
        })
        .collect())
}

/// Board filter: category tab, free-text search and the "my crops" toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateFilter {
    /// `None` means all categories.
    pub category: Option<CropCategory>,
    pub search: String,
    pub my_crops_only: bool,
}

impl RateFilter {
    /// Search matches crop or market names in any language, case-insensitively.
    pub fn matches(&self, rate: &MandiRate, catalog: &Catalog) -> bool {
        let category_ok = self.category.is_none_or(|c| c == rate.category);
        let my_crops_ok = !self.my_crops_only || rate.is_user_crop;
        category_ok && my_crops_ok && self.matches_search(rate, catalog)
    }

    pub fn apply<'a>(&self, rates: &'a [MandiRate], catalog: &Catalog) -> Vec<&'a MandiRate> {
        rates.iter().filter(|r| self.matches(r, catalog)).collect()
    }

    fn matches_search(&self, rate: &MandiRate, catalog: &Catalog) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        Language::all().any(|language| {
            [rate.crop, rate.market].into_iter().any(|key| {
                catalog
                    .get(language, key)
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
        })
    }
}

/// Formats rupees with Indian digit grouping, e.g. `₹1,25,000`.
pub fn format_inr(amount: u32) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("₹{},{}", groups.join(","), tail)
}

impl MandiRate {
    /// Localized one-line summary for text front ends.
    pub fn summary(&self, t: &Translator) -> String {
        format!(
            "{} - {}: {} ({})",
            t.t(self.crop),
            t.t(self.market),
            format_inr(self.price()),
            t.t(self.trend_direction().text_key())
        )
    }

    pub fn days(&self) -> usize {
        self.trend.len()
    }
}
