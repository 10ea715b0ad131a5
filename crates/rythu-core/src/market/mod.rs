//! Static market data: mandi price boards and the seasonal crop guide.

mod crop_guide;
mod mandi;

pub use crop_guide::{CropGuideItem, CropSeason, crop_guide, crops_for_season};
pub use mandi::{
    CropCategory, MandiRate, PricePoint, RateFilter, TrendDirection, format_inr, mandi_rates,
};
