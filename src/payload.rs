//! The structured body the service returns, before grounding chunks are
//! attached. Top-level collections coerce null to empty; anything deeper is
//! trusted as declared.

use serde::{Deserialize, Deserializer};

use crate::models::{GlobalFoodTrend, HistoricalProduct, ProductMention};

fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPayload {
    #[serde(default, deserialize_with = "null_to_default")]
    pub products: Vec<ProductMention>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub historical_top5: Vec<HistoricalProduct>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub global_trends: Vec<GlobalFoodTrend>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub scan_confidence: u64,
}
