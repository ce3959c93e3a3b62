use serde::{Deserialize, Serialize};

/// One product surfaced by the scan. Field names stay camelCase on the wire
/// to match the declared output schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMention {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub flavor_variant: Option<String>,
    pub is_limited_release: bool,
    pub mentions_this_week: u64,
    #[serde(rename = "average120Day")]
    pub average_120_day: f64,
    /// mentionsThisWeek / average120Day as reported by the service; carried
    /// verbatim, not recomputed.
    pub trending_score: f64,
    pub sentiment: String, // "positive" | "neutral" | "negative"
    pub top_platform: String,
    #[serde(default)]
    pub last_mentioned: Option<String>,
    pub why_trending: String,
    #[serde(default)]
    pub confidence_score: Option<u64>,
    #[serde(default)]
    pub evidence_count: Option<u64>,
    #[serde(default)]
    pub evidence_summary: Option<String>,
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalProduct {
    pub name: String,
    pub total_mention_volume: u64,
    pub category: String,
    pub rank_reason: String,
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFoodTrend {
    pub name: String,
    pub platform: String, // "Reddit" | "TikTok" | "Search"
    pub description: String,
    pub volume_label: String,
    #[serde(default)]
    pub trend_type: Option<String>, // Brand | Recipe | Ingredient | Culture
    #[serde(default)]
    pub momentum: Option<String>, // Rising | Peak | Fading
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

/// A citation asserted by the search grounding layer. Never deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// Everything one successful scan produced. Replaced wholesale on each fetch;
/// never merged or diffed against the previous snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSnapshot {
    pub products: Vec<ProductMention>,
    pub historical_top5: Vec<HistoricalProduct>,
    pub global_trends: Vec<GlobalFoodTrend>,
    pub sources: Vec<GroundingSource>,
    /// 0-100, self-reported by the service for the whole scan.
    pub scan_confidence: u64,
    pub generated_at: String, // ISO8601
}

impl TrendSnapshot {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.historical_top5.is_empty()
            && self.global_trends.is_empty()
    }
}
