//! Pure presentation metrics over a snapshot. No I/O.

use crate::models::ProductMention;

/// Fallbacks when the service omits the per-product self-assessment.
const DEFAULT_CONFIDENCE: u64 = 70;
const DEFAULT_EVIDENCE: u64 = 1;
/// One convention everywhere: 5 points per independent supporting post.
const EVIDENCE_BONUS: u64 = 5;

/// Bounded 0-100 reliability of one product's numbers: base confidence plus
/// a bonus per evidence unit, saturating at 100.
pub fn reliability(confidence_score: Option<u64>, evidence_count: Option<u64>) -> u64 {
    let base = confidence_score.unwrap_or(DEFAULT_CONFIDENCE);
    // Saturate: the wire puts no ceiling on evidenceCount.
    let bonus = evidence_count
        .unwrap_or(DEFAULT_EVIDENCE)
        .saturating_mul(EVIDENCE_BONUS);
    base.saturating_add(bonus).min(100)
}

pub fn product_reliability(p: &ProductMention) -> u64 {
    reliability(p.confidence_score, p.evidence_count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    MentionsThisWeek,
    TrendingScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Column sort state for a product table: selecting the active key again
/// flips direction, selecting a new key resets to descending.
#[derive(Debug, Clone, Copy)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey) -> Self {
        SortConfig {
            key,
            direction: SortDirection::Desc,
        }
    }

    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = match self.direction {
                SortDirection::Desc => SortDirection::Asc,
                SortDirection::Asc => SortDirection::Desc,
            };
        } else {
            self.key = key;
            self.direction = SortDirection::Desc;
        }
    }
}

/// Stable sort over one numeric column; equal keys keep input order, no
/// secondary key.
pub fn sort_products(products: &mut [ProductMention], config: SortConfig) {
    products.sort_by(|a, b| {
        let ord = match config.key {
            SortKey::MentionsThisWeek => a.mentions_this_week.cmp(&b.mentions_this_week),
            SortKey::TrendingScore => a.trending_score.total_cmp(&b.trending_score),
        };
        match config.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Top-5 limited releases, in input order.
pub fn limited_releases(products: &[ProductMention]) -> Vec<&ProductMention> {
    products
        .iter()
        .filter(|p| p.is_limited_release)
        .take(5)
        .collect()
}

/// Top-6 core staples, in input order.
pub fn core_products(products: &[ProductMention]) -> Vec<&ProductMention> {
    products
        .iter()
        .filter(|p| !p.is_limited_release)
        .take(6)
        .collect()
}

pub fn by_category<'a>(products: &'a [ProductMention], category: &str) -> Vec<&'a ProductMention> {
    products
        .iter()
        .filter(|p| p.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Header-card aggregates for one snapshot.
#[derive(Debug, Clone)]
pub struct ScanStats {
    pub total_mentions: u64,
    pub avg_trending: f64,
    pub positive_share: u64, // percent
    pub top_product: Option<String>,
}

pub fn scan_stats(products: &[ProductMention]) -> ScanStats {
    let total_mentions = products.iter().map(|p| p.mentions_this_week).sum();
    let avg_trending = if products.is_empty() {
        0.0
    } else {
        products.iter().map(|p| p.trending_score).sum::<f64>() / products.len() as f64
    };
    let positive = products
        .iter()
        .filter(|p| p.sentiment.eq_ignore_ascii_case("positive"))
        .count();
    let positive_share = if products.is_empty() {
        0
    } else {
        (positive as f64 / products.len() as f64 * 100.0).round() as u64
    };
    let top_product = products
        .iter()
        .max_by(|a, b| a.trending_score.total_cmp(&b.trending_score))
        .map(|p| p.name.clone());

    ScanStats {
        total_mentions,
        avg_trending,
        positive_share,
        top_product,
    }
}
