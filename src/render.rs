use url::Url;

use crate::metrics::{
    core_products, limited_releases, product_reliability, scan_stats, sort_products, SortConfig,
    SortKey,
};
use crate::models::{ProductMention, TrendSnapshot};
use crate::options::{AnalysisMode, Region};

const SOURCE_FEED_CAP: usize = 12;
const CHART_WIDTH: usize = 30;

/// Dashboard status banner. ERROR still renders whatever data is on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardStatus {
    Completed,
    Stale,
    Error,
}

fn hostname(uri: &str) -> String {
    Url::parse(uri)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| uri.to_string())
}

fn bar(score: f64, max: f64) -> String {
    let filled = if max > 0.0 {
        ((score / max) * CHART_WIDTH as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(CHART_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(CHART_WIDTH - filled))
}

fn product_row(md: &mut String, p: &ProductMention, viral: bool) {
    let velocity = if viral {
        format!("{:.1}x", p.trending_score)
    } else {
        p.mentions_this_week.to_string()
    };
    md.push_str(&format!(
        "| {} | {} | {} | {} | {} | {}% |\n",
        p.name,
        p.flavor_variant.as_deref().unwrap_or("Standard Release"),
        p.category,
        velocity,
        p.sentiment,
        product_reliability(p)
    ));
}

fn product_table(md: &mut String, title: &str, subtitle: &str, rows: &[ProductMention], viral: bool) {
    if rows.is_empty() {
        return;
    }
    md.push_str(&format!("## {}\n", title));
    md.push_str(&format!("_{}_\n\n", subtitle));
    md.push_str(&format!(
        "| Product | Variant | Category | {} | Sentiment | Reliability |\n",
        if viral { "Velocity" } else { "Mentions" }
    ));
    md.push_str("|---|---|---|---|---|---|\n");
    for p in rows {
        product_row(md, p, viral);
    }
    md.push('\n');
}

/// Render the whole dashboard from one immutable snapshot. No mutation, no
/// I/O; the orchestrator decides where the text goes.
pub fn render_dashboard(
    snapshot: &TrendSnapshot,
    mode: AnalysisMode,
    region: Region,
    status: DashboardStatus,
) -> String {
    let mut md = String::new();
    md.push_str("# H-E-B Brand Pulse\n\n");
    md.push_str(&format!(
        "Mode: **{}** | Region: **{}** | Generated: {} | Scan confidence: {}%\n\n",
        mode.key().to_uppercase(),
        region.label(),
        snapshot.generated_at,
        snapshot.scan_confidence
    ));

    match status {
        DashboardStatus::Completed => {}
        DashboardStatus::Stale => {
            md.push_str("> Showing the last cached snapshot for this region; no fresh scan ran.\n\n");
        }
        DashboardStatus::Error => {
            md.push_str("> **Scan failed.** Showing previously cached data; re-run to retry.\n\n");
        }
    }

    if snapshot.is_empty() {
        md.push_str("_No signal for this region yet. Run a scan._\n");
        return md;
    }

    let stats = scan_stats(&snapshot.products);
    md.push_str("## Signal Overview\n");
    md.push_str(&format!("- Weekly mentions: **{}**\n", stats.total_mentions));
    md.push_str(&format!("- Avg trending index: **{:.1}x** vs 120d baseline\n", stats.avg_trending));
    md.push_str(&format!("- Positive sentiment: **{}%**\n", stats.positive_share));
    if let Some(top) = &stats.top_product {
        md.push_str(&format!("- Top viral product: **{}**\n", top));
    }
    md.push('\n');

    // Trending chart: every product by velocity, descending.
    let mut charted = snapshot.products.clone();
    sort_products(&mut charted, SortConfig::new(SortKey::TrendingScore));
    let max = charted.first().map(|p| p.trending_score).unwrap_or(0.0);
    md.push_str("## Trending Velocity\n```\n");
    for p in &charted {
        md.push_str(&format!("{:<28} {} {:.1}x\n", truncate(&p.name, 28), bar(p.trending_score, max), p.trending_score));
    }
    md.push_str("```\n\n");

    // Each table opens on its own default column, descending: viral by
    // velocity, core by raw mentions.
    let mut viral: Vec<ProductMention> = limited_releases(&snapshot.products)
        .into_iter()
        .cloned()
        .collect();
    sort_products(&mut viral, SortConfig::new(SortKey::TrendingScore));
    let mut core: Vec<ProductMention> = core_products(&snapshot.products)
        .into_iter()
        .cloned()
        .collect();
    sort_products(&mut core, SortConfig::new(SortKey::MentionsThisWeek));

    product_table(
        &mut md,
        "Viral Anomalies & Limited Releases",
        "Top 5 breakthrough spikes",
        &viral,
        true,
    );
    product_table(
        &mut md,
        "Core Product & Evergreen Volume",
        "Top 6 high-engagement staples",
        &core,
        false,
    );

    if !snapshot.historical_top5.is_empty() {
        md.push_str("## 120-Day Champions\n");
        for (i, h) in snapshot.historical_top5.iter().enumerate() {
            md.push_str(&format!(
                "{}. **{}** ({}) - {} mentions. {}\n",
                i + 1,
                h.name,
                h.category,
                h.total_mention_volume,
                h.rank_reason
            ));
        }
        md.push('\n');
    }

    if !snapshot.global_trends.is_empty() {
        md.push_str("## Global Food Trends\n");
        for t in &snapshot.global_trends {
            let tags = match (&t.trend_type, &t.momentum) {
                (Some(ty), Some(m)) => format!(" [{} / {}]", ty, m),
                (Some(ty), None) => format!(" [{}]", ty),
                (None, Some(m)) => format!(" [{}]", m),
                (None, None) => String::new(),
            };
            md.push_str(&format!(
                "- **{}** on {} ({}){} - {}\n",
                t.name, t.platform, t.volume_label, tags, t.description
            ));
        }
        md.push('\n');
    }

    if !snapshot.sources.is_empty() {
        md.push_str("## Intelligence Discovery Feed\n");
        for s in snapshot.sources.iter().take(SOURCE_FEED_CAP) {
            md.push_str(&format!("- [{}]({}) via {}\n", s.title, s.uri, hostname(&s.uri)));
        }
        if snapshot.sources.len() > SOURCE_FEED_CAP {
            md.push_str(&format!(
                "\n+ {} additional sources processed in this scan\n",
                snapshot.sources.len() - SOURCE_FEED_CAP
            ));
        }
        md.push('\n');
    }

    md
}

/// Detail view for one product, looked up case-insensitively by name.
pub fn render_product_detail(snapshot: &TrendSnapshot, name: &str) -> Option<String> {
    let p = snapshot
        .products
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))?;

    let mut md = String::new();
    md.push_str(&format!("# {}\n", p.name));
    if let Some(v) = &p.flavor_variant {
        md.push_str(&format!("Variant: {}\n", v));
    }
    md.push_str(&format!("Category: {} | Platform: {}\n\n", p.category, p.top_platform));
    md.push_str(&format!(
        "Consensus score: **{}%** ({} independent mentions)\n\n",
        product_reliability(p),
        p.evidence_count.unwrap_or(1)
    ));
    md.push_str(&format!(
        "Weekly mentions: {} | 120d baseline: {:.1} | Velocity: {:.1}x\n\n",
        p.mentions_this_week, p.average_120_day, p.trending_score
    ));
    md.push_str(&format!("Why trending: {}\n", p.why_trending));
    if let Some(summary) = &p.evidence_summary {
        md.push_str(&format!("\nEvidence: {}\n", summary));
    }
    if !p.sources.is_empty() {
        md.push_str("\nSources:\n");
        for s in &p.sources {
            md.push_str(&format!("- [{}]({})\n", s.title, s.uri));
        }
    }
    Some(md)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
