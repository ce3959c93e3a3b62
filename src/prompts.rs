use crate::options::{AnalysisMode, LookbackWindow, Region};

pub const BREAKOUT_PHRASE: &str =
    "BREAKOUT MODE: Surface early signals even at low confidence. Include products whose velocity spiked on low absolute volume, and flag weak corroboration rather than dropping it.";

pub const STRICT_PHRASE: &str =
    "STRICT MODE: Suppress any product not corroborated by at least 2 independent sources. Prefer under-reporting to speculation; discard single-thread anomalies.";

fn mode_instruction(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Breakout => BREAKOUT_PHRASE,
        AnalysisMode::Strict => STRICT_PHRASE,
    }
}

fn region_instruction(region: Region) -> &'static str {
    match region {
        Region::All => "Scope: statewide Texas signal (r/HEB, r/Texas, #HEB, #HEBHaul).",
        Region::Austin => "Scope: Austin metro only (r/Austin, r/AustinFood, #AustinEats).",
        Region::Dallas => "Scope: Dallas / Fort Worth metro only (r/Dallas, r/FortWorth, #DFWFood).",
        Region::Houston => "Scope: Houston metro only (r/Houston, r/HoustonFood, #HoustonEats).",
        Region::SanAntonio => "Scope: San Antonio metro only (r/sanantonio, r/SanAntonioFood).",
    }
}

/// Build the instruction text for one scan. Pure; the declared output shape
/// travels separately (see `schema::response_schema`).
pub fn build_scan_prompt(mode: AnalysisMode, window: LookbackWindow, region: Region) -> String {
    format!(
        r#"DATA EXTRACTION PROTOCOL:
You are an expert market analyst tracking H-E-B (H.E. Butt Grocery Company) social media presence.

SEARCH TASKS:
1. Search Reddit (r/HEB, r/Texas, r/AustinFood, r/SanAntonioFood) for H-E-B product mentions from the LAST {days} DAYS.
2. Search TikTok (#HEB, #HEBHaul, #HEBFinds) for viral videos and comment volumes from the LAST {days} DAYS.
3. Estimate 120-day historical baseline averages from historical post frequency for these SKUs.

{region}

STRICT DATA RULES:
- 'mentionsThisWeek': integer post/comment volume actually found in search grounding for the last {days} days.
- 'average120Day': realistic baseline computed as (total 120-day mentions / 17.14 weeks).
- 'trendingScore': STRICTLY (mentionsThisWeek / average120Day).
- 'confidenceScore': 0-100 self-assessment per product; 'evidenceCount': number of independent supporting posts.
- 'sources': at least 2 real URLs per product (Reddit threads, TikTok videos, forum posts) from your search grounding.

{mode}

TASK 1: PRODUCT SEGMENTATION
- VIRAL ANOMALIES (isLimitedRelease: true): exactly 5 breakthrough items.
- CORE PRODUCTS (isLimitedRelease: false): exactly 6 high-volume staples.

TASK 2: 120-DAY CHAMPIONS
- The top 5 SKUs by TOTAL mention volume over the last 120 days.

TASK 3: GLOBAL FOOD TRENDS
- 5 non-HEB trends dominating #foodtok and r/food, for industry context.

Also report 'scanConfidence' (0-100) for the scan as a whole.
Return the data in the specified JSON format. Cross-verify numbers and sources against the search results so they are proportional and realistic."#,
        days = window.days(),
        region = region_instruction(region),
        mode = mode_instruction(mode),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_prompt_carries_only_strict_phrase() {
        let p = build_scan_prompt(AnalysisMode::Strict, LookbackWindow::Days7, Region::All);
        assert!(p.contains(STRICT_PHRASE));
        assert!(!p.contains(BREAKOUT_PHRASE));
    }

    #[test]
    fn breakout_prompt_carries_only_breakout_phrase() {
        let p = build_scan_prompt(AnalysisMode::Breakout, LookbackWindow::Days14, Region::Austin);
        assert!(p.contains(BREAKOUT_PHRASE));
        assert!(!p.contains(STRICT_PHRASE));
    }

    #[test]
    fn window_days_appear_in_search_tasks() {
        let p = build_scan_prompt(AnalysisMode::Strict, LookbackWindow::Days30, Region::Houston);
        assert!(p.contains("LAST 30 DAYS"));
        assert!(p.contains("Houston metro only"));
    }
}
