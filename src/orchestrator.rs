use anyhow::{bail, Context, Result};
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::cache::SnapshotCache;
use crate::client::scan_brand_trends;
use crate::config::ApiConfig;
use crate::metrics::by_category;
use crate::models::TrendSnapshot;
use crate::options::{AnalysisMode, LookbackWindow, Region};
use crate::prompts::build_scan_prompt;
use crate::render::{render_dashboard, render_product_detail, DashboardStatus};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub struct ScanOptions {
    pub mode: AnalysisMode,
    pub window: LookbackWindow,
    pub region: Region,
    pub offline: bool,
    pub detail: Option<String>,
    pub category: Option<String>,
    pub output_dir: String,
}

fn persist(output_dir: &str, region: Region, snapshot: &TrendSnapshot, dashboard: &str) -> Result<()> {
    let dir = std::path::Path::new(output_dir).join(region.key());
    std::fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

    std::fs::write(dir.join("snapshot.full.json"), serde_json::to_vec_pretty(snapshot)?)?;
    debug!("Wrote snapshot.full.json");

    std::fs::write(dir.join("dashboard.md"), dashboard.as_bytes())?;
    debug!("Wrote dashboard.md");

    info!("Output persisted - directory={}", dir.display());
    Ok(())
}

/// One full fetch-and-render cycle for the active region.
///
/// The cached snapshot is loaded up front, so data for a region is on hand
/// before any fresh scan completes. The client re-raises failures; this is
/// the boundary that turns them into an ERROR dashboard with previous data
/// retained. Only with no cache at all does a failed scan propagate.
pub async fn run_scan(cfg: Option<&ApiConfig>, opts: &ScanOptions, cache: &SnapshotCache) -> Result<()> {
    let cycle_start = std::time::Instant::now();
    info!(
        "Scan cycle started - mode={}, window={}, region={}",
        opts.mode.key(),
        opts.window.key(),
        opts.region.key()
    );

    let cached = cache.load(opts.region);
    if let Some(snap) = &cached {
        info!(
            "Cached snapshot available - region={}, generated_at={}, products={}",
            opts.region.key(),
            snap.generated_at,
            snap.products.len()
        );
    }

    let (snapshot, status) = if opts.offline {
        match cached {
            Some(snap) => (snap, DashboardStatus::Stale),
            None => bail!(
                "offline mode with no cached snapshot for region '{}'",
                opts.region.key()
            ),
        }
    } else {
        let cfg = cfg.context("a loaded config is required unless --offline")?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let prompt = build_scan_prompt(opts.mode, opts.window, opts.region);
        debug!("Prompt built - length={} chars", prompt.len());

        match scan_brand_trends(&client, cfg, &prompt).await {
            Ok(bundle) => {
                let snapshot = TrendSnapshot {
                    products: bundle.payload.products,
                    historical_top5: bundle.payload.historical_top5,
                    global_trends: bundle.payload.global_trends,
                    sources: bundle.sources,
                    scan_confidence: bundle.payload.scan_confidence.min(100),
                    generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                };
                if let Err(e) = cache.save(opts.region, &snapshot) {
                    // A failed cache write never fails the scan.
                    warn!("Cache write failed - region={}, error={:#}", opts.region.key(), e);
                }
                (snapshot, DashboardStatus::Completed)
            }
            Err(e) => match cached {
                Some(snap) => {
                    error!("Scan failed, falling back to cache - error={:#}", e);
                    (snap, DashboardStatus::Error)
                }
                None => {
                    error!("Scan failed with no cached fallback - error={:#}", e);
                    return Err(e);
                }
            },
        }
    };

    if let Some(name) = &opts.detail {
        match render_product_detail(&snapshot, name) {
            Some(detail) => println!("{}", detail),
            None => bail!("no product named '{}' in the current snapshot", name),
        }
        return Ok(());
    }

    // Presentation-side category filter; the persisted snapshot stays complete.
    let view = match &opts.category {
        Some(cat) => {
            let mut view = snapshot.clone();
            view.products = by_category(&snapshot.products, cat)
                .into_iter()
                .cloned()
                .collect();
            debug!(
                "Category filter applied - category={}, products={}/{}",
                cat,
                view.products.len(),
                snapshot.products.len()
            );
            view
        }
        None => snapshot.clone(),
    };

    let dashboard = render_dashboard(&view, opts.mode, opts.region, status);
    persist(&opts.output_dir, opts.region, &snapshot, &dashboard)?;
    println!("{}", dashboard);

    info!(
        "Scan cycle completed - duration={:.2}s, status={:?}, products={}",
        cycle_start.elapsed().as_secs_f32(),
        status,
        snapshot.products.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroundingSource, TrendSnapshot};

    fn cached_snapshot() -> TrendSnapshot {
        TrendSnapshot {
            products: Vec::new(),
            historical_top5: Vec::new(),
            global_trends: Vec::new(),
            sources: vec![GroundingSource {
                title: "t".into(),
                uri: "https://example.com".into(),
            }],
            scan_confidence: 60,
            generated_at: "2026-08-29T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn offline_mode_serves_the_cached_region_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.save(Region::Austin, &cached_snapshot()).unwrap();

        let opts = ScanOptions {
            mode: AnalysisMode::Strict,
            window: LookbackWindow::Days7,
            region: Region::Austin,
            offline: true,
            detail: None,
            category: None,
            output_dir: out.path().to_string_lossy().into_owned(),
        };
        run_scan(None, &opts, &cache).await.unwrap();

        let written = out.path().join("austin").join("dashboard.md");
        let md = std::fs::read_to_string(written).unwrap();
        assert!(md.contains("last cached snapshot"));
    }

    #[tokio::test]
    async fn offline_mode_without_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let opts = ScanOptions {
            mode: AnalysisMode::Breakout,
            window: LookbackWindow::Days7,
            region: Region::Dallas,
            offline: true,
            detail: None,
            category: None,
            output_dir: "out".to_string(),
        };
        assert!(run_scan(None, &opts, &cache).await.is_err());
    }
}
