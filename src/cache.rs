use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::models::TrendSnapshot;
use crate::options::Region;

/// Filename namespace version; bumping it invalidates every old entry by key
/// change alone, no migration.
const CACHE_NAMESPACE: &str = "brand_pulse_v2";

/// Last-good snapshot per region, one JSON file each. Overwritten wholesale
/// on every successful scan; no expiry, no size bound, no cross-region merge.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SnapshotCache { dir: dir.into() }
    }

    fn entry_path(&self, region: Region) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", CACHE_NAMESPACE, region.key()))
    }

    pub fn save(&self, region: Region, snapshot: &TrendSnapshot) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create cache dir {}", self.dir.display()))?;
        let path = self.entry_path(region);
        let body = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
        debug!("Snapshot cached - region={}, path={}", region.key(), path.display());
        Ok(())
    }

    /// Returns the last saved snapshot, or None when absent. A corrupt entry
    /// is logged and treated as absent, never surfaced to the caller.
    pub fn load(&self, region: Region) -> Option<TrendSnapshot> {
        let path = self.entry_path(region);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                debug!("Cache miss - region={}", region.key());
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => {
                debug!("Cache hit - region={}", region.key());
                Some(snapshot)
            }
            Err(e) => {
                warn!(
                    "Corrupt cache entry treated as miss - region={}, path={}, error={}",
                    region.key(),
                    path.display(),
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> TrendSnapshot {
        TrendSnapshot {
            products: Vec::new(),
            historical_top5: Vec::new(),
            global_trends: Vec::new(),
            sources: vec![crate::models::GroundingSource {
                title: "r/HEB thread".to_string(),
                uri: "https://reddit.com/r/HEB/x".to_string(),
            }],
            scan_confidence: 80,
            generated_at: "2026-08-30T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn save_then_load_round_trips_per_region() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.save(Region::Austin, &snapshot()).unwrap();

        let loaded = cache.load(Region::Austin).expect("entry for austin");
        assert_eq!(loaded.scan_confidence, 80);
        assert_eq!(loaded.sources.len(), 1);
        assert!(cache.load(Region::Dallas).is_none());
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let path = cache.entry_path(Region::Houston);
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(&path, b"{not json").unwrap();
        assert!(cache.load(Region::Houston).is_none());
    }

    #[test]
    fn save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.save(Region::All, &snapshot()).unwrap();

        let mut newer = snapshot();
        newer.scan_confidence = 95;
        newer.sources.clear();
        cache.save(Region::All, &newer).unwrap();

        let loaded = cache.load(Region::All).unwrap();
        assert_eq!(loaded.scan_confidence, 95);
        assert!(loaded.sources.is_empty());
    }
}
