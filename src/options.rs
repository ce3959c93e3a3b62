use clap::ValueEnum;

/// How the scan weighs its findings before reporting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnalysisMode {
    /// Surface early low-volume signals, even at low confidence.
    Breakout,
    /// Suppress anything not corroborated by multiple independent sources.
    Strict,
}

impl AnalysisMode {
    pub fn key(self) -> &'static str {
        match self {
            AnalysisMode::Breakout => "breakout",
            AnalysisMode::Strict => "strict",
        }
    }
}

/// Search horizon for weekly mention counting. The 120-day baseline is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookbackWindow {
    #[value(name = "7d")]
    Days7,
    #[value(name = "14d")]
    Days14,
    #[value(name = "30d")]
    Days30,
}

impl LookbackWindow {
    pub fn days(self) -> u32 {
        match self {
            LookbackWindow::Days7 => 7,
            LookbackWindow::Days14 => 14,
            LookbackWindow::Days30 => 30,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            LookbackWindow::Days7 => "7d",
            LookbackWindow::Days14 => "14d",
            LookbackWindow::Days30 => "30d",
        }
    }
}

/// Geographic scope of the scan; doubles as the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Region {
    All,
    Austin,
    Dallas,
    Houston,
    SanAntonio,
}

impl Region {
    pub fn key(self) -> &'static str {
        match self {
            Region::All => "all",
            Region::Austin => "austin",
            Region::Dallas => "dallas",
            Region::Houston => "houston",
            Region::SanAntonio => "san_antonio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::All => "All Texas",
            Region::Austin => "Austin",
            Region::Dallas => "Dallas / Fort Worth",
            Region::Houston => "Houston",
            Region::SanAntonio => "San Antonio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_days_match_keys() {
        assert_eq!(LookbackWindow::Days7.days(), 7);
        assert_eq!(LookbackWindow::Days14.days(), 14);
        assert_eq!(LookbackWindow::Days30.days(), 30);
        assert_eq!(LookbackWindow::Days30.key(), "30d");
    }

    #[test]
    fn region_keys_are_cache_safe() {
        for r in [
            Region::All,
            Region::Austin,
            Region::Dallas,
            Region::Houston,
            Region::SanAntonio,
        ] {
            assert!(r.key().chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
