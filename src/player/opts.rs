use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{FilmError, FilmResult};
use crate::prefetch::scheduler::PrefetchOpts;

/// Options controlling playback feel, prefetching and where frames are read from.
///
/// Every field has a default, so a JSON config only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerOpts {
    /// Fraction of the remaining distance covered per tick, in `(0, 1]`. Lower is smoother.
    pub ease_factor: f64,
    /// Frames requested on each side of a missing frame.
    pub burst_half_width: usize,
    /// Minimum time between two bursts, in milliseconds.
    pub burst_cooldown_ms: f64,
    /// Ticks closer than this to the previous processed tick do no work (about 60 per second).
    pub min_tick_interval_ms: f64,
    /// Manifest location relative to the source root.
    pub manifest_path: String,
    /// Prefix joined in front of every frame identifier (empty means the source root).
    pub frame_base: String,
}

impl Default for PlayerOpts {
    fn default() -> Self {
        Self {
            ease_factor: 0.1,
            burst_half_width: 8,
            burst_cooldown_ms: 100.0,
            min_tick_interval_ms: 16.0,
            manifest_path: "manifest.json".to_string(),
            frame_base: String::new(),
        }
    }
}

impl PlayerOpts {
    /// Parse options from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FilmResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| FilmError::serde(format!("parse player options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FilmResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FilmError::validation(format!("open player options '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values the player cannot run with.
    pub fn validate(&self) -> FilmResult<()> {
        if !self.ease_factor.is_finite() || self.ease_factor <= 0.0 || self.ease_factor > 1.0 {
            return Err(FilmError::validation("ease_factor must be in (0, 1]"));
        }
        if !self.burst_cooldown_ms.is_finite() || self.burst_cooldown_ms < 0.0 {
            return Err(FilmError::validation(
                "burst_cooldown_ms must be finite and >= 0",
            ));
        }
        if !self.min_tick_interval_ms.is_finite() || self.min_tick_interval_ms < 0.0 {
            return Err(FilmError::validation(
                "min_tick_interval_ms must be finite and >= 0",
            ));
        }
        if self.manifest_path.trim().is_empty() {
            return Err(FilmError::validation("manifest_path must be non-empty"));
        }
        Ok(())
    }

    pub(crate) fn prefetch(&self) -> PrefetchOpts {
        PrefetchOpts {
            burst_half_width: self.burst_half_width,
            burst_cooldown_ms: self.burst_cooldown_ms,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/player/opts.rs"]
mod tests;
