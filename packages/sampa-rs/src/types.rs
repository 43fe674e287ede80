use crate::error::{Result, SampaError};
use serde::{Deserialize, Serialize};

/// BC3 slope filter parameters
///
/// Thresholds are taken as given: zero or negative values mean "no tolerance"
/// and are never clamped. Only non-finite values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParameters {
    /// Smallest fall (as a positive magnitude) accepted as a real falling edge
    pub slope_down: f64,
    /// Smallest rise accepted as a real rising edge
    pub slope_up: f64,
    /// Half-width of the flat band around zero delta
    pub round: f64,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            slope_down: 5.0,
            slope_up: 5.0,
            round: 0.5,
        }
    }
}

impl FilterParameters {
    pub fn new(slope_down: f64, slope_up: f64, round: f64) -> Result<Self> {
        let params = Self {
            slope_down,
            slope_up,
            round,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that every threshold is finite
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("slope_down", self.slope_down),
            ("slope_up", self.slope_up),
            ("round", self.round),
        ] {
            if !value.is_finite() {
                return Err(SampaError::InvalidParameter(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Classification of one sample-to-sample delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Inside the rounding band (or exactly zero)
    Flat,
    /// Rise at or above `slope_up`
    RisingEdge,
    /// Fall at or above `slope_down` in magnitude
    FallingEdge,
    /// Rise outside the band but below `slope_up`
    SlowRise,
    /// Fall outside the band but below `slope_down`
    SlowFall,
    /// Delta is NaN
    Invalid,
}

impl Transition {
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::SlowRise | Self::SlowFall | Self::Invalid)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::RisingEdge => "rising_edge",
            Self::FallingEdge => "falling_edge",
            Self::SlowRise => "slow_rise",
            Self::SlowFall => "slow_fall",
            Self::Invalid => "invalid",
        }
    }
}

/// Verdict of one slope filter pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    pub accepted: bool,
    /// Index `i` of the first flagged transition (sample `i` to `i + 1`)
    pub first_flagged: Option<usize>,
    pub flagged_transitions: usize,
    /// Number of samples evaluated
    pub npoints: usize,
}

impl FilterResult {
    pub(crate) fn new(npoints: usize, first_flagged: Option<usize>, flagged: usize) -> Self {
        Self {
            accepted: first_flagged.is_none(),
            first_flagged,
            flagged_transitions: flagged,
            npoints,
        }
    }

    pub fn is_rejected(&self) -> bool {
        !self.accepted
    }
}

/// Per-channel sample windows, `[channel][time bin]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleTable {
    pub channels: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
}

impl SampleTable {
    pub fn new(channels: Vec<Vec<f64>>) -> Self {
        Self {
            channels,
            names: None,
        }
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Length of the longest window
    pub fn num_timebins(&self) -> usize {
        self.channels.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn channel(&self, idx: usize) -> Option<&[f64]> {
        self.channels.get(idx).map(Vec::as_slice)
    }

    pub fn channel_name(&self, idx: usize) -> String {
        self.names
            .as_ref()
            .and_then(|names| names.get(idx).cloned())
            .unwrap_or_else(|| format!("Channel {}", idx))
    }
}

/// Supported sample file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Ascii,
    Csv,
    Json,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" | "ascii" | "dat" => Some(Self::Ascii),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}
