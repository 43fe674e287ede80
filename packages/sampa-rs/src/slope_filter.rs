//! BC3 slope filter
//!
//! Walks a sample window and classifies every consecutive delta against a
//! rounding band and independent rising/falling slope thresholds. A window is
//! accepted only when no delta falls between the band and its slope threshold.
//!
//! The free functions take parameters explicitly; [`SlopeFilter`] carries a
//! stored [`FilterParameters`] and delegates to the same functions.

use crate::baseline;
use crate::error::{Result, SampaError};
use crate::types::{FilterParameters, FilterResult, Transition};
use serde::{Deserialize, Serialize};

/// Smallest window that has at least one transition
pub const MIN_POINTS: usize = 2;

/// Classify a single delta. Boundaries are inclusive on the accepted side.
#[inline]
pub fn classify(delta: f64, params: &FilterParameters) -> Transition {
    if delta == 0.0 || delta.abs() <= params.round {
        Transition::Flat
    } else if delta > 0.0 {
        if delta >= params.slope_up {
            Transition::RisingEdge
        } else {
            Transition::SlowRise
        }
    } else if delta < 0.0 {
        if -delta >= params.slope_down {
            Transition::FallingEdge
        } else {
            Transition::SlowFall
        }
    } else {
        Transition::Invalid
    }
}

/// Bounds-check `npoints` against the buffer and return the window to scan.
pub fn window(samples: &[f64], npoints: usize) -> Result<&[f64]> {
    if npoints > samples.len() {
        return Err(SampaError::InvalidArgument(format!(
            "npoints ({}) exceeds buffer length ({})",
            npoints,
            samples.len()
        )));
    }
    if npoints < MIN_POINTS {
        return Err(SampaError::InvalidArgument(format!(
            "at least {} samples are required, got {}",
            MIN_POINTS, npoints
        )));
    }
    Ok(&samples[..npoints])
}

/// Consecutive deltas of a window, `samples[i + 1] - samples[i]`
pub fn deltas(samples: &[f64]) -> impl Iterator<Item = f64> + '_ {
    samples.windows(2).map(|pair| pair[1] - pair[0])
}

/// Evaluate the first `npoints` samples. Does not allocate.
pub fn evaluate(samples: &[f64], npoints: usize, params: &FilterParameters) -> Result<FilterResult> {
    let window = window(samples, npoints)?;

    let mut first_flagged = None;
    let mut flagged = 0usize;
    for (idx, delta) in deltas(window).enumerate() {
        if classify(delta, params).is_flagged() {
            flagged += 1;
            first_flagged.get_or_insert(idx);
        }
    }

    Ok(FilterResult::new(npoints, first_flagged, flagged))
}

/// Evaluate the whole buffer
pub fn evaluate_all(samples: &[f64], params: &FilterParameters) -> Result<FilterResult> {
    evaluate(samples, samples.len(), params)
}

/// Per-transition classification of the first `npoints` samples
pub fn transitions(
    samples: &[f64],
    npoints: usize,
    params: &FilterParameters,
) -> Result<Vec<Transition>> {
    let window = window(samples, npoints)?;
    Ok(deltas(window).map(|d| classify(d, params)).collect())
}

/// Slope filter with stored parameters
///
/// Every method is equivalent to the matching free function called with
/// [`SlopeFilter::params`]. Reconfiguration needs `&mut self`, so a filter
/// shared across threads by reference is immutable for its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SlopeFilter {
    params: FilterParameters,
}

impl SlopeFilter {
    pub fn new(params: FilterParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn builder() -> SlopeFilterBuilder {
        SlopeFilterBuilder::default()
    }

    pub fn params(&self) -> &FilterParameters {
        &self.params
    }

    /// Replace all three parameters at once. On error the stored
    /// parameters are left unchanged.
    pub fn configure(&mut self, slope_down: f64, slope_up: f64, round: f64) -> Result<()> {
        self.params = FilterParameters::new(slope_down, slope_up, round)?;
        Ok(())
    }

    pub fn evaluate(&self, samples: &[f64], npoints: usize) -> Result<FilterResult> {
        evaluate(samples, npoints, &self.params)
    }

    pub fn evaluate_all(&self, samples: &[f64]) -> Result<FilterResult> {
        evaluate_all(samples, &self.params)
    }

    pub fn transitions(&self, samples: &[f64], npoints: usize) -> Result<Vec<Transition>> {
        transitions(samples, npoints, &self.params)
    }

    /// Evaluate, then apply baseline correction in place
    pub fn condition(&self, samples: &mut [f64], npoints: usize) -> Result<FilterResult> {
        baseline::condition(samples, npoints, &self.params)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SlopeFilterBuilder {
    params: FilterParameters,
}

impl SlopeFilterBuilder {
    pub fn slope_down(mut self, slope_down: f64) -> Self {
        self.params.slope_down = slope_down;
        self
    }

    pub fn slope_up(mut self, slope_up: f64) -> Self {
        self.params.slope_up = slope_up;
        self
    }

    pub fn round(mut self, round: f64) -> Self {
        self.params.round = round;
        self
    }

    pub fn build(self) -> Result<SlopeFilter> {
        SlopeFilter::new(self.params)
    }
}
