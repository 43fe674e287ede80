//! BC3 baseline conditioning
//!
//! A slope-limited baseline follower: the estimate moves toward each new
//! sample by at most `slope_up` upward and `slope_down` downward. Slow drifts
//! are absorbed into the baseline while fast pulse edges pass through.

use crate::error::Result;
use crate::slope_filter;
use crate::types::{FilterParameters, FilterResult};

#[derive(Debug, Clone, Copy)]
pub struct BaselineTracker {
    baseline: f64,
    max_rise: f64,
    max_fall: f64,
}

impl BaselineTracker {
    /// Non-positive slope limits freeze the baseline in that direction.
    pub fn new(initial: f64, params: &FilterParameters) -> Self {
        Self {
            baseline: initial,
            max_rise: params.slope_up.max(0.0),
            max_fall: params.slope_down.max(0.0),
        }
    }

    /// Current baseline estimate
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Return `sample` relative to the current baseline, then move the
    /// baseline toward `sample`.
    #[inline]
    pub fn process(&mut self, sample: f64) -> f64 {
        let corrected = sample - self.baseline;
        if corrected > 0.0 {
            self.baseline += corrected.min(self.max_rise);
        } else if corrected < 0.0 {
            self.baseline -= (-corrected).min(self.max_fall);
        }
        corrected
    }

    /// Restart tracking from `initial`, keeping the slope limits.
    pub fn reset(&mut self, initial: f64) {
        self.baseline = initial;
    }
}

/// Evaluate the window, then rewrite `samples[..npoints]` in place as
/// baseline-corrected values. Results within `round` of zero snap to 0.
///
/// The verdict is computed on the unmodified samples.
pub fn condition(
    samples: &mut [f64],
    npoints: usize,
    params: &FilterParameters,
) -> Result<FilterResult> {
    let result = slope_filter::evaluate(samples, npoints, params)?;

    let mut tracker = BaselineTracker::new(samples[0], params);
    for sample in samples[..npoints].iter_mut() {
        let corrected = tracker.process(*sample);
        *sample = if corrected.abs() <= params.round {
            0.0
        } else {
            corrected
        };
    }

    Ok(result)
}

/// Zero every sample strictly below `threshold`; returns the number kept.
pub fn zero_suppress(samples: &mut [f64], threshold: f64) -> usize {
    let mut kept = 0;
    for sample in samples.iter_mut() {
        if *sample < threshold {
            *sample = 0.0;
        } else {
            kept += 1;
        }
    }
    kept
}
