//! Batch filtering
//!
//! Runs the slope filter (and, when enabled, baseline conditioning and zero
//! suppression) over every selected channel of a sample table. Channels are
//! independent, so they are processed in parallel.

use crate::baseline::{self, zero_suppress};
use crate::config::FilterConfig;
use crate::error::{Result, SampaError};
use crate::profile_scope;
use crate::slope_filter::SlopeFilter;
use crate::types::{FilterParameters, FilterResult, SampleTable};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result for a single channel window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelReport {
    pub channel: usize,
    pub name: String,
    pub result: FilterResult,
    /// Conditioned samples (only when conditioning is enabled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<f64>>,
    /// Samples surviving zero suppression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kept_samples: Option<usize>,
}

/// Result of filtering one sample table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub id: String,
    pub source: String,
    pub created_at: String,
    pub parameters: FilterParameters,
    pub conditioned: bool,
    pub channels: Vec<ChannelReport>,
    pub accepted: usize,
    pub rejected: usize,
    pub processing_time_ms: f64,
}

impl BatchReport {
    pub fn all_accepted(&self) -> bool {
        self.rejected == 0
    }
}

pub struct FilterPipeline {
    config: FilterConfig,
    filter: SlopeFilter,
}

impl FilterPipeline {
    pub fn new(config: FilterConfig) -> Result<Self> {
        let filter = SlopeFilter::new(config.parameters()?)?;

        if let Some(threshold) = config.zero_suppression {
            if !threshold.is_finite() {
                return Err(SampaError::InvalidParameter(format!(
                    "zero_suppression must be finite, got {}",
                    threshold
                )));
            }
        }

        Ok(Self { config, filter })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn filter(&self) -> &SlopeFilter {
        &self.filter
    }

    /// Filter one channel window
    pub fn process_channel(
        &self,
        channel: usize,
        name: String,
        samples: &[f64],
    ) -> Result<ChannelReport> {
        let npoints = self.config.npoints.unwrap_or(samples.len());

        let (result, conditioned, kept_samples) = if self.config.condition {
            let mut conditioned = samples.to_vec();
            let result = baseline::condition(&mut conditioned, npoints, self.filter.params())?;
            let kept = self
                .config
                .zero_suppression
                .map(|threshold| zero_suppress(&mut conditioned[..npoints], threshold));
            (result, Some(conditioned), kept)
        } else {
            (self.filter.evaluate(samples, npoints)?, None, None)
        };

        log::trace!(
            "Channel {} ({}): accepted={} first_flagged={:?}",
            channel,
            name,
            result.accepted,
            result.first_flagged
        );

        Ok(ChannelReport {
            channel,
            name,
            result,
            samples: conditioned,
            kept_samples,
        })
    }

    /// Filter the selected channels of `table` (all channels when `None`)
    pub fn process(
        &self,
        table: &SampleTable,
        source: &str,
        channels: Option<&[usize]>,
    ) -> Result<BatchReport> {
        profile_scope!(format!("filter {}", source));
        let start = std::time::Instant::now();

        let selected: Vec<usize> = match channels {
            Some(indices) => indices.to_vec(),
            None => (0..table.num_channels()).collect(),
        };

        if let Some(&bad) = selected.iter().find(|&&idx| idx >= table.num_channels()) {
            return Err(SampaError::InvalidArgument(format!(
                "channel index {} out of range (table has {} channels)",
                bad,
                table.num_channels()
            )));
        }

        let reports = selected
            .par_iter()
            .map(|&idx| {
                let samples = &table.channels[idx];
                self.process_channel(idx, table.channel_name(idx), samples)
                    .map_err(|e| match e {
                        SampaError::InvalidArgument(msg) => {
                            SampaError::InvalidArgument(format!("channel {}: {}", idx, msg))
                        }
                        other => other,
                    })
            })
            .collect::<Result<Vec<ChannelReport>>>()?;

        let accepted = reports.iter().filter(|r| r.result.accepted).count();
        let rejected = reports.len() - accepted;

        log::info!(
            "Filtered {}: {} channels, {} accepted, {} rejected",
            source,
            reports.len(),
            accepted,
            rejected
        );

        Ok(BatchReport {
            id: Uuid::new_v4().to_string(),
            source: source.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            parameters: *self.filter.params(),
            conditioned: self.config.condition,
            channels: reports,
            accepted,
            rejected,
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

/// Stateless one-shot filtering of a whole table
pub fn filter_table(table: &SampleTable, source: &str, config: &FilterConfig) -> Result<BatchReport> {
    FilterPipeline::new(config.clone())?.process(table, source, None)
}
