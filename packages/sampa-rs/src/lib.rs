pub mod types;
pub mod slope_filter;
pub mod baseline;
pub mod parser;
pub mod reader;
pub mod config;
pub mod pipeline;
pub mod profiling;
pub mod error;
mod mmap_utils;

pub use types::*;
pub use slope_filter::{classify, evaluate, evaluate_all, transitions, SlopeFilter, SlopeFilterBuilder};
pub use baseline::{condition, zero_suppress, BaselineTracker};
pub use parser::{parse_sample_list, parse_sample_table, parse_sample_table_from_bytes};
pub use reader::read_sample_file;
pub use config::FilterConfig;
pub use pipeline::{filter_table, BatchReport, ChannelReport, FilterPipeline};
pub use error::{SampaError, Result};
