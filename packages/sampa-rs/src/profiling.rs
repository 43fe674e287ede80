use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// When set, profile scopes also append to this file
pub const PROFILE_LOG_ENV_VAR: &str = "SAMPA_PROFILE_LOG";

/// Times a scope and logs the elapsed time on drop
pub struct ProfileScope {
    label: String,
    start: Instant,
}

impl ProfileScope {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        log::debug!("[PROFILE] {} - {:.3}ms", self.label, elapsed_ms);

        if let Some(path) = profile_log_path() {
            if let Err(e) = write_profile_log(&path, &self.label, elapsed_ms) {
                log::warn!("Failed to write profile log: {}", e);
            }
        }
    }
}

fn profile_log_path() -> Option<PathBuf> {
    std::env::var_os(PROFILE_LOG_ENV_VAR).map(PathBuf::from)
}

fn write_profile_log(path: &Path, label: &str, duration_ms: f64) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let timestamp = chrono::Utc::now().to_rfc3339();
    writeln!(file, "{} | {} | {:.3}ms", timestamp, label, duration_ms)?;

    Ok(())
}

/// Macro for easy profiling
#[macro_export]
macro_rules! profile_scope {
    ($label:expr) => {
        let _profile_scope = $crate::profiling::ProfileScope::new($label);
    };
}
