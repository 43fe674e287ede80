use crate::cli::{FilterOptions, ParamArgs};
use sampa_rs::{FileType, FilterConfig, FilterParameters, FilterPipeline};
use std::path::Path;

/// Validate a single file path: existence and supported extension.
pub fn validate_file(file_path: &str) -> Result<FileType, String> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("Input file not found: {}", file_path));
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    FileType::from_extension(ext).ok_or_else(|| {
        format!(
            "Unsupported file extension '{}'. Supported: txt, ascii, dat, csv, json",
            ext
        )
    })
}

/// Load the config file (if any) and apply command-line overrides.
pub fn resolve_config(params: &ParamArgs) -> Result<FilterConfig, String> {
    let mut config =
        FilterConfig::load(params.config.as_deref().map(Path::new)).map_err(|e| {
            format!(
                "Failed to load config{}: {}",
                params
                    .config
                    .as_deref()
                    .map(|p| format!(" '{}'", p))
                    .unwrap_or_default(),
                e
            )
        })?;

    if let Some(v) = params.slope_down {
        config.slope_down = v;
    }
    if let Some(v) = params.slope_up {
        config.slope_up = v;
    }
    if let Some(v) = params.round {
        config.round = v;
    }

    config.parameters().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Resolved filter parameters for commands that only classify.
pub fn resolve_parameters(params: &ParamArgs) -> Result<FilterParameters, String> {
    resolve_config(params)?
        .parameters()
        .map_err(|e| e.to_string())
}

/// Build the pipeline shared by `filter` and `batch`.
pub fn build_pipeline(options: &FilterOptions) -> Result<FilterPipeline, String> {
    let mut config = resolve_config(&options.params)?;

    if options.npoints.is_some() {
        config.npoints = options.npoints;
    }
    if options.condition {
        config.condition = true;
    }
    if let Some(threshold) = options.threshold {
        config.condition = true;
        config.zero_suppression = Some(threshold);
    }

    log::debug!("Resolved filter config: {:?}", config);
    FilterPipeline::new(config).map_err(|e| e.to_string())
}
