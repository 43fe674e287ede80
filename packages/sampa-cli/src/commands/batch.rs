use crate::cli::BatchArgs;
use crate::exit_codes;
use crate::filter_params;
use crate::output;
use rayon::prelude::*;
use sampa_rs::{read_sample_file, BatchReport, FilterPipeline};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub fn execute(args: BatchArgs) -> i32 {
    let files = match resolve_files(&args) {
        Ok(f) => f,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if files.is_empty() {
        eprintln!("Error: No matching files found");
        return exit_codes::INPUT_ERROR;
    }

    if args.dry_run {
        for f in &files {
            println!("{}", f);
        }
        if !args.quiet {
            eprintln!("Found {} file(s)", files.len());
        }
        return exit_codes::SUCCESS;
    }

    let pipeline = match filter_params::build_pipeline(&args.options) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if let Some(ref dir) = args.output_dir {
        if let Err(msg) = check_report_paths(dir, &files) {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: Failed to create output directory '{}': {}", dir, e);
            return exit_codes::EXECUTION_ERROR;
        }
    }

    let total = files.len();
    let start_time = Instant::now();

    let channels = args.options.channels.as_deref();
    let results: Vec<Result<BatchReport, String>> = if args.continue_on_error {
        // Results are written in input order.
        files
            .par_iter()
            .map(|file| filter_file(&pipeline, file, channels))
            .collect()
    } else {
        // Files after the first failure are never read.
        let mut results = Vec::with_capacity(total);
        for file in &files {
            let result = filter_file(&pipeline, file, channels);
            let stop = result.is_err();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    };

    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for (i, (file_path, result)) in files.iter().zip(results).enumerate() {
        if !args.quiet {
            eprintln!("[{}/{}] {}...", i + 1, total, file_path);
        }

        let written = result.and_then(|report| write_report(&args, file_path, &report));
        match written {
            Ok(()) => succeeded += 1,
            Err(msg) => {
                eprintln!("  Error: {}", msg);
                failed += 1;
                if !args.continue_on_error {
                    break;
                }
            }
        }
    }

    if !args.quiet {
        eprintln!(
            "Batch complete: {}/{} succeeded, {}/{} failed, {:.1}s",
            succeeded,
            total,
            failed,
            total,
            start_time.elapsed().as_secs_f64()
        );
    }

    if failed == 0 {
        exit_codes::SUCCESS
    } else if succeeded > 0 {
        exit_codes::PARTIAL_FAILURE
    } else {
        exit_codes::EXECUTION_ERROR
    }
}

fn filter_file(
    pipeline: &FilterPipeline,
    file_path: &str,
    channels: Option<&[usize]>,
) -> Result<BatchReport, String> {
    filter_params::validate_file(file_path)?;
    let table = read_sample_file(file_path).map_err(|e| e.to_string())?;
    pipeline
        .process(&table, file_path, channels)
        .map_err(|e| e.to_string())
}

fn write_report(args: &BatchArgs, file_path: &str, report: &BatchReport) -> Result<(), String> {
    match args.output_dir {
        Some(ref dir) => {
            let out_path = report_path(dir, file_path);
            output::emit(report, args.compact, out_path.to_str())
        }
        // JSONL to stdout
        None => output::emit(report, true, None),
    }
}

/// `<dir>/<file name>_bc3.json`; the input extension stays in the name.
fn report_path(dir: &str, file_path: &str) -> PathBuf {
    let name = Path::new(file_path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    Path::new(dir).join(format!("{}_bc3.json", name))
}

/// Fail if two inputs would write the same report file.
fn check_report_paths(dir: &str, files: &[String]) -> Result<(), String> {
    let mut seen: HashMap<PathBuf, &str> = HashMap::new();
    for file in files {
        let out_path = report_path(dir, file);
        if let Some(first) = seen.insert(out_path.clone(), file) {
            return Err(format!(
                "'{}' and '{}' would both write {}",
                first,
                file,
                out_path.display()
            ));
        }
    }
    Ok(())
}

fn resolve_files(args: &BatchArgs) -> Result<Vec<String>, String> {
    if let Some(ref pattern) = args.glob {
        resolve_glob(pattern)
    } else if let Some(ref files) = args.files {
        Ok(files.clone())
    } else {
        Err("One of --glob or --files must be specified".to_string())
    }
}

fn resolve_glob(pattern: &str) -> Result<Vec<String>, String> {
    let paths = glob::glob(pattern)
        .map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;

    let mut files: Vec<String> = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    if let Some(s) = path.to_str() {
                        files.push(s.to_string());
                    }
                }
            }
            Err(e) => {
                log::warn!("glob error: {}", e);
            }
        }
    }
    files.sort();
    Ok(files)
}
