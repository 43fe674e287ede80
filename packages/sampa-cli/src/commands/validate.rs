use crate::cli::ValidateArgs;
use crate::exit_codes;
use crate::output;
use sampa_rs::{read_sample_file, FileType};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ValidateOutput {
    file: String,
    exists: bool,
    readable: bool,
    supported: bool,
    file_type: Option<FileType>,
    size_bytes: Option<u64>,
    channels: Option<usize>,
    time_bins: Option<usize>,
    error: Option<String>,
}

pub fn execute(args: ValidateArgs) -> i32 {
    let result = validate(&args.file);

    if args.json {
        if let Err(e) = output::emit(&result, false, None) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else if let Some(ref err) = result.error {
        eprintln!("Error: {}", err);
    } else {
        println!(
            "File '{}' is valid ({:?}, {} bytes, {} channels x {} time bins)",
            args.file,
            result.file_type.unwrap_or(FileType::Ascii),
            result.size_bytes.unwrap_or(0),
            result.channels.unwrap_or(0),
            result.time_bins.unwrap_or(0)
        );
    }

    if result.error.is_some() {
        exit_codes::INPUT_ERROR
    } else {
        exit_codes::SUCCESS
    }
}

fn validate(file: &str) -> ValidateOutput {
    let path = Path::new(file);

    let exists = path.exists();
    let readable = path.is_file() && std::fs::File::open(path).is_ok();
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let file_type = FileType::from_extension(extension);
    let supported = file_type.is_some();

    let size_bytes = if readable {
        std::fs::metadata(path).ok().map(|m| m.len())
    } else {
        None
    };

    let mut out = ValidateOutput {
        file: file.to_string(),
        exists,
        readable,
        supported,
        file_type,
        size_bytes,
        channels: None,
        time_bins: None,
        error: None,
    };

    if !exists {
        out.error = Some(format!("File not found: {}", file));
    } else if !readable {
        out.error = Some(format!("File is not readable: {}", file));
    } else if !supported {
        out.error = Some(format!(
            "Unsupported file extension '{}'. Supported: txt, ascii, dat, csv, json",
            extension
        ));
    } else {
        match read_sample_file(path) {
            Ok(table) => {
                out.channels = Some(table.num_channels());
                out.time_bins = Some(table.num_timebins());
            }
            Err(e) => out.error = Some(e.to_string()),
        }
    }

    out
}
