use crate::error::{Result, SampaError};
use crate::mmap_utils::mmap_file;
use crate::parser::parse_sample_table_from_bytes;
use crate::types::{FileType, SampleTable};
use std::path::Path;

/// Load a sample table from disk
///
/// Text tables (ASCII/CSV) are memory-mapped and parsed in place; JSON
/// tables are deserialized directly.
pub fn read_sample_file<P: AsRef<Path>>(path: P) -> Result<SampleTable> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SampaError::FileNotFound(path.display().to_string()));
    }

    let file_type = FileType::from_path(path).ok_or_else(|| {
        SampaError::UnsupportedFileType(format!(
            "{} (supported: txt, ascii, dat, csv, json)",
            path.display()
        ))
    })?;

    log::debug!("Reading {:?} sample file: {}", file_type, path.display());

    let table = match file_type {
        FileType::Ascii | FileType::Csv => {
            let mmap = mmap_file(path)?;
            parse_sample_table_from_bytes(&mmap)?
        }
        FileType::Json => {
            let content = std::fs::read_to_string(path)?;
            let table: SampleTable = serde_json::from_str(&content)?;
            if table.channels.is_empty() {
                return Err(SampaError::ParseError(format!(
                    "No channels in {}",
                    path.display()
                )));
            }
            table
        }
    };

    Ok(table)
}
