use crate::error::{Result, SampaError};
use crate::types::SampleTable;

/// Parse an ASCII/CSV sample table
///
/// One row per time bin, one column per channel. Fields are separated by
/// whitespace and/or commas. `#` comments and blank lines are skipped. A first
/// row made only of non-numeric fields is taken as channel names.
///
/// # Returns
/// SampleTable in [channels × time bins] format
pub fn parse_sample_table(content: &str) -> Result<SampleTable> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut names: Option<Vec<String>> = None;
    let mut col_count = 0usize;

    for (line_idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = split_fields(trimmed).collect();
        if fields.is_empty() {
            continue;
        }

        if rows.is_empty()
            && names.is_none()
            && fields.iter().all(|f| f.parse::<f64>().is_err())
        {
            col_count = fields.len();
            names = Some(fields.iter().map(|f| f.to_string()).collect());
            continue;
        }

        let values = fields
            .iter()
            .map(|f| {
                f.parse::<f64>().map_err(|_| {
                    SampaError::ParseError(format!(
                        "line {}: '{}' is not a number",
                        line_idx + 1,
                        f
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        if col_count == 0 {
            col_count = values.len();
        } else if values.len() != col_count {
            log::warn!(
                "Line {} has inconsistent column count ({} vs {}), skipping",
                line_idx + 1,
                values.len(),
                col_count
            );
            continue;
        }

        rows.push(values);
    }

    if rows.is_empty() {
        return Err(SampaError::ParseError(
            "No sample rows found".to_string(),
        ));
    }

    log::info!(
        "Loaded sample table: {} time bins × {} channels",
        rows.len(),
        col_count
    );

    // Transpose: [time bins × channels] -> [channels × time bins]
    let mut channels: Vec<Vec<f64>> = vec![Vec::with_capacity(rows.len()); col_count];
    for row in &rows {
        for (col_idx, &value) in row.iter().enumerate() {
            channels[col_idx].push(value);
        }
    }

    let table = SampleTable::new(channels);
    Ok(match names {
        Some(names) => table.with_names(names),
        None => table,
    })
}

/// Parse a sample table from a byte slice (e.g. mmap)
pub fn parse_sample_table_from_bytes(content: &[u8]) -> Result<SampleTable> {
    let text = std::str::from_utf8(content)
        .map_err(|e| SampaError::ParseError(format!("Input is not valid UTF-8: {}", e)))?;
    parse_sample_table(text)
}

/// Parse a comma/whitespace separated list of samples, e.g. "10, 10.3, 10"
pub fn parse_sample_list(content: &str) -> Result<Vec<f64>> {
    split_fields(content)
        .map(|f| {
            f.parse::<f64>()
                .map_err(|_| SampaError::ParseError(format!("'{}' is not a number", f)))
        })
        .collect()
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
}
