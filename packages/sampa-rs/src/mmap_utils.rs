use crate::error::{Result, SampaError};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Map a non-empty sample file into memory (read-only)
pub fn mmap_file(path: &Path) -> Result<Mmap> {
    let file = File::open(path).map_err(SampaError::IoError)?;
    if file.metadata()?.len() == 0 {
        return Err(SampaError::ParseError(format!(
            "File is empty: {}",
            path.display()
        )));
    }
    // SAFETY: input files are not modified while mapped
    let mmap = unsafe { Mmap::map(&file).map_err(SampaError::IoError)? };
    Ok(mmap)
}
