use anyhow::{anyhow, Context, Result};
use std::{
    fs::{self, File},
    path::Path,
};

pub fn file_name(path: &Path) -> Result<&str> {
    path.file_stem()
        .ok_or_else(|| anyhow!("No file stem found"))?
        .to_str()
        .ok_or_else(|| anyhow!("Can't convert file stem to string"))
}

/// Trailing number of a file stem, `walk_12` and `walk12` both give 12.
pub fn frame_number(stem: &str) -> Option<u32> {
    let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    stem[stem.len() - digits..].parse().ok()
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Could not read file: {}", path.display()))
}

pub fn create_file(target: &Path) -> Result<File> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create folder: {}", parent.display()))?;
        }
    }
    File::create(target).with_context(|| format!("Could not create file: {}", target.display()))
}
