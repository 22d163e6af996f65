use std::path::{Path, PathBuf};

use anyhow::Result;
use gs_format::{parse_frame, write_sequence, AnimationSequence};
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::utils::{self, file_name, frame_number};
use crate::CliError;

/// Finds the `.obj` files directly inside `input` and orders them by the
/// number at the end of their name.
pub fn collect_frames(input: &Path) -> Result<Vec<PathBuf>> {
    let mut frames = Vec::new();

    for entry in WalkDir::new(input).min_depth(1).max_depth(1) {
        let path = match &entry {
            Err(err) => {
                warn!("Error parsing path: {}", err);
                continue;
            }
            Ok(entry) => entry.path(),
        };

        if path.is_dir() {
            continue;
        }

        match path.extension().and_then(|x| x.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("obj") => {}
            _ => {
                debug!("Ignored file: {}", path.display());
                continue;
            }
        }

        match frame_number(file_name(path)?) {
            Some(number) => frames.push((number, path.to_path_buf())),
            None => warn!("Ignored frame without number: {}", path.display()),
        }
    }

    frames.sort_by_key(|(number, _)| *number);
    for pair in frames.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(CliError::DuplicateFrame(pair[0].0).into());
        }
    }

    Ok(frames.into_iter().map(|(_, path)| path).collect())
}

/// Packs the frames into an archive at `output`. Unless `skip_checks` is
/// set every frame is parsed first and the sequence must be consistent.
pub fn pack(input: &Path, output: &Path, skip_checks: bool) -> Result<usize> {
    if !input.is_dir() {
        return Err(CliError::InputFolderNonExistant(input.display().to_string()).into());
    }

    let paths = collect_frames(input)?;
    if paths.is_empty() {
        return Err(CliError::NoFrames(input.display().to_string()).into());
    }

    let texts = paths
        .iter()
        .map(|path| utils::read_file(path))
        .collect::<Result<Vec<_>>>()?;

    if !skip_checks {
        let frames = texts
            .iter()
            .zip(&paths)
            .map(|(text, path)| {
                parse_frame(text).map_err(|source| CliError::InvalidFrame {
                    path: path.display().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AnimationSequence::from_frames(frames).validate()?;
    }

    let file = utils::create_file(output)?;
    write_sequence(&texts, file)?;

    info!(
        "Packed {} frames from {} into {}",
        texts.len(),
        input.display(),
        output.display()
    );
    Ok(texts.len())
}
