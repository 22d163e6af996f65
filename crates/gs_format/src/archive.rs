use std::fs;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use log::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::ArchiveError;
use crate::mesh::AnimationSequence;
use crate::parser::parse_frame;

/// Line that separates two frames in the decompressed stream.
pub const FRAME_DELIMITER: &str = "# frame\n";

/// Name of the single entry written by [`write_sequence`].
pub const SEQUENCE_ENTRY: &str = "_temp";

/// Decompresses the archive in memory and parses every frame in order.
pub fn parse_sequence(bytes: &[u8]) -> Result<AnimationSequence, ArchiveError> {
    let content = decompress(bytes)?;
    parse_sequence_text(&content)
}

pub fn load_sequence(path: &Path) -> Result<AnimationSequence, ArchiveError> {
    info!("Loading animation sequence: {}", path.display());
    let bytes = fs::read(path)?;
    parse_sequence(&bytes)
}

/// Splits an already decompressed stream on [`FRAME_DELIMITER`] and parses
/// each non-blank segment.
pub fn parse_sequence_text(content: &str) -> Result<AnimationSequence, ArchiveError> {
    let frames = content
        .split(FRAME_DELIMITER)
        .filter(|segment| !segment.trim().is_empty())
        .enumerate()
        .map(|(index, segment)| {
            parse_frame(segment).map_err(|source| ArchiveError::InvalidFrame { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if frames.is_empty() {
        return Err(ArchiveError::NoFrames);
    }

    debug!("Parsed animation sequence with {} frames", frames.len());
    Ok(AnimationSequence::from_frames(frames))
}

// concatenates all file entries in archive order
fn decompress(bytes: &[u8]) -> Result<String, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut content = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        debug!("Decompressing `{}` ({} bytes)", entry.name(), entry.size());
        entry.read_to_end(&mut content)?;
    }

    Ok(String::from_utf8(content)?)
}

/// Packs frame texts into a deflate compressed archive that
/// [`parse_sequence`] reads back in the same order.
pub fn write_sequence<W, S>(frames: &[S], writer: W) -> Result<W, ArchiveError>
where
    W: Write + Seek,
    S: AsRef<str>,
{
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(SEQUENCE_ENTRY, options)?;

    for frame in frames {
        let frame = frame.as_ref();
        zip.write_all(FRAME_DELIMITER.as_bytes())?;
        zip.write_all(frame.as_bytes())?;
        if !frame.ends_with('\n') {
            zip.write_all(b"\n")?;
        }
    }

    Ok(zip.finish()?)
}
