//! Frame and animation sequence formats.
//!
//! A frame is a triangulated mesh split into one group per material, stored
//! as a small subset of wavefront obj. An animation sequence is a zip
//! archive whose decompressed content is every frame of the animation,
//! each introduced by a `# frame` line.

mod archive;
mod builder;
pub mod error;
pub mod mesh;
mod parser;

pub use archive::{
    load_sequence, parse_sequence, parse_sequence_text, write_sequence, FRAME_DELIMITER,
    SEQUENCE_ENTRY,
};
pub use error::{ArchiveError, ConsistencyError, FormatError};
pub use mesh::{AnimationSequence, Frame, Mesh};
pub use parser::{load_frame, parse_frame};
