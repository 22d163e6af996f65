use thiserror::Error;

/// Errors produced while reading a single frame of text.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: `{directive}` expects {expected} operands")]
    MissingOperand {
        line: usize,
        directive: &'static str,
        expected: usize,
    },
    #[error("line {line}: only triangles are supported, face has {found} vertices")]
    NotATriangle { line: usize, found: usize },
    #[error("line {line}: malformed face index `{token}`, expected `v/vt/vn`")]
    MalformedFaceIndex { line: usize, token: String },
    #[error("line {line}: {kind} index {index} out of range, {count} defined so far")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: usize,
        count: usize,
    },
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced while reading an animation archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Corrupt archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive content is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("Archive contains no frames")]
    NoFrames,
    #[error("Frame {index} is invalid: {source}")]
    InvalidFrame {
        index: usize,
        #[source]
        source: FormatError,
    },
}

/// Frame-to-frame mismatches that make a sequence unsafe to stream into
/// a fixed set of buffers.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("Animation sequence has no frames")]
    EmptySequence,
    #[error("Frame {frame} has materials {found:?}, default frame has {expected:?}")]
    MaterialMismatch {
        frame: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("Frame {frame}, material `{material}`: {found} vertices, default frame has {expected}")]
    VertexCountMismatch {
        frame: usize,
        material: String,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = ::std::result::Result<T, FormatError>;
