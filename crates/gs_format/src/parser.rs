use std::fs;
use std::path::Path;

use log::{debug, trace};

use crate::builder::{FaceIndex, FrameBuilder};
use crate::error::{FormatError, Result};
use crate::mesh::Frame;

// parses one triangulated frame (a subset of wavefront obj)
// faces are dereferenced as they are read, so indices may only point backwards
pub fn parse_frame(text: &str) -> Result<Frame> {
    let mut builder = FrameBuilder::default();

    for (idx, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let token = match tokens.next() {
            Some(token) => token,
            None => continue,
        };
        let operands: Vec<&str> = tokens.collect();

        parse_token(token, &operands, idx + 1, &mut builder)?;
    }

    let frame = builder.build();
    debug!(
        "Parsed frame `{}`: {} meshes, {} vertices",
        frame.name,
        frame.meshes.len(),
        frame.vertex_count()
    );
    Ok(frame)
}

pub fn load_frame(path: &Path) -> Result<Frame> {
    log::info!("Loading frame: {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_frame(&text)
}

fn parse_token(
    token: &str,
    operands: &[&str],
    line: usize,
    builder: &mut FrameBuilder,
) -> Result<()> {
    match token {
        // name
        "o" => builder.name = operand(operands, "o", line)?.into(),
        // material library
        "mtllib" => builder.material_library = Some(operand(operands, "mtllib", line)?.into()),
        // mesh group
        "usemtl" => {
            builder.use_material(operand(operands, "usemtl", line)?);
        }
        // vertex
        "v" => builder.push_position(parse_numbers(operands, "v", line)?),
        // texture coordinates
        "vt" => builder.push_uv(parse_numbers(operands, "vt", line)?),
        // vertex normals
        "vn" => builder.push_normal(parse_numbers(operands, "vn", line)?),
        // triangle
        "f" => builder.push_face(parse_face(operands, line)?, line)?,
        // smoothing
        "s" => builder.smooth_shading = matches!(operand(operands, "s", line)?, "on" | "1"),
        _ => trace!("Ignoring `{}` on line {}", token, line),
    };

    Ok(())
}

fn operand<'a>(operands: &[&'a str], directive: &'static str, line: usize) -> Result<&'a str> {
    operands
        .first()
        .copied()
        .ok_or(FormatError::MissingOperand {
            line,
            directive,
            expected: 1,
        })
}

// parses the first N operands as floats, extra operands are ignored
fn parse_numbers<const N: usize>(
    operands: &[&str],
    directive: &'static str,
    line: usize,
) -> Result<[f32; N]> {
    if operands.len() < N {
        return Err(FormatError::MissingOperand {
            line,
            directive,
            expected: N,
        });
    }

    let mut numbers = [0.0; N];
    for (number, token) in numbers.iter_mut().zip(operands) {
        *number = token.parse().map_err(|_| FormatError::InvalidNumber {
            line,
            token: (*token).into(),
        })?;
    }
    Ok(numbers)
}

fn parse_face(operands: &[&str], line: usize) -> Result<[FaceIndex; 3]> {
    if operands.len() != 3 {
        return Err(FormatError::NotATriangle {
            line,
            found: operands.len(),
        });
    }

    Ok([
        parse_face_index(operands[0], line)?,
        parse_face_index(operands[1], line)?,
        parse_face_index(operands[2], line)?,
    ])
}

// parses a single `v/vt/vn` triple, all three parts are required
fn parse_face_index(value: &str, line: usize) -> Result<FaceIndex> {
    let malformed = || FormatError::MalformedFaceIndex {
        line,
        token: value.into(),
    };

    let parts: Vec<&str> = value.split('/').collect();
    if parts.len() != 3 {
        return Err(malformed());
    }

    let mut indices = [0usize; 3];
    for (index, part) in indices.iter_mut().zip(&parts) {
        *index = part.parse().map_err(|_| malformed())?;
    }

    Ok(FaceIndex {
        vert_i: indices[0],
        uv_i: indices[1],
        normal_i: indices[2],
    })
}

#[cfg(test)]
mod test {
    use super::*;

    const QUAD_AS_TRIANGLES: &str = "\
# exported frame
mtllib crab.mtl
o Crab
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl body.png
s off
f 1/1/1 2/2/1 3/3/1
usemtl eyes.png
f 1/1/1 3/3/1 4/4/1
s 1
";

    #[test]
    fn test_parse_frame() -> Result<()> {
        let frame = parse_frame(QUAD_AS_TRIANGLES)?;

        assert_eq!(frame.name, "Crab");
        assert_eq!(frame.material_library.as_deref(), Some("crab.mtl"));
        assert!(frame.smooth_shading);
        assert_eq!(
            frame.materials().collect::<Vec<_>>(),
            vec!["body.png", "eyes.png"]
        );

        let eyes = frame.mesh("eyes.png").unwrap();
        assert_eq!(
            eyes.vertices,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(eyes.uv_coords, vec![0.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
        assert_eq!(eyes.normals, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_last_occurrence_wins() -> Result<()> {
        let frame = parse_frame("o first\no second\ns on\ns off\n")?;
        assert_eq!(frame.name, "second");
        assert!(!frame.smooth_shading);
        assert!(frame.meshes.is_empty());
        Ok(())
    }

    #[test]
    fn test_face_before_vertices() {
        let err = parse_frame("usemtl a\nf 1/1/1 1/1/1 1/1/1\n").unwrap_err();
        assert!(matches!(
            err,
            FormatError::IndexOutOfRange {
                line: 2,
                kind: "vertex",
                index: 1,
                count: 0
            }
        ));
    }

    #[test]
    fn test_zero_index() {
        let err = parse_frame("v 0 0 0\nvt 0 0\nvn 0 0 1\nf 0/1/1 1/1/1 1/1/1\n").unwrap_err();
        assert!(matches!(err, FormatError::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn test_quad_is_rejected() {
        let err = parse_frame("f 1/1/1 2/2/2 3/3/3 4/4/4").unwrap_err();
        assert!(matches!(err, FormatError::NotATriangle { found: 4, .. }));
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_frame("v 1.0 abc 3.0").unwrap_err();
        match err {
            FormatError::InvalidNumber { line, token } => {
                assert_eq!(line, 1);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_operand() {
        assert!(matches!(
            parse_frame("vt 0.5").unwrap_err(),
            FormatError::MissingOperand {
                directive: "vt",
                expected: 2,
                ..
            }
        ));
        assert!(matches!(
            parse_frame("usemtl").unwrap_err(),
            FormatError::MissingOperand { .. }
        ));
    }

    #[test]
    fn test_parse_face_index() -> Result<()> {
        assert_eq!(
            parse_face_index("3/2/1", 1)?,
            FaceIndex {
                vert_i: 3,
                uv_i: 2,
                normal_i: 1
            }
        );
        assert!(parse_face_index("1//1", 1).is_err());
        assert!(parse_face_index("1/1", 1).is_err());
        assert!(parse_face_index("1/1/1/1", 1).is_err());
        assert!(parse_face_index("a/1/1", 1).is_err());
        Ok(())
    }

    #[test]
    fn test_unknown_directives_ignored() -> Result<()> {
        let frame = parse_frame("\n\n   \ng group\nvp 1 2 3\n# comment\n")?;
        assert_eq!(frame, Frame::default());
        Ok(())
    }
}
