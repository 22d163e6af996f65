use std::io::Cursor;

use gs_format::*;

fn triangle_frame(x: f32) -> String {
    format!(
        "o Crab\nmtllib crab.mtl\n\
         v {x} 0 0\nv 1 0 0\nv 0 1 0\n\
         vt 0 0\nvt 1 0\nvt 0 1\n\
         vn 0 0 1\n\
         usemtl skin.png\ns on\n\
         f 1/1/1 2/2/1 3/3/1\n",
        x = x
    )
}

fn archive(frames: &[String]) -> Vec<u8> {
    write_sequence(frames, Cursor::new(Vec::new()))
        .expect("Failed to write archive")
        .into_inner()
}

#[test]
pub fn test_two_frame_sequence() {
    let bytes = archive(&[triangle_frame(0.0), triangle_frame(5.0)]);
    let sequence = parse_sequence(&bytes).expect("Failed to parse sequence");

    assert_eq!(sequence.frame_count(), 2);
    sequence.validate().expect("Sequence should be consistent");

    let first = &sequence.frames()[0];
    assert_eq!(first.name, "Crab");
    assert!(first.smooth_shading);
    assert_eq!(first.material_library.as_deref(), Some("crab.mtl"));
    assert_eq!(first.meshes[0].vertices[0], 0.0);
    assert_eq!(sequence.frames()[1].meshes[0].vertices[0], 5.0);
}

#[test]
pub fn test_archive_without_frames() {
    let bytes = archive(&[]);
    assert!(matches!(parse_sequence(&bytes), Err(ArchiveError::NoFrames)));
}

#[test]
pub fn test_frame_error_is_propagated() {
    let bytes = archive(&[triangle_frame(0.0), "f 1/1/1 2/2/2 3/3/3\n".to_string()]);
    match parse_sequence(&bytes) {
        Err(ArchiveError::InvalidFrame { index, source }) => {
            assert_eq!(index, 1);
            assert!(matches!(source, FormatError::IndexOutOfRange { .. }));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
pub fn test_mismatched_materials_parse_but_fail_validation() {
    let other = triangle_frame(0.0).replace("skin.png", "eyes.png");
    let bytes = archive(&[triangle_frame(0.0), other]);
    let sequence = parse_sequence(&bytes).expect("Failed to parse sequence");

    assert!(matches!(
        sequence.validate(),
        Err(ConsistencyError::MaterialMismatch { frame: 1, .. })
    ));
}

#[test]
pub fn test_material_order_may_change_between_frames() {
    let first = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\n\
                 usemtl a\nf 1/1/1 2/1/1 3/1/1\n\
                 usemtl b\nf 3/1/1 2/1/1 1/1/1\n";
    let second = "v 5 0 0\nv 6 0 0\nv 5 1 0\nvt 0 0\nvn 0 0 1\n\
                  usemtl b\nf 3/1/1 2/1/1 1/1/1\n\
                  usemtl a\nf 1/1/1 2/1/1 3/1/1\n";
    let bytes = archive(&[first.to_string(), second.to_string()]);
    let sequence = parse_sequence(&bytes).expect("Failed to parse sequence");

    assert_eq!(
        sequence.frames()[1].materials().collect::<Vec<_>>(),
        vec!["b", "a"]
    );
    sequence.validate().expect("Reordered materials should be consistent");

    let layout = &sequence.frames()[0];
    let vertices = sequence.frames()[1].concat_vertices_like(layout);
    assert_eq!(&vertices[0..3], &[5.0, 0.0, 0.0]);
    assert_eq!(&vertices[9..12], &[5.0, 1.0, 0.0]);
}

#[test]
pub fn test_load_sequence_missing_file() {
    let path = std::env::temp_dir().join("gs_format_missing_sequence.obja");
    assert!(matches!(load_sequence(&path), Err(ArchiveError::Io(_))));
}
