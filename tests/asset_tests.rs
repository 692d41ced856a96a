// Host-side tests for load progress, the load event queue and GLB parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod asset {
    include!("../src/asset.rs");
}

use asset::*;
use glam::Vec3;

fn progress(loaded: u64, total: Option<u64>) -> LoadProgress {
    LoadProgress { loaded, total }
}

#[test]
fn progress_percent_is_rounded() {
    assert_eq!(progress(50, Some(200)).percent(), Some(25));
    assert_eq!(progress(50, Some(200)).label().as_deref(), Some("25%"));
    assert_eq!(progress(1, Some(3)).percent(), Some(33));
    assert_eq!(progress(2, Some(3)).percent(), Some(67));
    assert_eq!(progress(0, Some(10)).percent(), Some(0));
    assert_eq!(progress(10, Some(10)).label().as_deref(), Some("100%"));
}

#[test]
fn progress_without_total_has_no_label() {
    assert_eq!(progress(1024, None).percent(), None);
    assert_eq!(progress(1024, Some(0)).percent(), None);
    assert_eq!(progress(1024, None).label(), None);
}

#[test]
fn progress_is_clamped_when_server_undercounts() {
    assert_eq!(progress(300, Some(200)).percent(), Some(100));
}

#[test]
fn preallocation_ignores_oversized_content_length() {
    assert_eq!(initial_capacity(None), 0);
    assert_eq!(initial_capacity(Some(4096)), 4096);
    assert_eq!(
        initial_capacity(Some(u64::MAX)),
        MAX_PREALLOC_BYTES as usize
    );
    assert_eq!(
        initial_capacity(Some(MAX_PREALLOC_BYTES + 1)),
        MAX_PREALLOC_BYTES as usize
    );
}

#[test]
fn load_events_keep_order_and_accept_one_outcome() {
    let mut events = LoadEvents::new();
    assert!(events.push_progress(progress(10, Some(100))));
    assert!(events.push_progress(progress(60, Some(100))));
    assert!(!events.is_finished());
    assert!(events.finish(Err(LoadError::EmptyModel)));
    assert!(events.is_finished());

    // Nothing is accepted once the load has an outcome.
    assert!(!events.push_progress(progress(100, Some(100))));
    assert!(!events.finish(Ok(ModelData::default())));

    let drained: Vec<LoadEvent> = events.drain().collect();
    assert_eq!(drained.len(), 3);
    assert!(matches!(drained[0], LoadEvent::Progress(p) if p.loaded == 10));
    assert!(matches!(drained[1], LoadEvent::Progress(p) if p.loaded == 60));
    assert!(matches!(drained[2], LoadEvent::Failed(LoadError::EmptyModel)));
    assert_eq!(events.drain().count(), 0);
}

#[test]
fn load_error_messages_are_readable() {
    let e = LoadError::Http {
        status: 404,
        status_text: "Not Found".into(),
    };
    assert_eq!(e.to_string(), "HTTP 404 Not Found");
    let e = LoadError::IndexOutOfRange { index: 7, count: 3 };
    assert_eq!(e.to_string(), "index 7 out of range for 3 vertices");
}

// --- GLB fixtures ---

fn pad(mut bytes: Vec<u8>, fill: u8) -> Vec<u8> {
    while bytes.len() % 4 != 0 {
        bytes.push(fill);
    }
    bytes
}

/// Assembles a GLB container from a JSON document and an optional BIN chunk.
fn glb(json: &str, bin: Option<&[u8]>) -> Vec<u8> {
    let json = pad(json.as_bytes().to_vec(), b' ');
    let bin = bin.map(|b| pad(b.to_vec(), 0));
    let mut total = 12 + 8 + json.len();
    if let Some(b) = &bin {
        total += 8 + b.len();
    }

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(b"JSON");
    out.extend_from_slice(&json);
    if let Some(b) = bin {
        out.extend_from_slice(&(b.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&b);
    }
    out
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

const TRIANGLE: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

/// One unindexed triangle without normals or material.
fn triangle_glb() -> Vec<u8> {
    let bin = f32_bytes(&TRIANGLE);
    let json = format!(
        r#"{{"asset":{{"version":"2.0"}},
        "buffers":[{{"byteLength":{len}}}],
        "bufferViews":[{{"buffer":0,"byteOffset":0,"byteLength":{len}}}],
        "accessors":[{{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]}}],
        "meshes":[{{"primitives":[{{"attributes":{{"POSITION":0}}}}]}}],
        "nodes":[{{"mesh":0}}],
        "scenes":[{{"nodes":[0]}}],
        "scene":0}}"#,
        len = bin.len()
    );
    glb(&json, Some(&bin))
}

/// One indexed triangle with normals, a red material and a translated node.
fn indexed_glb(indices: [u16; 3]) -> Vec<u8> {
    let mut bin = f32_bytes(&TRIANGLE);
    bin.extend(f32_bytes(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]));
    bin.extend(indices.iter().flat_map(|i| i.to_le_bytes()));
    let json = format!(
        r#"{{"asset":{{"version":"2.0"}},
        "buffers":[{{"byteLength":{len}}}],
        "bufferViews":[
            {{"buffer":0,"byteOffset":0,"byteLength":36}},
            {{"buffer":0,"byteOffset":36,"byteLength":36}},
            {{"buffer":0,"byteOffset":72,"byteLength":6}}],
        "accessors":[
            {{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]}},
            {{"bufferView":1,"componentType":5126,"count":3,"type":"VEC3"}},
            {{"bufferView":2,"componentType":5123,"count":3,"type":"SCALAR"}}],
        "materials":[{{"pbrMetallicRoughness":{{"baseColorFactor":[1,0,0,1]}}}}],
        "meshes":[{{"primitives":[{{"attributes":{{"POSITION":0,"NORMAL":1}},"indices":2,"material":0}}]}}],
        "nodes":[{{"mesh":0,"translation":[0,2,0]}}],
        "scenes":[{{"nodes":[0]}}],
        "scene":0}}"#,
        len = bin.len()
    );
    glb(&json, Some(&bin))
}

#[test]
fn unindexed_triangle_gets_flat_normal_and_white_color() {
    let model = parse_glb(&triangle_glb()).expect("triangle parses");
    assert_eq!(model.vertices.len(), 3);
    assert_eq!(model.indices, vec![0, 1, 2]);
    assert_eq!(model.triangle_count(), 1);
    for v in &model.vertices {
        assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        assert_eq!(v.color, [1.0, 1.0, 1.0, 1.0]);
    }
    assert_eq!(
        model.bounds(),
        Some((Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)))
    );
}

#[test]
fn indexed_triangle_bakes_node_transform_and_material_color() {
    let model = parse_glb(&indexed_glb([0, 1, 2])).expect("indexed triangle parses");
    assert_eq!(model.vertices.len(), 3);
    assert_eq!(model.indices, vec![0, 1, 2]);

    let (lo, hi) = model.bounds().expect("non-empty model");
    assert!((lo - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-6);
    assert!((hi - Vec3::new(1.0, 3.0, 0.0)).length() < 1e-6);

    for v in &model.vertices {
        assert_eq!(v.color, [1.0, 0.0, 0.0, 1.0]);
        let n = Vec3::from(v.normal);
        assert!((n - Vec3::Z).length() < 1e-6);
    }
}

#[test]
fn out_of_range_index_is_rejected() {
    let err = parse_glb(&indexed_glb([0, 1, 5])).unwrap_err();
    assert!(matches!(
        err,
        LoadError::IndexOutOfRange { index: 5, count: 3 }
    ));
}

#[test]
fn garbage_is_a_parse_error() {
    let err = parse_glb(b"definitely not a model").unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
}

#[test]
fn document_without_scene_is_rejected() {
    let err = parse_glb(&glb(r#"{"asset":{"version":"2.0"}}"#, None)).unwrap_err();
    assert!(matches!(err, LoadError::NoScene));
}

#[test]
fn external_buffers_are_not_fetched() {
    let json = r#"{"asset":{"version":"2.0"},"buffers":[{"byteLength":4,"uri":"sneaker.bin"}]}"#;
    let err = parse_glb(&glb(json, None)).unwrap_err();
    assert!(matches!(err, LoadError::ExternalBuffer(ref uri) if uri == "sneaker.bin"));
}

#[test]
fn scene_without_meshes_is_empty() {
    let json = r#"{"asset":{"version":"2.0"},"nodes":[{"name":"root"}],"scenes":[{"nodes":[0]}],"scene":0}"#;
    let err = parse_glb(&glb(json, None)).unwrap_err();
    assert!(matches!(err, LoadError::EmptyModel));
}

#[test]
fn truncated_bin_chunk_is_out_of_bounds() {
    // The view promises three vertices, the chunk holds one.
    let bin = f32_bytes(&TRIANGLE[..3]);
    let json = r#"{"asset":{"version":"2.0"},
        "buffers":[{"byteLength":36}],
        "bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":36}],
        "accessors":[{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0,0,0],"max":[1,1,0]}],
        "meshes":[{"primitives":[{"attributes":{"POSITION":0}}]}],
        "nodes":[{"mesh":0}],
        "scenes":[{"nodes":[0]}],
        "scene":0}"#;
    let err = parse_glb(&glb(json, Some(&bin))).unwrap_err();
    assert!(
        matches!(
            err,
            LoadError::AccessorOutOfBounds {
                primitive: 0,
                accessor: 0
            }
        ),
        "got {err}"
    );
    assert!(err.to_string().contains("past the end"));
}
