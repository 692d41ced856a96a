use glam::{Mat3, Mat4, Vec3};
use std::collections::VecDeque;

/// Bytes received so far for the model file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: u64,
    /// From `Content-Length`; `None` when the server does not send it.
    pub total: Option<u64>,
}

impl LoadProgress {
    /// Rounded completion percentage, or `None` when the total is unknown.
    pub fn percent(&self) -> Option<u8> {
        let total = self.total.filter(|t| *t > 0)?;
        let p = (self.loaded as f64 / total as f64 * 100.0).round();
        Some(p.clamp(0.0, 100.0) as u8)
    }

    /// Text for the loading indicator, e.g. `"25%"`.
    pub fn label(&self) -> Option<String> {
        self.percent().map(|p| format!("{p}%"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },
    #[error("invalid glTF: {0}")]
    Parse(#[from] gltf::Error),
    #[error("external buffer not supported: {0}")]
    ExternalBuffer(String),
    #[error("GLB has no binary chunk")]
    MissingBinChunk,
    #[error("model has no scene")]
    NoScene,
    #[error("primitive {0} has no positions")]
    MissingPositions(usize),
    #[error("primitive {primitive}: accessor {accessor} reads past the end of its buffer")]
    AccessorOutOfBounds { primitive: usize, accessor: usize },
    #[error("index {index} out of range for {count} vertices")]
    IndexOutOfRange { index: u32, count: usize },
    #[error("model contains no triangles")]
    EmptyModel,
}

/// Interleaved vertex uploaded as-is to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

/// The loaded model flattened into one indexed triangle list, node transforms baked in.
#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from(self.vertices.first()?.position);
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            let p = Vec3::from(v.position);
            (lo.min(p), hi.max(p))
        }))
    }
}

/// Upper bound on the up-front buffer reservation; larger files grow as they stream.
pub const MAX_PREALLOC_BYTES: u64 = 64 * 1024 * 1024;

/// Bytes to reserve before streaming, from an untrusted `Content-Length`.
pub fn initial_capacity(total: Option<u64>) -> usize {
    total.unwrap_or(0).min(MAX_PREALLOC_BYTES) as usize
}

/// Outcome stream of one model load.
#[derive(Debug)]
pub enum LoadEvent {
    Progress(LoadProgress),
    Loaded(ModelData),
    Failed(LoadError),
}

/// Ordered queue between the loader future and the frame loop.
///
/// Accepts any number of progress events and then exactly one terminal event;
/// anything pushed after the terminal event is dropped.
#[derive(Debug, Default)]
pub struct LoadEvents {
    queue: VecDeque<LoadEvent>,
    finished: bool,
}

impl LoadEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_progress(&mut self, progress: LoadProgress) -> bool {
        if self.finished {
            return false;
        }
        self.queue.push_back(LoadEvent::Progress(progress));
        true
    }

    pub fn finish(&mut self, result: Result<ModelData, LoadError>) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        self.queue.push_back(match result {
            Ok(model) => LoadEvent::Loaded(model),
            Err(e) => LoadEvent::Failed(e),
        });
        true
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, LoadEvent> {
        self.queue.drain(..)
    }
}

/// Parses a binary glTF (GLB) into a flat triangle list.
pub fn parse_glb(bytes: &[u8]) -> Result<ModelData, LoadError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let document = &gltf.document;

    let mut buffers: Vec<&[u8]> = Vec::new();
    for buffer in document.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                buffers.push(gltf.blob.as_deref().ok_or(LoadError::MissingBinChunk)?)
            }
            gltf::buffer::Source::Uri(uri) => {
                return Err(LoadError::ExternalBuffer(uri.to_string()))
            }
        }
    }

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(LoadError::NoScene)?;

    let mut model = ModelData::default();
    for node in scene.nodes() {
        append_node(&node, Mat4::IDENTITY, &buffers, &mut model)?;
    }
    if model.indices.is_empty() {
        return Err(LoadError::EmptyModel);
    }
    Ok(model)
}

fn append_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[&[u8]],
    model: &mut ModelData,
) -> Result<(), LoadError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            append_primitive(&primitive, world, buffers, model)?;
        }
    }
    for child in node.children() {
        append_node(&child, world, buffers, model)?;
    }
    Ok(())
}

fn append_primitive(
    primitive: &gltf::Primitive,
    world: Mat4,
    buffers: &[&[u8]],
    model: &mut ModelData,
) -> Result<(), LoadError> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        log::warn!(
            "[loader] skipping primitive {} with mode {:?}",
            primitive.index(),
            primitive.mode()
        );
        return Ok(());
    }
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).copied());

    let out_of_bounds = |accessor: gltf::Accessor| LoadError::AccessorOutOfBounds {
        primitive: primitive.index(),
        accessor: accessor.index(),
    };

    let position_accessor = primitive
        .get(&gltf::Semantic::Positions)
        .ok_or(LoadError::MissingPositions(primitive.index()))?;
    let positions: Vec<Vec3> = reader
        .read_positions()
        .ok_or_else(|| out_of_bounds(position_accessor))?
        .map(|p| world.transform_point3(Vec3::from(p)))
        .collect();
    let count = positions.len();

    let mut indices: Vec<u32> = match (primitive.indices(), reader.read_indices()) {
        (_, Some(read)) => read.into_u32().collect(),
        (Some(accessor), None) => return Err(out_of_bounds(accessor)),
        (None, None) => (0..count as u32).collect(),
    };
    indices.truncate(indices.len() - indices.len() % 3);
    if let Some(&index) = indices.iter().find(|i| **i as usize >= count) {
        return Err(LoadError::IndexOutOfRange { index, count });
    }

    let base_color = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();
    let colors: Vec<[f32; 4]> = match reader.read_colors(0) {
        Some(read) => read
            .into_rgba_f32()
            .map(|c| std::array::from_fn(|i| c[i] * base_color[i]))
            .collect(),
        None => vec![base_color; count],
    };
    let color_at = |i: usize| colors.get(i).copied().unwrap_or(base_color);

    let normal_matrix = normal_matrix(world);
    let normals: Option<Vec<Vec3>> = reader.read_normals().map(|read| {
        read.map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero())
            .collect()
    });

    match normals {
        Some(normals) if normals.len() == count => {
            let base = model.vertices.len() as u32;
            model
                .vertices
                .extend(positions.iter().enumerate().map(|(i, p)| MeshVertex {
                    position: p.to_array(),
                    normal: normals[i].to_array(),
                    color: color_at(i),
                }));
            model.indices.extend(indices.iter().map(|i| base + i));
        }
        _ => {
            // Without normals each triangle gets its own vertices and a face normal.
            for tri in indices.chunks_exact(3) {
                let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
                let normal = (positions[b] - positions[a])
                    .cross(positions[c] - positions[a])
                    .normalize_or_zero();
                for i in [a, b, c] {
                    model.indices.push(model.vertices.len() as u32);
                    model.vertices.push(MeshVertex {
                        position: positions[i].to_array(),
                        normal: normal.to_array(),
                        color: color_at(i),
                    });
                }
            }
        }
    }
    Ok(())
}

fn normal_matrix(world: Mat4) -> Mat3 {
    let m = Mat3::from_mat4(world);
    if m.determinant().abs() < 1e-12 {
        return Mat3::IDENTITY;
    }
    m.inverse().transpose()
}
