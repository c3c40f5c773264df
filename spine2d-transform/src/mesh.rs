//! CPU-side vertex and index storage for drawing skinned attachments.
//!
//! The mesh only tracks what changed since the last upload; creating and filling GPU buffers
//! is left to the renderer.

use crate::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: String,
    pub num_elements: usize,
}

impl VertexAttribute {
    pub fn new(name: impl Into<String>, num_elements: usize) -> Self {
        Self {
            name: name.into(),
            num_elements,
        }
    }

    pub fn position2() -> Self {
        Self::new("a_position", 2)
    }

    pub fn position3() -> Self {
        Self::new("a_position", 3)
    }

    pub fn color() -> Self {
        Self::new("a_color", 4)
    }

    pub fn texcoords(unit: u32) -> Self {
        if unit == 0 {
            Self::new("a_texCoords", 2)
        } else {
            Self::new(format!("a_texCoords{unit}"), 2)
        }
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    attributes: Vec<VertexAttribute>,
    elements_per_vertex: usize,
    vertices: Vec<f32>,
    vertices_length: usize,
    dirty_vertices: bool,
    indices: Vec<u16>,
    indices_length: usize,
    dirty_indices: bool,
}

/// Data to hand to the renderer after [`Mesh::take_upload`]. A `None` side did not change.
#[derive(Debug)]
pub struct MeshUpload<'a> {
    pub vertices: Option<&'a [u8]>,
    pub indices: Option<&'a [u8]>,
}

impl Mesh {
    pub fn new(attributes: Vec<VertexAttribute>, max_vertices: usize, max_indices: usize) -> Self {
        let elements_per_vertex = attributes.iter().map(|a| a.num_elements).sum::<usize>();
        Self {
            vertices: vec![0.0; max_vertices * elements_per_vertex],
            indices: vec![0; max_indices],
            attributes,
            elements_per_vertex,
            vertices_length: 0,
            dirty_vertices: false,
            indices_length: 0,
            dirty_indices: false,
        }
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn elements_per_vertex(&self) -> usize {
        self.elements_per_vertex
    }

    pub fn max_vertices(&self) -> usize {
        self.vertices.len().checked_div(self.elements_per_vertex).unwrap_or(0)
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices_length
            .checked_div(self.elements_per_vertex)
            .unwrap_or(0)
    }

    pub fn max_indices(&self) -> usize {
        self.indices.len()
    }

    pub fn num_indices(&self) -> usize {
        self.indices_length
    }

    /// All vertex storage; only the first `num_vertices() * elements_per_vertex()` floats are
    /// drawn.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Writable vertex storage. Marks vertices dirty.
    pub fn vertices_mut(&mut self) -> &mut [f32] {
        self.dirty_vertices = true;
        &mut self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Writable index storage. Marks indices dirty.
    pub fn indices_mut(&mut self) -> &mut [u16] {
        self.dirty_indices = true;
        &mut self.indices
    }

    /// Sets the number of used floats, clamped to capacity.
    pub fn set_vertices_length(&mut self, length: usize) {
        self.dirty_vertices = true;
        self.vertices_length = length.min(self.vertices.len());
    }

    /// Sets the number of used indices, clamped to capacity.
    pub fn set_indices_length(&mut self, length: usize) {
        self.dirty_indices = true;
        self.indices_length = length.min(self.indices.len());
    }

    pub fn set_vertices(&mut self, vertices: &[f32]) -> Result<(), Error> {
        if vertices.len() > self.vertices.len() {
            return Err(Error::MeshCapacity {
                kind: "vertices",
                capacity: self.max_vertices(),
                requested: vertices
                    .len()
                    .checked_div(self.elements_per_vertex)
                    .unwrap_or(vertices.len()),
            });
        }
        self.vertices[..vertices.len()].copy_from_slice(vertices);
        self.vertices_length = vertices.len();
        self.dirty_vertices = true;
        Ok(())
    }

    pub fn set_indices(&mut self, indices: &[u16]) -> Result<(), Error> {
        if indices.len() > self.indices.len() {
            return Err(Error::MeshCapacity {
                kind: "indices",
                capacity: self.max_indices(),
                requested: indices.len(),
            });
        }
        self.indices[..indices.len()].copy_from_slice(indices);
        self.indices_length = indices.len();
        self.dirty_indices = true;
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_vertices || self.dirty_indices
    }

    /// Element count for a draw call: indices when present, otherwise vertices.
    pub fn draw_count(&self) -> usize {
        if self.indices_length > 0 {
            self.indices_length
        } else {
            self.num_vertices()
        }
    }

    /// Returns the used, changed vertex and index data as bytes and clears the dirty flags.
    pub fn take_upload(&mut self) -> MeshUpload<'_> {
        let vertices = std::mem::take(&mut self.dirty_vertices)
            .then(|| bytemuck::cast_slice(&self.vertices[..self.vertices_length]));
        let indices = std::mem::take(&mut self.dirty_indices)
            .then(|| bytemuck::cast_slice(&self.indices[..self.indices_length]));
        MeshUpload { vertices, indices }
    }
}
