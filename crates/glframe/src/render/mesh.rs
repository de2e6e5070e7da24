use std::rc::Rc;

use glow::HasContext;

use crate::device::Gpu;
use crate::error::{allocation, Result};

use super::handle::Unique;
use super::layout::{triangle_count, VertexAttribute, VertexLayout};

/// One interleaved vertex buffer.
pub struct VertexBufferDescriptor<'a> {
    pub layout: &'a [VertexAttribute],
    pub data: &'a [f32],
}

pub struct MeshDescriptor<'a> {
    pub vertex_buffers: &'a [VertexBufferDescriptor<'a>],
    /// Empty for a non-indexed mesh.
    pub index_buffer: &'a [u32],
}

/// Vertex array, its vertex buffers and an optional index buffer.
pub struct Mesh {
    vertex_array: Unique<glow::VertexArray>,
    _vertex_buffers: Vec<Unique<glow::Buffer>>,
    index_buffer: Option<Unique<glow::Buffer>>,
    triangles: usize,
}

impl Mesh {
    pub fn new(gpu: &Rc<Gpu>, desc: &MeshDescriptor<'_>) -> Result<Self> {
        let layouts: Vec<VertexLayout> = desc
            .vertex_buffers
            .iter()
            .map(|vb| VertexLayout::new(vb.layout))
            .collect();
        let sized: Vec<(&VertexLayout, usize)> = layouts
            .iter()
            .zip(desc.vertex_buffers)
            .map(|(layout, vb)| (layout, vb.data.len()))
            .collect();
        let triangles = triangle_count(&sized, desc.index_buffer.len());

        let gl = gpu.gl();
        let vertex_array = Unique::new(
            gpu.clone(),
            unsafe { gl.create_vertex_array() }.map_err(allocation("vertex array"))?,
        );
        unsafe { gl.bind_vertex_array(Some(vertex_array.get())) };

        let mut vertex_buffers = Vec::with_capacity(desc.vertex_buffers.len());
        for (vb, layout) in desc.vertex_buffers.iter().zip(&layouts) {
            let buffer = Unique::new(
                gpu.clone(),
                unsafe { gl.create_buffer() }.map_err(allocation("vertex buffer"))?,
            );
            unsafe {
                gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer.get()));
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    bytemuck::cast_slice(vb.data),
                    glow::STATIC_DRAW,
                );
                for &(attr, offset) in &layout.attributes {
                    gl.enable_vertex_attrib_array(attr.index());
                    // Int attributes go through the float path and are
                    // converted by the driver, same as a plain glVertexAttribPointer.
                    gl.vertex_attrib_pointer_f32(
                        attr.index(),
                        attr.component_count(),
                        attr.gl_type(),
                        false,
                        layout.stride,
                        offset,
                    );
                }
            }
            vertex_buffers.push(buffer);
        }

        let index_buffer = if desc.index_buffer.is_empty() {
            None
        } else {
            let buffer = Unique::new(
                gpu.clone(),
                unsafe { gl.create_buffer() }.map_err(allocation("index buffer"))?,
            );
            unsafe {
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buffer.get()));
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    bytemuck::cast_slice(desc.index_buffer),
                    glow::STATIC_DRAW,
                );
            }
            Some(buffer)
        };

        unsafe { gl.bind_vertex_array(None) };
        log::debug!(
            "mesh created: {} vertex buffer(s), {triangles} triangle(s), indexed={}",
            vertex_buffers.len(),
            index_buffer.is_some()
        );

        Ok(Self {
            vertex_array,
            _vertex_buffers: vertex_buffers,
            index_buffer,
            triangles,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles
    }

    /// Binds the vertex array and draws every triangle. State is left bound.
    pub fn draw(&self) {
        let gl = self.vertex_array.owner().gl();
        let count = (3 * self.triangles) as i32;
        unsafe {
            gl.bind_vertex_array(Some(self.vertex_array.get()));
            if self.index_buffer.is_some() {
                gl.draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0);
            } else {
                gl.draw_arrays(glow::TRIANGLES, 0, count);
            }
        }
    }
}
