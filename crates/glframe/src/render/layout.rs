/// One attribute of an interleaved vertex buffer.
///
/// The `u32` is the binding index and must match `layout(location = ...)` in
/// the vertex shader. Every component is 4 bytes wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexAttribute {
    Float(u32),
    Vec2(u32),
    Vec3(u32),
    Vec4(u32),
    Int(u32),
    IVec2(u32),
    IVec3(u32),
    IVec4(u32),
}

impl VertexAttribute {
    pub const fn position_2d(index: u32) -> Self {
        Self::Vec2(index)
    }

    pub const fn position_3d(index: u32) -> Self {
        Self::Vec3(index)
    }

    pub const fn normal_3d(index: u32) -> Self {
        Self::Vec3(index)
    }

    pub const fn uv(index: u32) -> Self {
        Self::Vec2(index)
    }

    pub const fn color_rgb(index: u32) -> Self {
        Self::Vec3(index)
    }

    pub const fn color_rgba(index: u32) -> Self {
        Self::Vec4(index)
    }

    pub const fn index(self) -> u32 {
        match self {
            Self::Float(i)
            | Self::Vec2(i)
            | Self::Vec3(i)
            | Self::Vec4(i)
            | Self::Int(i)
            | Self::IVec2(i)
            | Self::IVec3(i)
            | Self::IVec4(i) => i,
        }
    }

    pub const fn component_count(self) -> i32 {
        match self {
            Self::Float(_) | Self::Int(_) => 1,
            Self::Vec2(_) | Self::IVec2(_) => 2,
            Self::Vec3(_) | Self::IVec3(_) => 3,
            Self::Vec4(_) | Self::IVec4(_) => 4,
        }
    }

    /// Scalar type as a GL enum.
    pub const fn gl_type(self) -> u32 {
        match self {
            Self::Float(_) | Self::Vec2(_) | Self::Vec3(_) | Self::Vec4(_) => glow::FLOAT,
            Self::Int(_) | Self::IVec2(_) | Self::IVec3(_) | Self::IVec4(_) => glow::INT,
        }
    }

    pub const fn size_in_bytes(self) -> i32 {
        self.component_count() * 4
    }
}

/// Byte offsets of each attribute within one interleaved vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: i32,
    pub attributes: Vec<(VertexAttribute, i32)>,
}

impl VertexLayout {
    pub fn new(attributes: &[VertexAttribute]) -> Self {
        assert!(
            !attributes.is_empty(),
            "a vertex buffer layout needs at least one attribute"
        );

        let mut offset = 0;
        let attributes = attributes
            .iter()
            .map(|&attr| {
                let at = offset;
                offset += attr.size_in_bytes();
                (attr, at)
            })
            .collect();

        Self {
            stride: offset,
            attributes,
        }
    }

    /// Floats per vertex.
    pub fn floats_per_vertex(&self) -> usize {
        self.stride as usize / 4
    }
}

/// Number of triangles a mesh will draw.
///
/// `buffers` holds `(layout, float count)` for each vertex buffer. With an
/// index buffer the count comes from the indices alone; without one every
/// vertex buffer must describe the same number of vertices.
pub fn triangle_count(buffers: &[(&VertexLayout, usize)], index_count: usize) -> usize {
    assert!(
        !buffers.is_empty(),
        "You must provide at least one vertex buffer to construct a mesh."
    );

    if index_count != 0 {
        assert!(
            index_count % 3 == 0,
            "You must provide 3 indices for each triangle"
        );
        return index_count / 3;
    }

    let mut counts = buffers
        .iter()
        .map(|(layout, floats)| floats / layout.floats_per_vertex() / 3);
    let first = counts.next().unwrap_or(0);
    for count in counts {
        assert_eq!(
            first, count,
            "Some vertex buffers contain more vertices than others! Make sure that their data is correct, and that the layout matches the data."
        );
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout ──────────────────────────────────────────────────────────────

    #[test]
    fn interleaved_position_uv_layout() {
        let layout = VertexLayout::new(&[
            VertexAttribute::position_3d(0),
            VertexAttribute::uv(1),
        ]);
        assert_eq!(layout.stride, 20);
        assert_eq!(
            layout.attributes,
            vec![
                (VertexAttribute::Vec3(0), 0),
                (VertexAttribute::Vec2(1), 12)
            ]
        );
    }

    #[test]
    fn int_attributes_are_four_bytes_per_component() {
        let attr = VertexAttribute::IVec3(2);
        assert_eq!(attr.size_in_bytes(), 12);
        assert_eq!(attr.gl_type(), glow::INT);
        assert_eq!(attr.index(), 2);
        assert_eq!(VertexAttribute::color_rgba(5).gl_type(), glow::FLOAT);
    }

    #[test]
    #[should_panic]
    fn empty_layout_is_rejected() {
        let _ = VertexLayout::new(&[]);
    }

    // ── triangle count ──────────────────────────────────────────────────────

    #[test]
    fn indexed_count_comes_from_indices() {
        let layout = VertexLayout::new(&[VertexAttribute::position_3d(0)]);
        assert_eq!(triangle_count(&[(&layout, 24)], 36), 12);
    }

    #[test]
    fn non_indexed_count_comes_from_vertices() {
        let layout = VertexLayout::new(&[VertexAttribute::position_2d(0)]);
        assert_eq!(triangle_count(&[(&layout, 12)], 0), 2);
    }

    #[test]
    fn buffers_with_matching_vertex_counts_agree() {
        let positions = VertexLayout::new(&[VertexAttribute::position_3d(0)]);
        let colors = VertexLayout::new(&[VertexAttribute::color_rgba(1)]);
        assert_eq!(triangle_count(&[(&positions, 9), (&colors, 12)], 0), 1);
    }

    #[test]
    #[should_panic(expected = "3 indices")]
    fn index_count_must_be_a_multiple_of_three() {
        let layout = VertexLayout::new(&[VertexAttribute::position_3d(0)]);
        let _ = triangle_count(&[(&layout, 9)], 4);
    }

    #[test]
    #[should_panic(expected = "more vertices than others")]
    fn mismatched_buffers_are_rejected() {
        let positions = VertexLayout::new(&[VertexAttribute::position_3d(0)]);
        let uvs = VertexLayout::new(&[VertexAttribute::uv(1)]);
        let _ = triangle_count(&[(&positions, 18), (&uvs, 6)], 0);
    }

    #[test]
    #[should_panic]
    fn mesh_without_buffers_is_rejected() {
        let _ = triangle_count(&[], 3);
    }
}
