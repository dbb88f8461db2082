mod draw_list;
mod frame;
mod geometry;
mod null_rasterizer;
mod primitives;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use draw_list::{BuildStats, DrawDescriptor, DrawListBuilder};
pub use frame::{FrameUniforms, RenderFrame};
pub use geometry::{
    CANDLE_VERTICES, COLORMAP_SIZE, QUAD_VERTICES, SeriesGeometry, build_geometry, colormap,
    line_vertices,
};
pub use null_rasterizer::NullRasterizer;
pub use primitives::{Color, RectPrimitive};

use crate::core::Viewport;
use crate::error::ChartResult;

/// Bytes per vertex component (`f32`).
pub const BYTES_PER_COMPONENT: usize = 4;

/// Handle of one vertex buffer owned by the rasterizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BufferId(String);

impl BufferId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle of one 1-D RGBA8 texture owned by the rasterizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureId(String);

impl TextureId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contract implemented by any GPU backend.
///
/// The engine decides what to draw and which bytes to upload; backends own
/// the buffers and turn a [`RenderFrame`] into pixels. Vertex data is `f32`
/// in scale space, so a backend only needs the affine transform described by
/// [`FrameUniforms`] and each descriptor's Y bounds.
pub trait Rasterizer {
    /// Uploads `data` into buffer `id`.
    ///
    /// `None` replaces the whole buffer. `Some(offset)` overwrites from
    /// `offset` bytes onward and grows the buffer as needed; it fails when
    /// the buffer does not exist yet.
    fn create_or_update_buffer(
        &mut self,
        id: &BufferId,
        data: &[f32],
        byte_offset: Option<usize>,
    ) -> ChartResult<()>;

    fn delete_buffer(&mut self, id: &BufferId) -> ChartResult<()>;

    fn create_or_update_texture_1d(&mut self, id: &TextureId, rgba: &[u8]) -> ChartResult<()>;

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    fn resize(&mut self, viewport: Viewport) -> ChartResult<()>;
}
