use std::collections::{HashMap, HashSet};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{BYTES_PER_COMPONENT, BufferId, Rasterizer, RenderFrame, TextureId};

/// In-memory rasterizer used by tests and headless engine usage.
///
/// It keeps uploaded buffers so tests can assert on exact vertex data,
/// validates every frame, and can be told to fail specific buffers.
#[derive(Debug, Default)]
pub struct NullRasterizer {
    buffers: HashMap<BufferId, Vec<f32>>,
    textures: HashMap<TextureId, Vec<u8>>,
    failing_buffers: HashSet<BufferId>,
    reject_partial_writes: bool,
    last_frame: Option<RenderFrame>,
    viewport: Option<Viewport>,
    pub full_writes: usize,
    pub partial_writes: usize,
    pub deleted_buffers: usize,
    pub frames_rendered: usize,
}

impl NullRasterizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every write to `id` fail until [`NullRasterizer::restore_buffer`].
    pub fn fail_buffer(&mut self, id: impl Into<String>) {
        self.failing_buffers.insert(BufferId::new(id));
    }

    pub fn restore_buffer(&mut self, id: impl Into<String>) {
        self.failing_buffers.remove(&BufferId::new(id));
    }

    /// Makes every offset write fail while full writes keep working.
    pub fn set_reject_partial_writes(&mut self, reject: bool) {
        self.reject_partial_writes = reject;
    }

    #[must_use]
    pub fn buffer(&self, id: &str) -> Option<&[f32]> {
        self.buffers.get(&BufferId::new(id)).map(Vec::as_slice)
    }

    #[must_use]
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    #[must_use]
    pub fn texture(&self, id: &str) -> Option<&[u8]> {
        self.textures.get(&TextureId::new(id)).map(Vec::as_slice)
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl Rasterizer for NullRasterizer {
    fn create_or_update_buffer(
        &mut self,
        id: &BufferId,
        data: &[f32],
        byte_offset: Option<usize>,
    ) -> ChartResult<()> {
        if self.failing_buffers.contains(id) {
            return Err(ChartError::Backend(format!("buffer `{id}` allocation failed")));
        }

        let Some(byte_offset) = byte_offset else {
            self.buffers.insert(id.clone(), data.to_vec());
            self.full_writes += 1;
            return Ok(());
        };

        if self.reject_partial_writes {
            return Err(ChartError::Backend(format!(
                "partial writes are disabled for buffer `{id}`"
            )));
        }
        let buffer = self
            .buffers
            .get_mut(id)
            .ok_or_else(|| ChartError::Backend(format!("buffer `{id}` is not allocated")))?;
        if byte_offset % BYTES_PER_COMPONENT != 0 || byte_offset / BYTES_PER_COMPONENT > buffer.len() {
            return Err(ChartError::Backend(format!(
                "offset {byte_offset} is outside buffer `{id}` ({} bytes)",
                buffer.len() * BYTES_PER_COMPONENT
            )));
        }
        buffer.truncate(byte_offset / BYTES_PER_COMPONENT);
        buffer.extend_from_slice(data);
        self.partial_writes += 1;
        Ok(())
    }

    fn delete_buffer(&mut self, id: &BufferId) -> ChartResult<()> {
        if self.buffers.remove(id).is_some() {
            self.deleted_buffers += 1;
        }
        Ok(())
    }

    fn create_or_update_texture_1d(&mut self, id: &TextureId, rgba: &[u8]) -> ChartResult<()> {
        if rgba.len() % 4 != 0 {
            return Err(ChartError::Backend(format!(
                "texture `{id}` must hold whole RGBA8 texels"
            )));
        }
        self.textures.insert(id.clone(), rgba.to_vec());
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        for descriptor in &frame.draw_list {
            if !self.buffers.contains_key(&descriptor.buffer) {
                return Err(ChartError::Backend(format!(
                    "draw references missing buffer `{}`",
                    descriptor.buffer
                )));
            }
        }
        self.last_frame = Some(frame.clone());
        self.frames_rendered += 1;
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.viewport = Some(viewport);
        Ok(())
    }
}
