use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{
    BufferDirty, BufferState, Series, SeriesId, SeriesKind, SeriesStyle, ViewportState,
};
use crate::error::{ChartError, ChartResult};
use crate::render::geometry::{Projection, error_bar_vertices, has_error_channels};
use crate::render::{
    BYTES_PER_COMPONENT, BufferId, Rasterizer, SeriesGeometry, TextureId, build_geometry,
    line_vertices,
};

/// One frame's description of what to rasterize for one series.
///
/// `y_bounds` is the owning axis' visible range in scale space.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawDescriptor {
    pub id: SeriesId,
    pub kind: SeriesKind,
    pub buffer: BufferId,
    pub vertex_count: usize,
    pub components_per_vertex: usize,
    pub style: SeriesStyle,
    pub visible: bool,
    pub y_bounds: (f64, f64),
    pub aux_buffer: Option<BufferId>,
    pub aux_vertex_count: usize,
    pub texture: Option<TextureId>,
}

impl DrawDescriptor {
    pub fn validate(&self) -> ChartResult<()> {
        if !matches!(self.components_per_vertex, 2 | 3) {
            return Err(ChartError::InvalidData(format!(
                "series `{}` has unsupported vertex layout with {} components",
                self.id, self.components_per_vertex
            )));
        }
        let (min, max) = self.y_bounds;
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(ChartError::InvalidData(format!(
                "series `{}` has degenerate y bounds",
                self.id
            )));
        }
        Ok(())
    }
}

/// Upload counters for one build pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildStats {
    pub full_rebuilds: usize,
    pub partial_writes: usize,
    pub reused: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
struct BufferRecord {
    /// Main buffer first, then the aux buffer when one exists.
    buffers: SmallVec<[BufferId; 2]>,
    vertex_count: usize,
    aux_vertex_count: usize,
    components: usize,
    texture: Option<TextureId>,
    kind: SeriesKind,
    projection: Projection,
}

impl BufferRecord {
    fn main(&self) -> &BufferId {
        &self.buffers[0]
    }

    fn aux(&self) -> Option<&BufferId> {
        self.buffers.get(1)
    }
}

/// Per-frame draw-list builder that owns the upload strategy.
///
/// Clean series reuse their last upload. Append-only updates on line-like
/// series become partial writes at the tail of the existing buffer; every
/// other change regenerates the full geometry.
///
/// Buffers that reached the rasterizer are tracked apart from the draw
/// records, so a series whose upload failed halfway still has every written
/// buffer deleted on release.
#[derive(Debug, Default)]
pub struct DrawListBuilder {
    records: HashMap<SeriesId, BufferRecord>,
    resident: HashMap<SeriesId, SmallVec<[BufferId; 2]>>,
    failing: HashSet<SeriesId>,
}

impl DrawListBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings every series' buffers up to date and returns the draw list in
    /// series order.
    ///
    /// A series whose upload fails is left out of this frame and stays
    /// dirty for the next one.
    pub fn build<'a, R: Rasterizer>(
        &mut self,
        rasterizer: &mut R,
        series: impl IntoIterator<Item = &'a mut Series>,
        state: &ViewportState,
    ) -> (Vec<DrawDescriptor>, BuildStats) {
        let mut stats = BuildStats::default();
        let mut draw_list = Vec::new();
        let x_kind = state.x().kind;

        for series in series {
            let Some(axis) = state.y(series.axis_id()) else {
                warn!(
                    series = %series.id(),
                    axis = %series.axis_id(),
                    "series references unknown axis; skipping"
                );
                stats.skipped += 1;
                continue;
            };
            let projection = Projection {
                x: x_kind,
                y: axis.kind,
            };

            match self.sync_series(rasterizer, series, projection, &mut stats) {
                Ok(()) => {
                    self.failing.remove(series.id());
                    series.mark_uploaded();
                }
                Err(err) => {
                    if self.failing.insert(series.id().clone()) {
                        warn!(series = %series.id(), error = %err, "failed to upload series buffers");
                    }
                    self.records.remove(series.id());
                    series.mark_buffer_lost();
                    stats.skipped += 1;
                    continue;
                }
            }

            if let Some(record) = self.records.get(series.id()) {
                draw_list.push(DrawDescriptor {
                    id: series.id().clone(),
                    kind: series.kind(),
                    buffer: record.main().clone(),
                    vertex_count: record.vertex_count,
                    components_per_vertex: record.components,
                    style: *series.style(),
                    visible: series.is_visible(),
                    y_bounds: axis.projected(),
                    aux_buffer: record.aux().cloned(),
                    aux_vertex_count: record.aux_vertex_count,
                    texture: record.texture.clone(),
                });
            }
        }

        trace!(
            full = stats.full_rebuilds,
            partial = stats.partial_writes,
            reused = stats.reused,
            skipped = stats.skipped,
            "build draw list"
        );
        (draw_list, stats)
    }

    /// Deletes every rasterizer buffer written for `series_id`, including
    /// those left behind by a failed upload.
    pub fn release<R: Rasterizer>(&mut self, rasterizer: &mut R, series_id: &SeriesId) -> ChartResult<()> {
        self.failing.remove(series_id);
        self.records.remove(series_id);
        let Some(buffers) = self.resident.remove(series_id) else {
            return Ok(());
        };
        for buffer in &buffers {
            rasterizer.delete_buffer(buffer)?;
        }
        debug!(series = %series_id, buffers = buffers.len(), "release series buffers");
        Ok(())
    }

    /// Deletes the buffers of every series that has uploaded any.
    pub fn release_all<R: Rasterizer>(&mut self, rasterizer: &mut R) -> ChartResult<()> {
        let ids: Vec<SeriesId> = self.resident.keys().cloned().collect();
        for id in ids {
            self.release(rasterizer, &id)?;
        }
        Ok(())
    }

    /// Series holding at least one rasterizer buffer.
    #[must_use]
    pub fn tracked_series(&self) -> usize {
        self.resident.len()
    }

    /// Buffers currently allocated on the rasterizer for `series_id`.
    #[must_use]
    pub fn resident_buffers(&self, series_id: &SeriesId) -> usize {
        self.resident.get(series_id).map_or(0, SmallVec::len)
    }

    #[must_use]
    pub fn is_failing(&self, series_id: &SeriesId) -> bool {
        self.failing.contains(series_id)
    }

    fn sync_series<R: Rasterizer>(
        &mut self,
        rasterizer: &mut R,
        series: &Series,
        projection: Projection,
        stats: &mut BuildStats,
    ) -> ChartResult<()> {
        let record = self
            .records
            .get(series.id())
            .filter(|record| record.kind == series.kind() && record.projection == projection);

        match (series.buffer_state(), record) {
            (BufferState::Clean, Some(_)) => {
                stats.reused += 1;
                return Ok(());
            }
            (BufferState::Dirty(BufferDirty::Append { appended }), Some(record))
                if can_append(series, record, appended) =>
            {
                let record = record.clone();
                match write_tail(rasterizer, series, &record, appended) {
                    Ok(()) => {
                        if let Some(current) = self.records.get_mut(series.id()) {
                            current.vertex_count = series.len();
                            if current.aux().is_some() {
                                current.aux_vertex_count = series.len() * 2;
                            }
                        }
                        stats.partial_writes += 1;
                        return Ok(());
                    }
                    Err(err) => {
                        debug!(
                            series = %series.id(),
                            error = %err,
                            "partial write failed; falling back to full rebuild"
                        );
                    }
                }
            }
            _ => {}
        }

        self.rebuild(rasterizer, series, projection)?;
        stats.full_rebuilds += 1;
        Ok(())
    }

    fn rebuild<R: Rasterizer>(
        &mut self,
        rasterizer: &mut R,
        series: &Series,
        projection: Projection,
    ) -> ChartResult<()> {
        let geometry = build_geometry(series, projection.x, projection.y);
        let id = series.id();
        let main = BufferId::new(format!("{id}:main"));
        let aux = BufferId::new(format!("{id}:aux"));

        rasterizer.create_or_update_buffer(&main, &geometry.vertices, None)?;
        self.mark_resident(id, &main);
        let mut buffers: SmallVec<[BufferId; 2]> = SmallVec::new();
        buffers.push(main);
        match &geometry.aux_vertices {
            Some(aux_vertices) => {
                rasterizer.create_or_update_buffer(&aux, aux_vertices, None)?;
                self.mark_resident(id, &aux);
                buffers.push(aux);
            }
            None => {
                if self.is_resident(id, &aux) {
                    rasterizer.delete_buffer(&aux)?;
                    if let Some(resident) = self.resident.get_mut(id) {
                        resident.retain(|buffer| *buffer != aux);
                    }
                }
            }
        }

        let texture = match &geometry.texture {
            Some(texels) => {
                let texture = TextureId::new(format!("{id}:colormap"));
                rasterizer.create_or_update_texture_1d(&texture, texels)?;
                Some(texture)
            }
            None => None,
        };

        trace!(
            series = %id,
            vertices = geometry.vertex_count(),
            aux_vertices = geometry.aux_vertex_count(),
            "full series upload"
        );
        self.records.insert(id.clone(), record_for(series, &geometry, buffers, texture, projection));
        Ok(())
    }

    fn mark_resident(&mut self, series_id: &SeriesId, buffer: &BufferId) {
        let resident = self.resident.entry(series_id.clone()).or_default();
        if !resident.contains(buffer) {
            resident.push(buffer.clone());
        }
    }

    fn is_resident(&self, series_id: &SeriesId, buffer: &BufferId) -> bool {
        self.resident
            .get(series_id)
            .is_some_and(|resident| resident.contains(buffer))
    }
}

fn can_append(series: &Series, record: &BufferRecord, appended: usize) -> bool {
    let len = series.len();
    series.kind().supports_partial_append()
        && !series.style().smoothing_enabled()
        && appended > 0
        && appended < len
        && record.vertex_count + appended == len
        && record.aux().is_some() == has_error_channels(series)
}

/// Byte offset of `start_sample` in a buffer laid out with
/// `vertices_per_sample` vertices of `components` `f32` values each.
#[must_use]
pub(crate) fn byte_offset(start_sample: usize, vertices_per_sample: usize, components: usize) -> usize {
    start_sample * vertices_per_sample * components * BYTES_PER_COMPONENT
}

fn write_tail<R: Rasterizer>(
    rasterizer: &mut R,
    series: &Series,
    record: &BufferRecord,
    appended: usize,
) -> ChartResult<()> {
    let start = series.len() - appended;
    let tail = line_vertices(series, record.projection.x, record.projection.y, start);
    rasterizer.create_or_update_buffer(record.main(), &tail, Some(byte_offset(start, 1, 2)))?;
    if let Some(aux) = record.aux() {
        let tail = error_bar_vertices(series, record.projection, start);
        rasterizer.create_or_update_buffer(aux, &tail, Some(byte_offset(start, 2, 2)))?;
    }
    Ok(())
}

fn record_for(
    series: &Series,
    geometry: &SeriesGeometry,
    buffers: SmallVec<[BufferId; 2]>,
    texture: Option<TextureId>,
    projection: Projection,
) -> BufferRecord {
    BufferRecord {
        buffers,
        vertex_count: geometry.vertex_count(),
        aux_vertex_count: geometry.aux_vertex_count(),
        components: geometry.components,
        texture,
        kind: series.kind(),
        projection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScaleKind;

    #[test]
    fn byte_offset_scales_by_layout() {
        assert_eq!(byte_offset(10, 1, 2), 80);
        assert_eq!(byte_offset(10, 2, 2), 160);
        assert_eq!(byte_offset(0, 6, 3), 0);
    }

    #[test]
    fn scale_kinds_are_part_of_the_record() {
        let linear = Projection {
            x: ScaleKind::Linear,
            y: ScaleKind::Linear,
        };
        let log = Projection {
            x: ScaleKind::Linear,
            y: ScaleKind::Logarithmic,
        };
        assert_ne!(linear, log);
    }
}
