use crate::core::{ChartLayout, SeriesStyle};
use crate::error::{ChartError, ChartResult};

use super::LayoutMargins;

pub(super) fn validate_pixel_ratio(pixel_ratio: f64) -> ChartResult<()> {
    if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "pixel ratio must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_margins(margins: LayoutMargins) -> ChartResult<()> {
    for (name, value) in [
        ("top", margins.top),
        ("right", margins.right),
        ("bottom", margins.bottom),
        ("left", margins.left),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "layout margin `{name}` must be finite and >= 0"
            )));
        }
    }
    Ok(())
}

pub(super) fn validate_axis_width(axis_width: f64) -> ChartResult<()> {
    if !axis_width.is_finite() || axis_width <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "axis width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_layout(layout: &ChartLayout) -> ChartResult<()> {
    let plot = layout.plot_area;
    if ![plot.x, plot.y, plot.width, plot.height]
        .into_iter()
        .all(f64::is_finite)
        || plot.width < 0.0
        || plot.height < 0.0
    {
        return Err(ChartError::InvalidConfig(
            "plot area must be finite with non-negative size".to_owned(),
        ));
    }
    validate_axis_width(layout.axis_width)?;
    for axis in &layout.axes {
        if !axis.pixel_offset.is_finite() || axis.pixel_offset < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "axis `{}` pixel offset must be finite and >= 0",
                axis.id
            )));
        }
    }
    Ok(())
}

pub(super) fn validate_rolling_window(max_points: Option<usize>) -> ChartResult<()> {
    if max_points == Some(0) {
        return Err(ChartError::InvalidData(
            "rolling window capacity must be > 0".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_series_style(style: &SeriesStyle) -> ChartResult<()> {
    style.color.validate()?;
    style.secondary_color.validate()?;
    for (name, value) in [
        ("line_width", style.line_width),
        ("point_size", style.point_size),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "series style `{name}` must be finite and > 0"
            )));
        }
    }
    if !style.width_ratio.is_finite() || style.width_ratio <= 0.0 || style.width_ratio > 1.0 {
        return Err(ChartError::InvalidData(
            "series style `width_ratio` must be in (0, 1]".to_owned(),
        ));
    }
    if let Some(width) = style.fixed_width
        && (!width.is_finite() || width <= 0.0)
    {
        return Err(ChartError::InvalidData(
            "series style `fixed_width` must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
