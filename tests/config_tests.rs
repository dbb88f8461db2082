use chart_viewport::api::{ChartEngineConfig, LayoutMargins, compute_layout};
use chart_viewport::core::{
    AxisId, AxisPosition, DataRange, PixelRect, ScaleKind, Viewport, YAxisConfig,
};
use chart_viewport::interaction::{DragMode, WheelZoomBehavior};
use chart_viewport::ChartError;

#[test]
fn minimal_json_fills_defaults() {
    let config = ChartEngineConfig::from_json_str(r#"{"viewport":{"width":800,"height":600}}"#)
        .expect("minimal config");
    assert_eq!(config, ChartEngineConfig::new(Viewport::new(800, 600)));
    assert_eq!(config.resolved_primary_axis(), Some(&AxisId::from("y")));
    assert_eq!(config.axis_width, 50.0);
    assert_eq!(config.drag_mode, DragMode::Pan);
}

#[test]
fn config_round_trips_through_json() {
    let config = ChartEngineConfig::new(Viewport::new(1024, 768))
        .with_pixel_ratio(2.0)
        .with_x_scale_kind(ScaleKind::Logarithmic)
        .with_x_range(DataRange::new(1.0, 1e6).expect("range"))
        .with_y_axes(vec![
            YAxisConfig::new("price"),
            YAxisConfig::new("volume").with_position(AxisPosition::Right),
        ])
        .with_primary_axis("volume")
        .with_drag_mode(DragMode::BoxSelect);

    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn malformed_json_is_invalid_config() {
    let err = ChartEngineConfig::from_json_str("{not json").expect_err("parse error");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn parsed_config_is_validated() {
    let err = ChartEngineConfig::from_json_str(
        r#"{"viewport":{"width":800,"height":600},"pixel_ratio":0.0}"#,
    )
    .expect_err("zero pixel ratio");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn duplicate_and_empty_axis_lists_are_rejected() {
    let base = ChartEngineConfig::new(Viewport::new(100, 100));
    assert!(matches!(
        base.clone().with_y_axes(Vec::new()).validate(),
        Err(ChartError::InvalidConfig(_))
    ));
    assert!(matches!(
        base.with_y_axes(vec![YAxisConfig::new("a"), YAxisConfig::new("a")])
            .validate(),
        Err(ChartError::InvalidConfig(_))
    ));
}

#[test]
fn unknown_primary_axis_is_rejected() {
    let err = ChartEngineConfig::new(Viewport::new(100, 100))
        .with_primary_axis("missing")
        .validate()
        .expect_err("unknown primary");
    assert!(matches!(err, ChartError::UnknownAxis(_)));
}

#[test]
fn log_axis_initial_range_must_be_positive() {
    let err = ChartEngineConfig::new(Viewport::new(100, 100))
        .with_y_axes(vec![
            YAxisConfig::new("log")
                .with_scale_kind(ScaleKind::Logarithmic)
                .with_initial_range(DataRange { min: -1.0, max: 10.0 }),
        ])
        .validate()
        .expect_err("non-positive log range");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn wheel_factors_are_validated() {
    let err = ChartEngineConfig::new(Viewport::new(100, 100))
        .with_wheel(WheelZoomBehavior {
            zoom_in_factor: 1.2,
            zoom_out_factor: 1.1,
        })
        .validate()
        .expect_err("zoom-in factor above one");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn negative_margins_are_rejected() {
    let err = ChartEngineConfig::new(Viewport::new(100, 100))
        .with_margins(LayoutMargins {
            left: -1.0,
            ..LayoutMargins::default()
        })
        .validate()
        .expect_err("negative margin");
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}

#[test]
fn layout_stacks_axes_and_clamps_small_viewports() {
    let axes = [
        YAxisConfig::new("a"),
        YAxisConfig::new("b"),
        YAxisConfig::new("c").with_position(AxisPosition::Right),
    ];
    let layout = compute_layout(Viewport::new(600, 400), LayoutMargins::default(), 50.0, &axes);
    assert_eq!(layout.plot_area, PixelRect::new(125.0, 20.0, 400.0, 340.0));
    let offsets: Vec<f64> = layout.axes.iter().map(|axis| axis.pixel_offset).collect();
    assert_eq!(offsets, vec![0.0, 50.0, 0.0]);
    let b = layout.axis(&AxisId::from("b")).expect("axis b");
    assert_eq!(layout.axis_line_x(b), 75.0);

    let tiny = compute_layout(Viewport::new(50, 30), LayoutMargins::default(), 50.0, &axes);
    assert_eq!(tiny.plot_area.width, 0.0);
    assert_eq!(tiny.plot_area.height, 0.0);
}
