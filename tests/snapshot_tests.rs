use chart_viewport::api::{ChartEngine, ChartEngineConfig, EngineSnapshot};
use chart_viewport::core::{Bounds, Series, SeriesData, SeriesKind, Viewport};
use chart_viewport::interaction::InteractionMode;
use chart_viewport::render::NullRasterizer;

fn engine_with_series() -> ChartEngine<NullRasterizer> {
    let mut engine = ChartEngine::new(
        NullRasterizer::new(),
        ChartEngineConfig::new(Viewport::new(500, 360)),
    )
    .expect("engine");
    engine
        .add_series(
            Series::new("prices", SeriesKind::Line, "y")
                .with_max_points(100)
                .with_data(SeriesData::xy(
                    vec![0.0, 1.0, 2.0],
                    vec![5.0, f64::NAN, 7.0],
                )),
        )
        .expect("add");
    engine
}

#[test]
fn snapshot_summarizes_engine_state() {
    let engine = engine_with_series();
    let snapshot = engine.snapshot();

    assert_eq!(snapshot.viewport, Viewport::new(500, 360));
    assert_eq!(snapshot.layout, *engine.layout());
    assert_eq!(snapshot.view_bounds, engine.view_bounds());
    assert_eq!(snapshot.interaction_mode, InteractionMode::Idle);
    assert_eq!(snapshot.series.len(), 1);

    let series = &snapshot.series[0];
    assert_eq!(series.id.as_str(), "prices");
    assert_eq!(series.len, 3);
    assert_eq!(series.finite_samples, 2);
    assert_eq!(series.bounds, Bounds::new(0.0, 2.0, 5.0, 7.0));
    assert_eq!(series.max_points, Some(100));
}

#[test]
fn snapshot_json_parses_back() {
    let engine = engine_with_series();
    let json = engine.snapshot_json_pretty().expect("json");
    assert!(json.contains("\"prices\""));

    let parsed: EngineSnapshot = serde_json::from_str(&json).expect("parse snapshot");
    assert_eq!(parsed, engine.snapshot());
}
