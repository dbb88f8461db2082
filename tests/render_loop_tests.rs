use std::cell::RefCell;
use std::rc::Rc;

use chart_viewport::api::{ChartEngine, ChartEngineConfig, ChartEvent, EventKind, FrameOutcome};
use chart_viewport::core::{Series, SeriesData, SeriesId, SeriesKind, Viewport};
use chart_viewport::navigation::ZoomRequest;
use chart_viewport::render::NullRasterizer;

fn engine() -> ChartEngine<NullRasterizer> {
    ChartEngine::new(
        NullRasterizer::new(),
        ChartEngineConfig::new(Viewport::new(600, 400)),
    )
    .expect("engine")
}

#[test]
fn first_tick_renders_then_goes_idle() {
    let mut engine = engine();
    assert!(engine.needs_render());
    assert!(matches!(engine.tick(0.0), Ok(FrameOutcome::Rendered(_))));
    assert_eq!(engine.tick(16.0).expect("tick"), FrameOutcome::Idle);
    assert_eq!(engine.rasterizer().frames_rendered, 1);
}

#[test]
fn many_mutations_coalesce_into_one_frame() {
    let mut engine = engine();
    engine.tick(0.0).expect("tick");
    engine
        .add_series(
            Series::new("s", SeriesKind::Line, "y")
                .with_data(SeriesData::xy(vec![0.0, 1.0], vec![0.0, 1.0])),
        )
        .expect("add");
    for step in 0..10 {
        engine
            .append_data(
                &SeriesId::from("s"),
                SeriesData::xy(vec![2.0 + f64::from(step)], vec![0.5]),
            )
            .expect("append");
    }
    engine.pan(5.0, 0.0, None).expect("pan");

    assert!(matches!(engine.tick(16.0), Ok(FrameOutcome::Rendered(_))));
    assert_eq!(engine.tick(32.0).expect("tick"), FrameOutcome::Idle);
    assert_eq!(engine.rasterizer().frames_rendered, 2);
    assert_eq!(engine.rasterizer().full_writes, 1);
}

#[test]
fn streaming_appends_render_as_partial_writes() {
    let mut engine = engine();
    engine
        .add_series(
            Series::new("s", SeriesKind::Line, "y")
                .with_data(SeriesData::xy(vec![0.0, 1.0], vec![0.0, 1.0])),
        )
        .expect("add");
    engine.tick(0.0).expect("tick");

    engine
        .append_data(&SeriesId::from("s"), SeriesData::xy(vec![2.0], vec![4.0]))
        .expect("append");
    engine.tick(16.0).expect("tick");

    let rasterizer = engine.rasterizer();
    assert_eq!(rasterizer.partial_writes, 1);
    let frame = rasterizer.last_frame().expect("frame");
    assert_eq!(frame.draw_list[0].vertex_count, 3);
}

#[test]
fn render_event_reports_fps_over_one_second_windows() {
    let mut engine = engine();
    let stats = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&stats);
    engine.subscribe(EventKind::Render, move |event| {
        if let ChartEvent::Render(stats) = event {
            sink.borrow_mut().push(*stats);
        }
    });

    for frame in 0..=20 {
        engine.request_render();
        engine.tick(f64::from(frame) * 50.0).expect("tick");
    }

    let stats = stats.borrow();
    assert_eq!(stats.len(), 21);
    assert_eq!(stats[0].fps, 0.0);
    let last = stats[20];
    assert!((last.fps - 20.0).abs() < 1e-9, "fps was {}", last.fps);
    assert!(last.frame_time_ms >= 0.0);
    assert_eq!(engine.last_render_stats(), Some(last));
}

#[test]
fn frame_uniforms_describe_view_in_scale_space() {
    let mut engine = engine();
    engine
        .zoom(ZoomRequest::new().with_x(10.0, 20.0).with_y(-1.0, 1.0))
        .expect("zoom");
    engine.render().expect("render");

    let frame = engine.rasterizer().last_frame().expect("frame");
    let bounds = frame.uniforms.data_bounds;
    assert_eq!((bounds.x_min, bounds.x_max), (10.0, 20.0));
    assert_eq!((bounds.y_min, bounds.y_max), (-1.0, 1.0));
    assert_eq!(frame.uniforms.plot_area, engine.layout().plot_area);
}

#[test]
fn hidden_series_stays_in_draw_list_as_invisible() {
    let mut engine = engine();
    engine
        .add_series(
            Series::new("s", SeriesKind::Scatter, "y")
                .with_visible(false)
                .with_data(SeriesData::xy(vec![0.0], vec![0.0])),
        )
        .expect("add");
    engine.tick(0.0).expect("tick");

    let frame = engine.rasterizer().last_frame().expect("frame");
    assert_eq!(frame.draw_list.len(), 1);
    assert_eq!(frame.visible_draw_count(), 0);
}

#[test]
fn destroy_releases_buffers_and_stops_loop() {
    let mut engine = engine();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    engine.subscribe(EventKind::Render, move |_| *counter.borrow_mut() += 1);
    engine
        .add_series(
            Series::new("s", SeriesKind::Line, "y")
                .with_data(SeriesData::xy(vec![0.0, 1.0], vec![0.0, 1.0])),
        )
        .expect("add");
    engine.tick(0.0).expect("tick");
    assert_eq!(*calls.borrow(), 1);

    engine.destroy().expect("destroy");
    assert!(engine.is_destroyed());
    assert_eq!(engine.rasterizer().buffer_count(), 0);
    assert!(engine.subscriptions().is_empty());

    engine.request_render();
    assert_eq!(engine.tick(16.0).expect("tick"), FrameOutcome::Stopped);
    assert_eq!(engine.render().expect("render"), FrameOutcome::Stopped);
    assert_eq!(*calls.borrow(), 1);
    engine.destroy().expect("second destroy is a no-op");
}
