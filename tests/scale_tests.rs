use approx::assert_relative_eq;
use chart_viewport::core::{LOG_DOMAIN_FLOOR, Scale, ScaleKind};

#[test]
fn linear_scale_maps_domain_onto_range() {
    let scale = Scale::linear((0.0, 100.0), (0.0, 500.0));
    assert_relative_eq!(scale.transform(0.0), 0.0);
    assert_relative_eq!(scale.transform(50.0), 250.0);
    assert_relative_eq!(scale.transform(100.0), 500.0);
    assert_relative_eq!(scale.invert(250.0), 50.0);
}

#[test]
fn inverted_pixel_range_flips_direction() {
    let scale = Scale::linear((0.0, 10.0), (300.0, 0.0));
    assert_relative_eq!(scale.transform(0.0), 300.0);
    assert_relative_eq!(scale.transform(10.0), 0.0);
    assert_relative_eq!(scale.invert(150.0), 5.0);
}

#[test]
fn log_scale_interpolates_exponents() {
    let scale = Scale::logarithmic((1.0, 1000.0), (0.0, 300.0));
    assert_relative_eq!(scale.transform(10.0), 100.0, epsilon = 1e-9);
    assert_relative_eq!(scale.transform(100.0), 200.0, epsilon = 1e-9);
    assert_relative_eq!(scale.invert(100.0), 10.0, max_relative = 1e-12);
}

#[test]
fn log_scale_sends_non_positive_values_to_range_start() {
    let scale = Scale::logarithmic((1.0, 100.0), (40.0, 340.0));
    assert_eq!(scale.transform(0.0), 40.0);
    assert_eq!(scale.transform(-5.0), 40.0);
}

#[test]
fn log_domain_is_floored() {
    let mut scale = Scale::logarithmic((1.0, 10.0), (0.0, 1.0));
    scale.set_domain(-1.0, 10.0);
    assert_eq!(scale.domain().0, LOG_DOMAIN_FLOOR);
}

#[test]
fn degenerate_domain_and_range_never_panic() {
    let flat_domain = Scale::linear((5.0, 5.0), (0.0, 100.0));
    assert_eq!(flat_domain.transform(5.0), 0.0);

    let flat_range = Scale::linear((0.0, 10.0), (42.0, 42.0));
    assert_eq!(flat_range.invert(42.0), 0.0);
}

#[test]
fn linear_ticks_use_nice_steps() {
    let scale = Scale::linear((0.0, 10.0), (0.0, 100.0));
    assert_eq!(scale.ticks(5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

    let scale = Scale::linear((0.0, 1.0), (0.0, 100.0));
    assert_eq!(
        scale.ticks(10),
        vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
    );
}

#[test]
fn linear_ticks_stay_inside_offset_domain() {
    let scale = Scale::linear((-3.3, 7.7), (0.0, 100.0));
    let ticks = scale.ticks(5);
    assert_eq!(ticks, vec![-2.0, 0.0, 2.0, 4.0, 6.0]);
}

#[test]
fn log_ticks_are_powers_of_ten() {
    let scale = Scale::logarithmic((1.0, 1000.0), (0.0, 100.0));
    assert_eq!(scale.ticks(10), vec![1.0, 10.0, 100.0, 1000.0]);
}

#[test]
fn log_ticks_are_thinned_to_count() {
    let scale = Scale::logarithmic((1.0, 1e9), (0.0, 100.0));
    let ticks = scale.ticks(3);
    assert_eq!(ticks.len(), 3);
    assert_eq!(ticks[0], 1.0);
    assert!(ticks.windows(2).all(|pair| pair[1] > pair[0]));
}

#[test]
fn zero_count_or_invalid_domain_yields_no_ticks() {
    assert!(Scale::linear((0.0, 10.0), (0.0, 1.0)).ticks(0).is_empty());
    assert!(Scale::linear((10.0, 0.0), (0.0, 1.0)).ticks(5).is_empty());
    assert!(Scale::linear((0.0, f64::NAN), (0.0, 1.0)).ticks(5).is_empty());
}

#[test]
fn projection_round_trips_through_scale_space() {
    let log = ScaleKind::Logarithmic;
    assert_relative_eq!(log.project(1000.0), 3.0);
    assert_relative_eq!(log.unproject(log.project(42.0)), 42.0, max_relative = 1e-12);
    assert_eq!(ScaleKind::Linear.project(-7.5), -7.5);
}

#[test]
fn sanitize_rejects_collapsed_ranges() {
    assert!(ScaleKind::Linear.sanitize(1.0, 1.0).is_none());
    assert!(ScaleKind::Linear.sanitize(2.0, 1.0).is_none());
    let raised = ScaleKind::Logarithmic
        .sanitize(-10.0, 10.0)
        .expect("log minimum is raised");
    assert_eq!(raised.min, LOG_DOMAIN_FLOOR);
    assert!(ScaleKind::Logarithmic.sanitize(-10.0, -1.0).is_none());
}
