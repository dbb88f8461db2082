use chart_viewport::core::{
    BufferDirty, BufferState, Bounds, CacheState, Series, SeriesData, SeriesKind, SeriesStyle,
};

fn line(len: usize) -> Series {
    let x: Vec<f64> = (0..len).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..len).map(|i| (i * 2) as f64).collect();
    Series::new("line", SeriesKind::Line, "y").with_data(SeriesData::xy(x, y))
}

#[test]
fn bounds_cover_every_finite_sample() {
    let series = Series::new("s", SeriesKind::Line, "y").with_data(SeriesData::xy(
        vec![0.0, 1.0, 2.0, 3.0],
        vec![4.0, f64::NAN, -2.0, 8.0],
    ));
    assert_eq!(series.bounds(), Bounds::new(0.0, 3.0, -2.0, 8.0));
    assert_eq!(series.finite_sample_count(), 3);
}

#[test]
fn bounds_are_cached_until_data_changes() {
    let mut series = line(4);
    assert_eq!(series.bounds_cache_state(), CacheState::Dirty);
    let first = series.bounds();
    assert_eq!(series.bounds_cache_state(), CacheState::Clean);
    assert_eq!(series.bounds(), first);

    series.update_data(SeriesData::xy(vec![10.0], vec![100.0]), true);
    assert_eq!(series.bounds_cache_state(), CacheState::Dirty);
    assert_eq!(series.bounds().y_max, 100.0);
}

#[test]
fn series_without_finite_samples_reports_unit_bounds() {
    let series = Series::new("empty", SeriesKind::Scatter, "y").with_data(SeriesData::xy(
        vec![f64::NAN, 1.0],
        vec![1.0, f64::INFINITY],
    ));
    assert_eq!(series.bounds(), Bounds::UNIT);
    assert_eq!(series.finite_sample_count(), 0);
    assert!(!series.contributes_to_autoscale());
}

#[test]
fn hidden_series_does_not_contribute_to_autoscale() {
    let series = line(3).with_visible(false);
    assert!(!series.contributes_to_autoscale());
}

#[test]
fn ohlc_bounds_span_high_and_low() {
    let series = Series::new("c", SeriesKind::Candlestick, "y").with_data(SeriesData::ohlc(
        vec![0.0, 1.0],
        vec![10.0, 12.0],
        vec![15.0, 13.0],
        vec![9.0, 7.0],
        vec![12.0, 8.0],
    ));
    assert_eq!(series.bounds(), Bounds::new(0.0, 1.0, 7.0, 15.0));
}

#[test]
fn mismatched_xy_lengths_truncate_to_shorter() {
    let series = Series::new("s", SeriesKind::Line, "y")
        .with_data(SeriesData::xy(vec![0.0, 1.0, 2.0], vec![5.0, 6.0]));
    assert_eq!(series.len(), 2);
    assert_eq!(series.data().x, vec![0.0, 1.0]);
}

#[test]
fn short_aux_channel_is_padded_with_nan() {
    let series = Series::new("s", SeriesKind::Band, "y").with_data(
        SeriesData::xy(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]).with_y2(vec![0.5]),
    );
    let y2 = series.data().y2.as_ref().expect("y2 channel");
    assert_eq!(y2.len(), 3);
    assert!(y2[1].is_nan() && y2[2].is_nan());
}

#[test]
fn appends_accumulate_until_uploaded() {
    let mut series = line(10);
    series.mark_uploaded();
    assert_eq!(series.buffer_state(), BufferState::Clean);

    series.update_data(SeriesData::xy(vec![10.0, 11.0], vec![0.0, 0.0]), true);
    series.update_data(SeriesData::xy(vec![12.0], vec![0.0]), true);
    assert_eq!(
        series.buffer_state(),
        BufferState::Dirty(BufferDirty::Append { appended: 3 })
    );
    assert_eq!(series.len(), 13);
}

#[test]
fn replacing_data_requires_full_rebuild() {
    let mut series = line(10);
    series.mark_uploaded();
    series.update_data(SeriesData::xy(vec![0.0], vec![1.0]), false);
    assert_eq!(series.buffer_state(), BufferState::Dirty(BufferDirty::Full));
}

#[test]
fn empty_append_keeps_series_clean() {
    let mut series = line(4);
    series.mark_uploaded();
    series.update_data(SeriesData::default(), true);
    assert_eq!(series.buffer_state(), BufferState::Clean);
}

#[test]
fn rolling_window_drops_oldest_samples_in_lock_step() {
    let mut series = Series::new("s", SeriesKind::Line, "y")
        .with_max_points(4)
        .with_data(
            SeriesData::xy(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 20.0])
                .with_errors(vec![1.0; 3], vec![2.0; 3]),
        );
    series.mark_uploaded();
    series.update_data(
        SeriesData::xy(vec![3.0, 4.0, 5.0], vec![30.0, 40.0, 50.0])
            .with_errors(vec![1.0; 3], vec![2.0; 3]),
        true,
    );

    let data = series.data();
    assert_eq!(data.x, vec![2.0, 3.0, 4.0, 5.0]);
    assert_eq!(data.y, vec![20.0, 30.0, 40.0, 50.0]);
    assert_eq!(data.error_minus.as_ref().map(Vec::len), Some(4));
    assert_eq!(series.buffer_state(), BufferState::Dirty(BufferDirty::Full));
}

#[test]
fn shrinking_capacity_trims_immediately() {
    let mut series = line(10);
    series.set_max_points(Some(3));
    assert_eq!(series.len(), 3);
    assert_eq!(series.data().x, vec![7.0, 8.0, 9.0]);
}

#[test]
fn smoothing_changes_render_values_but_not_raw_data() {
    let series = Series::new("s", SeriesKind::Line, "y")
        .with_style(SeriesStyle::default().with_smoothing_window(3))
        .with_data(SeriesData::xy(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        ));
    assert_eq!(series.render_y(), &[1.5, 2.0, 3.0, 4.0, 4.5]);
    assert_eq!(series.data().y, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn kind_change_forces_full_rebuild() {
    let mut series = line(3);
    series.mark_uploaded();
    series.set_kind(SeriesKind::Line);
    assert_eq!(series.buffer_state(), BufferState::Clean);
    series.set_kind(SeriesKind::Step);
    assert_eq!(series.buffer_state(), BufferState::Dirty(BufferDirty::Full));
}
