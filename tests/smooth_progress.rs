use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use smooth_progress::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn red_blue_linear() -> SmoothProgressDrawable {
    SmoothProgressDrawable::builder()
        .sections_count(4)
        .and_then(|b| b.separator_length(4))
        .and_then(|b| b.colors([Color::from_hex(0xff0000), Color::from_hex(0x0000ff)]))
        .map(|b| b.interpolator(TimingFunction::Linear).build())
        .unwrap()
}

#[test]
fn test_bar_renders_moving_frames() {
    init_logging();
    let scheduler = Rc::new(ManualScheduler::new());
    let repaints = Rc::new(Cell::new(0));
    let hook = Rc::clone(&repaints);
    let bar = SmoothProgressBar::new(red_blue_linear(), scheduler.clone())
        .on_invalidate(move || hook.set(hook.get() + 1));
    let bounds = Rect::new(0.0, 0.0, 100.0, 4.0);

    let mut first = PaintContext::new();
    bar.draw(&mut first, bounds);
    let first: Vec<_> = first.commands().iter().map(DrawCommand::x_span).collect();
    assert_eq!(
        first,
        vec![(0.0, 23.0), (27.0, 50.0), (54.0, 77.0), (81.0, 100.0)]
    );

    bar.start();
    scheduler.advance(FRAME_DURATION * 10);
    assert_eq!(repaints.get(), 11);

    let mut later = PaintContext::new();
    bar.draw(&mut later, bounds);
    let later: Vec<_> = later.commands().iter().map(DrawCommand::x_span).collect();
    assert_ne!(first, later);
    for (start, end) in later {
        assert!(start <= end);
        assert!((0.0..=100.0).contains(&end));
    }

    bar.stop();
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_raster_output_matches_layout() {
    init_logging();
    let mut drawable = red_blue_linear();
    drawable.set_stroke_width(4.0).unwrap();
    let mut canvas = RasterCanvas::new(100, 4);
    drawable.draw(&mut canvas, Rect::new(0.0, 0.0, 100.0, 4.0));

    // first section is blue, then the separator gap, then red
    assert_eq!(canvas.pixel(10, 2), Some([0, 0, 255, 255]));
    assert_eq!(canvas.pixel(25, 2), Some([0, 0, 0, 0]));
    assert_eq!(canvas.pixel(30, 2), Some([255, 0, 0, 255]));
}

#[test]
fn test_reversed_raster_is_flipped() {
    init_logging();
    let mut forward = red_blue_linear();
    let mut reversed = red_blue_linear();
    reversed.set_reversed(true);

    let bounds = Rect::new(0.0, 0.0, 100.0, 4.0);
    let mut a = RasterCanvas::new(100, 4);
    let mut b = RasterCanvas::new(100, 4);
    forward.draw(&mut a, bounds);
    reversed.draw(&mut b, bounds);

    for x in 0..100 {
        assert_eq!(a.pixel(x, 1), b.pixel(99 - x, 1), "column {}", x);
    }
}

#[test]
fn test_style_from_theme_names() {
    init_logging();
    let curve: TimingFunction = "accelerate-decelerate".parse().unwrap();
    let style = ProgressStyle::new()
        .interpolator(curve)
        .sections_count(6)
        .mirror_mode(true);
    let drawable = SmoothProgressDrawable::builder()
        .style(&style)
        .unwrap()
        .build();
    assert_eq!(drawable.sections_count(), 6);
    assert!(drawable.mirror_mode());
    assert!((drawable.interpolator().interpolate(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn test_zero_speed_keeps_ticking_in_place() {
    init_logging();
    let scheduler = Rc::new(ManualScheduler::new());
    let mut drawable = red_blue_linear();
    drawable.set_speed(0.0).unwrap();
    let bar = SmoothProgressBar::new(drawable, scheduler.clone());
    bar.start();
    scheduler.advance(Duration::from_millis(500));
    assert!(bar.is_running());
    assert_eq!(bar.drawable().offset(), 0.0);
}
