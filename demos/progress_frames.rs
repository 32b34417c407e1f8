//! Animates a mirrored progress bar on a calloop event loop and writes a
//! handful of frames as PNG files.
//!
//! Run with `RUST_LOG=debug cargo run --example progress_frames [out_dir]`.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopSignal};
use smooth_progress::prelude::*;

const WIDTH: u32 = 480;
const HEIGHT: u32 = 8;
const SAVE_EVERY: u32 = 6;

struct DemoState {
    signal: LoopSignal,
    frames: u32,
    saved: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("smooth-progress-frames"));
    std::fs::create_dir_all(&out_dir)?;

    let mut event_loop: EventLoop<'static, DemoState> = EventLoop::try_new()?;
    let scheduler = Rc::new(CalloopScheduler::new(event_loop.handle()));

    // 1.5 device pixels per dp: the default 4dp separator becomes 6px
    let drawable = Builder::with_scale_factor(1.5)
        .sections_count(5)?
        .stroke_width(HEIGHT as f32)?
        .speed(1.5)?
        .colors([
            Color::from_hex(0x33b5e5),
            Color::from_hex(0xaa66cc),
            Color::from_hex(0x99cc00),
            Color::from_hex(0xffbb33),
        ])?
        .interpolator(TimingFunction::EaseInOut)
        .mirror_mode(true)
        .build();

    let dirty = Rc::new(Cell::new(true));
    let hook = Rc::clone(&dirty);
    let bar = SmoothProgressBar::new(drawable, scheduler).on_invalidate(move || hook.set(true));
    bar.start();

    event_loop.handle().insert_source(
        Timer::from_duration(Duration::from_secs(2)),
        |_, _, state: &mut DemoState| {
            state.signal.stop();
            TimeoutAction::Drop
        },
    )
    .map_err(|err| err.error)?;

    let mut state = DemoState {
        signal: event_loop.get_signal(),
        frames: 0,
        saved: 0,
    };
    let bounds = Rect::new(0.0, 0.0, WIDTH as f32, HEIGHT as f32);
    let mut canvas = RasterCanvas::new(WIDTH, HEIGHT);

    event_loop.run(Some(FRAME_DURATION), &mut state, |state| {
        if !dirty.replace(false) {
            return;
        }
        canvas.clear(Color::from_hex(0x202020));
        bar.draw(&mut canvas, bounds);
        state.frames += 1;

        if state.frames % SAVE_EVERY == 0 {
            let path = out_dir.join(format!("frame_{:04}.png", state.frames));
            match canvas.image().save(&path) {
                Ok(()) => state.saved += 1,
                Err(err) => log::error!("could not write {}: {}", path.display(), err),
            }
        }
    })?;

    bar.stop();
    log::info!(
        "rendered {} frames, wrote {} to {}",
        state.frames,
        state.saved,
        out_dir.display()
    );
    Ok(())
}
