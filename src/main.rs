use std::path::Path;

use clap::Parser;
use log::{info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod capture;
mod cli;
mod config;
mod dither;
mod encoder;
mod frame;
mod pixel;
mod present;
mod screen;
mod session;

use cli::Args;
use config::RenderConfig;
use present::Presenter;
use screen::Size;
use session::{InputEvent, Session};

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = args.render_config();

    if let Some(path) = args.capture.as_deref() {
        if let Err(error) = run_capture(config, args.capture_size, args.capture_frames, path) {
            eprintln!("capture failed: {error}");
            std::process::exit(1);
        }
        return;
    }

    run_windowed(config);
}

/// Tick a session without a window and write the final frame to disk.
fn run_capture(
    config: RenderConfig,
    viewport: Size,
    frames: u32,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::start(config, viewport)?;
    let size = session.buffer_size();
    info!(
        "capturing after {} frames at {}x{}",
        frames, size.width, size.height
    );
    for _ in 0..frames.max(1) {
        session.tick();
    }
    capture::save_png(session.frame(), path)?;
    session.stop();
    Ok(())
}

fn run_windowed(config: RenderConfig) {
    let event_loop = EventLoop::new();
    let window = match WindowBuilder::new()
        .with_title("wgpu-dither")
        .build(&event_loop)
    {
        Ok(window) => window,
        Err(error) => {
            warn!("no window available, not starting: {}", error);
            return;
        }
    };

    let size = window.inner_size();
    let mut session = match Session::start(config, Size::new(size.width, size.height)) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            std::process::exit(1);
        }
    };

    // No drawing surface means no render loop; the process just ends.
    let mut presenter = match Presenter::new(&window) {
        Ok(presenter) => presenter,
        Err(error) => {
            warn!("drawing surface unavailable, not starting: {}", error);
            return;
        }
    };

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::MainEventsCleared => {
                // Redraw continuously at the display's pace rather than
                // on a timer.
                window.request_redraw();
            }
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    session.stop();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    session.apply(InputEvent::Resized {
                        width: size.width,
                        height: size.height,
                    });
                    presenter.resize(size.width, size.height);
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    session.apply(InputEvent::PointerMoved {
                        x: position.x,
                        y: position.y,
                    });
                }
                WindowEvent::CursorEntered { .. } => session.apply(InputEvent::PointerEntered),
                WindowEvent::CursorLeft { .. } => session.apply(InputEvent::PointerLeft),
                _ => {}
            },
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                if let Some(frame) = session.tick() {
                    presenter.present(frame);
                }
            }
            Event::LoopDestroyed => session.stop(),
            _ => {}
        }
    });
}
