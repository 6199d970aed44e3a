//! One animation session: the state a frame tick reads and writes, the
//! events the host feeds in, and the lifecycle guarantees around stop.
//!
//! Events and ticks are expected on one logical thread. The session is
//! the single writer of its state; anything concurrent has to serialize
//! access in front of it.

use log::{debug, info};

use crate::config::{ConfigError, RenderConfig};
use crate::dither::FramePass;
use crate::frame::FrameBuffer;
use crate::screen::Size;

/// Where the pointer starts: far enough off-canvas that its influence
/// is negligible before the first real pointer event.
pub const OFF_CANVAS: [f64; 2] = [-1000.0, -1000.0];

/// Mutable per-session state. All coordinates live in buffer space,
/// already divided by the pixel size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    /// Wave phase. Grows by the wave speed every tick and never wraps.
    pub time: f64,
    /// Pointer position frames are shaded with.
    pub pointer: [f64; 2],
    /// Most recent pointer event, applied to `pointer` at tick time.
    pub pointer_target: [f64; 2],
    pub hovering: bool,
    /// Eased influence radius in native pixels. Unused by the basic
    /// (non-eased) contract.
    pub radius: f64,
}

impl RenderState {
    pub fn new() -> Self {
        RenderState {
            time: 0.0,
            pointer: OFF_CANVAS,
            pointer_target: OFF_CANVAS,
            hovering: false,
            radius: 0.0,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

/// External happenings the host forwards into the session. Coordinates
/// arrive in native pixels; the session converts to buffer space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Resized { width: u32, height: u32 },
    PointerMoved { x: f64, y: f64 },
    PointerEntered,
    PointerLeft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Running,
    Stopped,
}

/// A running render session. Constructing one is the `Idle → Running`
/// transition; [`Session::stop`] is `Running → Stopped` and guarantees
/// no frame is produced afterwards.
pub struct Session {
    config: RenderConfig,
    state: RenderState,
    frame: FrameBuffer,
    phase: Phase,
    frames_rendered: u64,
}

impl Session {
    /// Validate the config and start a session sized for `viewport`.
    pub fn start(config: RenderConfig, viewport: Size) -> Result<Self, ConfigError> {
        config.validate()?;
        let buffer = viewport.downscaled(config.pixel_size);
        info!(
            "starting render session: {}x{} buffer at pixel size {}, {} halo",
            buffer.width,
            buffer.height,
            config.pixel_size,
            if config.eased() { "eased" } else { "static" }
        );
        Ok(Session {
            config,
            state: RenderState::new(),
            frame: FrameBuffer::new(buffer),
            phase: Phase::Running,
            frames_rendered: 0,
        })
    }

    /// Fold one event into the state. Ignored once stopped.
    pub fn apply(&mut self, event: InputEvent) {
        if self.phase == Phase::Stopped {
            debug!("ignoring {:?} after stop", event);
            return;
        }
        match event {
            InputEvent::Resized { width, height } => {
                let size = Size::new(width, height).downscaled(self.config.pixel_size);
                if size != self.frame.size() {
                    debug!("resizing buffer to {}x{}", size.width, size.height);
                    self.frame.resize(size);
                }
            }
            InputEvent::PointerMoved { x, y } => {
                let pixel_size = self.config.pixel_size as f64;
                self.state.pointer_target = [x / pixel_size, y / pixel_size];
                self.state.hovering = true;
            }
            InputEvent::PointerEntered => self.state.hovering = true,
            InputEvent::PointerLeft => self.state.hovering = false,
        }
    }

    /// Advance one frame and shade the buffer. Returns the frame to
    /// present, or `None` once stopped or while the buffer is
    /// degenerate (a viewport smaller than one pixel cell).
    pub fn tick(&mut self) -> Option<&FrameBuffer> {
        if self.phase == Phase::Stopped {
            return None;
        }
        self.state.time += self.config.wave_speed;
        self.state.pointer = self.state.pointer_target;
        if let Some(ease) = self.config.ease_factor {
            let target = if self.state.hovering {
                self.config.mouse_radius
            } else {
                0.0
            };
            self.state.radius += (target - self.state.radius) * ease;
        }
        if self.frame.size().is_empty() {
            return None;
        }
        let pass = FramePass::new(&self.config, &self.state, self.frame.size());
        self.frame.fill(&pass);
        self.frames_rendered += 1;
        Some(&self.frame)
    }

    /// Stop for good. Idempotent; after this no tick shades or returns
    /// a frame and events are dropped.
    pub fn stop(&mut self) {
        if self.phase == Phase::Stopped {
            return;
        }
        self.phase = Phase::Stopped;
        info!("render session stopped after {} frames", self.frames_rendered);
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn buffer_size(&self) -> Size {
        self.frame.size()
    }
}
