//! Server Room - third-person walk-around
//!
//! Run with: `cargo run --bin server_room -- [--config scene.json]`
//!
//! Controls:
//! - Click: capture the pointer, then activate the target under the reticle
//! - WASD / Arrows: Move
//! - Mouse: Look around (while captured)
//! - E: Activate
//! - ESC: Close overlay / release the pointer
//! - Enter: Confirm log out
//! - F3 / `: Toggle debug wireframe
//!
//! `--headless-frames N` skips the window and drives a scripted walk for N
//! fixed 60 Hz ticks, logging every presentation event.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::Mat4;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use server_room_engine::game::{InputConfig, SceneConfig, WalkSession, build_wireframe};
use server_room_engine::input::InputAction;
use server_room_engine::interaction::TargetKind;
use server_room_engine::presentation::{
    CueId, OverlayKind, OverlayPayload, Presentation, TracingPresentation,
};
use server_room_engine::render::{GpuContext, GpuContextConfig, LinePipeline, WireframeBuilder};

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 200.0;
const HEADLESS_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "server_room", about = "Third-person server room walk-around")]
struct Args {
    /// Scene config (JSON). Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run N fixed ticks of a scripted walk without opening a window
    #[arg(long, value_name = "N")]
    headless_frames: Option<u64>,

    /// Disable vsync
    #[arg(long)]
    no_vsync: bool,
}

fn load_config(path: Option<&PathBuf>) -> SceneConfig {
    let Some(path) = path else {
        return SceneConfig::default();
    };
    match SceneConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}; falling back to the default scene");
            SceneConfig::default()
        }
    }
}

// ============================================================================
// HEADLESS RUN
// ============================================================================

/// Input for one frame of the scripted walk.
fn scripted_input(session: &mut WalkSession, frame: u64, presentation: &mut dyn Presentation) {
    match frame {
        0 => {
            session.on_primary_click(presentation);
        }
        1 => {
            session.handle_action(InputAction::MoveForward, true, presentation);
        }
        150 => {
            session.handle_action(InputAction::Activate, true, presentation);
        }
        180 => {
            session.handle_action(InputAction::Cancel, true, presentation);
        }
        240 => {
            session.handle_action(InputAction::MoveForward, false, presentation);
            session.handle_action(InputAction::MoveRight, true, presentation);
        }
        241..=300 => session.on_mouse_motion(6.0, 0.0),
        360 => {
            session.handle_action(InputAction::MoveRight, false, presentation);
            session.handle_action(InputAction::ToggleDebug, true, presentation);
        }
        _ => {}
    }
}

fn run_headless(config: SceneConfig, frames: u64) {
    let mut session = WalkSession::new(config);
    let mut presentation = TracingPresentation;
    info!(frames, "headless run");
    for marker in session.minimap_markers() {
        debug!(label = %marker.label, x = marker.x, z = marker.z, "minimap marker");
    }

    for frame in 0..frames {
        scripted_input(&mut session, frame, &mut presentation);
        let out = session.tick(HEADLESS_DT, &mut presentation);
        if out.frame % 60 == 0 {
            info!(
                frame = out.frame,
                hud = %out.hud,
                prompt = out.prompt.unwrap_or("-"),
                overlay = ?out.overlay,
                "frame"
            );
        }
    }

    let out = session.frame_output();
    info!(hud = %out.hud, target_id = ?out.target, "headless run finished");
}

// ============================================================================
// WINDOWED RUN
// ============================================================================

/// Presentation host that shows everything in the window title.
#[derive(Default)]
struct TitlePresentation {
    prompt: Option<&'static str>,
    overlay: Option<String>,
}

impl Presentation for TitlePresentation {
    fn notify_target_acquired(&mut self, kind: TargetKind) {
        self.prompt = Some(kind.prompt_text());
    }

    fn notify_target_lost(&mut self) {
        self.prompt = None;
    }

    fn play_cue(&mut self, cue: CueId) {
        // No audio output; cues only show up in the log
        debug!(cue = cue.asset_name(), "cue");
    }

    fn open_overlay(&mut self, kind: OverlayKind, payload: &OverlayPayload) {
        let text = match payload {
            OverlayPayload::Project(project) => {
                info!(
                    title = %project.title,
                    tech = %project.tech,
                    link = %project.link,
                    "{}",
                    project.description
                );
                format!("[{}] {}", project.title, project.tech)
            }
            OverlayPayload::Core => "[CHAOS CORE ONLINE]".to_string(),
            OverlayPayload::Logout => "[LOG OUT? Enter / Esc]".to_string(),
        };
        info!(?kind, "overlay shown");
        self.overlay = Some(text);
    }

    fn close_overlay(&mut self, _kind: OverlayKind) {
        self.overlay = None;
    }
}

struct ServerRoomApp {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    pipeline: Option<LinePipeline>,
    gpu_config: GpuContextConfig,
    session: WalkSession,
    presentation: TitlePresentation,
    input: InputConfig,
    lines: WireframeBuilder,
    last_frame: Instant,
}

impl ServerRoomApp {
    fn new(config: SceneConfig, gpu_config: GpuContextConfig) -> Self {
        Self {
            window: None,
            gpu: None,
            pipeline: None,
            gpu_config,
            session: WalkSession::new(config),
            presentation: TitlePresentation::default(),
            input: InputConfig::default(),
            lines: WireframeBuilder::new(),
            last_frame: Instant::now(),
        }
    }

    fn initialize(&mut self, window: Arc<Window>) -> bool {
        let gpu = match GpuContext::new(window.clone(), self.gpu_config.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                error!("{e}");
                return false;
            }
        };
        let pipeline = LinePipeline::new(&gpu);
        self.gpu = Some(gpu);
        self.pipeline = Some(pipeline);
        self.window = Some(window);
        self.last_frame = Instant::now();
        true
    }

    /// Push the session's capture state to the real cursor.
    fn apply_cursor(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let cursor = self.session.cursor_mut();
        if !cursor.is_dirty() {
            return;
        }
        if cursor.is_captured() {
            if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
                let _ = window.set_cursor_grab(CursorGrabMode::Confined);
            }
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
        }
        window.set_cursor_visible(cursor.should_cursor_be_visible());
        cursor.clear_dirty();
    }

    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let out = self.session.frame_output();
        let mut title = format!("Server Room | {}", out.hud);
        if let Some(overlay) = &self.presentation.overlay {
            title.push_str(&format!(" | {overlay}"));
        } else if let Some(prompt) = self.presentation.prompt {
            title.push_str(&format!(" | [E] {prompt}"));
        }
        if out.debug {
            title.push_str(" | DEBUG");
        }
        title.push_str(&format!(" | {}", self.session.status_message()));
        window.set_title(&title);
    }

    fn render(&mut self) {
        let (Some(gpu), Some(pipeline)) = (&self.gpu, &mut self.pipeline) else {
            return;
        };

        build_wireframe(&self.session, &mut self.lines);
        let out = self.session.frame_output();
        let fov_y = self.session.config().camera.fov_y;
        let projection = Mat4::perspective_rh(fov_y, gpu.aspect_ratio(), NEAR_PLANE, FAR_PLANE);
        pipeline.set_view_proj(gpu, projection * out.camera.view_matrix());
        pipeline.upload(gpu, self.lines.vertices());

        let frame = match gpu.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("out of GPU memory");
                return;
            }
            Err(e) => {
                warn!("surface error: {e:?}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        pipeline.draw(&mut encoder, &view, &gpu.depth_view);
        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

impl ApplicationHandler for ServerRoomApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title("Server Room")
            .with_inner_size(PhysicalSize::new(1280, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        if !self.initialize(window) {
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key
                    && let Some(action) = self.input.action_for(key)
                {
                    let pressed = event.state == ElementState::Pressed;
                    self.session
                        .handle_action(action, pressed, &mut self.presentation);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.session.on_primary_click(&mut self.presentation);
            }
            WindowEvent::Focused(focused) => {
                if focused {
                    self.session.on_focus_gained();
                } else {
                    self.session.on_focus_lost();
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;

                self.session.tick(dt, &mut self.presentation);
                self.apply_cursor();
                self.update_title();
                self.render();
            }
            _ => {}
        }
        self.apply_cursor();
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.session
                .on_mouse_motion(delta.0 as f32, delta.1 as f32);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref());

    if let Some(frames) = args.headless_frames {
        run_headless(config, frames);
        return;
    }

    info!("click to enter; WASD to move, E to interact, ESC to release, F3 for debug");

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("failed to create event loop: {e}");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let gpu_config = GpuContextConfig {
        vsync: !args.no_vsync,
        ..Default::default()
    };
    let mut app = ServerRoomApp::new(config, gpu_config);
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("event loop error: {e}");
    }
}
