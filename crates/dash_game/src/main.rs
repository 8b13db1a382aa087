//! Dapper Dasher -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Redraws are paced to
//! the configured frame rate by `FramePacer`; inside `RedrawRequested` the
//! round advances in fixed-dt slices (see `TimeState`):
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed accumulator
//!   2. `while should_step()` -- `GameState::update` with this frame's input
//!   3. Build the sprite batch from the updated state and stream it to the GPU
//!   4. Draw the sprites, composite the egui banner/debug overlay, present
//!
//! Startup is all-or-nothing: any config, window, GPU or texture failure is
//! logged and the event loop exits.

mod assets;
mod collision;
mod config;
mod frame;
mod game;
mod outcome;
mod physics;
#[cfg(test)]
mod replay;
mod scroll;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use assets::{TexturePaths, TextureSet};
use config::{load_config_or_default, GameConfig};
use dash_core::input::{InputState, Key};
use dash_core::time::{FramePacer, Pace, TimeState};
use dash_hud::{Hud, HudStats};
use dash_render::{Camera2D, GpuContext, MeshBuffers, SpritePipeline};
use frame::{banner_for, build_frame, CLEAR_COLOR};
use game::{GameState, TickInput};

const CONFIG_PATH: &str = "assets/config/dasher.json";
/// Texture paths in the config are relative to this directory.
const ASSET_ROOT: &str = ".";

/// Everything that exists once the window is up. Field order is drop order:
/// GPU resources go before the device that created them.
struct RunningGame {
    game: GameState,
    time: TimeState,
    input: InputState,
    pacer: FramePacer,
    hud: Hud,
    textures: TextureSet,
    mesh: MeshBuffers,
    camera_bind_group: wgpu::BindGroup,
    sprite_pipeline: SpritePipeline,
    gpu: GpuContext,
    window: Arc<Window>,
}

impl RunningGame {
    fn new(window: Arc<Window>, config: GameConfig) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let sprite_pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);

        let paths = TexturePaths::from_config(&config, Path::new(ASSET_ROOT))?;
        let textures = TextureSet::load(&gpu.device, &gpu.queue, &sprite_pipeline, &paths)
            .map_err(|e| e.to_string())?;

        let time = TimeState::new(config.target_fps);
        let pacer = FramePacer::new(config.target_fps);

        // The camera covers the logical play field even if the surface was
        // created at a different size.
        let camera = Camera2D::new(config.window.width, config.window.height);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group =
            sprite_pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        let game = GameState::new(config, textures.sizes())?;
        let hud = Hud::new(&gpu.device, gpu.surface_format, &window);
        let mesh = MeshBuffers::new(&gpu.device);

        log::info!(
            "Round started: {} obstacles, finish line at x = {:.0}",
            game.obstacles.len(),
            game.finish_line
        );

        Ok(Self {
            game,
            time,
            input: InputState::new(),
            pacer,
            hud,
            textures,
            mesh,
            camera_bind_group,
            sprite_pipeline,
            gpu,
            window,
        })
    }

    fn simulate(&mut self) {
        self.time.begin_frame();
        let dt = self.time.fixed_dt as f32;

        // One press is one jump, however many steps this frame runs.
        let mut jump_pressed = self.input.is_just_pressed(Key::Space);
        while self.time.should_step() {
            self.game.update(TickInput { jump_pressed }, dt);
            jump_pressed = false;
        }
    }

    fn render(&mut self) {
        let batch = build_frame(&self.game);
        self.mesh
            .upload(&self.gpu.device, &self.gpu.queue, &batch);

        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        let window_size = (self.game.config.window.width, self.game.config.window.height);
        let banner = banner_for(self.game.outcome, window_size);
        let stats = HudStats {
            draw_calls: batch.draw_calls.len() as u32,
            texture_binds: batch.texture_binds() as u32,
            sprite_count: batch.quad_count() as u32,
            memory_estimate_mb: self.textures.estimate_memory_mb()
                + self.mesh.size_bytes() as f32 / (1024.0 * 1024.0),
            outcome_label: self.game.outcome.label().to_string(),
            collided: self.game.collided,
            player_velocity: self.game.player.velocity,
            player_in_air: self.game.player.in_air,
            distance_to_finish: self.game.distance_to_finish(),
        };
        let (egui_primitives, egui_textures_delta, hud_actions) =
            self.hud
                .prepare(&self.window, &self.time, banner.as_ref(), &stats);
        if hud_actions.hide_debug {
            self.hud.toggle_debug();
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                self.mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );

            let mut last_bound = None;
            for draw in &batch.draw_calls {
                if last_bound != Some(draw.texture) {
                    render_pass.set_bind_group(1, self.textures.bind_group(draw.texture), &[]);
                    last_bound = Some(draw.texture);
                }
                render_pass.draw_indexed(
                    draw.index_start..(draw.index_start + draw.index_count),
                    0,
                    0..1,
                );
            }
        }

        self.hud.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.hud
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.hud.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

#[derive(Default)]
struct App {
    state: Option<RunningGame>,
}

impl App {
    fn start(event_loop: &ActiveEventLoop) -> Result<RunningGame, String> {
        let config = load_config_or_default(Path::new(CONFIG_PATH))?;
        let window = dash_platform::window::create_window(event_loop, &config.platform())?;
        RunningGame::new(window, config)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match Self::start(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Startup failed: {err}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };
        match state.pacer.poll(Instant::now()) {
            Pace::Redraw => state.window.request_redraw(),
            Pace::WaitUntil(deadline) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        let egui_consumed = state.hud.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let w = physical_size.width;
                let h = physical_size.height;
                if w > 0 && h > 0 {
                    state.gpu.resize(w, h);
                }
            }

            WindowEvent::KeyboardInput { event, .. } if !egui_consumed => {
                let PhysicalKey::Code(key_code) = event.physical_key else {
                    return;
                };
                let Some(key) = map_key(key_code) else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => {
                        // Window-level commands act on the OS event directly so
                        // they fire once even on frames without a fixed step.
                        if !event.repeat {
                            match key {
                                Key::Escape => {
                                    log::info!("Escape pressed, exiting.");
                                    event_loop.exit();
                                }
                                Key::F3 => state.hud.toggle_debug(),
                                Key::Space => {}
                            }
                        }
                        state.input.key_down(key);
                    }
                    ElementState::Released => state.input.key_up(key),
                }
            }

            WindowEvent::RedrawRequested => {
                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }

                state.simulate();
                state.render();

                // Only clear edge-triggered input after at least one fixed
                // step consumed it; otherwise a press landing on a frame with
                // zero steps would be lost.
                if state.time.steps_this_frame > 0 {
                    state.input.end_frame();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            log::info!(
                "Shutting down: round {} after {} ticks",
                state.game.outcome,
                state.game.ticks
            );
        }
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn main() -> Result<(), winit::error::EventLoopError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Dapper Dasher starting...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::default();
    event_loop.run_app(&mut app)
}
