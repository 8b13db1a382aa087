//! Text layer rendered via egui on top of the sprite pass.
//!
//! Carries two things: the round-outcome banner ("You Lose" / "You Won")
//! and an F3 debug window with timing and round statistics.
//!
//! Integration pattern: egui requires a three-phase render split because
//! `egui_wgpu::Renderer::render()` needs a `RenderPass<'static>`, while
//! `begin_render_pass` borrows the encoder. The phases are:
//!
//!   1. `prepare()` -- run egui UI logic, produce tessellated primitives
//!   2. `upload()`  -- upload textures and update GPU buffers (borrows encoder mutably)
//!   3. `paint()`   -- render into a new render pass with `forget_lifetime()`
//!   4. `cleanup()` -- free textures egui no longer references

use dash_core::time::TimeState;
use winit::window::Window;

/// Large single-line message drawn in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    /// Top-left corner of the text in window pixels.
    pub position: (f32, f32),
    pub font_size: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Default)]
pub struct HudStats {
    pub draw_calls: u32,
    pub texture_binds: u32,
    pub sprite_count: u32,
    /// Estimated GPU memory usage in megabytes
    pub memory_estimate_mb: f32,
    pub outcome_label: String,
    pub collided: bool,
    pub player_velocity: f32,
    pub player_in_air: bool,
    /// Pixels left before the finish line reaches the player
    pub distance_to_finish: f32,
}

#[derive(Debug, Clone, Default)]
pub struct HudActions {
    /// User clicked the close button of the debug window
    pub hide_debug: bool,
}

pub struct Hud {
    pub egui_ctx: egui::Context,
    pub egui_winit_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
    pub debug_visible: bool,
}

impl Hud {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_winit_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            debug_visible: false,
        }
    }

    pub fn handle_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.egui_winit_state.on_window_event(window, event);
        response.consumed
    }

    pub fn toggle_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        log::info!(
            "Debug window: {}",
            if self.debug_visible { "ON" } else { "OFF" }
        );
    }

    pub fn prepare(
        &mut self,
        window: &Window,
        time: &TimeState,
        banner: Option<&Banner>,
        stats: &HudStats,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta, HudActions) {
        let mut actions = HudActions::default();
        let raw_input = self.egui_winit_state.take_egui_input(window);
        let debug_visible = self.debug_visible;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if let Some(banner) = banner {
                paint_banner(ctx, banner);
            }

            if debug_visible {
                let mut open = true;
                egui::Window::new("Debug")
                    .default_pos([10.0, 10.0])
                    .open(&mut open)
                    .show(ctx, |ui| {
                        ui.label(format!("FPS: {:.1}", time.smoothed_fps));
                        ui.label(format!("Frame time: {:.2} ms", time.smoothed_frame_time_ms));
                        ui.label(format!("Steps this frame: {}", time.steps_this_frame));
                        ui.label(format!("Total steps: {}", time.fixed_step_count));
                        ui.separator();
                        ui.label(format!("Draw calls: {}", stats.draw_calls));
                        ui.label(format!("Texture binds: {}", stats.texture_binds));
                        ui.label(format!("Sprites: {}", stats.sprite_count));
                        ui.label(format!("Memory: {:.1} MB", stats.memory_estimate_mb));
                        ui.separator();
                        ui.label(format!("Round: {}", stats.outcome_label));
                        ui.label(format!("Collided: {}", stats.collided));
                        ui.label(format!(
                            "Player: vy {:.0} px/s{}",
                            stats.player_velocity,
                            if stats.player_in_air { " (air)" } else { "" }
                        ));
                        ui.label(format!("Finish in: {:.0} px", stats.distance_to_finish));
                    });
                if !open {
                    actions.hide_debug = true;
                }
            }
        });

        self.egui_winit_state
            .handle_platform_output(window, full_output.platform_output);

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (primitives, full_output.textures_delta, actions)
    }

    /// Upload textures and update buffers. Call before creating the egui render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    /// Render into an existing render pass. Call after `upload()`.
    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    /// Free textures that egui no longer needs. Call after rendering.
    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

/// Banner positions are window pixels; egui works in points.
fn paint_banner(ctx: &egui::Context, banner: &Banner) {
    let ppp = ctx.pixels_per_point();
    let pos = egui::pos2(banner.position.0 / ppp, banner.position.1 / ppp);
    let [r, g, b] = banner.color;
    ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("outcome_banner"),
    ))
    .text(
        pos,
        egui::Align2::LEFT_TOP,
        &banner.text,
        egui::FontId::proportional(banner.font_size / ppp),
        egui::Color32::from_rgb(r, g, b),
    );
}
