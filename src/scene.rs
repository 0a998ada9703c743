use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Instant;

use glam::Vec3;
use tracing::info;

use crate::geometry::{generate_cube, generate_icosphere};
use crate::renderer::{
    Camera, GpuMesh, GpuState, PassKind, RenderParams, ShaderError, ShaderPass, render,
};

const BACKGROUND_SHADER: &str = include_str!("renderer/shaders/background.wgsl");
const FIREBALL_SHADER: &str = include_str!("renderer/shaders/fireball.wgsl");

/// Fireball parameters driven from the panel. RGB channels are kept in
/// 0..255 like the pickers show them; alpha is 0..1.
#[derive(Clone, PartialEq)]
pub struct FireballSettings {
    pub tessellations: u32,
    pub top_color: [f32; 4],
    pub bottom_color: [f32; 4],
    pub flame_size: f32,
}

impl Default for FireballSettings {
    fn default() -> Self {
        Self {
            tessellations: 5,
            top_color: [88.0, 74.0, 215.0, 1.0],
            bottom_color: [143.0, 42.0, 45.0, 1.0],
            flame_size: 1.0,
        }
    }
}

/// RGB 0..255 to 0..1; alpha passes through untouched.
pub fn normalize_color(color: [f32; 4]) -> [f32; 4] {
    [color[0] / 255.0, color[1] / 255.0, color[2] / 255.0, color[3]]
}

/// Frame counter plus the change detector for the subdivision level.
pub struct FrameState {
    frame_count: u32,
    last_level: u32,
}

impl FrameState {
    pub fn new(level: u32) -> Self {
        Self {
            frame_count: 0,
            last_level: level,
        }
    }

    /// Bump the frame counter; true when `level` differs from the last
    /// generated one, which also arms it as the new baseline.
    pub fn advance(&mut self, level: u32) -> bool {
        self.frame_count = self.frame_count.wrapping_add(1);
        if level != self.last_level {
            self.last_level = level;
            true
        } else {
            false
        }
    }

    fn set_level(&mut self, level: u32) {
        self.last_level = level;
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn last_level(&self) -> u32 {
        self.last_level
    }
}

/// Counters the panel reads while the scene writes them.
#[derive(Default)]
pub struct FrameStats {
    pub fps: parking_lot::Mutex<f32>,
    pub triangles: AtomicUsize,
    pub vertices: AtomicUsize,
    pub level: AtomicU32,
    pub regen_time_ms: parking_lot::Mutex<f32>,
}

pub struct Scene {
    frame: FrameState,
    stats: Arc<FrameStats>,

    background_pass: ShaderPass,
    fireball_pass: ShaderPass,

    fireball: GpuMesh,
    cube: GpuMesh,
}

impl Scene {
    pub fn new(gpu: &GpuState, settings: &FireballSettings) -> Result<Self, ShaderError> {
        let background_pass = ShaderPass::new(
            &gpu.device,
            gpu.config.format,
            PassKind::Background,
            BACKGROUND_SHADER,
        )?;
        let fireball_pass = ShaderPass::new(
            &gpu.device,
            gpu.config.format,
            PassKind::Fireball,
            FIREBALL_SHADER,
        )?;

        let stats = Arc::new(FrameStats::default());
        let scene = Self {
            frame: FrameState::new(settings.tessellations),
            stats,
            background_pass,
            fireball_pass,
            fireball: upload_icosphere(gpu, settings.tessellations),
            cube: GpuMesh::upload(&gpu.device, "Cube", &generate_cube(Vec3::ZERO)),
        };
        scene.record_mesh_stats(settings.tessellations, 0.0);

        info!(level = settings.tessellations, "scene loaded");
        Ok(scene)
    }

    pub fn stats(&self) -> Arc<FrameStats> {
        Arc::clone(&self.stats)
    }

    pub fn frame_count(&self) -> u32 {
        self.frame.frame_count()
    }

    /// Advance one frame: regenerate the icosphere if the slider moved,
    /// then draw the background and the fireball.
    pub fn tick(
        &mut self,
        gpu: &GpuState,
        camera: &Camera,
        settings: &FireballSettings,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
    ) {
        if self.frame.advance(settings.tessellations) {
            self.regenerate(gpu, settings.tessellations);
        }

        let params = RenderParams {
            top_color: normalize_color(settings.top_color),
            bottom_color: normalize_color(settings.bottom_color),
            time: self.frame.frame_count(),
            flame_size: settings.flame_size,
        };

        render(
            &gpu.queue,
            encoder,
            view,
            &gpu.depth_texture,
            camera,
            &self.background_pass,
            &params,
            &[&self.cube],
            true,
        );
        render(
            &gpu.queue,
            encoder,
            view,
            &gpu.depth_texture,
            camera,
            &self.fireball_pass,
            &params,
            &[&self.fireball],
            false,
        );
    }

    /// Rebuild all geometry at the current settings.
    pub fn load(&mut self, gpu: &GpuState, settings: &FireballSettings) {
        self.regenerate(gpu, settings.tessellations);
        self.cube = GpuMesh::upload(&gpu.device, "Cube", &generate_cube(Vec3::ZERO));
        info!(level = settings.tessellations, "scene reloaded");
    }

    /// Restore the canonical fireball and regenerate at its level.
    pub fn reset(&mut self, gpu: &GpuState, settings: &mut FireballSettings) {
        *settings = FireballSettings::default();
        self.regenerate(gpu, settings.tessellations);
    }

    fn regenerate(&mut self, gpu: &GpuState, level: u32) {
        let started = Instant::now();
        self.fireball = upload_icosphere(gpu, level);
        self.frame.set_level(level);

        let elapsed_ms = started.elapsed().as_secs_f32() * 1000.0;
        self.record_mesh_stats(level, elapsed_ms);

        info!(
            level,
            triangles = self.fireball.index_count / 3,
            elapsed_ms,
            "icosphere regenerated"
        );
    }

    fn record_mesh_stats(&self, level: u32, elapsed_ms: f32) {
        self.stats
            .triangles
            .store((self.fireball.index_count / 3) as usize, Ordering::Relaxed);
        self.stats
            .vertices
            .store(self.fireball.vertex_count as usize, Ordering::Relaxed);
        self.stats.level.store(level, Ordering::Relaxed);
        *self.stats.regen_time_ms.lock() = elapsed_ms;
    }
}

fn upload_icosphere(gpu: &GpuState, level: u32) -> GpuMesh {
    let mesh = generate_icosphere(Vec3::ZERO, 1.0, level);
    GpuMesh::upload(&gpu.device, "Fireball", &mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_counter_is_monotonic() {
        let mut frame = FrameState::new(5);
        for expected in 1..=10 {
            frame.advance(5);
            assert_eq!(frame.frame_count(), expected);
        }
    }

    #[test]
    fn unchanged_level_does_not_trigger_regeneration() {
        let mut frame = FrameState::new(5);
        assert!(!frame.advance(5));
        assert!(!frame.advance(5));
    }

    #[test]
    fn level_change_triggers_once() {
        let mut frame = FrameState::new(5);
        assert!(frame.advance(3));
        assert!(!frame.advance(3));
        assert_eq!(frame.last_level(), 3);
    }

    #[test]
    fn set_level_arms_the_detector() {
        let mut frame = FrameState::new(5);
        frame.set_level(2);
        assert!(!frame.advance(2));
        assert!(frame.advance(5));
    }

    #[test]
    fn color_channels_normalize_to_unit_range() {
        assert_eq!(
            normalize_color([255.0, 0.0, 127.5, 0.25]),
            [1.0, 0.0, 0.5, 0.25]
        );
    }

    #[test]
    fn alpha_passes_through_unscaled() {
        let color = normalize_color([88.0, 74.0, 215.0, 1.0]);
        assert_eq!(color[3], 1.0);
    }

    #[test]
    fn default_settings_are_canonical() {
        let settings = FireballSettings::default();
        assert_eq!(settings.tessellations, 5);
        assert_eq!(settings.top_color, [88.0, 74.0, 215.0, 1.0]);
        assert_eq!(settings.bottom_color, [143.0, 42.0, 45.0, 1.0]);
        assert_eq!(settings.flame_size, 1.0);
    }

    #[test]
    fn default_level_generates_the_expected_mesh() {
        let settings = FireballSettings::default();
        let mesh = generate_icosphere(Vec3::ZERO, 1.0, settings.tessellations);
        assert_eq!(mesh.triangle_count(), 20480);
        assert_eq!(mesh.vertex_count(), 10242);
    }
}
