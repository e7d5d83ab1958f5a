//! Scene data for the two demos.

use std::f64::consts::PI;
use std::time::Duration;

use glam::Vec3;
use gyre_engine::geometry::{generate_box, hexagon as hexagon_mesh, Mesh};
use gyre_engine::paint::Color;
use gyre_engine::render::PipelineConfig;
use gyre_engine::transform::{Camera, Spin};

/// Background of both demos.
pub const CLEAR_COLOR: Color = Color::rgb(0.2, 0.7, 0.5);

pub const BOX_CENTER: [f32; 3] = [1.0, 2.0, 3.0];
pub const BOX_SIZE: f32 = 2.0;

/// Everything a spinning-mesh demo needs, fixed at startup.
#[derive(Debug, Clone)]
pub struct SpinScene {
    pub title: &'static str,
    pub mesh: Mesh,
    pub camera: Camera,
    pub spin: Spin,
    pub clear: Color,
    pub pipeline: PipelineConfig,
    pub depth_format: Option<wgpu::TextureFormat>,
}

/// Flat hexagon seen head-on, turning 23π/60 radians per second.
pub fn hexagon() -> SpinScene {
    SpinScene {
        title: "Hexagon",
        mesh: hexagon_mesh(),
        camera: Camera::looking_at(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO),
        spin: Spin::about_y(23.0 * PI / 60.0),
        clear: CLEAR_COLOR,
        pipeline: PipelineConfig::default(),
        depth_format: None,
    }
}

/// Face-colored box orbiting the vertical axis once every six seconds.
pub fn spinning_box() -> SpinScene {
    SpinScene {
        title: "Spinning Box",
        mesh: generate_box(BOX_CENTER, BOX_SIZE).into_mesh(),
        camera: Camera::looking_at(Vec3::new(0.0, 5.0, -6.0), Vec3::ZERO),
        spin: Spin::from_period(Duration::from_secs(6)),
        clear: CLEAR_COLOR,
        pipeline: PipelineConfig {
            cull_mode: Some(wgpu::Face::Back),
            depth_test: true,
        },
        depth_format: Some(wgpu::TextureFormat::Depth24Plus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_engine::transform::Transforms;

    #[test]
    fn scene_meshes_are_valid() {
        for scene in [hexagon(), spinning_box()] {
            assert_eq!(scene.mesh.validate(), Ok(()), "{}", scene.title);
        }
    }

    #[test]
    fn hexagon_draws_without_depth_or_culling() {
        let scene = hexagon();
        assert_eq!(scene.pipeline, PipelineConfig::default());
        assert_eq!(scene.depth_format, None);
        assert_eq!(scene.mesh.element_count(), 18);
    }

    #[test]
    fn box_culls_back_faces_with_depth() {
        let scene = spinning_box();
        assert_eq!(scene.pipeline.cull_mode, Some(wgpu::Face::Back));
        assert!(scene.pipeline.depth_test);
        assert!(scene.depth_format.is_some());
        assert_eq!(scene.mesh.element_count(), 36);
    }

    #[test]
    fn box_turns_once_every_six_seconds() {
        let period = spinning_box().spin.period().unwrap();
        assert!((period.as_secs_f64() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn hexagon_turns_every_120_over_23_seconds() {
        let period = hexagon().spin.period().unwrap();
        assert!((period.as_secs_f64() - 120.0 / 23.0).abs() < 1e-6);
    }

    #[test]
    fn cameras_use_a_90_degree_lens() {
        for scene in [hexagon(), spinning_box()] {
            assert!((scene.camera.fov_y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
            assert_eq!(scene.camera.near, 0.1);
            assert_eq!(scene.camera.far, 1000.0);
        }
    }

    #[test]
    fn box_is_in_front_of_the_camera() {
        let scene = spinning_box();
        let t = Transforms::new(&scene.camera, 4.0 / 3.0);
        let center = t.view.transform_point3(Vec3::from(BOX_CENTER));
        // Right-handed view space looks down -Z.
        assert!(center.z < 0.0, "{center:?}");
    }

    #[test]
    fn hexagon_is_fully_visible_at_rest() {
        let scene = hexagon();
        let t = Transforms::new(&scene.camera, 1.0);
        for p in &scene.mesh.positions {
            let clip = t.clip_from_model().project_point3(Vec3::from(*p));
            assert!(clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0, "{p:?} -> {clip:?}");
            assert!((0.0..=1.0).contains(&clip.z), "{p:?} -> {clip:?}");
        }
    }
}
