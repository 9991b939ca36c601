//! Point cloud viewport: a painter-projected orbit view with a ground grid.

use eframe::egui;
use glam::{Mat4, Vec3, Vec4};
use shared::domain::PointSet;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(5, 5, 5);
const POINT_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);
const GRID_CENTER_COLOR: egui::Color32 = egui::Color32::from_rgb(0x44, 0x44, 0x44);
const GRID_COLOR: egui::Color32 = egui::Color32::from_rgb(0x22, 0x22, 0x22);
const GRID_SIZE: f32 = 200.0;
const GRID_DIVISIONS: u32 = 20;
const POINT_RADIUS: f32 = 1.5;

/// One renderable position per input point, coordinates unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloudPrimitives {
    positions: Vec<Vec3>,
}

impl PointCloudPrimitives {
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

pub fn render(points: &PointSet) -> PointCloudPrimitives {
    PointCloudPrimitives {
        positions: points
            .iter()
            .map(|p| Vec3::new(p.x as f32, p.y as f32, p.z as f32))
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    pub distance: f32,
    pub fov_deg: f32,
}

impl Default for OrbitCamera {
    /// Eye at (150, 150, 150) looking at the origin.
    fn default() -> Self {
        let eye = Vec3::splat(150.0);
        Self {
            target: Vec3::ZERO,
            yaw_deg: 45.0,
            pitch_deg: (eye.y / eye.length()).asin().to_degrees(),
            distance: eye.length(),
            fov_deg: 50.0,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw_deg.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch_deg.to_radians().sin_cos();
        self.target
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh_gl(self.fov_deg.to_radians(), aspect.max(1e-3), 0.1, 5000.0);
        proj * Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Screen position of `world` inside `rect`, or `None` when it is behind
    /// the camera or outside the depth range.
    pub fn project(&self, view_proj: &Mat4, world: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let clip = *view_proj * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(egui::pos2(
            rect.center().x + ndc.x * rect.width() * 0.5,
            rect.center().y - ndc.y * rect.height() * 0.5,
        ))
    }

    pub fn orbit(&mut self, delta: egui::Vec2) {
        self.yaw_deg -= delta.x * 0.4;
        self.pitch_deg = (self.pitch_deg + delta.y * 0.4).clamp(-89.0, 89.0);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (1.0 - scroll * 0.001)).clamp(10.0, 2000.0);
    }
}

pub fn show_viewport(ui: &mut egui::Ui, cloud: &PointCloudPrimitives, camera: &mut OrbitCamera) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
    let rect = response.rect;

    if response.dragged_by(egui::PointerButton::Primary) {
        camera.orbit(response.drag_delta());
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll.abs() > 0.1 {
            camera.zoom(scroll);
        }
    }

    painter.rect_filled(rect, 0.0, BACKGROUND);
    let view_proj = camera.view_projection(rect.width() / rect.height());

    let half = GRID_SIZE / 2.0;
    let step = GRID_SIZE / GRID_DIVISIONS as f32;
    for i in 0..=GRID_DIVISIONS {
        let t = -half + i as f32 * step;
        let color = if i == GRID_DIVISIONS / 2 {
            GRID_CENTER_COLOR
        } else {
            GRID_COLOR
        };
        for (a, b) in [
            (Vec3::new(t, 0.0, -half), Vec3::new(t, 0.0, half)),
            (Vec3::new(-half, 0.0, t), Vec3::new(half, 0.0, t)),
        ] {
            if let (Some(p0), Some(p1)) = (
                camera.project(&view_proj, a, rect),
                camera.project(&view_proj, b, rect),
            ) {
                painter.line_segment([p0, p1], egui::Stroke::new(1.0, color));
            }
        }
    }

    if cloud.is_empty() {
        return;
    }
    for position in cloud.positions() {
        if let Some(screen) = camera.project(&view_proj, *position, rect) {
            if rect.contains(screen) {
                painter.circle_filled(screen, POINT_RADIUS, POINT_COLOR);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/viewport_tests.rs"]
mod tests;
