//! StackView: rasterizes a `TermScene` plus the status HUD into a framebuffer.
//!
//! This module is pure (no I/O). Boxes are projected orthographically through
//! the scene camera; each camera-facing face is filled as a parallelogram and
//! boxes are painted far to near.

use glam::{Mat4, Vec3};

use crate::core::{OrthoProjection, StatusSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::scene::{TermScene, Visual};
use crate::types::Phase;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Logical surface size for the projection. Terminal cells are about
    /// twice as tall as they are wide.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32 * 2)
    }
}

const BLOCK: char = '█';
const BACKGROUND: Rgb = Rgb::new(18, 18, 28);
const AMBIENT: f32 = 0.55;
const DIFFUSE: f32 = 0.6;

/// Direction toward the key light (matches a light placed at (10, 20, 0)).
fn light_dir() -> Vec3 {
    Vec3::new(10.0, 20.0, 0.0).normalize()
}

pub struct StackView {
    /// (depth, slot) pairs reused across frames.
    order: Vec<(f32, usize)>,
    show_hints: bool,
}

impl Default for StackView {
    fn default() -> Self {
        Self {
            order: Vec::with_capacity(64),
            show_hints: true,
        }
    }
}

impl StackView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hints(mut self, show_hints: bool) -> Self {
        self.show_hints = show_hints;
        self
    }

    /// Render the scene and HUD into an existing framebuffer.
    pub fn render_into(
        &mut self,
        scene: &TermScene,
        status: &StatusSnapshot,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::solid(BACKGROUND).into_cell(' '));
        if viewport.width == 0 || viewport.height == 0 {
            return;
        }

        let raster = Raster {
            view: scene.view_matrix(),
            projection: scene.projection(),
            width: viewport.width as f32,
            height: viewport.height as f32,
        };
        let forward = scene.forward();
        let eye = scene.eye();

        let visuals: Vec<&Visual> = scene.visuals().collect();
        self.order.clear();
        self.order.extend(
            visuals
                .iter()
                .enumerate()
                .map(|(i, v)| ((v.pose.position - eye).dot(forward), i)),
        );
        // Far to near.
        self.order.sort_by(|a, b| b.0.total_cmp(&a.0));

        for &(_, i) in &self.order {
            draw_box(fb, &raster, visuals[i], forward);
        }

        self.draw_hud(fb, status);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &mut self,
        scene: &TermScene,
        status: &StatusSnapshot,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, status, viewport, &mut fb);
        fb
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, status: &StatusSnapshot) {
        let label = CellStyle {
            fg: Rgb::new(240, 240, 240),
            bg: BACKGROUND,
            bold: true,
            dim: false,
        };
        let hint = CellStyle {
            fg: Rgb::new(150, 150, 160),
            bg: BACKGROUND,
            bold: false,
            dim: true,
        };

        // Score, centred on the top row.
        let digits = count_digits(status.score);
        let x = fb.width().saturating_sub(digits) / 2;
        fb.put_u32(x, 1, status.score, label);

        // Overlays sit above the stack, which is centred on screen.
        let row = (fb.height() / 4).max(3);
        match status.phase {
            Phase::NotStarted => {
                fb.put_str_centered(row, "STACK THE BLOCKS", label);
                fb.put_str_centered(row + 2, "CLICK OR PRESS SPACE TO START", hint);
            }
            Phase::GameOver => {
                fb.put_str_centered(row, "GAME OVER", label);
                fb.put_str_centered(row + 2, "PRESS R TO RESTART", hint);
            }
            Phase::Running => {}
        }

        if self.show_hints && fb.height() > 4 {
            fb.put_str_centered(
                fb.height() - 1,
                "space/click: drop   r: restart   q: quit",
                hint,
            );
        }
    }
}

fn count_digits(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

struct Raster {
    view: Mat4,
    projection: OrthoProjection,
    width: f32,
    height: f32,
}

impl Raster {
    /// World point to fractional cell coordinates.
    fn project(&self, p: Vec3) -> (f32, f32) {
        let v = self.view.transform_point3(p);
        let (nx, ny) = self.projection.to_ndc(v.x, v.y);
        ((nx + 1.0) / 2.0 * self.width, (1.0 - ny) / 2.0 * self.height)
    }
}

fn draw_box(fb: &mut FrameBuffer, raster: &Raster, visual: &Visual, forward: Vec3) {
    let half = visual.shape.half_extents();
    let rot = visual.pose.orientation;
    let center = visual.pose.position;
    let base = Rgb::from_hsl(visual.hue, 1.0, 0.5);

    // (normal axis, tangent u, tangent v) for the three axes.
    let axes = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::Z, Vec3::X, Vec3::Y),
    ];

    for (n, u, v) in axes {
        for sign in [1.0f32, -1.0] {
            let normal = rot * (n * sign);
            if normal.dot(forward) >= 0.0 {
                continue;
            }

            let hn = n.dot(half);
            let hu = u * u.dot(half);
            let hv = v * v.dot(half);
            let face_center = n * hn * sign;
            let quad = [
                face_center - hu - hv,
                face_center + hu - hv,
                face_center + hu + hv,
                face_center - hu + hv,
            ]
            .map(|local| raster.project(center + rot * local));

            let intensity = AMBIENT + DIFFUSE * normal.dot(light_dir()).max(0.0);
            fill_quad(fb, &quad, CellStyle::solid(base.shade(intensity)));
        }
    }
}

/// Fill every cell whose centre lies inside the convex quad.
fn fill_quad(fb: &mut FrameBuffer, quad: &[(f32, f32); 4], style: CellStyle) {
    let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
    let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
    for &(x, y) in quad {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    if max_x < 0.0 || max_y < 0.0 || min_x >= fb.width() as f32 || min_y >= fb.height() as f32 {
        return;
    }

    let x0 = min_x.floor().max(0.0) as u16;
    let y0 = min_y.floor().max(0.0) as u16;
    let x1 = (max_x.ceil() as u16).min(fb.width());
    let y1 = (max_y.ceil() as u16).min(fb.height());

    for cy in y0..y1 {
        for cx in x0..x1 {
            if contains(quad, cx as f32 + 0.5, cy as f32 + 0.5) {
                fb.put_char(cx, cy, BLOCK, style);
            }
        }
    }
}

fn contains(quad: &[(f32, f32); 4], px: f32, py: f32) -> bool {
    let mut pos = false;
    let mut neg = false;
    for i in 0..4 {
        let (ax, ay) = quad[i];
        let (bx, by) = quad[(i + 1) % 4];
        let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
        if cross > 0.0 {
            pos = true;
        } else if cross < 0.0 {
            neg = true;
        }
        if pos && neg {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_square() {
        let quad = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        assert!(contains(&quad, 2.0, 2.0));
        assert!(!contains(&quad, 5.0, 2.0));
        // Winding does not matter.
        let rev = [(0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)];
        assert!(contains(&rev, 1.0, 3.0));
    }

    #[test]
    fn digit_count() {
        assert_eq!(count_digits(0), 1);
        assert_eq!(count_digits(9), 1);
        assert_eq!(count_digits(10), 2);
        assert_eq!(count_digits(4_000_000_000), 10);
    }

    #[test]
    fn fill_quad_clips_to_framebuffer() {
        let mut fb = FrameBuffer::new(4, 2);
        let quad = [(-10.0, -10.0), (10.0, -10.0), (10.0, 10.0), (-10.0, 10.0)];
        fill_quad(&mut fb, &quad, CellStyle::default());
        for y in 0..2 {
            assert_eq!(fb.row_text(y), "████");
        }
    }
}
