//! Static and animated scene geometry, as colored line segments.
//!
//! Everything except the particles is drawn as a wireframe: the HVAC unit
//! (evaporator and heater cores, blend door, blower with its rotor), the
//! cabin it feeds (dashboard, windshield, defrost vent, a seated passenger)
//! and a floor grid. The geometry is rebuilt every frame from the
//! zone map and the current [`Rotations`], which is cheap at this size and
//! keeps the renderer free of per-object transforms.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_4, TAU};

use crate::simulation::Rotations;
use crate::zones::ZoneMap;

const EVAPORATOR_COLOR: Vec3 = Vec3::new(0.0, 1.0, 1.0);
const HEATER_COLOR: Vec3 = Vec3::new(1.0, 0.2, 0.0);
const DOOR_COLOR: Vec3 = Vec3::new(1.0, 0.667, 0.0);
const BLOWER_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.55);
const DASHBOARD_COLOR: Vec3 = Vec3::new(0.35, 0.35, 0.4);
const WINDSHIELD_COLOR: Vec3 = Vec3::new(0.667, 0.867, 1.0);
const VENT_COLOR: Vec3 = Vec3::new(0.2, 0.2, 0.2);
const PASSENGER_COLOR: Vec3 = Vec3::new(0.0, 0.667, 1.0);
const GRID_COLOR: Vec3 = Vec3::new(0.27, 0.27, 0.27);

const EVAPORATOR_SIZE: Vec3 = Vec3::new(1.5, 2.2, 2.2);
const HEATER_SIZE: Vec3 = Vec3::new(2.5, 1.1, 2.2);
const HEATER_CENTER_Y: f32 = -0.55;
const DOOR_SIZE: Vec3 = Vec3::new(0.1, 1.3, 2.2);

/// Distance of the blower center upstream of `zones.start`.
const BLOWER_OFFSET: f32 = 1.5;
const BLOWER_RADIUS: f32 = 1.0;
const BLOWER_LENGTH: f32 = 1.5;
const BLADE_COUNT: usize = 8;
const BLADE_INNER: f32 = 0.4;
const BLADE_OUTER: f32 = 1.0;
const CIRCLE_SEGMENTS: usize = 24;

const DASHBOARD_CENTER: Vec3 = Vec3::new(5.0, -0.5, 0.0);
const DASHBOARD_SIZE: Vec3 = Vec3::new(1.8, 0.6, 3.2);

/// Windshield pane: `width` across the cabin, `height` along the glass,
/// leaning rearward by `tilt` from vertical.
const WINDSHIELD_CENTER: Vec3 = Vec3::new(5.0, 0.8, 0.0);
const WINDSHIELD_WIDTH: f32 = 4.0;
const WINDSHIELD_HEIGHT: f32 = 1.5;
const WINDSHIELD_TILT: f32 = FRAC_PI_4;

const DEFROST_VENT_CENTER: Vec3 = Vec3::new(4.5, -0.1, 0.0);
const DEFROST_VENT_SIZE: Vec3 = Vec3::new(0.4, 0.05, 2.5);

/// Passenger seat origin; body parts below are relative to it. The
/// passenger faces -X, toward the dashboard.
const PASSENGER_ORIGIN: Vec3 = Vec3::new(8.0, -2.2, 0.0);
const HEAD_CENTER: Vec3 = Vec3::new(0.0, 2.6, 0.0);
const HEAD_RADIUS: f32 = 0.45;
const TORSO_CENTER: Vec3 = Vec3::new(0.0, 1.4, 0.0);
const TORSO_SIZE: Vec3 = Vec3::new(0.7, 1.4, 0.9);
const THIGH_CENTER: Vec3 = Vec3::new(-0.5, 0.8, 0.25);
const THIGH_SIZE: Vec3 = Vec3::new(0.8, 0.28, 0.28);
const SHIN_CENTER: Vec3 = Vec3::new(-0.9, 0.3, 0.25);
const SHIN_SIZE: Vec3 = Vec3::new(0.22, 0.9, 0.22);
const ARM_CENTER: Vec3 = Vec3::new(0.0, 1.6, 0.6);
const ARM_SIZE: Vec3 = Vec3::new(0.24, 1.1, 0.24);
/// Arms splay outward by this much about X.
const ARM_SPLAY: f32 = 0.2;

const GRID_Y: f32 = -2.0;
const GRID_SIZE: f32 = 20.0;
const GRID_DIVISIONS: usize = 20;

/// One end of a line segment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Accumulates line-list vertices.
#[derive(Default)]
struct LineBuilder {
    vertices: Vec<LineVertex>,
}

impl LineBuilder {
    fn line(&mut self, a: Vec3, b: Vec3, color: Vec3) {
        let color = color.to_array();
        self.vertices.push(LineVertex {
            position: a.to_array(),
            color,
        });
        self.vertices.push(LineVertex {
            position: b.to_array(),
            color,
        });
    }

    /// Box outline of `size` centered at `center`, rotated by `rotation`
    /// about `pivot`.
    fn oriented_box(&mut self, center: Vec3, size: Vec3, pivot: Vec3, rotation: Quat, color: Vec3) {
        let h = size * 0.5;
        let corner = |sx: f32, sy: f32, sz: f32| {
            let local = center + Vec3::new(sx * h.x, sy * h.y, sz * h.z);
            pivot + rotation * (local - pivot)
        };
        let v000 = corner(-1.0, -1.0, -1.0);
        let v001 = corner(-1.0, -1.0, 1.0);
        let v010 = corner(-1.0, 1.0, -1.0);
        let v011 = corner(-1.0, 1.0, 1.0);
        let v100 = corner(1.0, -1.0, -1.0);
        let v101 = corner(1.0, -1.0, 1.0);
        let v110 = corner(1.0, 1.0, -1.0);
        let v111 = corner(1.0, 1.0, 1.0);

        for (a, b) in [
            // Bottom face
            (v000, v100),
            (v100, v101),
            (v101, v001),
            (v001, v000),
            // Top face
            (v010, v110),
            (v110, v111),
            (v111, v011),
            (v011, v010),
            // Vertical edges
            (v000, v010),
            (v100, v110),
            (v101, v111),
            (v001, v011),
        ] {
            self.line(a, b, color);
        }
    }

    fn aligned_box(&mut self, center: Vec3, size: Vec3, color: Vec3) {
        self.oriented_box(center, size, center, Quat::IDENTITY, color);
    }

    /// Circle in the plane spanned by the unit vectors `u` and `v`.
    fn circle(&mut self, center: Vec3, radius: f32, u: Vec3, v: Vec3, color: Vec3) {
        let point = |i: usize| {
            let (s, c) = (i as f32 / CIRCLE_SEGMENTS as f32 * TAU).sin_cos();
            center + (u * c + v * s) * radius
        };
        for i in 0..CIRCLE_SEGMENTS {
            self.line(point(i), point(i + 1), color);
        }
    }

    /// Circle in the YZ plane at `x`.
    fn ring(&mut self, x: f32, radius: f32, color: Vec3) {
        self.circle(Vec3::new(x, 0.0, 0.0), radius, Vec3::Y, Vec3::Z, color);
    }

    /// Three great circles, one per axis plane.
    fn sphere(&mut self, center: Vec3, radius: f32, color: Vec3) {
        self.circle(center, radius, Vec3::X, Vec3::Y, color);
        self.circle(center, radius, Vec3::Y, Vec3::Z, color);
        self.circle(center, radius, Vec3::Z, Vec3::X, color);
    }

    /// Rectangle outline from its center and two half-edge vectors.
    fn rect(&mut self, center: Vec3, half_u: Vec3, half_v: Vec3, color: Vec3) {
        let a = center - half_u - half_v;
        let b = center + half_u - half_v;
        let c = center + half_u + half_v;
        let d = center - half_u + half_v;
        for (p, q) in [(a, b), (b, c), (c, d), (d, a)] {
            self.line(p, q, color);
        }
    }
}

/// Build the full scene for one frame.
pub fn scene_lines(zones: &ZoneMap, rotations: &Rotations) -> Vec<LineVertex> {
    let mut b = LineBuilder::default();

    b.aligned_box(
        Vec3::new(zones.evaporator_center(), 0.0, 0.0),
        EVAPORATOR_SIZE,
        EVAPORATOR_COLOR,
    );
    b.aligned_box(
        Vec3::new(zones.heater_center(), HEATER_CENTER_Y, 0.0),
        HEATER_SIZE,
        HEATER_COLOR,
    );

    // The door panel hangs from its hinge: local +Y, swung about Z.
    let pivot = Vec3::new(zones.door_pivot, 0.0, 0.0);
    b.oriented_box(
        pivot + Vec3::new(0.0, DOOR_SIZE.y * 0.5, 0.0),
        DOOR_SIZE,
        pivot,
        Quat::from_rotation_z(rotations.door_angle),
        DOOR_COLOR,
    );

    blower(&mut b, zones.start - BLOWER_OFFSET, rotations.fan_angle);

    cabin(&mut b);
    passenger(&mut b);
    grid(&mut b);

    b.vertices
}

fn blower(b: &mut LineBuilder, x: f32, fan_angle: f32) {
    let half = BLOWER_LENGTH * 0.5;
    b.ring(x - half, BLOWER_RADIUS, BLOWER_COLOR);
    b.ring(x + half, BLOWER_RADIUS, BLOWER_COLOR);
    for k in 0..4 {
        let a = k as f32 * TAU / 4.0;
        let (s, c) = a.sin_cos();
        b.line(
            Vec3::new(x - half, BLOWER_RADIUS * c, BLOWER_RADIUS * s),
            Vec3::new(x + half, BLOWER_RADIUS * c, BLOWER_RADIUS * s),
            BLOWER_COLOR,
        );
    }

    let rotor = Quat::from_rotation_x(fan_angle);
    for k in 0..BLADE_COUNT {
        let blade = Quat::from_rotation_x(k as f32 * FRAC_PI_4);
        let dir = rotor * blade * Vec3::Y;
        b.line(
            Vec3::new(x, 0.0, 0.0) + dir * BLADE_INNER,
            Vec3::new(x, 0.0, 0.0) + dir * BLADE_OUTER,
            BLOWER_COLOR,
        );
    }
}

fn cabin(b: &mut LineBuilder) {
    b.aligned_box(DASHBOARD_CENTER, DASHBOARD_SIZE, DASHBOARD_COLOR);

    // Upright pane spanning Z, then leaned back about Z.
    let lean = Quat::from_rotation_z(-WINDSHIELD_TILT);
    b.rect(
        WINDSHIELD_CENTER,
        Vec3::Z * (WINDSHIELD_WIDTH * 0.5),
        lean * Vec3::Y * (WINDSHIELD_HEIGHT * 0.5),
        WINDSHIELD_COLOR,
    );

    b.aligned_box(DEFROST_VENT_CENTER, DEFROST_VENT_SIZE, VENT_COLOR);
}

fn passenger(b: &mut LineBuilder) {
    let at = |local: Vec3| PASSENGER_ORIGIN + local;
    let mirror = |v: Vec3| Vec3::new(v.x, v.y, -v.z);

    b.sphere(at(HEAD_CENTER), HEAD_RADIUS, PASSENGER_COLOR);
    b.aligned_box(at(TORSO_CENTER), TORSO_SIZE, PASSENGER_COLOR);

    for side in [1.0, -1.0] {
        let pick = |v: Vec3| if side > 0.0 { v } else { mirror(v) };
        b.aligned_box(at(pick(THIGH_CENTER)), THIGH_SIZE, PASSENGER_COLOR);
        b.aligned_box(at(pick(SHIN_CENTER)), SHIN_SIZE, PASSENGER_COLOR);

        let arm = at(pick(ARM_CENTER));
        b.oriented_box(
            arm,
            ARM_SIZE,
            arm,
            Quat::from_rotation_x(side * ARM_SPLAY),
            PASSENGER_COLOR,
        );
    }
}

fn grid(b: &mut LineBuilder) {
    let half = GRID_SIZE * 0.5;
    let step = GRID_SIZE / GRID_DIVISIONS as f32;
    for i in 0..=GRID_DIVISIONS {
        let t = -half + i as f32 * step;
        b.line(Vec3::new(t, GRID_Y, -half), Vec3::new(t, GRID_Y, half), GRID_COLOR);
        b.line(Vec3::new(-half, GRID_Y, t), Vec3::new(half, GRID_Y, t), GRID_COLOR);
    }
}
