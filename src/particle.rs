//! Per-particle routing state and thermal colors.
//!
//! Position and color live in the pool's dense render buffers; everything
//! the renderer never sees lives in [`ParticleState`].

use glam::Vec3;

/// Air that has not been conditioned (or whose conditioning is switched off).
pub const NEUTRAL_COLOR: Vec3 = Vec3::new(0.8, 0.9, 1.0);
/// Air cooled by the evaporator.
pub const COLD_COLOR: Vec3 = Vec3::new(0.0, 0.6, 1.0);
/// Air warmed by the heater core.
pub const HOT_COLOR: Vec3 = Vec3::new(1.0, 0.1, 0.05);

/// Which side of the blend door a particle committed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PathType {
    /// Not yet past the blend door.
    #[default]
    Unrouted = 0,
    /// Skips the heater core through the upper channel.
    Bypass = 1,
    /// Passes through the heater core in the lower channel.
    ThroughHeater = 2,
}

/// Which outlet a particle leaves through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OutputMode {
    /// Not yet past the distribution point.
    #[default]
    Unassigned = 0,
    /// Windshield vents: climb to the roof line, then travel rearward.
    Defrost = 1,
    /// Dashboard vents: settle at chest height.
    Face = 2,
    /// Floor vents: drop to the floor, then travel rearward.
    Foot = 3,
}

/// Thermal state as shown by particle color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThermalState {
    Neutral,
    Cold,
    Hot,
}

impl ThermalState {
    /// RGB color the renderer draws for this state.
    pub fn color(self) -> Vec3 {
        match self {
            ThermalState::Neutral => NEUTRAL_COLOR,
            ThermalState::Cold => COLD_COLOR,
            ThermalState::Hot => HOT_COLOR,
        }
    }

    /// Classify a color buffer entry. Anything that is not exactly the cold
    /// or hot color counts as neutral.
    pub fn from_color(color: Vec3) -> Self {
        if color == HOT_COLOR {
            ThermalState::Hot
        } else if color == COLD_COLOR {
            ThermalState::Cold
        } else {
            ThermalState::Neutral
        }
    }
}

/// Non-rendered state of one pool slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleState {
    /// Y at spawn; restored on every recycle.
    pub initial_offset_y: f32,
    /// Height the particle eases toward once routed.
    pub target_y: f32,
    pub path: PathType,
    pub outlet: OutputMode,
    /// Multiplier on the base air speed, fixed for the slot's lifetime.
    pub speed_variance: f32,
}

impl ParticleState {
    /// Fresh state for a particle spawned at height `y`.
    pub fn new(y: f32, speed_variance: f32) -> Self {
        Self {
            initial_offset_y: y,
            target_y: y,
            path: PathType::Unrouted,
            outlet: OutputMode::Unassigned,
            speed_variance,
        }
    }

    /// Forget the routing and outlet decisions of the previous pass.
    #[inline]
    pub fn reset_routing(&mut self) {
        self.path = PathType::Unrouted;
        self.outlet = OutputMode::Unassigned;
    }
}
