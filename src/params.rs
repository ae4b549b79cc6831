//! Runtime parameters read by the simulation every frame.
//!
//! [`Params`] is a plain `Copy` snapshot. The host owns the live copy, the
//! UI (keyboard bindings or the egui panel) edits it, and the simulation
//! receives a fresh copy by value on every [`advance`](crate::Simulation::advance).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::particle::OutputMode;

/// Upper end of the air speed range offered by the controls.
pub const AIR_SPEED_MAX: f32 = 0.2;

/// HVAC control settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// A/C compressor: colors air cold once it leaves the evaporator.
    pub evaporator_on: bool,
    /// Heater: colors heater-routed air hot once it leaves the heater core.
    pub heater_on: bool,
    /// Blend door position in `[0, 1]`; the probability that a particle is
    /// routed through the heater core.
    pub blend_door: f32,
    /// Base horizontal distance travelled per frame.
    pub air_speed: f32,
    pub mode_defrost: bool,
    pub mode_face: bool,
    pub mode_foot: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            evaporator_on: true,
            heater_on: true,
            blend_door: 0.0,
            air_speed: 0.08,
            mode_defrost: false,
            mode_face: true,
            mode_foot: false,
        }
    }
}

impl Params {
    /// Copy with `blend_door` clamped to `[0, 1]` and `air_speed` kept
    /// non-negative. NaN maps to the lower bound. Speeds above
    /// [`AIR_SPEED_MAX`] pass through unchanged.
    pub fn sanitized(self) -> Self {
        Self {
            blend_door: clamp_or_min(self.blend_door, 0.0, 1.0),
            air_speed: if self.air_speed.is_nan() {
                0.0
            } else {
                self.air_speed.max(0.0)
            },
            ..self
        }
    }

    /// Whether any continuous value lies outside its accepted range.
    pub fn is_out_of_range(&self) -> bool {
        self.sanitized() != *self
    }

    /// Outlet modes currently switched on, in defrost/face/foot order.
    pub fn enabled_modes(&self) -> ModeSet {
        let mut set = ModeSet::new();
        if self.mode_defrost {
            set.push(OutputMode::Defrost);
        }
        if self.mode_face {
            set.push(OutputMode::Face);
        }
        if self.mode_foot {
            set.push(OutputMode::Foot);
        }
        set
    }

    /// Door hinge angle in radians: fully toward the heater side at
    /// `blend_door = 0`, fully toward the bypass side at `1`.
    pub fn door_angle(&self) -> f32 {
        const MIN_ANGLE: f32 = 0.1;
        const MAX_ANGLE: f32 = std::f32::consts::PI - 0.1;
        MAX_ANGLE * (1.0 - self.blend_door) + MIN_ANGLE * self.blend_door
    }

    /// Fan rotor rotation for one frame, in radians.
    #[inline]
    pub fn fan_step(&self) -> f32 {
        -self.air_speed * 5.0
    }
}

fn clamp_or_min(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Fixed-capacity set of outlet modes, built fresh at each decision point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeSet {
    modes: [OutputMode; 3],
    len: usize,
}

impl ModeSet {
    /// Empty set.
    pub const fn new() -> Self {
        Self {
            modes: [OutputMode::Unassigned; 3],
            len: 0,
        }
    }

    fn push(&mut self, mode: OutputMode) {
        if self.len < self.modes.len() && !self.contains(mode) {
            self.modes[self.len] = mode;
            self.len += 1;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, mode: OutputMode) -> bool {
        self.as_slice().contains(&mode)
    }

    pub fn as_slice(&self) -> &[OutputMode] {
        &self.modes[..self.len]
    }

    /// Pick one enabled mode uniformly at random, or [`OutputMode::Face`]
    /// when nothing is enabled.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> OutputMode {
        match self.len {
            0 => OutputMode::Face,
            1 => self.modes[0],
            n => self.modes[rng.gen_range(0..n)],
        }
    }
}

impl Default for ModeSet {
    fn default() -> Self {
        Self::new()
    }
}
