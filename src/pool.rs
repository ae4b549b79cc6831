//! Fixed-size particle storage.
//!
//! The pool keeps render data in two dense `f32` buffers laid out exactly
//! as the renderer uploads them:
//!
//! ```text
//! positions: [x0, y0, z0, x1, y1, z1, ...]   len = 3 * count
//! colors:    [r0, g0, b0, r1, g1, b1, ...]   len = 3 * count
//! ```
//!
//! Routing state lives in a parallel array of [`ParticleState`]. Slots are
//! never added or removed after construction; particles leaving the flow
//! path are recycled in place.

use glam::Vec3;
use rand::Rng;

use crate::particle::{ParticleState, NEUTRAL_COLOR};
use crate::zones::ZoneMap;

/// Width of the spawn band along X, measured from `zones.start`.
const SPAWN_DEPTH: f32 = 2.0;
/// Half extent of the spawn cross-section in Y and Z.
const SPAWN_HALF_EXTENT: f32 = 1.0;
/// Range of the per-particle horizontal speed multiplier.
const SPEED_VARIANCE_MIN: f32 = 0.5;
const SPEED_VARIANCE_MAX: f32 = 1.3;

/// Particle buffers plus per-slot routing state.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticlePool {
    positions: Vec<f32>,
    colors: Vec<f32>,
    states: Vec<ParticleState>,
}

impl ParticlePool {
    /// Spawn `count` particles in the blower outlet.
    ///
    /// X is drawn from `[start, start + 2)`, Y and Z from `[-1, 1)`. Every
    /// particle starts neutral and unrouted.
    pub fn spawn<R: Rng + ?Sized>(count: usize, zones: &ZoneMap, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        let mut states = Vec::with_capacity(count);

        for _ in 0..count {
            let x = zones.start + rng.gen::<f32>() * SPAWN_DEPTH;
            let y = (rng.gen::<f32>() - 0.5) * 2.0 * SPAWN_HALF_EXTENT;
            let z = (rng.gen::<f32>() - 0.5) * 2.0 * SPAWN_HALF_EXTENT;
            let speed_variance = rng.gen_range(SPEED_VARIANCE_MIN..SPEED_VARIANCE_MAX);

            positions.extend_from_slice(&[x, y, z]);
            colors.extend_from_slice(&NEUTRAL_COLOR.to_array());
            states.push(ParticleState::new(y, speed_variance));
        }

        Self {
            positions,
            colors,
            states,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Packed `[x, y, z]` per particle.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Packed `[r, g, b]` per particle.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Routing state of every slot.
    #[inline]
    pub fn states(&self) -> &[ParticleState] {
        &self.states
    }

    /// Routing state of slot `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn state(&self, index: usize) -> &ParticleState {
        &self.states[index]
    }

    /// Position of slot `index`.
    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    /// Color of slot `index`.
    pub fn color(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[index * 3..index * 3 + 3])
    }

    /// Mutable views of one slot: its `[x, y, z]`, its `[r, g, b]` and its
    /// routing state.
    #[inline]
    pub(crate) fn slot_mut(&mut self, index: usize) -> (&mut [f32], &mut [f32], &mut ParticleState) {
        let i3 = index * 3;
        (
            &mut self.positions[i3..i3 + 3],
            &mut self.colors[i3..i3 + 3],
            &mut self.states[index],
        )
    }

    /// Overwrite slot `index` wholesale. Test and tooling hook for placing a
    /// particle at a known spot.
    pub fn set_slot(&mut self, index: usize, position: Vec3, color: Vec3, state: ParticleState) {
        let (pos, col, st) = self.slot_mut(index);
        pos.copy_from_slice(&position.to_array());
        col.copy_from_slice(&color.to_array());
        *st = state;
    }

    /// Send slot `index` back to the start of the flow path.
    pub fn recycle(&mut self, index: usize, zones: &ZoneMap) {
        let (pos, col, state) = self.slot_mut(index);
        recycle_slot(pos, col, state, zones);
    }
}

/// Reset one slot in place: X back to `zones.start`, Y back to its spawn
/// height, routing cleared, color neutral. Z and the speed multiplier are
/// kept for the lifetime of the slot.
pub(crate) fn recycle_slot(
    position: &mut [f32],
    color: &mut [f32],
    state: &mut ParticleState,
    zones: &ZoneMap,
) {
    position[0] = zones.start;
    position[1] = state.initial_offset_y;
    state.reset_routing();
    color.copy_from_slice(&NEUTRAL_COLOR.to_array());
}
