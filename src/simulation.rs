//! The per-frame particle update.
//!
//! [`advance`] moves every slot of a [`ParticlePool`] one step along the
//! HVAC flow path. Slots never interact, so the loop order is irrelevant.
//! For each slot:
//!
//! 1. Past the distribution point, commit to an outlet mode (once).
//! 2. Pick this frame's motion from the outlet mode, or drift along X at
//!    `air_speed * speed_variance` before the split.
//! 3. Move.
//! 4. Once routed and before the split, ease Y toward the channel height.
//! 5. Between the blend door and the split, commit to bypass or heater (once).
//! 6. Recycle when the particle leaves the flow path.
//! 7. Otherwise recolor from the zone it is in.
//!
//! [`Simulation`] bundles a pool, its zone map, an rng and the fan angle so
//! the host only has to pass in a [`Params`] snapshot each frame.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::HvacConfig;
use crate::particle::{OutputMode, ParticleState, PathType, ThermalState, COLD_COLOR, HOT_COLOR, NEUTRAL_COLOR};
use crate::params::{ModeSet, Params};
use crate::pool::{recycle_slot, ParticlePool};
use crate::zones::ZoneMap;

/// Rate at which routed particles ease toward their channel height.
const CHANNEL_EASE: f32 = 0.08;
/// Particles further than this from the axis are recycled.
const MAX_ABS_Y: f32 = 4.0;

/// Roof line defrost air climbs to before turning rearward.
pub(crate) const DEFROST_CEILING: f32 = 1.8;
/// Chest height face air settles at.
pub(crate) const FACE_TARGET_Y: f32 = -0.4;
/// Rate at which face air eases toward chest height.
const FACE_EASE: f32 = 0.1;
/// Floor height foot air drops to before turning rearward.
pub(crate) const FOOT_FLOOR: f32 = -2.0;

/// Channel heights drawn when routing: bypass air rides in
/// `[0.2, 1.0)`, heater air in `(-1.0, -0.2]`.
const CHANNEL_OFFSET: f32 = 0.2;
const CHANNEL_SPREAD: f32 = 0.8;

/// Angles the renderer applies to the blend door and the blower rotor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotations {
    /// Door hinge angle about Z, in radians.
    pub door_angle: f32,
    /// Accumulated rotor angle about X, in radians.
    pub fan_angle: f32,
}

/// Advance every particle in `pool` by one frame.
///
/// `params` is sanitized first (see [`Params::sanitized`]). Returns the door
/// angle for this frame and the fan angle after adding this frame's step
/// to `fan_angle`.
pub fn advance<R: Rng + ?Sized>(
    pool: &mut ParticlePool,
    zones: &ZoneMap,
    params: &Params,
    fan_angle: f32,
    rng: &mut R,
) -> Rotations {
    let params = params.sanitized();
    let rotations = Rotations {
        door_angle: params.door_angle(),
        fan_angle: fan_angle + params.fan_step(),
    };

    let enabled = params.enabled_modes();
    for index in 0..pool.len() {
        let (position, color, state) = pool.slot_mut(index);
        step_slot(position, color, state, zones, &params, &enabled, rng);
    }

    rotations
}

/// One frame for one slot.
fn step_slot<R: Rng + ?Sized>(
    position: &mut [f32],
    color: &mut [f32],
    state: &mut ParticleState,
    zones: &ZoneMap,
    params: &Params,
    enabled: &ModeSet,
    rng: &mut R,
) {
    let air = params.air_speed;
    let y = position[1];

    if position[0] > zones.distrib_point && state.outlet == OutputMode::Unassigned {
        state.outlet = enabled.choose(rng);
    }

    let (move_x, move_y) = if position[0] > zones.distrib_point {
        outlet_motion(state.outlet, y, air, state.speed_variance)
    } else {
        (air * state.speed_variance, 0.0)
    };

    position[0] += move_x;
    position[1] += move_y;
    let x = position[0];

    if state.path != PathType::Unrouted && x < zones.distrib_point {
        position[1] += (state.target_y - position[1]) * CHANNEL_EASE;
    }

    if x > zones.door_pivot && x < zones.distrib_point && state.path == PathType::Unrouted {
        if rng.gen::<f32>() < params.blend_door {
            state.path = PathType::ThroughHeater;
            state.target_y = -CHANNEL_OFFSET - rng.gen::<f32>() * CHANNEL_SPREAD;
        } else {
            state.path = PathType::Bypass;
            state.target_y = CHANNEL_OFFSET + rng.gen::<f32>() * CHANNEL_SPREAD;
        }
    }

    if x > zones.end || position[1].abs() > MAX_ABS_Y {
        recycle_slot(position, color, state, zones);
        return;
    }

    color.copy_from_slice(&thermal_color(x, state.path, zones, params).to_array());
}

/// Motion of a particle past the distribution point, as `(move_x, move_y)`.
fn outlet_motion(outlet: OutputMode, y: f32, air: f32, speed_variance: f32) -> (f32, f32) {
    match outlet {
        OutputMode::Defrost => {
            if y > DEFROST_CEILING {
                (air, 0.0)
            } else {
                (air * 0.6, air * 0.6)
            }
        }
        OutputMode::Face => (air, (FACE_TARGET_Y - y) * FACE_EASE),
        OutputMode::Foot => {
            if y < FOOT_FLOOR {
                (air, 0.0)
            } else {
                (air * 0.4, -air * 0.8)
            }
        }
        OutputMode::Unassigned => (air * speed_variance, 0.0),
    }
}

/// Color for a particle at `x` on `path`. The heater check runs last, so
/// heater air past the core shows hot even where it would also show cold.
fn thermal_color(x: f32, path: PathType, zones: &ZoneMap, params: &Params) -> Vec3 {
    let mut color = NEUTRAL_COLOR;
    if x > zones.evap_end && params.evaporator_on {
        color = COLD_COLOR;
    }
    if path == PathType::ThroughHeater && x > zones.heater_end && params.heater_on {
        color = HOT_COLOR;
    }
    color
}

/// Particle counts by routing, outlet and thermal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowStats {
    pub unrouted: usize,
    pub bypass: usize,
    pub through_heater: usize,
    pub unassigned: usize,
    pub defrost: usize,
    pub face: usize,
    pub foot: usize,
    pub neutral: usize,
    pub cold: usize,
    pub hot: usize,
}

impl FlowStats {
    /// Tally the current contents of `pool`.
    pub fn collect(pool: &ParticlePool) -> Self {
        let mut stats = Self::default();
        for (index, state) in pool.states().iter().enumerate() {
            match state.path {
                PathType::Unrouted => stats.unrouted += 1,
                PathType::Bypass => stats.bypass += 1,
                PathType::ThroughHeater => stats.through_heater += 1,
            }
            match state.outlet {
                OutputMode::Unassigned => stats.unassigned += 1,
                OutputMode::Defrost => stats.defrost += 1,
                OutputMode::Face => stats.face += 1,
                OutputMode::Foot => stats.foot += 1,
            }
            match ThermalState::from_color(pool.color(index)) {
                ThermalState::Neutral => stats.neutral += 1,
                ThermalState::Cold => stats.cold += 1,
                ThermalState::Hot => stats.hot += 1,
            }
        }
        stats
    }

    /// Total number of particles counted.
    pub fn total(&self) -> usize {
        self.unrouted + self.bypass + self.through_heater
    }
}

/// A particle pool moving through a fixed zone map.
///
/// The rng type defaults to [`SmallRng`]; pass any seeded rng to
/// [`Simulation::with_rng`] for reproducible runs.
pub struct Simulation<R: Rng = SmallRng> {
    pool: ParticlePool,
    zones: ZoneMap,
    rng: R,
    fan_angle: f32,
    frame: u64,
}

impl Simulation<SmallRng> {
    /// Build a simulation from a configuration.
    ///
    /// Uses `config.seed` when present, otherwise seeds from OS entropy.
    /// The configuration is assumed to be validated.
    pub fn new(config: &HvacConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config.particle_count, config.zones, rng)
    }

    /// Build a simulation with a fixed seed.
    pub fn seeded(particle_count: usize, zones: ZoneMap, seed: u64) -> Self {
        Self::with_rng(particle_count, zones, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Spawn `particle_count` particles using `rng`, which keeps driving
    /// every random decision afterwards.
    pub fn with_rng(particle_count: usize, zones: ZoneMap, mut rng: R) -> Self {
        let pool = ParticlePool::spawn(particle_count, &zones, &mut rng);
        log::debug!(
            "Spawned {} particles along x = {}..{}",
            pool.len(),
            zones.start,
            zones.end
        );
        Self {
            pool,
            zones,
            rng,
            fan_angle: 0.0,
            frame: 0,
        }
    }

    /// Run one frame with the given parameter snapshot.
    pub fn advance(&mut self, params: Params) -> Rotations {
        let rotations = advance(&mut self.pool, &self.zones, &params, self.fan_angle, &mut self.rng);
        self.fan_angle = rotations.fan_angle;
        self.frame += 1;
        if log::log_enabled!(log::Level::Trace) && self.frame % 120 == 0 {
            log::trace!("frame {}: {:?}", self.frame, self.stats());
        }
        rotations
    }

    /// Respawn every slot and stop the fan.
    pub fn reset(&mut self) {
        self.pool = ParticlePool::spawn(self.pool.len(), &self.zones, &mut self.rng);
        self.fan_angle = 0.0;
        self.frame = 0;
        log::debug!("Respawned {} particles", self.pool.len());
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn zones(&self) -> &ZoneMap {
        &self.zones
    }

    /// Rotor angle accumulated over all frames since spawn or reset.
    pub fn fan_angle(&self) -> f32 {
        self.fan_angle
    }

    /// Frames advanced since spawn or reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> FlowStats {
        FlowStats::collect(&self.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> ZoneMap {
        ZoneMap::default()
    }

    fn single(position: Vec3, state: ParticleState) -> (ParticlePool, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut pool = ParticlePool::spawn(1, &zones(), &mut rng);
        pool.set_slot(0, position, NEUTRAL_COLOR, state);
        (pool, rng)
    }

    #[test]
    fn test_unrouted_drift_uses_speed_variance() {
        let state = ParticleState::new(0.5, 1.2);
        let (mut pool, mut rng) = single(Vec3::new(-5.0, 0.5, 0.0), state);
        let params = Params {
            air_speed: 0.1,
            ..Params::default()
        };

        advance(&mut pool, &zones(), &params, 0.0, &mut rng);

        let p = pool.position(0);
        assert!((p.x - (-5.0 + 0.12)).abs() < 1e-5);
        assert_eq!(p.y, 0.5);
    }

    #[test]
    fn test_defrost_climbs_then_levels() {
        let mut state = ParticleState::new(0.0, 1.0);
        state.path = PathType::Bypass;
        state.outlet = OutputMode::Defrost;
        let (mut pool, mut rng) = single(Vec3::new(5.0, 1.0, 0.0), state);
        let params = Params {
            air_speed: 0.1,
            ..Params::default()
        };

        advance(&mut pool, &zones(), &params, 0.0, &mut rng);
        let p = pool.position(0);
        assert!((p.x - 5.06).abs() < 1e-5);
        assert!((p.y - 1.06).abs() < 1e-5);

        pool.set_slot(0, Vec3::new(5.0, 2.0, 0.0), NEUTRAL_COLOR, state);
        advance(&mut pool, &zones(), &params, 0.0, &mut rng);
        let p = pool.position(0);
        assert!((p.x - 5.1).abs() < 1e-5);
        assert_eq!(p.y, 2.0);
    }

    #[test]
    fn test_face_eases_toward_chest_height() {
        let mut state = ParticleState::new(0.0, 1.0);
        state.path = PathType::Bypass;
        state.outlet = OutputMode::Face;
        let (mut pool, mut rng) = single(Vec3::new(5.0, 0.6, 0.0), state);

        advance(&mut pool, &zones(), &Params::default(), 0.0, &mut rng);

        // (-0.4 - 0.6) * 0.1 = -0.1
        assert!((pool.position(0).y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_foot_descends_then_levels() {
        let mut state = ParticleState::new(0.0, 1.0);
        state.path = PathType::ThroughHeater;
        state.outlet = OutputMode::Foot;
        let params = Params {
            air_speed: 0.1,
            ..Params::default()
        };

        let (mut pool, mut rng) = single(Vec3::new(5.0, -1.0, 0.0), state);
        advance(&mut pool, &zones(), &params, 0.0, &mut rng);
        let p = pool.position(0);
        assert!((p.x - 5.04).abs() < 1e-5);
        assert!((p.y - (-1.08)).abs() < 1e-5);

        pool.set_slot(0, Vec3::new(5.0, -2.5, 0.0), NEUTRAL_COLOR, state);
        advance(&mut pool, &zones(), &params, 0.0, &mut rng);
        let p = pool.position(0);
        assert!((p.x - 5.1).abs() < 1e-5);
        assert_eq!(p.y, -2.5);
    }

    #[test]
    fn test_routed_particle_eases_toward_channel() {
        let mut state = ParticleState::new(0.0, 1.0);
        state.path = PathType::Bypass;
        state.target_y = 1.0;
        let (mut pool, mut rng) = single(Vec3::new(1.0, 0.0, 0.0), state);
        let params = Params {
            air_speed: 0.0,
            ..Params::default()
        };

        advance(&mut pool, &zones(), &params, 0.0, &mut rng);

        assert!((pool.position(0).y - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_routing_happens_past_door() {
        let state = ParticleState::new(0.0, 1.0);
        let (mut pool, mut rng) = single(Vec3::new(-0.01, 0.0, 0.0), state);
        let params = Params {
            blend_door: 1.0,
            air_speed: 0.05,
            ..Params::default()
        };

        advance(&mut pool, &zones(), &params, 0.0, &mut rng);

        let state = pool.state(0);
        assert_eq!(state.path, PathType::ThroughHeater);
        assert!(state.target_y <= -0.2 && state.target_y > -1.0);
    }

    #[test]
    fn test_outlet_not_assigned_before_split() {
        let state = ParticleState::new(0.0, 1.0);
        let (mut pool, mut rng) = single(Vec3::new(3.0, 0.0, 0.0), state);

        advance(&mut pool, &zones(), &Params::default(), 0.0, &mut rng);

        assert_eq!(pool.state(0).outlet, OutputMode::Unassigned);
    }

    #[test]
    fn test_recycle_on_vertical_escape() {
        let mut state = ParticleState::new(0.3, 1.0);
        state.path = PathType::Bypass;
        state.outlet = OutputMode::Defrost;
        let (mut pool, mut rng) = single(Vec3::new(6.0, 4.5, 0.5), state);
        let params = Params {
            air_speed: 0.1,
            ..Params::default()
        };

        advance(&mut pool, &zones(), &params, 0.0, &mut rng);

        let p = pool.position(0);
        assert_eq!(p.x, zones().start);
        assert_eq!(p.y, 0.3);
        assert_eq!(p.z, 0.5);
        assert_eq!(pool.color(0), NEUTRAL_COLOR);
    }

    #[test]
    fn test_heater_color_overrides_cold() {
        let zones = zones();
        let params = Params::default();
        assert_eq!(thermal_color(3.2, PathType::ThroughHeater, &zones, &params), HOT_COLOR);
        assert_eq!(thermal_color(3.2, PathType::Bypass, &zones, &params), COLD_COLOR);
        assert_eq!(thermal_color(-3.0, PathType::Unrouted, &zones, &params), NEUTRAL_COLOR);
    }

    #[test]
    fn test_switches_suppress_color() {
        let zones = zones();
        let off = Params {
            evaporator_on: false,
            heater_on: false,
            ..Params::default()
        };
        assert_eq!(thermal_color(5.0, PathType::ThroughHeater, &zones, &off), NEUTRAL_COLOR);

        let heater_only = Params {
            evaporator_on: false,
            ..Params::default()
        };
        assert_eq!(thermal_color(2.0, PathType::ThroughHeater, &zones, &heater_only), NEUTRAL_COLOR);
        assert_eq!(thermal_color(5.0, PathType::ThroughHeater, &zones, &heater_only), HOT_COLOR);
    }

    #[test]
    fn test_rotations() {
        let mut sim = Simulation::seeded(10, zones(), 1);
        let params = Params {
            blend_door: 0.5,
            air_speed: 0.1,
            ..Params::default()
        };
        let first = sim.advance(params);
        let second = sim.advance(params);

        assert!((first.door_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((first.fan_angle + 0.5).abs() < 1e-6);
        assert!((second.fan_angle + 1.0).abs() < 1e-6);
        assert_eq!(sim.fan_angle(), second.fan_angle);
        assert_eq!(sim.frame(), 2);
    }

    #[test]
    fn test_out_of_range_params_are_clamped() {
        let state = ParticleState::new(0.0, 1.0);
        let (mut pool, mut rng) = single(Vec3::new(-5.0, 0.0, 0.0), state);
        let params = Params {
            air_speed: -1.0,
            blend_door: 3.0,
            ..Params::default()
        };

        let rotations = advance(&mut pool, &zones(), &params, 0.0, &mut rng);

        assert_eq!(pool.position(0).x, -5.0);
        assert!((rotations.door_angle - 0.1).abs() < 1e-6);
        assert_eq!(rotations.fan_angle, 0.0);
    }

    #[test]
    fn test_reset_restores_spawn_band() {
        let mut sim = Simulation::seeded(200, zones(), 9);
        for _ in 0..100 {
            sim.advance(Params::default());
        }
        sim.reset();

        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.fan_angle(), 0.0);
        let stats = sim.stats();
        assert_eq!(stats.unrouted, 200);
        assert_eq!(stats.neutral, 200);
    }

    #[test]
    fn test_stats_totals_match_pool() {
        let mut sim = Simulation::seeded(300, zones(), 5);
        for _ in 0..250 {
            sim.advance(Params::default());
        }
        let stats = sim.stats();
        assert_eq!(stats.total(), 300);
        assert_eq!(stats.unassigned + stats.defrost + stats.face + stats.foot, 300);
        assert_eq!(stats.neutral + stats.cold + stats.hot, 300);
    }
}
