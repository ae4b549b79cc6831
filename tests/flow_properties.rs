//! Whole-pool behaviour of the flow update over many frames.

use hvac_flow::prelude::*;
use hvac_flow::{ParticleState, AIR_SPEED_MAX, COLD_COLOR, HOT_COLOR, NEUTRAL_COLOR};
use rand::rngs::StdRng;
use rand::SeedableRng;

const COUNT: usize = 500;
const FRAMES: usize = 600;

fn fast(params: Params) -> Params {
    Params {
        air_speed: 0.1,
        ..params
    }
}

/// Run `frames` frames, calling `check` with the pool before and after each.
fn run_checked(
    sim: &mut Simulation,
    frames: usize,
    mut params_at: impl FnMut(usize) -> Params,
    mut check: impl FnMut(&ParticlePool, &ParticlePool),
) {
    for frame in 0..frames {
        let before = sim.pool().clone();
        sim.advance(params_at(frame));
        check(&before, sim.pool());
    }
}

fn recycled(before: &ParticlePool, after: &ParticlePool, i: usize) -> bool {
    after.position(i).x < before.position(i).x
}

#[test]
fn test_positions_stay_on_flow_path() {
    let zones = ZoneMap::default();
    let mut sim = Simulation::seeded(COUNT, zones, 1);
    let params = fast(Params {
        mode_defrost: true,
        mode_foot: true,
        blend_door: 0.5,
        ..Params::default()
    });

    run_checked(&mut sim, FRAMES, |_| params, |_, after| {
        for i in 0..after.len() {
            let p = after.position(i);
            assert!(p.x >= zones.start && p.x <= zones.end, "x = {} out of range", p.x);
            assert!(p.y.abs() <= 4.0, "y = {} out of range", p.y);
        }
    });
}

#[test]
fn test_recycled_slots_are_reset() {
    let mut sim = Simulation::seeded(COUNT, ZoneMap::default(), 2);
    let params = fast(Params {
        blend_door: 0.5,
        ..Params::default()
    });
    let mut recycles = 0;

    run_checked(&mut sim, FRAMES, |_| params, |before, after| {
        for i in 0..after.len() {
            if recycled(before, after, i) {
                recycles += 1;
                let state = after.state(i);
                assert_eq!(state.path, PathType::Unrouted);
                assert_eq!(state.outlet, OutputMode::Unassigned);
                assert_eq!(after.position(i).x, ZoneMap::default().start);
                assert_eq!(after.position(i).y, state.initial_offset_y);
                assert_eq!(after.position(i).z, before.position(i).z);
                assert_eq!(after.color(i), NEUTRAL_COLOR);
            }
        }
    });

    assert!(recycles > 0, "no particle reached the end of the duct");
}

#[test]
fn test_routing_and_outlet_are_one_shot() {
    let mut sim = Simulation::seeded(COUNT, ZoneMap::default(), 3);
    // Flip the controls every 40 frames so in-flight particles see changes.
    let params_at = |frame: usize| {
        let phase = (frame / 40) % 3;
        fast(Params {
            blend_door: phase as f32 * 0.5,
            mode_defrost: phase == 0,
            mode_face: phase == 1,
            mode_foot: phase == 2,
            ..Params::default()
        })
    };

    run_checked(&mut sim, FRAMES, params_at, |before, after| {
        for i in 0..after.len() {
            if recycled(before, after, i) {
                continue;
            }
            let old = before.state(i);
            let new = after.state(i);
            if old.path != PathType::Unrouted {
                assert_eq!(new.path, old.path);
                assert_eq!(new.target_y, old.target_y);
            }
            if old.outlet != OutputMode::Unassigned {
                assert_eq!(new.outlet, old.outlet);
            }
        }
    });
}

#[test]
fn test_heater_color_overrides_cold() {
    let zones = ZoneMap::default();
    let mut sim = Simulation::seeded(COUNT, zones, 4);
    let params = fast(Params {
        blend_door: 1.0,
        ..Params::default()
    });

    for _ in 0..FRAMES {
        sim.advance(params);
    }

    let pool = sim.pool();
    let mut hot = 0;
    for i in 0..pool.len() {
        let x = pool.position(i).x;
        if x > zones.heater_end {
            assert_eq!(pool.state(i).path, PathType::ThroughHeater);
            assert_eq!(pool.color(i), HOT_COLOR);
            hot += 1;
        } else if x > zones.evap_end {
            assert_eq!(pool.color(i), COLD_COLOR);
        }
    }
    assert!(hot > 0);
}

#[test]
fn test_closed_blend_door_face_only() {
    let mut sim = Simulation::seeded(COUNT, ZoneMap::default(), 5);
    let params = fast(Params::default());

    for _ in 0..FRAMES {
        sim.advance(params);
        for state in sim.pool().states() {
            assert_ne!(state.path, PathType::ThroughHeater);
            assert!(matches!(state.outlet, OutputMode::Unassigned | OutputMode::Face));
        }
    }

    let stats = sim.stats();
    assert!(stats.bypass > 0);
    assert!(stats.face > 0);
    assert_eq!(stats.hot, 0);
}

#[test]
fn test_open_blend_door_routes_through_heater() {
    let mut sim = Simulation::seeded(COUNT, ZoneMap::default(), 6);
    let params = fast(Params {
        blend_door: 1.0,
        ..Params::default()
    });

    for _ in 0..FRAMES {
        sim.advance(params);
        for state in sim.pool().states() {
            assert_ne!(state.path, PathType::Bypass);
        }
    }
    assert!(sim.stats().through_heater > 0);
}

#[test]
fn test_no_modes_falls_back_to_face() {
    let mut sim = Simulation::seeded(COUNT, ZoneMap::default(), 7);
    let params = fast(Params {
        mode_defrost: false,
        mode_face: false,
        mode_foot: false,
        ..Params::default()
    });

    for _ in 0..FRAMES {
        sim.advance(params);
    }

    let stats = sim.stats();
    assert!(stats.face > 0);
    assert_eq!(stats.defrost, 0);
    assert_eq!(stats.foot, 0);
}

#[test]
fn test_all_modes_are_used() {
    let mut sim = Simulation::seeded(COUNT, ZoneMap::default(), 8);
    let params = fast(Params {
        mode_defrost: true,
        mode_face: true,
        mode_foot: true,
        ..Params::default()
    });

    for _ in 0..FRAMES {
        sim.advance(params);
    }

    let stats = sim.stats();
    assert!(stats.defrost > 0);
    assert!(stats.face > 0);
    assert!(stats.foot > 0);
}

#[test]
fn test_switches_off_keep_air_neutral() {
    let mut sim = Simulation::seeded(COUNT, ZoneMap::default(), 9);
    let params = fast(Params {
        evaporator_on: false,
        heater_on: false,
        blend_door: 0.5,
        ..Params::default()
    });

    for _ in 0..FRAMES {
        sim.advance(params);
    }

    let stats = sim.stats();
    assert_eq!(stats.neutral, COUNT);
}

#[test]
fn test_same_seed_same_buffers() {
    let params_at = |frame: usize| {
        fast(Params {
            blend_door: (frame % 100) as f32 / 100.0,
            mode_foot: frame > 200,
            ..Params::default()
        })
    };

    let mut a = Simulation::seeded(COUNT, ZoneMap::default(), 1234);
    let mut b = Simulation::seeded(COUNT, ZoneMap::default(), 1234);
    for frame in 0..300 {
        let ra = a.advance(params_at(frame));
        let rb = b.advance(params_at(frame));
        assert_eq!(ra, rb);
    }

    assert_eq!(a.pool().positions(), b.pool().positions());
    assert_eq!(a.pool().colors(), b.pool().colors());
    assert_eq!(a.pool().states(), b.pool().states());
}

#[test]
fn test_free_function_accepts_any_rng() {
    let zones = ZoneMap::default();
    let mut rng = StdRng::seed_from_u64(10);
    let mut pool = ParticlePool::spawn(100, &zones, &mut rng);
    let mut fan_angle = 0.0;

    for _ in 0..50 {
        let rotations = advance(&mut pool, &zones, &Params::default(), fan_angle, &mut rng);
        fan_angle = rotations.fan_angle;
    }

    assert!((fan_angle - 50.0 * -0.4).abs() < 1e-3);
    assert_eq!(pool.len(), 100);
}

#[test]
fn test_air_speed_above_control_range_is_honoured() {
    let zones = ZoneMap::default();
    let mut rng = StdRng::seed_from_u64(12);
    let mut pool = ParticlePool::spawn(1, &zones, &mut rng);
    pool.set_slot(
        0,
        Vec3::new(-5.0, 0.0, 0.0),
        NEUTRAL_COLOR,
        ParticleState::new(0.0, 1.0),
    );
    let params = Params {
        air_speed: 0.5,
        ..Params::default()
    };
    assert!(params.air_speed > AIR_SPEED_MAX);

    let rotations = advance(&mut pool, &zones, &params, 0.0, &mut rng);

    assert!((pool.position(0).x - -4.5).abs() < 1e-5);
    assert!((rotations.fan_angle - -2.5).abs() < 1e-5);
}

#[test]
fn test_custom_zone_map() {
    let zones = ZoneMap::new(-3.0, -2.0, -1.0, 0.0, 1.0, 1.5, 4.0).unwrap();
    let mut sim = Simulation::seeded(200, zones, 11);
    for _ in 0..FRAMES {
        sim.advance(fast(Params::default()));
        for i in 0..sim.pool().len() {
            let x = sim.pool().position(i).x;
            assert!(x >= zones.start && x <= zones.end);
        }
    }
    assert!(sim.stats().face > 0);
}
