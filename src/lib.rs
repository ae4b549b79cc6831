//! # hvac-flow - Automotive HVAC airflow visualiser
//!
//! A fixed pool of air particles travels along +X through the stages of a
//! car's HVAC module: blower, evaporator, blend door, heater core and the
//! defrost / face / foot outlets. Each frame the particles are routed,
//! moved, recolored and recycled according to a [`Params`] snapshot.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hvac_flow::prelude::*;
//!
//! let mut sim = Simulation::seeded(2000, ZoneMap::default(), 42);
//! let params = Params {
//!     blend_door: 0.5,
//!     mode_foot: true,
//!     ..Params::default()
//! };
//!
//! for _ in 0..600 {
//!     let rotations = sim.advance(params);
//!     // hand sim.pool().positions() / colors() and `rotations` to a renderer
//!     # let _ = rotations;
//! }
//! println!("{:?}", sim.stats());
//! ```
//!
//! ## Core Concepts
//!
//! ### Zones
//!
//! A [`ZoneMap`] holds seven ordered boundaries along X. Particles spawn at
//! `start`, turn cold past `evap_end`, commit to bypass or heater just past
//! `door_pivot`, turn hot past `heater_end` (heater path only), pick an
//! outlet past `distrib_point` and are recycled past `end`.
//!
//! ### Pool
//!
//! [`ParticlePool`] keeps positions and colors in dense `[x, y, z, ...]` /
//! `[r, g, b, ...]` buffers ready for GPU upload, plus per-slot routing
//! state. The pool never grows or shrinks.
//!
//! ### Viewer
//!
//! [`window::run`] opens a wgpu window that draws the particles as
//! additive sprites over a wireframe of the module. Keyboard bindings edit
//! the parameters (see [`input`]); build with the `egui` feature for a
//! control panel.

pub mod config;
pub mod error;
pub mod gpu;
pub mod input;
#[cfg(feature = "egui")]
pub mod panel;
pub mod params;
pub mod particle;
pub mod pool;
mod shader;
pub mod simulation;
pub mod time;
pub mod window;
pub mod zones;

pub use config::{HvacConfig, WindowConfig};
pub use error::{ConfigError, GpuError, ViewerError};
pub use glam::Vec3;
pub use params::{ModeSet, Params, AIR_SPEED_MAX};
pub use particle::{OutputMode, ParticleState, PathType, ThermalState, COLD_COLOR, HOT_COLOR, NEUTRAL_COLOR};
pub use pool::ParticlePool;
pub use simulation::{advance, FlowStats, Rotations, Simulation};
pub use zones::ZoneMap;

/// WGSL sources for the renderer, exposed for validation tooling.
pub mod shaders {
    pub use crate::shader::{LINE_SHADER, PARTICLE_SHADER};
}

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use hvac_flow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::HvacConfig;
    pub use crate::params::Params;
    pub use crate::particle::{OutputMode, PathType, ThermalState};
    pub use crate::pool::ParticlePool;
    pub use crate::simulation::{advance, FlowStats, Rotations, Simulation};
    pub use crate::zones::ZoneMap;
    pub use crate::Vec3;
}
