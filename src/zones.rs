//! Zone boundaries along the flow axis.
//!
//! Air travels along +X. The zone map splits that axis into the stages of
//! an HVAC module:
//!
//! | Interval | Stage |
//! |----------|-------|
//! | `start..evap_start` | Blower outlet |
//! | `evap_start..evap_end` | Evaporator core (cooling) |
//! | `evap_end..door_pivot` | Plenum before the blend door |
//! | `door_pivot..heater_end` | Heater core / bypass channel split |
//! | `heater_end..distrib_point` | Mixing chamber |
//! | `distrib_point..end` | Outlet ducts (defrost / face / foot) |

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ordered boundaries of the HVAC flow path.
///
/// Construct with [`ZoneMap::new`] to get the ordering checked, or use
/// [`ZoneMap::default`] for the stock layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneMap {
    /// Where particles spawn and re-enter after recycling.
    pub start: f32,
    pub evap_start: f32,
    /// Past this point particles show the evaporator color when the AC is on.
    pub evap_end: f32,
    /// Blend door hinge; routing is decided just past it.
    pub door_pivot: f32,
    /// Past this point heater-routed particles show the heater color.
    pub heater_end: f32,
    /// Outlet split; outlet modes are assigned past it.
    pub distrib_point: f32,
    /// Particles beyond this are recycled.
    pub end: f32,
}

impl ZoneMap {
    /// Create a zone map, checking that every boundary lies strictly
    /// before the next.
    pub fn new(
        start: f32,
        evap_start: f32,
        evap_end: f32,
        door_pivot: f32,
        heater_end: f32,
        distrib_point: f32,
        end: f32,
    ) -> Result<Self, ConfigError> {
        let zones = Self {
            start,
            evap_start,
            evap_end,
            door_pivot,
            heater_end,
            distrib_point,
            end,
        };
        zones.validate()?;
        Ok(zones)
    }

    /// Check the ordering `start < evap_start < ... < end`.
    ///
    /// NaN boundaries fail the check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = self.named_bounds();
        for pair in bounds.windows(2) {
            let (lower, lo) = pair[0];
            let (upper, hi) = pair[1];
            // Written as a negated `<` so NaN is rejected too.
            if !(lo < hi) {
                return Err(ConfigError::ZoneOrder { lower, upper });
            }
        }
        Ok(())
    }

    /// Boundaries in flow order, paired with their field names.
    pub fn named_bounds(&self) -> [(&'static str, f32); 7] {
        [
            ("start", self.start),
            ("evap_start", self.evap_start),
            ("evap_end", self.evap_end),
            ("door_pivot", self.door_pivot),
            ("heater_end", self.heater_end),
            ("distrib_point", self.distrib_point),
            ("end", self.end),
        ]
    }

    /// Total length of the flow path.
    #[inline]
    pub fn length(&self) -> f32 {
        self.end - self.start
    }

    /// Midpoint of the evaporator core along X.
    #[inline]
    pub fn evaporator_center(&self) -> f32 {
        (self.evap_start + self.evap_end) * 0.5
    }

    /// Midpoint of the heater core along X.
    #[inline]
    pub fn heater_center(&self) -> f32 {
        (self.door_pivot + self.heater_end) * 0.5
    }
}

impl Default for ZoneMap {
    fn default() -> Self {
        Self {
            start: -6.0,
            evap_start: -4.0,
            evap_end: -2.0,
            door_pivot: 0.0,
            heater_end: 3.0,
            distrib_point: 3.5,
            end: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_ordered() {
        assert!(ZoneMap::default().validate().is_ok());
        assert_eq!(ZoneMap::default().length(), 16.0);
    }

    #[test]
    fn test_new_rejects_swapped_boundaries() {
        let err = ZoneMap::new(-6.0, -4.0, -2.0, 0.0, 3.5, 3.0, 10.0).unwrap_err();
        match err {
            ConfigError::ZoneOrder { lower, upper } => {
                assert_eq!(lower, "heater_end");
                assert_eq!(upper, "distrib_point");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_equal_boundaries_are_rejected() {
        assert!(ZoneMap::new(0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0).is_err());
    }

    #[test]
    fn test_nan_boundary_is_rejected() {
        let zones = ZoneMap {
            door_pivot: f32::NAN,
            ..ZoneMap::default()
        };
        assert!(zones.validate().is_err());
    }

    #[test]
    fn test_centers() {
        let zones = ZoneMap::default();
        assert_eq!(zones.evaporator_center(), -3.0);
        assert_eq!(zones.heater_center(), 1.5);
    }
}
