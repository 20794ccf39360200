use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Standard gravity, pointing down the Y axis (Y-up coordinates).
pub const DEFAULT_ACCELERATION: [f64; 2] = [0.0, -9.81];

/// Default step used by [`World::run_default`](crate::World::run_default).
pub const DEFAULT_DT: f64 = 0.01;

/// World parameters, typically loaded from a JSON document.
///
/// ```json
/// { "acceleration": [0.0, -10.0], "bounds": [100.0, 50.0], "dt": 0.005 }
/// ```
///
/// Every field is optional in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Uniform acceleration applied to every particle (default: `[0, -9.81]`).
    #[serde(default = "default_acceleration")]
    pub acceleration: [f64; 2],
    /// Box dimensions `[width, height]` with one corner at the origin.
    /// Absent means an unbounded world.
    #[serde(default)]
    pub bounds: Option<[f64; 2]>,
    /// Step size for batch runs (default: 0.01).
    #[serde(default = "default_dt")]
    pub dt: f64,
}

fn default_acceleration() -> [f64; 2] {
    DEFAULT_ACCELERATION
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            acceleration: DEFAULT_ACCELERATION,
            bounds: None,
            dt: DEFAULT_DT,
        }
    }
}

impl WorldConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that bounds (if any) and the default step are positive and finite.
    pub fn validate(&self) -> Result<()> {
        if let Some([w, h]) = self.bounds {
            if !(w.is_finite() && w > 0.0 && h.is_finite() && h > 0.0) {
                return Err(Error::InvalidParam(format!(
                    "bounds must be finite and > 0, got ({w}, {h})"
                )));
            }
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(Error::InvalidParam(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        Ok(())
    }

    pub fn with_acceleration(mut self, acceleration: [f64; 2]) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.bounds = Some([width, height]);
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }
}
