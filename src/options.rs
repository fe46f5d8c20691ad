//! Test run options

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Options controlling how a tensile test session advances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// Strain increment per step (None = rupture strain / 15)
    #[serde(default)]
    pub increment: Option<f64>,
    /// Upper bound on steps for `run_to_rupture`
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Log every step at debug level
    #[serde(default)]
    pub log: bool,
}

fn default_max_steps() -> usize {
    1000
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            increment: None,
            max_steps: default_max_steps(),
            log: false,
        }
    }
}

impl SimulationOptions {
    /// Use a fixed strain increment
    pub fn with_increment(mut self, increment: f64) -> Self {
        self.increment = Some(increment);
        self
    }

    /// Set maximum steps
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if let Some(inc) = self.increment {
            if !inc.is_finite() || inc <= 0.0 {
                return Err(SimError::InvalidInput(format!(
                    "configured increment must be finite and greater than 0, got {}",
                    inc
                )));
            }
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidInput("max_steps must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let opts = SimulationOptions::default()
            .with_increment(0.02)
            .with_max_steps(10)
            .with_logging();
        assert_eq!(opts.increment, Some(0.02));
        assert_eq!(opts.max_steps, 10);
        assert!(opts.log);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(SimulationOptions::default().with_increment(-0.1).validate().is_err());
        assert!(SimulationOptions::default().with_max_steps(0).validate().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let opts: SimulationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, SimulationOptions::default());
    }
}
