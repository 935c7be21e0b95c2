//! Stepper settings.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    /// Forwarded to the renderer: draw empty child slots as NIL leaves.
    pub show_absent_children: bool,
    /// Pacing hint for the scheduler between two fix-up steps.
    pub step_interval_ms: u64,
    /// Pacing hint for the scheduler before the first fix-up step.
    pub start_delay_ms: u64,
    /// Record the intermediate "Pre-Delete" states of the successor splice.
    pub record_splice_steps: bool,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            show_absent_children: false,
            step_interval_ms: 500,
            start_delay_ms: 100,
            record_splice_steps: true,
        }
    }
}

impl StepperConfig {
    /// Parses a (possibly partial) JSON object; missing keys keep defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = StepperConfig::from_json(r#"{ "show_absent_children": true }"#).unwrap();
        assert!(cfg.show_absent_children);
        assert_eq!(cfg.step_interval_ms, 500);
        assert!(cfg.record_splice_steps);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(StepperConfig::from_json("{ step_interval_ms: }").is_err());
    }
}
