use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::layout::{InputLayout, Semantic};

/// Precision an output varying must be stored and interpolated at.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionHint {
    /// Full 32-bit float.
    Full,
    /// Lower precision is acceptable; only visual fidelity is affected.
    Reduced,
}

/// Declaration of one stage output.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct OutputDecl {
    pub semantic: Semantic,
    pub precision: PrecisionHint,
}

impl OutputDecl {
    #[inline]
    pub const fn new(semantic: Semantic, precision: PrecisionHint) -> Self {
        Self { semantic, precision }
    }
}

/// How the driver schedules stage invocations across vertices.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    /// One thread, vertex order.
    #[default]
    Serial,
    /// Rayon thread pool. Outputs keep their vertex index.
    Parallel,
}

/// Everything fixed at pipeline build time.
///
/// `Default` is the canonical interleaved layout with a full-precision clip
/// position and a reduced-precision color varying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input_layout: InputLayout,
    pub outputs: Vec<OutputDecl>,
    #[serde(default)]
    pub dispatch: Dispatch,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_layout: InputLayout::interleaved(),
            outputs: vec![
                OutputDecl::new(Semantic::Position, PrecisionHint::Full),
                OutputDecl::new(Semantic::Color, PrecisionHint::Reduced),
            ],
            dispatch: Dispatch::Serial,
        }
    }
}

impl PipelineConfig {
    #[inline]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn output(&self, semantic: Semantic) -> Option<&OutputDecl> {
        self.outputs.iter().find(|o| o.semantic == semantic)
    }

    /// Checks output declarations and returns the color varying's precision.
    pub(crate) fn validate_outputs(&self) -> Result<PrecisionHint, PipelineError> {
        for (i, out) in self.outputs.iter().enumerate() {
            if self.outputs[..i].iter().any(|o| o.semantic == out.semantic) {
                return Err(PipelineError::DuplicateOutput(out.semantic));
            }
        }
        for semantic in Semantic::ALL {
            if self.output(semantic).is_none() {
                return Err(PipelineError::MissingOutput(semantic));
            }
        }
        if self.output(Semantic::Position).map(|o| o.precision) != Some(PrecisionHint::Full) {
            return Err(PipelineError::PositionPrecision);
        }
        Ok(self
            .output(Semantic::Color)
            .map_or(PrecisionHint::Full, |o| o.precision))
    }
}

/// Reads a JSON pipeline configuration from disk.
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pipeline config {}", path.display()))?;
    let config = PipelineConfig::from_json_str(&text)
        .with_context(|| format!("failed to parse pipeline config {}", path.display()))?;
    log::debug!("loaded pipeline config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_outputs_are_valid() {
        assert_eq!(PipelineConfig::default().validate_outputs(), Ok(PrecisionHint::Reduced));
    }

    #[test]
    fn full_precision_color_is_allowed() {
        let mut c = PipelineConfig::default();
        c.outputs[1].precision = PrecisionHint::Full;
        assert_eq!(c.validate_outputs(), Ok(PrecisionHint::Full));
    }

    #[test]
    fn reduced_position_is_rejected() {
        let mut c = PipelineConfig::default();
        c.outputs[0].precision = PrecisionHint::Reduced;
        assert_eq!(c.validate_outputs(), Err(PipelineError::PositionPrecision));
    }

    #[test]
    fn missing_color_output_is_rejected() {
        let mut c = PipelineConfig::default();
        c.outputs.truncate(1);
        assert_eq!(c.validate_outputs(), Err(PipelineError::MissingOutput(Semantic::Color)));
    }

    #[test]
    fn duplicate_output_is_rejected() {
        let mut c = PipelineConfig::default();
        c.outputs.push(OutputDecl::new(Semantic::Color, PrecisionHint::Full));
        assert_eq!(c.validate_outputs(), Err(PipelineError::DuplicateOutput(Semantic::Color)));
    }

    #[test]
    fn json_round_trip_with_default_dispatch() {
        let json = r#"{
            "input_layout": {
                "stride": 28,
                "attributes": [
                    { "semantic": "position", "location": 0, "format": "float32x3", "offset": 0 },
                    { "semantic": "color", "location": 1, "format": "float32x4", "offset": 12 }
                ]
            },
            "outputs": [
                { "semantic": "position", "precision": "full" },
                { "semantic": "color", "precision": "reduced" }
            ]
        }"#;
        assert_eq!(PipelineConfig::from_json_str(json).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn load_config_reports_missing_file() {
        let err = load_config("/nonexistent/prism/pipeline.json").unwrap_err();
        assert!(err.to_string().contains("failed to read pipeline config"));
    }
}
