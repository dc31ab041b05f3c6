//! Demo configuration.
//!
//! Supports loading configuration from:
//! 1. A YAML file
//! 2. Environment variables (with `QVAR_` prefix)
//!
//! Environment variables take precedence over the file, which takes
//! precedence over the defaults.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use qvar_adapter_sim::{DefaultQubit, DeviceResult};
use qvar_ir::Wires;
use serde::{Deserialize, Serialize};

/// Complete demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Simulator settings
    #[serde(default)]
    pub device: DeviceConfig,

    /// Classical optimizer settings
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// QAOA circuit settings
    #[serde(default)]
    pub qaoa: QaoaConfig,
}

/// Simulator settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Shots per expectation value; absent for exact results.
    #[serde(default)]
    pub shots: Option<u32>,

    /// Seed for sampling and parameter initialisation.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Which optimizer drives the variational loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    #[default]
    Adam,
    GradientDescent,
    Cobyla,
}

impl FromStr for OptimizerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "adam" => Ok(Self::Adam),
            "gradient_descent" | "gd" => Ok(Self::GradientDescent),
            "cobyla" => Ok(Self::Cobyla),
            other => Err(ConfigError::ValidationError(format!(
                "Unknown optimizer: {other}"
            ))),
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adam => write!(f, "adam"),
            Self::GradientDescent => write!(f, "gradient_descent"),
            Self::Cobyla => write!(f, "cobyla"),
        }
    }
}

/// Optimizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub kind: OptimizerKind,

    /// Learning rate for step-style optimizers
    #[serde(default = "default_stepsize")]
    pub stepsize: f64,

    /// Optimizer steps (iterations for cobyla)
    #[serde(default = "default_steps")]
    pub steps: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            kind: OptimizerKind::default(),
            stepsize: default_stepsize(),
            steps: default_steps(),
        }
    }
}

/// QAOA settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaoaConfig {
    /// Number of cost/mixer layer pairs
    #[serde(default = "default_depth")]
    pub depth: usize,
}

impl Default for QaoaConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
        }
    }
}

fn default_stepsize() -> f64 {
    0.01
}

fn default_steps() -> usize {
    100
}

fn default_depth() -> usize {
    1
}

impl DemoConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: DemoConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional file, then apply environment
    /// overrides.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => DemoConfig::default(),
        };
        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge `QVAR_*` environment variables into this configuration.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides looked up by variable name.
    ///
    /// Only variables that are present override; malformed values are an
    /// error rather than being ignored.
    pub fn merge_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
            value
                .parse()
                .map_err(|_| ConfigError::ParseError(format!("{key}={value}")))
        }

        if let Some(v) = lookup("QVAR_SHOTS") {
            self.device.shots = Some(parse("QVAR_SHOTS", &v)?);
        }
        if let Some(v) = lookup("QVAR_SEED") {
            self.device.seed = Some(parse("QVAR_SEED", &v)?);
        }
        if let Some(v) = lookup("QVAR_OPTIMIZER") {
            self.optimizer.kind = v.parse()?;
        }
        if let Some(v) = lookup("QVAR_STEPSIZE") {
            self.optimizer.stepsize = parse("QVAR_STEPSIZE", &v)?;
        }
        if let Some(v) = lookup("QVAR_STEPS") {
            self.optimizer.steps = parse("QVAR_STEPS", &v)?;
        }
        if let Some(v) = lookup("QVAR_QAOA_DEPTH") {
            self.qaoa.depth = parse("QVAR_QAOA_DEPTH", &v)?;
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device.shots == Some(0) {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0; omit the field for exact results".to_string(),
            ));
        }
        if !(self.optimizer.stepsize.is_finite() && self.optimizer.stepsize > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid stepsize: {}",
                self.optimizer.stepsize
            )));
        }
        if self.qaoa.depth == 0 {
            return Err(ConfigError::ValidationError(
                "qaoa.depth must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the simulator described by [`Self::device`] on `wires`.
    pub fn build_device(&self, wires: Wires) -> DeviceResult<DefaultQubit> {
        let dev = DefaultQubit::new(wires)?.with_shots(self.device.shots)?;
        Ok(match self.device.seed {
            Some(seed) => dev.with_seed(seed),
            None => dev,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
