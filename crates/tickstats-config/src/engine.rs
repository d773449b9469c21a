//! Statistics engine configuration types.
//!
//! Every field has a serde default, so a configuration file only needs to
//! name the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// RISK CONFIGURATION
// =============================================================================

/// VaR/CVaR settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Confidence levels as fractions, e.g. `0.95`.
    pub confidence_levels: Vec<f64>,

    /// Below this many return observations results are flagged unreliable.
    pub min_reliable_observations: usize,

    /// Decimal places of the reported percentages.
    pub precision: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            confidence_levels: vec![0.95, 0.99, 0.999],
            min_reliable_observations: 30,
            precision: 2,
        }
    }
}

impl Validate for RiskConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.confidence_levels.is_empty() {
            errors.push(ValidationError::new(
                "confidence_levels",
                "At least one confidence level is required",
            ));
        }
        for level in &self.confidence_levels {
            if !(*level > 0.0 && *level < 1.0) {
                errors.push(ValidationError::with_rule(
                    "confidence_levels",
                    format!("Confidence level {level} must be strictly between 0 and 1"),
                    "open_unit_interval",
                ));
            }
        }
        if self.precision > 10 {
            errors.push(ValidationError::with_rule(
                "precision",
                "Precision must be at most 10 decimal places",
                "max_10",
            ));
        }

        errors
    }
}

// =============================================================================
// SIMULATION CONFIGURATION
// =============================================================================

/// Monte Carlo settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of independent runs (columns).
    pub simulations: usize,

    /// Number of future steps per run (rows).
    pub forecast_period: usize,

    /// Master seed for reproducibility (None = seeded from OS entropy).
    pub seed: Option<u64>,

    /// Generate runs on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulations: 150,
            forecast_period: 100,
            seed: None,
            parallel: false,
        }
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.simulations == 0 {
            errors.push(ValidationError::with_rule(
                "simulations",
                "Number of simulations must be positive",
                "positive",
            ));
        }
        if self.forecast_period == 0 {
            errors.push(ValidationError::with_rule(
                "forecast_period",
                "Forecast period must be positive",
                "positive",
            ));
        }

        errors
    }
}

// =============================================================================
// BINNING CONFIGURATION
// =============================================================================

/// Return histogram settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinningConfig {
    /// Bucket width used when the mean return has no fractional digits
    /// (in particular a mean of exactly zero).
    pub fallback_width: f64,

    /// Smallest bucket width the adaptive rule may produce.
    pub min_width: f64,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            fallback_width: 0.005,
            min_width: 1e-6,
        }
    }
}

impl Validate for BinningConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("fallback_width", self.fallback_width),
            ("min_width", self.min_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Bucket width must be a positive finite number, got {value}"),
                    "positive_finite",
                ));
            }
        }
        if self.min_width > self.fallback_width {
            errors.push(ValidationError::new(
                "min_width",
                "Minimum width cannot exceed the fallback width",
            ));
        }

        errors
    }
}

// =============================================================================
// INDICATOR CONFIGURATION
// =============================================================================

/// Default windows for the chart indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Moving average window.
    pub ma_length: usize,
    /// Bollinger Bands window.
    pub bollinger_length: usize,
    /// Bollinger Bands width in standard deviations.
    pub bollinger_std_dev: f64,
    /// Stochastic oscillator look-back.
    pub stochastic_length: usize,
    /// Stochastic %D smoothing window.
    pub stochastic_slowing: usize,
    /// MACD fast EMA span.
    pub macd_fast: usize,
    /// MACD slow EMA span.
    pub macd_slow: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_length: 10,
            bollinger_length: 20,
            bollinger_std_dev: 2.0,
            stochastic_length: 14,
            stochastic_slowing: 3,
            macd_fast: 12,
            macd_slow: 26,
        }
    }
}

impl Validate for IndicatorConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("ma_length", self.ma_length),
            ("bollinger_length", self.bollinger_length),
            ("stochastic_length", self.stochastic_length),
            ("stochastic_slowing", self.stochastic_slowing),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
        ] {
            if value == 0 {
                errors.push(ValidationError::with_rule(
                    field,
                    "Window must be positive",
                    "positive",
                ));
            }
        }
        if !(self.bollinger_std_dev.is_finite() && self.bollinger_std_dev > 0.0) {
            errors.push(ValidationError::with_rule(
                "bollinger_std_dev",
                "Band width must be a positive finite number",
                "positive_finite",
            ));
        }
        if self.macd_fast >= self.macd_slow {
            errors.push(ValidationError::new(
                "macd_fast",
                "Fast span must be shorter than the slow span",
            ));
        }

        errors
    }
}

// =============================================================================
// ENGINE CONFIGURATION
// =============================================================================

/// Complete configuration of the statistics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Configuration name/identifier.
    pub name: String,

    /// Description of this configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// VaR/CVaR settings.
    pub risk: RiskConfig,

    /// Monte Carlo settings.
    pub simulation: SimulationConfig,

    /// Return histogram settings.
    pub binning: BinningConfig,

    /// Indicator windows.
    pub indicators: IndicatorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl EngineConfig {
    /// Creates a configuration with default sections.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            risk: RiskConfig::default(),
            simulation: SimulationConfig::default(),
            binning: BinningConfig::default(),
            indicators: IndicatorConfig::default(),
        }
    }

    /// Creates the standard dashboard configuration.
    pub fn standard() -> Self {
        Self::new("STANDARD").with_description("Dashboard defaults")
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the Monte Carlo run count and horizon.
    #[must_use]
    pub fn with_simulation(mut self, simulations: usize, forecast_period: usize) -> Self {
        self.simulation.simulations = simulations;
        self.simulation.forecast_period = forecast_period;
        self
    }

    /// Sets the Monte Carlo master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = Some(seed);
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a configuration file, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match Format::of(path)? {
            Format::Toml => Self::from_toml_str(&contents),
            Format::Json => Self::from_json_str(&contents),
        }
    }

    /// Writes the configuration, choosing the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => self.to_toml_string()?,
            Format::Json => self.to_json_string()?,
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        let sections: [(&str, Vec<ValidationError>); 4] = [
            ("risk", self.risk.validate()),
            ("simulation", self.simulation.validate()),
            ("binning", self.binning.validate()),
            ("indicators", self.indicators.validate()),
        ];
        for (section, section_errors) in sections {
            errors.extend(section_errors.into_iter().map(|e| e.in_section(section)));
        }

        errors
    }
}

enum Format {
    Toml,
    Json,
}

impl Format {
    fn of(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "toml" => Ok(Format::Toml),
            "json" => Ok(Format::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
