//! tickstats Configuration Layer
//!
//! Configuration for the tickstats statistics engine. The engine itself is
//! stateless; everything that used to be a module-level constant (confidence
//! levels, simulation sizes, bucket-width fallbacks, indicator windows) is
//! carried in an [`EngineConfig`] passed to its entry points.
//!
//! # Example
//!
//! ```rust
//! use tickstats_config::{EngineConfig, Validate};
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     name = "WEEKLY"
//!
//!     [simulation]
//!     simulations = 500
//!     forecast_period = 52
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.risk.confidence_levels, vec![0.95, 0.99, 0.999]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod engine;
mod error;

pub use engine::{BinningConfig, EngineConfig, IndicatorConfig, RiskConfig, SimulationConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{
        BinningConfig, EngineConfig, IndicatorConfig, RiskConfig, SimulationConfig,
    };
    pub use crate::error::{ConfigError, ConfigResult, Validate};
}
