//! Configuration system for Pathway.
//! TOML-based, layered resolution: CLI > env > config file > defaults.

pub mod defaults;
pub mod model_config;
pub mod observability_config;
pub mod pathway_config;
pub mod server_config;

pub use model_config::ModelConfig;
pub use observability_config::ObservabilityConfig;
pub use pathway_config::{CliOverrides, PathwayConfig};
pub use server_config::ServerConfig;
