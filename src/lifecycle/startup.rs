//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration (file or defaults) and apply command-line overrides
//! - Validate the final configuration
//! - Build the mapping table from the file and configured args
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The mapping table is frozen behind an `Arc` before the listener exists

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::config::validation::validate_config;
use crate::config::{load_config, ConfigError, HandlerConfig, MappingConfig};
use crate::mapping::{load_mapping, MappingError, MappingTable};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("mapping error: {0}")]
    Mapping(#[from] MappingError),
}

/// Values supplied on the command line; each overrides its config counterpart.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub mapping_path: Option<PathBuf>,
    pub bind_address: Option<String>,
}

/// Load, override and validate the configuration.
pub fn resolve_config(options: &StartupOptions) -> Result<HandlerConfig, StartupError> {
    let mut config = match &options.config_path {
        Some(path) => load_config(path)?,
        None => HandlerConfig::default(),
    };

    if let Some(path) = &options.mapping_path {
        config.mapping.path = Some(path.display().to_string());
    }
    if let Some(addr) = &options.bind_address {
        config.listener.bind_address = addr.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the process-wide mapping table.
pub fn build_mapping(config: &MappingConfig) -> Result<Arc<MappingTable>, StartupError> {
    let mut table = match config.path.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(path) => load_mapping(Path::new(path))?,
        None => MappingTable::new(),
    };
    table.merge(MappingTable::from_args(&config.args));

    if table.is_empty() {
        return Err(MappingError::Empty.into());
    }

    for entry in &table {
        tracing::info!(
            source_key = entry.source_key(),
            header = entry.header_name(),
            "Mapping loaded"
        );
    }
    Ok(Arc::new(table))
}
