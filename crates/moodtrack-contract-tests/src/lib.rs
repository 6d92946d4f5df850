#![warn(missing_docs)]
//! # moodtrack-contract-tests
//!
//! Loads the frozen backend JSON schemas under the workspace `contracts/`
//! directory so tests can validate fixtures and gateway-produced bodies.

use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use serde_json::Value;
use thiserror::Error;

/// Workspace directory holding schemas and fixtures.
pub const CONTRACTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../contracts");

/// Absolute path of `relative` inside [`CONTRACTS_DIR`].
pub fn contract_path(relative: &str) -> PathBuf {
    Path::new(CONTRACTS_DIR).join(relative)
}

/// Reads and parses one JSON file.
///
/// # Errors
/// Returns [`ContractError`] when the file is unreadable or not JSON.
pub fn load_json(path: &Path) -> Result<Value, ContractError> {
    let raw = std::fs::read_to_string(path).map_err(|error| ContractError::Read {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|error| ContractError::Parse {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}

/// Compiles `contracts/<name>.schema.json`.
///
/// # Errors
/// Returns [`ContractError`] when the schema cannot be loaded or compiled.
pub fn compile_validator(name: &str) -> Result<JSONSchema, ContractError> {
    let path = contract_path(&format!("{name}.schema.json"));
    let schema = load_json(&path)?;
    JSONSchema::compile(&schema).map_err(|error| ContractError::Schema {
        path,
        reason: error.to_string(),
    })
}

/// Loads `contracts/fixtures/<name>.json`.
///
/// # Errors
/// Returns [`ContractError`] when the fixture cannot be loaded.
pub fn load_fixture(name: &str) -> Result<Value, ContractError> {
    load_json(&contract_path(&format!("fixtures/{name}.json")))
}

/// Describes every way `instance` violates `validator`; empty when valid.
pub fn violations(validator: &JSONSchema, instance: &Value) -> Vec<String> {
    match validator.validate(instance) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|error| format!("{}: {error}", error.instance_path))
            .collect(),
    }
}

/// Failure to load a contract artifact.
#[derive(Debug, Error)]
pub enum ContractError {
    /// File could not be read.
    #[error("cannot read {path:?}: {reason}")]
    Read {
        /// File path.
        path: PathBuf,
        /// I/O message.
        reason: String,
    },
    /// File is not valid JSON.
    #[error("cannot parse {path:?}: {reason}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
    /// Schema did not compile.
    #[error("invalid schema {path:?}: {reason}")]
    Schema {
        /// Schema path.
        path: PathBuf,
        /// Compiler message.
        reason: String,
    },
}
