//! Error taxonomy for the engine
//!
//! - `Domain`        – invalid vector/body math (zero-length normalize, massless center of mass)
//! - `Configuration` – malformed body definitions or scenario settings
//! - `Concurrency`   – driver/controller asked to act with nothing bound to it

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Domain(String),
    Configuration(String),
    Concurrency(String),
}

impl EngineError {
    pub fn domain(msg: impl Into<String>) -> Self {
        EngineError::Domain(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }

    pub fn concurrency(msg: impl Into<String>) -> Self {
        EngineError::Concurrency(msg.into())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Domain(msg) => write!(f, "domain error: {msg}"),
            EngineError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            EngineError::Concurrency(msg) => write!(f, "concurrency error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
