//! Error types for model construction and persistence

use thiserror::Error;

/// Errors raised by the weight initializers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// Only fully-connected (rank 2) and convolutional (rank 4) weights have a defined fan-in
    #[error("unsupported weight rank {0}: expected 2 (linear) or 4 (conv2d)")]
    UnsupportedRank(usize),

    #[error("weight shape {shape:?} has zero fan-in")]
    ZeroFanIn { shape: Vec<usize> },
}

/// Errors raised while building, saving or loading a model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("initialization error: {0}")]
    Init(#[from] InitError),

    #[error("config file error: {0}")]
    Config(String),

    #[error("checkpoint error: {0}")]
    Checkpoint(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;
