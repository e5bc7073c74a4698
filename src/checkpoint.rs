//! Checkpoint persistence
//!
//! A checkpoint directory holds the architecture and the weights:
//!
//! ```text
//! <dir>/
//!   config.json     BaselineCnnConfig
//!   model.mpk.gz    parameters, MessagePack + gzip at half precision
//! ```
//!
//! The config is needed to rebuild a model with the right shapes before
//! the weights can be loaded into it.

use std::fs;
use std::path::{Path, PathBuf};

use burn::config::Config;
use burn::module::Module;
use burn::record::{HalfPrecisionSettings, NamedMpkGzFileRecorder, Recorder};
use burn::tensor::backend::Backend;

use crate::error::ModelError;
use crate::model::{BaselineCnn, BaselineCnnConfig};

const CONFIG_FILE: &str = "config.json";
// The recorder appends WEIGHTS_EXTENSION itself
const MODEL_FILE: &str = "model";
const WEIGHTS_EXTENSION: &str = "mpk.gz";

type CheckpointRecorder = NamedMpkGzFileRecorder<HalfPrecisionSettings>;

/// Saves and restores [`BaselineCnn`] checkpoints in a directory
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether both the config and the weights are present
    pub fn exists(&self) -> bool {
        self.config_path().is_file() && self.weights_path().is_file()
    }

    /// Write the config and the model weights, creating the directory if needed.
    pub fn save<B: Backend>(
        &self,
        model: &BaselineCnn<B>,
        config: &BaselineCnnConfig,
    ) -> Result<(), ModelError> {
        fs::create_dir_all(&self.dir)?;

        config.save(self.config_path())?;

        let path = self.model_path();
        CheckpointRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .map_err(|err| {
                ModelError::Checkpoint(format!("cannot save '{}': {}", path.display(), err))
            })?;

        tracing::info!(dir = %self.dir.display(), "saved checkpoint");
        Ok(())
    }

    /// Rebuild the model from the saved config and load its weights.
    ///
    /// The saved seed is not applied and no parameters are sampled.
    pub fn load<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<(BaselineCnn<B>, BaselineCnnConfig), ModelError> {
        let config_path = self.config_path();
        let config = BaselineCnnConfig::load(&config_path).map_err(|err| {
            ModelError::Config(format!("cannot read '{}': {}", config_path.display(), err))
        })?;

        let path = self.model_path();
        let record = CheckpointRecorder::new()
            .load(path.clone(), device)
            .map_err(|err| {
                ModelError::Checkpoint(format!("cannot load '{}': {}", path.display(), err))
            })?;

        let model = config.init_with::<B>(record, device)?;

        tracing::info!(dir = %self.dir.display(), "loaded checkpoint");
        Ok((model, config))
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    fn weights_path(&self) -> PathBuf {
        self.model_path().with_extension(WEIGHTS_EXTENSION)
    }
}
