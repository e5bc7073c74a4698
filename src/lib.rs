//! # Baseline CNN
//!
//! A convolutional baseline for binary audio classification, built on the
//! Burn framework.
//!
//! ## Features
//!
//! - **BaselineCnn**: four strided conv / batch-norm / ReLU stages, max pooling
//!   over frequency and time, a sigmoid output unit
//! - **Bottleneck output**: the frequency-pooled `[batch, channels, time]`
//!   feature map, returned on request
//! - **Initializers**: fan-in scaled uniform weights, unit batch-norm scale
//! - **Checkpoints**: config and weights saved together, reloaded in one call
//!
//! ## Quick Start
//!
//! ```rust
//! use baseline_cnn::prelude::*;
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let model = BaselineCnn::<Backend>::new(&device);
//!
//! // 3 clips, 100 frames, 64 mel bins
//! let input = Tensor::<Backend, 3>::zeros([3, 100, 64], &device);
//! let probs = model.predict(input);
//!
//! assert_eq!(probs.dims(), [3, 1]);
//! ```
//!
//! ## Custom Architectures
//!
//! ```ignore
//! use baseline_cnn::model::BaselineCnnConfig;
//!
//! let model = BaselineCnnConfig::new()
//!     .with_channels([32, 64, 64, 64])
//!     .with_seed(Some(7))
//!     .init::<Backend>(&device)?;
//! ```

pub mod checkpoint;
pub mod error;
pub mod init;
pub mod model;

pub mod prelude {
    pub use crate::checkpoint::CheckpointStore;
    pub use crate::error::{InitError, ModelError};
    pub use crate::init::{init_bn, init_layer, UniformInit};
    pub use crate::model::{BaselineCnn, BaselineCnnConfig, ConvBlock, ConvBlockConfig};
}
