//! # Model Definitions
//!
//! The baseline classifier and the convolution stage it is built from.
//!
//! ## Architecture
//!
//! ```text
//! [B, T, F] ──reshape──▶ [B, 1, T, F]
//!           ──ConvBlock(1 → 64)────▶ [B,  64, T/2,  F/2]
//!           ──ConvBlock(64 → 128)──▶ [B, 128, T/4,  F/4]
//!           ──ConvBlock(128 → 128)─▶ [B, 128, T/8,  F/8]
//!           ──ConvBlock(128 → 128)─▶ [B, 128, T/16, F/16]
//!           ──max over F──▶ bottleneck [B, 128, T/16]
//!           ──max over T──▶ [B, 128]
//!           ──Linear(128 → 1), sigmoid──▶ [B, 1]
//! ```
//!
//! Every division above rounds up. A [`ConvBlock`] is a 5×5 convolution with
//! stride 2 and padding 2 (no bias), batch normalization and ReLU.
//!
//! ## Example
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use baseline_cnn::model::BaselineCnn;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let model = BaselineCnn::<Backend>::new(&device);
//! let input = Tensor::<Backend, 3>::zeros([2, 64, 40], &device);
//!
//! let (probs, bottleneck) = model.forward(input, true);
//! assert_eq!(probs.dims(), [2, 1]);
//! assert_eq!(bottleneck.unwrap().dims(), [2, 128, 4]);
//! ```

pub mod baseline_cnn;
pub mod conv_block;

pub use baseline_cnn::{BaselineCnn, BaselineCnnConfig, BaselineCnnRecord};
pub use conv_block::{ConvBlock, ConvBlockConfig};
