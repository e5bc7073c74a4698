//! Baseline CNN for binary audio classification
//!
//! Four strided convolution stages reduce a `[time, freq]` spectrogram,
//! max pooling over frequency then time collapses it to one feature vector
//! per example, and a single sigmoid unit scores it.

use burn::config::Config;
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::conv_block::{ConvBlock, ConvBlockConfig};
use crate::error::ModelError;
use crate::init::{fan_in, init_layer};

/// Architecture of [`BaselineCnn`]
///
/// The defaults are the reference architecture: channel widths
/// 1 → 64 → 128 → 128 → 128, 5×5 kernels, stride 2, padding 2.
#[derive(Config, Debug)]
pub struct BaselineCnnConfig {
    /// Output channels of the four convolution stages
    #[config(default = "[64, 128, 128, 128]")]
    pub channels: [usize; 4],
    #[config(default = 5)]
    pub kernel_size: usize,
    #[config(default = 2)]
    pub stride: usize,
    #[config(default = 2)]
    pub padding: usize,
    /// Seed for the backend RNG used by parameter initialization
    pub seed: Option<u64>,
}

impl BaselineCnnConfig {
    /// Validate the configuration and build the model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<BaselineCnn<B>, ModelError> {
        self.validate()?;
        Ok(self.build(device))
    }

    /// Check that every stage has a well-defined shape and fan-in.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.stride == 0 {
            return Err(ModelError::InvalidConfig("stride must be non-zero".into()));
        }
        if self.kernel_size == 0 {
            return Err(ModelError::InvalidConfig("kernel size must be non-zero".into()));
        }
        if self.channels.contains(&0) {
            return Err(ModelError::InvalidConfig(format!(
                "channel widths must be non-zero, got {:?}",
                self.channels
            )));
        }
        if self.padding >= self.kernel_size {
            return Err(ModelError::InvalidConfig(format!(
                "padding {} must be smaller than kernel size {}",
                self.padding, self.kernel_size
            )));
        }

        for block in self.block_configs() {
            let [n_in, n_out] = block.channels;
            fan_in(&[n_out, n_in, self.kernel_size, self.kernel_size])?;
        }
        fan_in(&[1, self.feature_size()])?;

        Ok(())
    }

    /// Configurations of the four convolution stages, in order
    pub fn block_configs(&self) -> Vec<ConvBlockConfig> {
        let mut in_channels = 1;
        self.channels
            .iter()
            .map(|&out_channels| {
                let config = ConvBlockConfig::new([in_channels, out_channels])
                    .with_kernel_size(self.kernel_size)
                    .with_stride(self.stride)
                    .with_padding(self.padding);
                in_channels = out_channels;
                config
            })
            .collect()
    }

    /// Channels of the bottleneck and width of the final linear layer
    pub fn feature_size(&self) -> usize {
        self.channels[3]
    }

    /// Time steps left in the bottleneck for an input of `frames` frames
    ///
    /// Zero when the input is too short for the kernels or the stride is zero.
    pub fn output_frames(&self, frames: usize) -> usize {
        self.block_configs()
            .iter()
            .fold(frames, |len, block| block.output_len(len))
    }

    /// Frequency bins left before frequency pooling for `bins` input bins
    pub fn output_bins(&self, bins: usize) -> usize {
        self.output_frames(bins)
    }

    /// Validate the configuration and build the model around saved parameters.
    ///
    /// The seed is ignored and no parameters are sampled: every tensor comes
    /// from `record`.
    pub fn init_with<B: Backend>(
        &self,
        record: BaselineCnnRecord<B>,
        device: &B::Device,
    ) -> Result<BaselineCnn<B>, ModelError> {
        self.validate()?;
        Ok(self.layers(device).load_record(record))
    }

    pub(crate) fn build<B: Backend>(&self, device: &B::Device) -> BaselineCnn<B> {
        if let Some(seed) = self.seed {
            B::seed(seed);
        }

        self.layers(device).init_weights()
    }

    fn layers<B: Backend>(&self, device: &B::Device) -> BaselineCnn<B> {
        let blocks = self
            .block_configs()
            .iter()
            .map(|block| block.init_layers(device))
            .collect();

        let fc = LinearConfig::new(self.feature_size(), 1)
            .with_bias(true)
            .init(device);

        tracing::debug!(
            channels = ?self.channels,
            kernel_size = self.kernel_size,
            stride = self.stride,
            padding = self.padding,
            "built baseline cnn"
        );

        BaselineCnn { blocks, fc }
    }
}

/// Baseline convolutional classifier
///
/// # Tensor Shapes
///
/// | Tensor | Shape | Description |
/// |--------|-------|-------------|
/// | `input` | `[batch, time, freq]` | Spectrogram frames |
/// | `output` | `[batch, 1]` | Probability of the positive class |
/// | `bottleneck` | `[batch, channels, time']` | Frequency-pooled feature map |
///
/// With the default architecture `channels = 128` and `time'` is `time`
/// halved (rounding up) four times.
#[derive(Module, Debug)]
pub struct BaselineCnn<B: Backend> {
    blocks: Vec<ConvBlock<B>>,
    fc: Linear<B>,
}

impl<B: Backend> BaselineCnn<B> {
    /// Create the reference architecture with freshly initialized weights
    pub fn new(device: &B::Device) -> Self {
        BaselineCnnConfig::new().build(device)
    }

    /// Apply the initializers to every layer: [`ConvBlock::init_weights`]
    /// on each stage and [`init_layer`] on the output projection.
    pub fn init_weights(self) -> Self {
        Self {
            blocks: self
                .blocks
                .into_iter()
                .map(ConvBlock::init_weights)
                .collect(),
            fc: init_layer(self.fc),
        }
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `input` - Tensor of shape `[batch, time, freq]`
    /// * `return_bottleneck` - Whether to also return the bottleneck feature map
    ///
    /// # Returns
    /// Tuple of (probabilities `[batch, 1]`, bottleneck `[batch, channels, time']`
    /// when requested)
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        return_bottleneck: bool,
    ) -> (Tensor<B, 2>, Option<Tensor<B, 3>>) {
        let bottleneck = self.bottleneck(input);
        let output = self.classify(bottleneck.clone());

        if return_bottleneck {
            (output, Some(bottleneck))
        } else {
            (output, None)
        }
    }

    /// Probabilities only, `[batch, 1]`
    pub fn predict(&self, input: Tensor<B, 3>) -> Tensor<B, 2> {
        self.forward(input, false).0
    }

    /// Convolution stages followed by max pooling over frequency.
    ///
    /// Returns `[batch, channels, time']`.
    pub fn bottleneck(&self, input: Tensor<B, 3>) -> Tensor<B, 3> {
        let [batch, frames, bins] = input.dims();

        let mut x = input.reshape([batch, 1, frames, bins]);
        for block in &self.blocks {
            x = block.forward(x);
        }

        let [batch, channels, frames, _] = x.dims();
        x.max_dim(3).reshape([batch, channels, frames])
    }

    /// Max pooling over time, then the sigmoid output unit.
    ///
    /// Maps a bottleneck `[batch, channels, time']` to `[batch, 1]`.
    pub fn classify(&self, bottleneck: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch, channels, _] = bottleneck.dims();
        let x = bottleneck.max_dim(2).reshape([batch, channels]);
        activation::sigmoid(self.fc.forward(x))
    }

    /// Convolution stages, in order
    pub fn blocks(&self) -> &[ConvBlock<B>] {
        &self.blocks
    }

    /// Final projection to the output unit
    pub fn fc(&self) -> &Linear<B> {
        &self.fc
    }
}
