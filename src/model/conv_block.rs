//! Convolution → batch normalization → ReLU stage

use burn::config::Config;
use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::{BatchNorm, BatchNormConfig, PaddingConfig2d};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::init::{init_bn, init_layer};

/// Configuration of a single [`ConvBlock`]
#[derive(Config, Debug)]
pub struct ConvBlockConfig {
    /// Input and output channels: `[in, out]`
    pub channels: [usize; 2],
    #[config(default = 5)]
    pub kernel_size: usize,
    #[config(default = 2)]
    pub stride: usize,
    #[config(default = 2)]
    pub padding: usize,
}

impl ConvBlockConfig {
    /// Build the block with initialized weights.
    ///
    /// The convolution has no bias (the following batch norm supplies the
    /// shift) and is filled by [`init_layer`]; the normalization scale is
    /// set by [`init_bn`].
    pub fn init<B: Backend>(&self, device: &B::Device) -> ConvBlock<B> {
        self.init_layers(device).init_weights()
    }

    /// Build the block with Burn's lazily-initialized default parameters.
    ///
    /// Nothing is sampled until a parameter is read, so this is the shape
    /// to load a saved record into.
    pub fn init_layers<B: Backend>(&self, device: &B::Device) -> ConvBlock<B> {
        let conv = Conv2dConfig::new(self.channels, [self.kernel_size, self.kernel_size])
            .with_stride([self.stride, self.stride])
            .with_padding(PaddingConfig2d::Explicit(self.padding, self.padding))
            .with_bias(false)
            .init(device);

        let norm = BatchNormConfig::new(self.channels[1]).init(device);

        ConvBlock { conv, norm }
    }

    /// Length of one spatial axis after this block
    ///
    /// Standard convolution arithmetic: `floor((len + 2p - k) / s) + 1`.
    /// Returns zero when the padded input is shorter than the kernel or the
    /// stride is zero.
    pub fn output_len(&self, len: usize) -> usize {
        let padded = len + 2 * self.padding;
        if self.stride == 0 || padded < self.kernel_size {
            return 0;
        }
        (padded - self.kernel_size) / self.stride + 1
    }
}

/// One strided convolution stage of the classifier
///
/// Maps `[batch, in, time, freq]` to `[batch, out, time', freq']`.
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    pub conv: Conv2d<B>,
    pub norm: BatchNorm<B, 2>,
}

impl<B: Backend> ConvBlock<B> {
    /// Apply [`init_layer`] to the convolution and [`init_bn`] to the norm
    pub fn init_weights(self) -> Self {
        Self {
            conv: init_layer(self.conv),
            norm: init_bn(self.norm),
        }
    }

    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(input);
        let x = self.norm.forward(x);
        activation::relu(x)
    }

    /// Output channels
    pub fn out_channels(&self) -> usize {
        let [out, _, _, _] = self.conv.weight.dims();
        out
    }
}
