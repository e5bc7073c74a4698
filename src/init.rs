//! Weight initialization helpers
//!
//! Layers are initialized with a He-style uniform distribution scaled by
//! their fan-in, and batch normalization layers start with a unit scale.
//!
//! For a weight with fan-in `n`:
//!
//! ```text
//! std   = sqrt(2 / n)
//! scale = std * sqrt(3)          (= sqrt(6 / n))
//! W     ~ U[-scale, scale]
//! ```
//!
//! Fan-in follows the `(out, in, kernel...)` convention: a convolution with
//! weight `(out, in, h, w)` has `n = in * h * w`, a fully-connected layer
//! `(out, in)` has `n = in`. Burn stores [`Linear`] weights as
//! `[d_input, d_output]`, which [`UniformInit`] accounts for.

use burn::module::Param;
use burn::nn::conv::Conv2d;
use burn::nn::{BatchNorm, Linear};
use burn::tensor::backend::Backend;
use burn::tensor::{Distribution, Tensor};

use crate::error::InitError;

/// Fan-in of a weight shape given in `(out, in, kernel...)` order.
///
/// Only rank 2 and rank 4 shapes are supported; grouped and dilated
/// convolutions are not taken into account.
///
/// # Example
///
/// ```rust
/// use baseline_cnn::init::fan_in;
///
/// assert_eq!(fan_in(&[64, 1, 5, 5]), Ok(25));
/// assert_eq!(fan_in(&[1, 128]), Ok(128));
/// assert!(fan_in(&[3, 3, 3]).is_err());
/// ```
pub fn fan_in(shape: &[usize]) -> Result<usize, InitError> {
    let n = match *shape {
        [_, n_in, height, width] => n_in * height * width,
        [_, n_in] => n_in,
        _ => return Err(InitError::UnsupportedRank(shape.len())),
    };

    if n == 0 {
        return Err(InitError::ZeroFanIn {
            shape: shape.to_vec(),
        });
    }

    Ok(n)
}

/// Half-width of the uniform distribution for a given fan-in: `sqrt(6 / n)`
pub fn uniform_bound(fan_in: usize) -> f64 {
    let std = (2.0 / fan_in as f64).sqrt();
    std * 3.0f64.sqrt()
}

/// Layers whose weights can be filled by [`init_layer`].
///
/// Implemented for [`Conv2d`] (rank 4 weights) and [`Linear`] (rank 2
/// weights); other ranks have no defined fan-in and are not representable.
pub trait UniformInit: Sized {
    /// Number of inputs feeding a single output unit
    fn fan_in(&self) -> usize;

    /// Replace the weight with samples from `U[-bound, bound]`
    fn with_uniform_weight(self, bound: f64) -> Self;

    /// Zero the bias, if the layer has one
    fn with_zero_bias(self) -> Self;
}

impl<B: Backend> UniformInit for Conv2d<B> {
    fn fan_in(&self) -> usize {
        let [_, n_in, height, width] = self.weight.dims();
        n_in * height * width
    }

    fn with_uniform_weight(mut self, bound: f64) -> Self {
        self.weight = uniform_param(self.weight.val(), bound);
        self
    }

    fn with_zero_bias(mut self) -> Self {
        self.bias = self.bias.map(|bias| zeros_param(bias.val()));
        self
    }
}

impl<B: Backend> UniformInit for Linear<B> {
    fn fan_in(&self) -> usize {
        // Burn layout is [d_input, d_output]
        let [d_input, _] = self.weight.dims();
        d_input
    }

    fn with_uniform_weight(mut self, bound: f64) -> Self {
        self.weight = uniform_param(self.weight.val(), bound);
        self
    }

    fn with_zero_bias(mut self) -> Self {
        self.bias = self.bias.map(|bias| zeros_param(bias.val()));
        self
    }
}

/// Initialize a linear or convolutional layer.
///
/// The weight is drawn from `U[-sqrt(6/n), sqrt(6/n)]` where `n` is the
/// layer's fan-in, and the bias (if any) is set to zero.
///
/// # Example
///
/// ```rust
/// use burn::backend::NdArray;
/// use burn::nn::LinearConfig;
/// use baseline_cnn::init::init_layer;
///
/// type Backend = NdArray<f32>;
/// let device = Default::default();
///
/// let fc = init_layer(LinearConfig::new(128, 1).init::<Backend>(&device));
/// let bias: f32 = fc.bias.unwrap().val().abs().sum().into_scalar();
/// assert_eq!(bias, 0.0);
/// ```
pub fn init_layer<L: UniformInit>(layer: L) -> L {
    let n = layer.fan_in();
    let bound = uniform_bound(n);
    tracing::debug!(fan_in = n, bound, "initializing layer weights");

    layer.with_uniform_weight(bound).with_zero_bias()
}

/// Initialize a batch normalization layer.
///
/// Sets the scale (`gamma`) to one. The shift and running statistics keep
/// their default initialization.
pub fn init_bn<B: Backend, const D: usize>(mut bn: BatchNorm<B, D>) -> BatchNorm<B, D> {
    let gamma = bn.gamma.val();
    bn.gamma = Param::from_tensor(Tensor::ones(gamma.dims(), &gamma.device()));
    bn
}

/// Fill an arbitrary weight tensor using its shape-derived fan-in.
///
/// Unlike [`init_layer`], the rank is only known at runtime here, so shapes
/// other than rank 2 or rank 4 are rejected with [`InitError::UnsupportedRank`].
pub fn init_weight<B: Backend, const D: usize>(
    weight: Tensor<B, D>,
) -> Result<Tensor<B, D>, InitError> {
    let n = fan_in(&weight.dims())?;
    let bound = uniform_bound(n);

    Ok(Tensor::random(
        weight.dims(),
        Distribution::Uniform(-bound, bound),
        &weight.device(),
    ))
}

fn uniform_param<B: Backend, const D: usize>(
    weight: Tensor<B, D>,
    bound: f64,
) -> Param<Tensor<B, D>> {
    let tensor = Tensor::random(
        weight.dims(),
        Distribution::Uniform(-bound, bound),
        &weight.device(),
    );
    Param::from_tensor(tensor)
}

fn zeros_param<B: Backend>(bias: Tensor<B, 1>) -> Param<Tensor<B, 1>> {
    Param::from_tensor(Tensor::zeros(bias.dims(), &bias.device()))
}
