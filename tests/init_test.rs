//! Integration tests for the weight initializers

use baseline_cnn::init::{fan_in, init_bn, init_layer, uniform_bound, UniformInit};
use baseline_cnn::model::BaselineCnn;
use burn::backend::NdArray;
use burn::module::Param;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::{BatchNorm, BatchNormConfig, Linear, LinearConfig};
use burn::tensor::{Distribution, Tensor};

type Backend = NdArray<f32>;

fn assert_within<const D: usize>(tensor: Tensor<Backend, D>, bound: f64) {
    let bound = bound as f32;
    let min = tensor.clone().min().into_scalar();
    let max = tensor.max().into_scalar();
    assert!(min >= -bound, "min {} below -{}", min, bound);
    assert!(max <= bound, "max {} above {}", max, bound);
}

#[test]
fn test_conv_weights_within_bound() {
    let device = Default::default();
    let conv: Conv2d<Backend> = Conv2dConfig::new([64, 128], [5, 5])
        .with_bias(false)
        .init(&device);

    let conv = init_layer(conv);
    let n = fan_in(&conv.weight.dims()).unwrap();

    assert_eq!(n, 64 * 5 * 5);
    assert_within(conv.weight.val(), uniform_bound(n));
}

#[test]
fn test_conv_weights_fill_the_range() {
    let device = Default::default();
    let conv: Conv2d<Backend> = Conv2dConfig::new([1, 64], [5, 5]).init(&device);

    let conv = init_layer(conv);
    let bound = uniform_bound(25) as f32;
    let weight = conv.weight.val();

    // 1600 samples from U[-0.49, 0.49] reach well past half the bound
    assert!(weight.clone().max().into_scalar() > bound * 0.5);
    assert!(weight.min().into_scalar() < -bound * 0.5);
}

#[test]
fn test_linear_weights_and_bias() {
    let device = Default::default();
    let mut fc: Linear<Backend> = LinearConfig::new(128, 1).with_bias(true).init(&device);
    fc.bias = Some(Param::from_tensor(Tensor::ones([1], &device)));

    let fc = init_layer(fc);

    assert_eq!(fc.fan_in(), 128);
    assert_within(fc.weight.val(), (6.0f64 / 128.0).sqrt());

    let bias = fc.bias.as_ref().map(|b| b.val()).unwrap();
    assert_eq!(bias.abs().sum().into_scalar(), 0.0);
}

#[test]
fn test_init_layer_replaces_weights() {
    let device = Default::default();
    let mut conv: Conv2d<Backend> = Conv2dConfig::new([2, 2], [3, 3]).init(&device);
    conv.weight = Param::from_tensor(Tensor::full([2, 2, 3, 3], 100.0, &device));

    let conv = init_layer(conv);
    assert_within(conv.weight.val(), uniform_bound(18));
}

#[test]
fn test_init_bn_leaves_shift_and_statistics() {
    let device = Default::default();
    let mut bn: BatchNorm<Backend, 2> = BatchNormConfig::new(8).init(&device);
    bn.gamma = Param::from_tensor(Tensor::random(
        [8],
        Distribution::Uniform(2.0, 3.0),
        &device,
    ));
    bn.beta = Param::from_tensor(Tensor::full([8], 0.25, &device));

    let bn = init_bn(bn);

    let gamma = bn.gamma.val();
    assert_eq!(gamma.clone().min().into_scalar(), 1.0);
    assert_eq!(gamma.max().into_scalar(), 1.0);

    let beta = bn.beta.val();
    assert_eq!(beta.clone().min().into_scalar(), 0.25);
    assert_eq!(beta.max().into_scalar(), 0.25);

    let running_mean = bn.running_mean.value();
    let running_var = bn.running_var.value();
    assert_eq!(running_mean.abs().max().into_scalar(), 0.0);
    assert_eq!(running_var.min().into_scalar(), 1.0);
}

#[test]
fn test_model_parameters_initialized() {
    let device = Default::default();
    let model = BaselineCnn::<Backend>::new(&device);

    let expected_fan_in = [25, 64 * 25, 128 * 25, 128 * 25];
    for (block, &n) in model.blocks().iter().zip(expected_fan_in.iter()) {
        assert_eq!(block.conv.fan_in(), n);
        assert!(block.conv.bias.is_none());
        assert_within(block.conv.weight.val(), uniform_bound(n));

        let gamma = block.norm.gamma.val();
        assert_eq!(gamma.clone().min().into_scalar(), 1.0);
        assert_eq!(gamma.max().into_scalar(), 1.0);
    }

    let fc = model.fc();
    assert_eq!(fc.fan_in(), 128);
    assert_within(fc.weight.val(), uniform_bound(128));

    let bias = fc.bias.as_ref().map(|b| b.val()).unwrap();
    assert_eq!(bias.abs().sum().into_scalar(), 0.0);
}
