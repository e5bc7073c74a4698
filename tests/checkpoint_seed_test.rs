//! Loading a seeded checkpoint
//!
//! Kept in its own test binary: the backend RNG is process-global.

use baseline_cnn::checkpoint::CheckpointStore;
use baseline_cnn::model::BaselineCnnConfig;
use burn::backend::NdArray;
use burn::tensor::backend::Backend as BurnBackend;
use burn::tensor::{Distribution, Tensor};

type Backend = NdArray<f32>;

#[test]
fn test_load_leaves_backend_rng_alone() {
    let dir = tempfile::tempdir().unwrap();
    let store = CheckpointStore::new(dir.path());
    let device = Default::default();

    let config = BaselineCnnConfig::new()
        .with_channels([4, 8, 8, 8])
        .with_seed(Some(99));
    let model = config.init::<Backend>(&device).unwrap();
    store.save(&model, &config).unwrap();

    Backend::seed(7);
    let expected =
        Tensor::<Backend, 1>::random([16], Distribution::Uniform(0.0, 1.0), &device);

    Backend::seed(7);
    let (loaded, loaded_config) = store.load::<Backend>(&device).unwrap();
    let actual = Tensor::<Backend, 1>::random([16], Distribution::Uniform(0.0, 1.0), &device);

    assert_eq!(loaded_config.seed, Some(99));
    let diff = (expected - actual).abs().max().into_scalar();
    assert_eq!(diff, 0.0);

    // Parameters come from the record, not from re-running the seeded init
    let weight_diff = (model.fc().weight.val() - loaded.fc().weight.val())
        .abs()
        .max()
        .into_scalar();
    assert!(weight_diff < 1e-2);
}
