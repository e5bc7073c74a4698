//! Classify Example
//!
//! Builds the baseline CNN, scores a batch of random spectrograms and
//! round-trips the model through a checkpoint directory.
//!
//! Run with `RUST_LOG=debug cargo run --example classify` to see the
//! per-layer initialization bounds.

use anyhow::Result;
use baseline_cnn::prelude::*;
use burn::backend::NdArray;
use burn::tensor::{Distribution, Tensor};

type Backend = NdArray<f32>;

const BATCH: usize = 4;
const FRAMES: usize = 240;
const MEL_BINS: usize = 64;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("baseline_cnn=info".parse()?),
        )
        .init();

    let device = Default::default();
    let config = BaselineCnnConfig::new().with_seed(Some(2024));
    let model = config.init::<Backend>(&device)?;

    println!("=== BaselineCnn ===");
    println!("  Channels: {:?}", config.channels);
    println!(
        "  Kernel {}x{}, stride {}, padding {}",
        config.kernel_size, config.kernel_size, config.stride, config.padding
    );
    println!();

    let input = Tensor::<Backend, 3>::random(
        [BATCH, FRAMES, MEL_BINS],
        Distribution::Uniform(-1.0, 1.0),
        &device,
    );

    let (probs, bottleneck) = model.forward(input.clone(), true);
    let probs: Vec<f32> = probs.into_data().to_vec().unwrap_or_default();

    println!("Input shape: [{}, {}, {}]", BATCH, FRAMES, MEL_BINS);
    for (i, p) in probs.iter().enumerate() {
        println!("  clip {}: p = {:.4}", i, p);
    }
    if let Some(bottleneck) = bottleneck {
        println!(
            "Bottleneck shape: {:?} (expected time steps: {})",
            bottleneck.dims(),
            config.output_frames(FRAMES)
        );
    }
    println!();

    println!("=== Checkpoint ===");
    let dir = tempfile::tempdir()?;
    let store = CheckpointStore::new(dir.path().join("baseline_cnn"));
    store.save(&model, &config)?;
    println!("  Saved to {}", store.dir().display());

    let (restored, _) = store.load::<Backend>(&device)?;
    let restored_probs: Vec<f32> = restored
        .predict(input)
        .into_data()
        .to_vec()
        .unwrap_or_default();
    let max_diff = probs
        .iter()
        .zip(restored_probs.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    println!("  Max difference after reload: {:.2e}", max_diff);

    Ok(())
}
