//! Persistence tests: directory layout, replacement semantics, and
//! behavioral equivalence of saved-then-loaded ensembles.

use std::fs;

use anyhow::Result;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use adaboost_core::config::ModelConfig;
use adaboost_core::data_handling::Dataset;
use adaboost_core::ensemble::{Ensemble, MANIFEST_FILE};
use adaboost_core::error::BoostError;
use adaboost_core::models::factory;
use adaboost_core::signal::Signal;
use adaboost_core::trainer::train;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn synthetic_dataset(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values = vec![0.5, 0.0, 0.5, 0.0];
    let mut labels = vec![0.0, 1.0];
    for i in 2..n {
        let label = (i % 2) as f32;
        values.push(label + rng.gen_range(-0.75..0.75f32));
        values.push(rng.gen_range(-1.0..1.0f32));
        labels.push(label);
    }
    let x = Array2::from_shape_vec((n, 2), values).unwrap();
    Dataset::new(x, labels).unwrap()
}

fn trained_ensemble(rounds: usize, seed: u64) -> Result<(Ensemble, Dataset)> {
    let mut dtrain = synthetic_dataset(40, seed);
    let ensemble = train(
        rounds,
        &ModelConfig::default(),
        &mut dtrain,
        3,
        vec![],
        Signal::default(),
    )?;
    Ok((ensemble, dtrain))
}

#[test]
fn save_load_round_trip_is_behaviorally_identical() -> Result<()> {
    init_logging();
    let (ensemble, dtrain) = trained_ensemble(3, 21)?;
    let before = ensemble.predict(&dtrain)?;

    let root = TempDir::new()?;
    let dir = root.path().join("ensemble");
    ensemble.save(&dir)?;

    assert!(dir.join(MANIFEST_FILE).is_file());
    assert!(dir.join("0.model").is_file());
    assert!(dir.join("2.model").is_file());

    let restored = Ensemble::load(&dir, Signal::default())?;
    assert_eq!(restored.len(), ensemble.len());
    assert_eq!(restored.alphas(), ensemble.alphas());

    let after = restored.predict(&dtrain)?;
    for (a, b) in before.iter().zip(after.iter()) {
        assert!((a - b).abs() < 1e-9, "score changed from {} to {}", a, b);
    }
    Ok(())
}

#[test]
fn save_replaces_a_plain_file_at_the_target() -> Result<()> {
    init_logging();
    let (ensemble, _) = trained_ensemble(1, 22)?;

    let root = TempDir::new()?;
    let target = root.path().join("ensemble");
    fs::write(&target, b"not a directory")?;

    ensemble.save(&target)?;
    assert!(target.is_dir());
    assert!(target.join(MANIFEST_FILE).is_file());
    Ok(())
}

#[test]
fn save_replaces_stale_directory_contents() -> Result<()> {
    init_logging();
    let (big, _) = trained_ensemble(2, 23)?;
    let (small, _) = trained_ensemble(1, 24)?;

    let root = TempDir::new()?;
    let dir = root.path().join("ensemble");
    big.save(&dir)?;
    assert!(dir.join("1.model").is_file());

    small.save(&dir)?;
    assert!(dir.join("0.model").is_file());
    assert!(
        !dir.join("1.model").exists(),
        "stale model file survived a re-save"
    );

    let restored = Ensemble::load(&dir, Signal::default())?;
    assert_eq!(restored.len(), 1);
    Ok(())
}

#[test]
fn infinite_alphas_survive_persistence() -> Result<()> {
    init_logging();
    let data = synthetic_dataset(20, 25);
    let driver = factory::driver_for("gbdt")?;
    let params = ModelConfig::default();

    let mut ensemble = Ensemble::for_tag("gbdt", Signal::default())?;
    ensemble.add(f64::INFINITY, driver.train(&data, &params, 2, 0)?);
    ensemble.add(f64::NEG_INFINITY, driver.train(&data, &params, 2, 1)?);
    ensemble.add(0.5, driver.train(&data, &params, 2, 2)?);

    let root = TempDir::new()?;
    let dir = root.path().join("degenerate");
    ensemble.save(&dir)?;

    let restored = Ensemble::load(&dir, Signal::default())?;
    let alphas = restored.alphas();
    assert!(alphas[0].is_infinite() && alphas[0] > 0.0);
    assert!(alphas[1].is_infinite() && alphas[1] < 0.0);
    assert_eq!(alphas[2], 0.5);
    assert!(alphas.iter().all(|a| !a.is_nan()));
    Ok(())
}

#[test]
fn load_rejects_unknown_tag() -> Result<()> {
    init_logging();
    let root = TempDir::new()?;
    let dir = root.path().join("foreign");
    fs::create_dir(&dir)?;
    fs::write(
        dir.join(MANIFEST_FILE),
        br#"{"tag": "xgboost", "alphas": []}"#,
    )?;

    match Ensemble::load(&dir, Signal::default()) {
        Err(BoostError::UnsupportedType(tag)) => assert_eq!(tag, "xgboost"),
        other => panic!("expected UnsupportedType, got {:?}", other.map(|e| e.tag())),
    }
    Ok(())
}

#[test]
fn load_surfaces_missing_model_files() -> Result<()> {
    init_logging();
    let root = TempDir::new()?;
    let dir = root.path().join("truncated");
    fs::create_dir(&dir)?;
    fs::write(
        dir.join(MANIFEST_FILE),
        br#"{"tag": "gbdt", "alphas": [{"alpha": 1.0, "file_path": "0.model"}]}"#,
    )?;

    assert!(matches!(
        Ensemble::load(&dir, Signal::default()),
        Err(BoostError::Io(_))
    ));
    Ok(())
}
