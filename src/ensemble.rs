//! The boosted ensemble: ordered `(alpha, model)` entries, weighted-sum
//! prediction, and directory persistence.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data_handling::Dataset;
use crate::error::BoostError;
use crate::models::factory;
use crate::models::learner::{BoostedModel, LearnerDriver};
use crate::signal::Signal;

pub const MANIFEST_FILE: &str = "adaboost.json";

/// Persisted ensemble metadata: the base-learner tag and the ordered
/// `(alpha, model file)` list. `file_path` entries are relative to the
/// ensemble directory.
///
/// The signal function is deliberately absent: it is not persisted, and a
/// reloaded ensemble must be given the signal used at training time or its
/// predictions will silently differ.
#[derive(Serialize, Deserialize, Debug)]
pub struct Manifest {
    pub tag: String,
    pub alphas: Vec<ManifestEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ManifestEntry {
    #[serde(with = "alpha_serde")]
    pub alpha: f64,
    pub file_path: String,
}

/// JSON cannot carry infinities and serde_json would write `null` for them,
/// losing degenerate-round alphas. Non-finite alphas are written as the
/// strings `"inf"` / `"-inf"` instead and read back exactly.
mod alpha_serde {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(alpha: &f64, s: S) -> Result<S::Ok, S::Error> {
        if alpha.is_finite() {
            s.serialize_f64(*alpha)
        } else if *alpha > 0.0 {
            s.serialize_str("inf")
        } else {
            s.serialize_str("-inf")
        }
    }

    struct AlphaVisitor;

    impl<'de> Visitor<'de> for AlphaVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a float or \"inf\"/\"-inf\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(E::custom(format!("unrecognized alpha value {:?}", other))),
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        d.deserialize_any(AlphaVisitor)
    }
}

/// Ordered sequence of weighted base models. Entry order is training-round
/// order; prediction is a pure sum over entries.
pub struct Ensemble {
    driver: &'static dyn LearnerDriver,
    sig: Signal,
    entries: Vec<(f64, Box<dyn BoostedModel>)>,
}

impl Ensemble {
    pub fn new(driver: &'static dyn LearnerDriver, sig: Signal) -> Self {
        Ensemble {
            driver,
            sig,
            entries: Vec::new(),
        }
    }

    /// Construct an empty ensemble for a registered tag.
    pub fn for_tag(tag: &str, sig: Signal) -> Result<Self, BoostError> {
        Ok(Ensemble::new(factory::driver_for(tag)?, sig))
    }

    pub fn tag(&self) -> &'static str {
        self.driver.tag()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn alphas(&self) -> Vec<f64> {
        self.entries.iter().map(|(a, _)| *a).collect()
    }

    /// Append one round's weighted model. Alphas are taken as-is; degenerate
    /// rounds may legitimately carry infinite values.
    pub fn add(&mut self, alpha: f64, model: Box<dyn BoostedModel>) {
        self.entries.push((alpha, model));
    }

    /// Aggregate real-valued scores, one per example: the sum over entries
    /// of `sig(model score) * alpha`. Callers apply a sign to get hard
    /// labels. An empty ensemble scores every example 0.
    pub fn predict(&self, data: &Dataset) -> Result<Vec<f64>, BoostError> {
        if data.dtype() != self.driver.dtype() {
            return Err(BoostError::TypeMismatch {
                expected: self.driver.dtype().to_string(),
                found: data.dtype().to_string(),
            });
        }

        let mut prediction = vec![0.0f64; data.num_rows()];
        for (alpha, model) in &self.entries {
            let raw = model.predict(data)?;
            for (acc, &score) in prediction.iter_mut().zip(raw.iter()) {
                *acc += f64::from(self.sig.apply(score)) * alpha;
            }
        }
        Ok(prediction)
    }

    /// Persist the ensemble into `dirname`: one `{index}.model` file per
    /// entry plus the manifest. Any pre-existing file or directory at
    /// `dirname` is replaced wholesale. Files are staged in a temporary
    /// sibling directory and renamed into place, so a failed save never
    /// leaves a manifest referencing missing model files.
    pub fn save(&self, dirname: &Path) -> Result<(), BoostError> {
        let parent = match dirname.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => std::path::PathBuf::from("."),
        };
        let stage = tempfile::Builder::new()
            .prefix(".adaboost-save-")
            .tempdir_in(parent)?;

        let mut alphas = Vec::with_capacity(self.entries.len());
        for (i, (alpha, model)) in self.entries.iter().enumerate() {
            let file_path = format!("{}.model", i);
            model.save(&stage.path().join(&file_path))?;
            alphas.push(ManifestEntry {
                alpha: *alpha,
                file_path,
            });
        }

        let manifest = Manifest {
            tag: self.driver.tag().to_string(),
            alphas,
        };
        fs::write(
            stage.path().join(MANIFEST_FILE),
            serde_json::to_vec_pretty(&manifest)?,
        )?;

        if dirname.is_dir() {
            fs::remove_dir_all(dirname)?;
        } else if dirname.exists() {
            fs::remove_file(dirname)?;
        }

        let staged = stage.into_path();
        if let Err(e) = fs::rename(&staged, dirname) {
            let _ = fs::remove_dir_all(&staged);
            return Err(e.into());
        }
        log::info!("saved {}-entry ensemble to {}", self.len(), dirname.display());
        Ok(())
    }

    /// Restore an ensemble from a directory written by `save`. The entry
    /// sequence is fresh by construction. `sig` must match the signal used
    /// at training time; it is not recorded in the manifest.
    pub fn load(dirname: &Path, sig: Signal) -> Result<Self, BoostError> {
        let manifest: Manifest = serde_json::from_slice(&fs::read(dirname.join(MANIFEST_FILE))?)?;
        let driver = factory::driver_for(&manifest.tag)?;

        let mut entries = Vec::with_capacity(manifest.alphas.len());
        for entry in manifest.alphas {
            let model = driver.load(&dirname.join(&entry.file_path))?;
            entries.push((entry.alpha, model));
        }
        log::info!(
            "loaded {}-entry {} ensemble from {}",
            entries.len(),
            manifest.tag,
            dirname.display()
        );
        Ok(Ensemble {
            driver,
            sig,
            entries,
        })
    }
}

impl std::fmt::Debug for Ensemble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ensemble")
            .field("tag", &self.tag())
            .field("entries", &self.len())
            .field("alphas", &self.alphas())
            .finish()
    }
}
