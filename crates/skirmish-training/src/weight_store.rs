//! Plain-text persistence of the weight vector.
//!
//! The file holds one decimal number per line in feature-index order, written with six
//! fractional digits. Saving always overwrites the whole file.
//!
//! A file shorter than the current registry is accepted and zero-padded, so weights trained
//! before a feature was appended keep working. A longer file cannot be mapped onto the
//! registry and is rejected.

use std::{
    fs, io,
    num::ParseFloatError,
    path::{Path, PathBuf},
};

use crate::weights;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum WeightStoreError {
    #[display("weight file I/O failed: {_0}")]
    #[from]
    Io(io::Error),
    #[display("line {line}: {value:?} is not a number")]
    Parse {
        line: usize,
        value: String,
        source: ParseFloatError,
    },
    #[display("weight file holds {found} weights, expected at most {expected}")]
    TooLong { expected: usize, found: usize },
}

/// Loads and saves a weight vector at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightStore {
    path: PathBuf,
}

impl WeightStore {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `weights`, creating parent directories as needed.
    pub fn save(&self, weights: &[f64]) -> Result<(), WeightStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = weights
            .iter()
            .map(|w| format!("{w:.6}\n"))
            .collect::<String>();
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Reads a weight vector of exactly `feature_count` entries.
    pub fn load(&self, feature_count: usize) -> Result<Vec<f64>, WeightStoreError> {
        let contents = fs::read_to_string(&self.path)?;
        let mut weights = parse(&contents)?;
        if weights.len() > feature_count {
            return Err(WeightStoreError::TooLong {
                expected: feature_count,
                found: weights.len(),
            });
        }
        weights::zero_pad(&mut weights, feature_count);
        Ok(weights)
    }
}

fn parse(contents: &str) -> Result<Vec<f64>, WeightStoreError> {
    contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, value)| {
            value.parse().map_err(|source| WeightStoreError::Parse {
                line,
                value: value.to_owned(),
                source,
            })
        })
        .collect()
}
