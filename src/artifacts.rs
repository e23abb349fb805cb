//! Pickled model and encoders on disk.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_pickle::{DeOptions, SerOptions};
use tempfile::NamedTempFile;

use crate::encoding::Encoders;
use crate::prelude::*;
use crate::regression::LinearRegression;

/// Writes both artifacts, each one atomically replacing the previous file.
///
/// Both are serialized before anything touches the disk.
#[instrument(skip_all, fields(model_path = ?model_path, encoders_path = ?encoders_path))]
pub fn save(
    model: &LinearRegression,
    model_path: &Path,
    encoders: &Encoders,
    encoders_path: &Path,
) -> Result {
    let model_bytes = to_pickle(model).context("failed to serialize the model")?;
    let encoders_bytes = to_pickle(encoders).context("failed to serialize the encoders")?;
    write_atomically(model_path, &model_bytes)?;
    write_atomically(encoders_path, &encoders_bytes)?;
    info!(model_size = model_bytes.len(), encoders_size = encoders_bytes.len(), "saved");
    Ok(())
}

#[instrument(skip_all, fields(path = ?path))]
pub fn load_model(path: &Path) -> Result<LinearRegression> {
    let model: LinearRegression = read_pickle(path)?;
    model
        .ensure_compatible()
        .with_context(|| format!("`{}` is incompatible with this build", path.display()))?;
    Ok(model)
}

#[instrument(skip_all, fields(path = ?path))]
pub fn load_encoders(path: &Path) -> Result<Encoders> {
    read_pickle(path)
}

fn to_pickle<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_pickle::to_vec(value, SerOptions::new())?)
}

fn read_pickle<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    serde_pickle::from_reader(BufReader::new(file), DeOptions::new())
        .with_context(|| format!("failed to deserialize `{}`", path.display()))
}

/// Writes into a temporary file next to the target and renames it over the target.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(directory)
        .with_context(|| format!("failed to create a temporary file in `{}`", directory.display()))?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path)
        .with_context(|| format!("failed to replace `{}`", path.display()))?;
    debug!(?path, n_bytes = bytes.len(), "written");
    Ok(())
}
