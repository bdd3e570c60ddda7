//! Identifier collection from arguments and files

use parcel_domain::ParcelId;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Cannot read identifier file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Gather identifiers from positional args, `-i` values and `--input-file`,
/// in that order. Repeated identifiers are kept once, at their first position.
pub fn collect_identifiers(
    positional: &[String],
    ids: &[String],
    input_file: Option<&Path>,
) -> Result<Vec<ParcelId>, InputError> {
    let mut collected: Vec<ParcelId> = positional
        .iter()
        .chain(ids)
        .flat_map(|arg| ParcelId::parse_list(arg))
        .collect();

    if let Some(path) = input_file {
        let content = std::fs::read_to_string(path).map_err(|source| InputError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        collected.extend(ParcelId::parse_list(&content));
    }

    let mut seen = HashSet::new();
    collected.retain(|id| seen.insert(id.clone()));
    Ok(collected)
}
