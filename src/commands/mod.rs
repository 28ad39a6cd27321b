use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::cli::{HeuristicArgs, InputEncoding};
use crate::decode::decode_input;
use crate::engine::{Reconstruction, StatementEngine};
use crate::heuristics::{HeuristicConfig, resolve_heuristic_config};
use crate::model::{SourceDescriptor, YearStandardEntry};
use crate::util::{read_input, sha256_bytes};

pub mod convert;
pub mod inspect;

/// A decoded dump together with its reconstruction.
pub struct LoadedDump {
    pub source: SourceDescriptor,
    pub heuristics: HeuristicConfig,
    pub reconstruction: Reconstruction,
}

pub fn load_dump(
    input: &Path,
    encoding: InputEncoding,
    heuristic_args: &HeuristicArgs,
) -> Result<LoadedDump> {
    let heuristics = resolve_heuristic_config(
        heuristic_args.heuristics_path.as_deref(),
        &heuristic_args.overrides(),
    )?;

    let bytes = read_input(input)?;
    let decoded = decode_input(&bytes, encoding)?;
    info!(
        input = %input.display(),
        bytes = bytes.len(),
        requested = encoding.as_str(),
        encoding = decoded.encoding,
        "decoded input dump"
    );

    let engine = StatementEngine::new(heuristics.clone())?;
    let reconstruction = engine.reconstruct(&decoded.text);

    Ok(LoadedDump {
        source: SourceDescriptor {
            path: input.display().to_string(),
            sha256: sha256_bytes(&bytes),
            byte_count: bytes.len(),
            encoding: decoded.encoding.to_string(),
            replaced_malformed: decoded.replaced_malformed,
        },
        heuristics,
        reconstruction,
    })
}

pub fn year_standard_entries(reconstruction: &Reconstruction) -> Vec<YearStandardEntry> {
    reconstruction
        .years()
        .iter()
        .map(|year| YearStandardEntry {
            year: year.clone(),
            standard: reconstruction.standards.standard_of(year),
            evidence: reconstruction.standards.evidence_of(year),
        })
        .collect()
}
