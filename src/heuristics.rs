use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const DEFAULT_FLAT_INDENT_THRESHOLD: f64 = 0.30;
pub const DEFAULT_MIN_LAYOUT_LABEL_CHARS: usize = 2;

/// Tunable layout heuristics. A (year, standard) period whose indented share
/// of candidate rows is strictly below `flat_indent_threshold` is flat;
/// labels of `min_layout_label_chars` characters or fewer are not counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub flat_indent_threshold: f64,
    pub min_layout_label_chars: usize,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            flat_indent_threshold: DEFAULT_FLAT_INDENT_THRESHOLD,
            min_layout_label_chars: DEFAULT_MIN_LAYOUT_LABEL_CHARS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicOverrides {
    pub flat_indent_threshold: Option<f64>,
    pub min_layout_label_chars: Option<usize>,
}

/// Defaults, then the optional JSON file, then command-line overrides.
pub fn resolve_heuristic_config(
    path: Option<&Path>,
    overrides: &HeuristicOverrides,
) -> Result<HeuristicConfig> {
    let mut config = match path {
        Some(path) => {
            let raw =
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_slice::<HeuristicConfig>(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => HeuristicConfig::default(),
    };

    if let Some(threshold) = overrides.flat_indent_threshold {
        config.flat_indent_threshold = threshold;
    }
    if let Some(min_chars) = overrides.min_layout_label_chars {
        config.min_layout_label_chars = min_chars;
    }

    validate_heuristic_config(&config)?;
    Ok(config)
}

pub fn validate_heuristic_config(config: &HeuristicConfig) -> Result<()> {
    let threshold = config.flat_indent_threshold;
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        bail!("flat_indent_threshold must be within [0, 1], got {threshold}");
    }
    Ok(())
}

pub fn heuristic_config_checksum(config: &HeuristicConfig) -> Result<String> {
    let payload =
        serde_json::to_vec(config).context("failed to serialize heuristic config for checksum")?;
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_take_precedence_over_defaults() {
        let overrides = HeuristicOverrides {
            flat_indent_threshold: Some(0.5),
            min_layout_label_chars: None,
        };

        let config = resolve_heuristic_config(None, &overrides).expect("config resolves");
        assert_eq!(config.flat_indent_threshold, 0.5);
        assert_eq!(config.min_layout_label_chars, DEFAULT_MIN_LAYOUT_LABEL_CHARS);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: HeuristicConfig =
            serde_json::from_str(r#"{ "min_layout_label_chars": 4 }"#).expect("partial config parses");
        assert_eq!(config.min_layout_label_chars, 4);
        assert_eq!(config.flat_indent_threshold, DEFAULT_FLAT_INDENT_THRESHOLD);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let overrides = HeuristicOverrides {
            flat_indent_threshold: Some(1.5),
            min_layout_label_chars: None,
        };

        let error = resolve_heuristic_config(None, &overrides).expect_err("threshold rejected");
        assert!(error.to_string().contains("flat_indent_threshold"));
    }

    #[test]
    fn checksum_changes_with_config() {
        let default_sum =
            heuristic_config_checksum(&HeuristicConfig::default()).expect("checksum computes");
        let tuned = HeuristicConfig {
            flat_indent_threshold: 0.25,
            ..HeuristicConfig::default()
        };
        let tuned_sum = heuristic_config_checksum(&tuned).expect("checksum computes");

        assert_eq!(default_sum.len(), 64);
        assert_ne!(default_sum, tuned_sum);
    }
}
