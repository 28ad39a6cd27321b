use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params};
use tracing::{info, warn};

use crate::cli::ConvertArgs;
use crate::commands::{load_dump, year_standard_entries};
use crate::engine::Cell;
use crate::model::{
    ConvertCounts, ConvertPaths, ConvertRunManifest, PivotExport, SheetSummary, SourceDescriptor,
};
use crate::util::{ensure_directory, now_utc_string, utc_compact_string, write_json_pretty};

const EXPORT_SCHEMA_VERSION: &str = "0.1.0";
const OUTPUT_SUFFIX: &str = "横展開";

mod run;
mod store;

pub use run::run;

use store::*;
