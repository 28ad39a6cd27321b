use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::heuristics::HeuristicOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "fs-pivot",
    version,
    about = "Pivot consolidated financial statement dumps across fiscal years"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Convert(ConvertArgs),
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum InputEncoding {
    Auto,
    Utf8,
    ShiftJis,
}

impl InputEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Utf8 => "utf8",
            Self::ShiftJis => "shift-jis",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct HeuristicArgs {
    #[arg(long)]
    pub heuristics_path: Option<PathBuf>,

    #[arg(long)]
    pub flat_indent_threshold: Option<f64>,

    #[arg(long)]
    pub min_layout_label_chars: Option<usize>,
}

impl HeuristicArgs {
    pub fn overrides(&self) -> HeuristicOverrides {
        HeuristicOverrides {
            flat_indent_threshold: self.flat_indent_threshold,
            min_layout_label_chars: self.min_layout_label_chars,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = "out")]
    pub output_dir: PathBuf,

    #[arg(long)]
    pub json_path: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub db_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = InputEncoding::Auto)]
    pub encoding: InputEncoding,

    #[command(flatten)]
    pub heuristics: HeuristicArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = InputEncoding::Auto)]
    pub encoding: InputEncoding,

    #[command(flatten)]
    pub heuristics: HeuristicArgs,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
