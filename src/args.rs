use clap::{Args, Parser};
use serde::{Deserialize, Serialize};
use anyhow::{bail, Context};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// The lookup table, comma separated: dstport,protocol,tag
    pub lookup_file: PathBuf,

    /// The flow log, one whitespace separated record per line
    pub flow_log_file: PathBuf,

    /// Load the output settings from a TOML file instead of the flags below
    #[clap(long)]
    pub config_file: Option<PathBuf>,

    /// Output method
    #[clap(flatten)]
    pub output: OutputConfig,
}

#[derive(Args, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the report is written
    #[clap(short, long, value_enum, default_value_t = ExportMethodType::Print)]
    pub output: ExportMethodType,

    /// File path for the report (used if method is File)
    #[clap(long, required_if_eq("output", "file"))]
    pub export_path: Option<PathBuf>,
}

/// Contents of the file given with `--config-file`.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub output: OutputConfig,
}

impl ConfigFile {
    /// Loads an existing config file. confy would create a missing one, so
    /// that case is rejected up front.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            bail!("configuration file {} does not exist", path.display());
        }

        confy::load_path::<ConfigFile>(path)
            .with_context(|| format!("failed to load configuration file {}", path.display()))
    }
}

#[derive(clap::ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportMethodType {
    /// The report will be printed to the console
    #[default]
    Print,

    /// The report will be written to the export path
    File,
}
