use std::path::PathBuf;

use clap::Parser;

/// Startup configuration, parsed once in `main`.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "rusty-dash")]
#[command(version, about = "Explore CSV files: charts, summary statistics and HTML reports")]
pub struct Config {
    /// Directory holding the CSV files offered for selection
    #[arg(env = "RUSTY_DASH_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,
}
