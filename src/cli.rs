use std::path::PathBuf;

use clap::Parser;
use usweather_core::{Config, SearchVariant};

#[derive(Parser, Debug)]
#[command(name = "usweather", version, about = "US weather lookup")]
pub struct Cli {
    /// Zip code, city, or state (defaults to the configured query)
    pub query: Option<String>,

    #[arg(short, long, help = "Read one search-box value per stdin line")]
    pub interactive: bool,

    #[arg(long, help = "Output the display model as JSON")]
    pub json: bool,

    #[arg(long, value_enum, help = "Page variant whose display rules to follow")]
    pub variant: Option<SearchVariant>,

    #[arg(long, help = "Quiet period before typed input is looked up")]
    pub debounce_ms: Option<u64>,

    #[arg(long, help = "Configuration file (default: platform config dir)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Debug logging (RUST_LOG overrides)")]
    pub verbose: bool,
}

impl Cli {
    /// Fold flag overrides into the loaded configuration, before it is validated.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(variant) = self.variant {
            config.search.variant = variant;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.search.debounce_ms = debounce_ms;
        }
    }
}
