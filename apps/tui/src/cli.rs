use std::path::PathBuf;

use clap::{CommandFactory, Parser};

#[derive(Debug, Default, Parser)]
#[command(name = "tech-radar", version, about = "Render and browse a Tech Radar")]
pub struct CliArgs {
    /// Radar configuration (JSON). Defaults to $RADAR_CONFIG or radar.json
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Theme variables (JSON object of `--name: value`) for var(--name) colours
    #[arg(long, value_name = "PATH")]
    pub theme: Option<PathBuf>,

    /// Write the diagram as SVG
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Write a standalone HTML page with the diagram and legend
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Seed the placement jitter so exports are reproducible
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(config) = &self.config {
            std::env::set_var("RADAR_CONFIG", config);
        }
        if let Some(theme) = &self.theme {
            std::env::set_var("RADAR_THEME", theme);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Exports and `--json` never need the interactive viewer.
    pub const fn is_batch(&self) -> bool {
        self.headless || self.json || self.svg.is_some() || self.html.is_some()
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
