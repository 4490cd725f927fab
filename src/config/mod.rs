pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation::Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "fuel-compare")]
#[command(about = "Record fuel prices and decide between ethanol and gasoline")]
pub struct CliConfig {
    /// Directory holding the preferences file (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Save a new price comparison
    Add {
        #[arg(long)]
        alcohol: String,
        #[arg(long)]
        gas: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Look up the address for --lat/--lon
        #[arg(long, requires = "lat")]
        geocode: bool,
    },
    /// Show saved comparisons, most recent first
    List,
    /// Evaluate prices at the current threshold without saving
    Check {
        #[arg(long)]
        alcohol: String,
        #[arg(long)]
        gas: String,
    },
    /// Re-save a station with new values (it gets a new id)
    Edit {
        id: String,
        #[arg(long)]
        alcohol: Option<String>,
        #[arg(long)]
        gas: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove a saved comparison
    Delete {
        id: String,
    },
    /// Switch between the default and the strict threshold
    Strict {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            crate::utils::validation::validate_path("data_dir", dir)?;
        }

        if let Command::Add {
            lat: Some(lat),
            lon: Some(lon),
            ..
        } = &self.command
        {
            crate::utils::validation::validate_coordinates(*lat, *lon)?;
        }

        Ok(())
    }
}
