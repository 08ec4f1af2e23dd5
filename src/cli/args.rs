use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rios-online")]
#[command(about = "River gauge situation room: envelopes, trends and extreme events per station")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding one {code}.csv table per station")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Station catalog file")]
    pub stations_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the countries present in the station catalog
    Countries {
        #[arg(long, allow_hyphen_values = true, help = "Latitude of the user, e.g. -3,10")]
        lat: Option<String>,

        #[arg(long, allow_hyphen_values = true, help = "Longitude of the user, e.g. -60,02")]
        lon: Option<String>,
    },

    /// List catalog stations, optionally filtered by country
    Stations {
        #[arg(long)]
        country: Option<String>,

        #[arg(long, allow_hyphen_values = true, help = "Show the station nearest to this latitude")]
        lat: Option<String>,

        #[arg(long, allow_hyphen_values = true, help = "Show the station nearest to this longitude")]
        lon: Option<String>,
    },

    /// Brief a single station
    Brief {
        #[arg(short, long, conflicts_with = "name", required_unless_present = "name")]
        station: Option<String>,

        #[arg(short, long, help = "Select the station by display name")]
        name: Option<String>,

        #[arg(long, default_value = "false", help = "Print JSON instead of a text summary")]
        json: bool,

        #[arg(short, long, help = "Write the JSON briefing to this file")]
        output_file: Option<PathBuf>,
    },

    /// Brief every station of a country and write one JSON file per station
    Batch {
        #[arg(long)]
        country: String,

        #[arg(
            short,
            long,
            help = "Output directory [default: output/briefings-{YYMMDD}]"
        )]
        output_dir: Option<PathBuf>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },
}
