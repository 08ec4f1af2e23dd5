use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{Coordinates, StationEntry};
use crate::processors::{BriefingProcessor, StationDirectory, UnknownLocator};
use crate::readers::{ConcurrentReader, StationReader, StationTableReader};
use crate::utils::coordinates::parse_coordinate;
use crate::utils::filename::{briefing_file_name, generate_default_briefing_dir};
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tracing::{info, warn};

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(stations_file) = cli.stations_file {
        config.stations_file = stations_file;
    }

    let station_reader = StationReader::with_delimiter(config.delimiter_byte()?);
    let directory = StationDirectory::load(&config.stations_file, &station_reader)?;

    match cli.command {
        Commands::Countries { lat, lon } => {
            let position = parse_position(lat.as_deref(), lon.as_deref())?;
            // No geocoding service is wired into the command line
            let default_index = directory.default_country_index(&UnknownLocator, position);

            for (i, country) in directory.countries().iter().enumerate() {
                let marker = if i == default_index { "*" } else { " " };
                println!("{} {}", marker, country);
            }
        }

        Commands::Stations { country, lat, lon } => {
            let stations: Vec<&StationEntry> = match country.as_deref() {
                Some(country) => directory.stations_in_country(country).collect(),
                None => directory.stations().iter().collect(),
            };

            if stations.is_empty() {
                println!("No stations found");
            }
            for station in &stations {
                println!(
                    "{:<10} {:<32} {:>9.4} {:>9.4}  {}",
                    station.code,
                    station.name,
                    station.coordinates.latitude,
                    station.coordinates.longitude,
                    station.category
                );
            }

            if let Some(position) = parse_position(lat.as_deref(), lon.as_deref())? {
                if let Some((nearest, distance)) = directory.nearest(position) {
                    println!(
                        "\nNearest station: {} — {} ({:.1} km)",
                        nearest.name, nearest.code, distance
                    );
                }
            }
        }

        Commands::Brief {
            station,
            name,
            json,
            output_file,
        } => {
            let entry = match (station.as_deref(), name.as_deref()) {
                (Some(code), _) => directory.require(code)?,
                (None, Some(name)) => {
                    directory
                        .find_by_name(name)
                        .ok_or_else(|| ProcessingError::StationNotFound {
                            code: name.to_string(),
                        })?
                }
                (None, None) => {
                    return Err(ProcessingError::InvalidFormat(
                        "either --station or --name is required".to_string(),
                    ))
                }
            };

            info!(station = %entry.code, "briefing station");
            let table = StationTableReader::from_config(&config)?
                .read_station(&config.data_dir, &entry.code)?;
            let briefing = BriefingProcessor::from_config(&config).brief(entry, &table);

            if let Some(path) = output_file {
                write_json(&path, &briefing)?;
                println!("Briefing written to {}", path.display());
            } else if json {
                println!("{}", serde_json::to_string_pretty(&briefing)?);
            } else {
                println!("{}", briefing.summary());
            }
        }

        Commands::Batch {
            country,
            output_dir,
            max_workers,
        } => {
            let output_dir = output_dir.unwrap_or_else(generate_default_briefing_dir);
            let stations: Vec<StationEntry> =
                directory.stations_in_country(&country).cloned().collect();

            if stations.is_empty() {
                println!("No stations found for {}", country);
                return Ok(());
            }

            println!("Briefing {} stations in {}...", stations.len(), country);
            println!("Output directory: {}", output_dir.display());

            let progress = ProgressReporter::new_spinner("Reading station tables...", false);
            let codes: Vec<String> = stations.iter().map(|s| s.code.clone()).collect();
            let reader = ConcurrentReader::new(max_workers, StationTableReader::from_config(&config)?);
            let loads = reader.read_tables(&config.data_dir, &codes).await?;
            progress.finish_with_message(&format!("Read {} station tables", loads.len()));

            let mut inputs = Vec::with_capacity(loads.len());
            let mut failed = 0usize;
            for (station, (_, load)) in stations.into_iter().zip(loads) {
                match load {
                    Ok(table) => inputs.push((station, table)),
                    Err(e) => {
                        failed += 1;
                        warn!(station = %station.code, error = %e, "skipping station");
                    }
                }
            }

            let progress =
                ProgressReporter::new(inputs.len() as u64, "Briefing stations...", false);
            let briefings = BriefingProcessor::from_config(&config).brief_all(
                &inputs,
                max_workers,
                Some(&progress),
            )?;
            progress.finish_with_message(&format!("Briefed {} stations", briefings.len()));

            std::fs::create_dir_all(&output_dir)?;
            for briefing in &briefings {
                let path = output_dir.join(briefing_file_name(&briefing.station.code));
                write_json(&path, briefing)?;
            }

            println!(
                "Wrote {} briefings ({} stations without usable tables)",
                briefings.len(),
                failed
            );
        }
    }

    Ok(())
}

fn parse_position(lat: Option<&str>, lon: Option<&str>) -> Result<Option<Coordinates>> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(
            parse_coordinate(lat)?,
            parse_coordinate(lon)?,
        ))),
        (None, None) => Ok(None),
        _ => Err(ProcessingError::InvalidCoordinate(
            "--lat and --lon must be given together".to_string(),
        )),
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    Ok(())
}
