pub mod constants;
pub mod coordinates;
pub mod decimal;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{haversine_distance, parse_coordinate};
pub use decimal::{normalize_decimal, normalize_integer, normalize_month};
pub use filename::{briefing_file_name, generate_default_briefing_dir, station_table_path};
pub use progress::ProgressReporter;
