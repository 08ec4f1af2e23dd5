pub mod record;
pub mod station;

pub use record::{parse_date, DayOfYear, Field, ParseDiagnostics, StationRecord, StationRecordTable};
pub use station::{Coordinates, StationEntry};
