pub mod concurrent_reader;
pub mod source;
pub mod station_reader;
pub mod station_table_reader;

pub use concurrent_reader::{ConcurrentReader, StationLoad};
pub use source::read_source_text;
pub use station_reader::StationReader;
pub use station_table_reader::StationTableReader;
