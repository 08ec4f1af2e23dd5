pub mod briefing;
pub mod directory;
pub mod locator;

pub use briefing::{BriefingProcessor, StationBriefing};
pub use directory::StationDirectory;
pub use locator::{CountryLocator, UnknownLocator};
