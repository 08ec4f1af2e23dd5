pub mod envelope;
pub mod events;
pub mod frequency;
pub mod variability;

pub use envelope::{EnvelopeAggregator, EnvelopePoint, LatestReading};
pub use events::{EventKind, ExtremeEvent, ExtremeEventRanker, RankOrder};
pub use frequency::{FrequencyDistribution, MonthlyFrequency, MonthlyShare, WeightKind};
pub use variability::{VariabilityPoint, VariabilityTrend};
