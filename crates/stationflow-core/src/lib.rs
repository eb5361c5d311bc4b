pub mod channels;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod granularity;
pub mod outputs;
pub mod pipeline;
pub mod synthesis;
pub mod table;

pub use channels::{Channel, ChannelSpec, CHANNEL_REGISTRY};
pub use config::{ChannelRange, StationConfig};
pub use error::{Result, StationflowError};
pub use granularity::Granularity;
pub use pipeline::{
    AggregatedPeriod, AggregatedSeries, ComparisonPair, PipelineReport, PipelineRequest,
};
pub use table::{DataContext, SeriesTable, SourceKind};
