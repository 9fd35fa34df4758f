pub mod normalizer;
pub mod snapshot;

pub use normalizer::{normalize_format, select_recent, win_rate};
pub use snapshot::{FormatRecord, PlayerSnapshot, SampleOptions};
