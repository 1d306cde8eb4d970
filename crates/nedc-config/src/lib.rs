pub mod error;
pub mod logging;
pub mod params;
pub mod run;

pub use error::{ConfigError, ConfigReason, ConfigResult};
pub use logging::{LogFormat, LoggingConfig};
pub use params::{DpParams, EpochParams, IraParams, TaesParams};
pub use run::BenchmarkRunConfig;
