//! Pure scoring core for EEG event-annotation benchmarking: TAES, overlap,
//! DP alignment, epoch, and IRA scoring over [`AnnotationFile`] streams.
//!
//! Every scorer is a free function taking borrowed inputs and returning an
//! owned result (or a [`CoreResult`] when the inputs can be malformed); none
//! hold state across calls or perform I/O.

pub mod aggregate;
pub mod dp;
pub mod epoch;
pub mod error;
pub mod ira;
pub mod metrics;
pub mod model;
pub mod overlap;
pub mod taes;

pub use aggregate::{AggregateReport, FileResult, ScorerTotals, aggregate};
pub use dp::{DpResult, align};
pub use epoch::EpochResult;
pub use error::{CoreError, CoreReason, CoreResult};
pub use ira::IraResult;
pub use metrics::Metrics;
pub use model::{AnnotationFile, EventAnnotation, event_order};
pub use overlap::OverlapResult;
pub use taes::TaesResult;
