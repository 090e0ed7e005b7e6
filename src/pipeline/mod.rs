//! Headless simulation pipeline
//!
//! Runs many races against a scripted player on a virtual clock, with
//! composable observers recording progress, metrics and exports.

pub mod observers;
pub mod simulation;

pub use observers::{
    CsvObserver, MetricsObserver, MetricsSummary, ProgressObserver, TracingObserver,
};
pub use simulation::{FixedLayout, SimulationConfig, SimulationPipeline, SimulationResult};

pub use crate::ports::{PlayerInput, RaceObserver};
