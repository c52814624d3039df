pub mod adjustments;
pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod orchestration;

pub use adjustments::{AdjustmentError, AdjustmentStore, OverrideOutcome, Tolerances};
pub use config::Config;
pub use datasource::{DataSourceError, FileSource, HttpSource, LedgerSource, MockSource};
pub use domain::{
    normalize, Category, Decimal, Field, ProductType, Scope, Segment, Waterfall, WaterfallLine,
};
pub use engine::{CascadeParams, EngineError};
pub use error::AppError;
pub use ledger::{Ledger, LedgerError};
pub use orchestration::{load_simulator, Simulator};
