use crate::adjustments::Tolerances;
use crate::datasource::{DataSourceError, LedgerSource};
use crate::engine::CascadeParams;
use crate::ledger::{Ledger, LedgerError};
use crate::orchestration::Simulator;
use thiserror::Error;

/// Fetch the indicators document, parse it and compute the initial views.
///
/// Runs once at startup. Failures are fatal and never retried.
pub async fn load_simulator(
    source: &dyn LedgerSource,
    params: CascadeParams,
    tolerances: Tolerances,
) -> Result<Simulator, LoadError> {
    tracing::info!("Loading indicators document from {}", source.describe());

    let document = source.fetch_document().await?;
    let ledger = Ledger::from_document(&document)?;

    for issue in ledger.issues() {
        tracing::warn!(
            "Segment {} unavailable: {}",
            issue.segment,
            issue.reason
        );
    }

    Ok(Simulator::new(ledger, params, tolerances))
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
