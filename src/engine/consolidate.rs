//! Consolidation of per-segment simulated cascades into the Total.

use super::cascade::{propagate, real_figures};
use super::{CascadeParams, CascadeResult, EngineError};
use crate::adjustments::AdjustmentStore;
use crate::domain::{Decimal, Scope};
use crate::ledger::Ledger;
use tracing::debug;

/// Build the Total from already computed segment cascades.
///
/// With no adjustment anywhere the Total's simulated side is its loaded real
/// side verbatim. Otherwise MOB, PDD and RWA are the sums of the segments'
/// simulated values; ORYP, Demais Ativos and Total Gastos stay at the Total's
/// real values; taxes and ratios are recomputed at Total level.
///
/// # Errors
/// `MissingSegmentData` when the Total has no loaded cascade.
pub fn consolidate_total<'a>(
    ledger: &Ledger,
    adjustments: &AdjustmentStore,
    params: &CascadeParams,
    segments: impl IntoIterator<Item = &'a CascadeResult>,
) -> Result<CascadeResult, EngineError> {
    let cascade = ledger
        .cascade(Scope::Total)
        .ok_or(EngineError::MissingSegmentData { scope: Scope::Total })?;
    let real = real_figures(cascade);

    if adjustments.is_empty() {
        debug!("No adjustments; Total simulated mirrors real");
        return Ok(CascadeResult {
            scope: Scope::Total,
            real,
            simulated: real,
        });
    }

    let mut mob = Decimal::zero();
    let mut pdd = Decimal::zero();
    let mut rwa = Decimal::zero();
    for result in segments {
        mob += result.simulated.mob;
        pdd += result.simulated.pdd;
        rwa += result.simulated.rwa;
    }

    debug!(adjustments = adjustments.len(), "Total consolidated from segments");
    Ok(CascadeResult {
        scope: Scope::Total,
        real,
        simulated: propagate(params, &real, mob, pdd, rwa),
    })
}
