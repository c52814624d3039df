//! Segment (and Total-as-segment) cascade computation.

use super::indicators::{incremental_taxes, rorwa};
use super::product::project;
use super::{CascadeParams, CascadeResult, EngineError, Figures};
use crate::adjustments::AdjustmentStore;
use crate::domain::{CascadeRecord, Category, Decimal, Scope, Segment, WaterfallLine};
use crate::ledger::Ledger;
use tracing::debug;

/// Simulated-minus-real sums of one segment's products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deltas {
    pub margin: Decimal,
    pub pdd: Decimal,
    pub rwa: Decimal,
}

impl std::ops::AddAssign for Deltas {
    fn add_assign(&mut self, rhs: Deltas) {
        self.margin += rhs.margin;
        self.pdd += rhs.pdd;
        self.rwa += rhs.rwa;
    }
}

/// Loaded real figures of a cascade.
pub fn real_figures(cascade: &CascadeRecord) -> Figures {
    let line = |l| cascade.actual(l);
    Figures {
        mob: line(WaterfallLine::Mob),
        pdd: line(WaterfallLine::Pdd),
        mol: line(WaterfallLine::Mol),
        oryp: line(WaterfallLine::Oryp),
        demais_ativos: line(WaterfallLine::DemaisAtivos),
        total_gastos: line(WaterfallLine::TotalGastos),
        bai: line(WaterfallLine::Bai),
        impostos: line(WaterfallLine::Impostos),
        bdi: line(WaterfallLine::Bdi),
        rwa: line(WaterfallLine::Rwa),
        rorwa: line(WaterfallLine::Rorwa),
    }
}

/// Product-level deltas of a segment against its base aggregates.
///
/// Margin covers credit and funding margem plus commission valor; PDD and RWA
/// come from credit only.
pub fn segment_deltas(ledger: &Ledger, adjustments: &AdjustmentStore, segment: Segment) -> Deltas {
    let Some(base) = ledger.base_aggregate(segment) else {
        return Deltas::default();
    };

    let mut margin_sim = Decimal::zero();
    let mut pdd_sim = Decimal::zero();
    let mut rwa_sim = Decimal::zero();

    for category in Category::ALL {
        for product in ledger.products(segment, category) {
            let real = ledger.get_real(segment, category, &product);
            let sim = project(adjustments, segment, category, &product, &real);
            match category {
                Category::Credit => {
                    margin_sim += sim.margem;
                    pdd_sim += sim.provisao;
                    rwa_sim += sim.rwa;
                }
                Category::Funding => margin_sim += sim.margem,
                Category::Commission => margin_sim += sim.valor,
            }
        }
    }

    Deltas {
        margin: margin_sim - base.mob_base,
        pdd: pdd_sim - base.pdd_base,
        rwa: rwa_sim - base.rwa_base,
    }
}

/// Carry MOB, PDD and RWA through the waterfall against the real anchors.
///
/// ORYP, Demais Ativos and Total Gastos are not adjustable and stay at their
/// real values.
pub(crate) fn propagate(
    params: &CascadeParams,
    real: &Figures,
    mob: Decimal,
    pdd: Decimal,
    rwa: Decimal,
) -> Figures {
    let mol = mob + pdd;
    let bai = mol + real.oryp + real.demais_ativos + real.total_gastos;
    let impostos = incremental_taxes(params, real, mob, bai);
    let bdi = bai + impostos;

    Figures {
        mob,
        pdd,
        mol,
        oryp: real.oryp,
        demais_ativos: real.demais_ativos,
        total_gastos: real.total_gastos,
        bai,
        impostos,
        bdi,
        rwa,
        rorwa: rorwa(bdi, rwa),
    }
}

/// Compute the full cascade of a segment, or of the Total treated as the
/// aggregate of every loaded segment's product deltas.
///
/// # Errors
/// `MissingSegmentData` when the scope has no loaded cascade.
pub fn compute_cascade(
    ledger: &Ledger,
    adjustments: &AdjustmentStore,
    params: &CascadeParams,
    scope: Scope,
) -> Result<CascadeResult, EngineError> {
    let cascade = ledger
        .cascade(scope)
        .ok_or(EngineError::MissingSegmentData { scope })?;
    let real = real_figures(cascade);

    let segments = match scope {
        Scope::Segment(segment) => vec![segment],
        Scope::Total => ledger.available_segments(),
    };
    let mut deltas = Deltas::default();
    for segment in segments {
        deltas += segment_deltas(ledger, adjustments, segment);
    }

    let simulated = propagate(
        params,
        &real,
        real.mob + deltas.margin,
        real.pdd + deltas.pdd,
        real.rwa + deltas.rwa,
    );
    debug!(
        %scope,
        d_margin = %deltas.margin,
        d_pdd = %deltas.pdd,
        d_rwa = %deltas.rwa,
        "Cascade computed"
    );

    Ok(CascadeResult {
        scope,
        real,
        simulated,
    })
}
