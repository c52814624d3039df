//! Pure cascade computation: per-product projections, segment and Total
//! waterfalls, incremental taxes, indicators and consolidation.
//!
//! Nothing here holds state; every function reads the [`Ledger`] and the
//! [`AdjustmentStore`] it is given.
//!
//! [`Ledger`]: crate::ledger::Ledger
//! [`AdjustmentStore`]: crate::adjustments::AdjustmentStore

use crate::domain::{Decimal, Scope, WaterfallLine};
use thiserror::Error;

pub mod cascade;
pub mod consolidate;
pub mod indicators;
pub mod product;

pub use cascade::compute_cascade;
pub use consolidate::consolidate_total;
pub use indicators::build_waterfall;
pub use product::{product_rows, ProductRow};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no cascade data loaded for {scope}")]
    MissingSegmentData { scope: Scope },
}

/// Rates of the incremental tax rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeParams {
    /// PIS/COFINS applied to the MOB change.
    pub pis_rate: Decimal,
    /// Income tax applied to the BAI change net of PIS.
    pub ir_rate: Decimal,
}

impl Default for CascadeParams {
    fn default() -> Self {
        Self {
            pis_rate: Decimal::from_parts(465, 4),
            ir_rate: Decimal::from_parts(30, 2),
        }
    }
}

/// Unrounded cascade figures on one side (real or simulated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Figures {
    pub mob: Decimal,
    pub pdd: Decimal,
    pub mol: Decimal,
    pub oryp: Decimal,
    pub demais_ativos: Decimal,
    pub total_gastos: Decimal,
    pub bai: Decimal,
    pub impostos: Decimal,
    pub bdi: Decimal,
    pub rwa: Decimal,
    pub rorwa: Decimal,
}

impl Figures {
    /// Value of a line. Taxa Impositiva and Eficiência are derived from the
    /// other figures.
    pub fn value(&self, line: WaterfallLine) -> Decimal {
        match line {
            WaterfallLine::Mob => self.mob,
            WaterfallLine::Pdd => self.pdd,
            WaterfallLine::Mol => self.mol,
            WaterfallLine::Oryp => self.oryp,
            WaterfallLine::DemaisAtivos => self.demais_ativos,
            WaterfallLine::TotalGastos => self.total_gastos,
            WaterfallLine::Bai => self.bai,
            WaterfallLine::Impostos => self.impostos,
            WaterfallLine::Bdi => self.bdi,
            WaterfallLine::TaxaImpositiva => indicators::taxa_impositiva(self.impostos, self.bai),
            WaterfallLine::Eficiencia => indicators::eficiencia(self.total_gastos, self.mob),
            WaterfallLine::Rwa => self.rwa,
            WaterfallLine::Rorwa => self.rorwa,
        }
    }
}

/// Real and simulated figures of one segment or of the Total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeResult {
    pub scope: Scope,
    pub real: Figures,
    pub simulated: Figures,
}
