//! Incremental tax rule, ratio indicators and the rounded waterfall report.

use super::{CascadeParams, CascadeResult, Figures};
use crate::domain::{Attainment, Decimal, LineValue, Waterfall, WaterfallLine};
use crate::ledger::Ledger;

/// Taxes after a change of MOB and BAI.
///
/// Only the change is taxed: `pis = -ΔMOB * pis_rate`,
/// `ir = -(ΔBAI + pis) * ir_rate`, added to the real (negative) tax line.
pub fn incremental_taxes(
    params: &CascadeParams,
    real: &Figures,
    mob_sim: Decimal,
    bai_sim: Decimal,
) -> Decimal {
    let pis = -(mob_sim - real.mob) * params.pis_rate;
    let ir = -((bai_sim - real.bai) + pis) * params.ir_rate;
    real.impostos + pis + ir
}

/// `|impostos / bai| * 100`, zero when BAI is zero.
pub fn taxa_impositiva(impostos: Decimal, bai: Decimal) -> Decimal {
    impostos.percent_of(bai).abs()
}

/// `|total_gastos / mob| * 100`, zero when MOB is zero.
pub fn eficiencia(total_gastos: Decimal, mob: Decimal) -> Decimal {
    total_gastos.percent_of(mob).abs()
}

/// `bdi / rwa * 100`, zero when RWA is zero.
pub fn rorwa(bdi: Decimal, rwa: Decimal) -> Decimal {
    bdi.percent_of(rwa)
}

/// Rounded report of a computed cascade, with attainment against the
/// scope's budget targets.
pub fn build_waterfall(ledger: &Ledger, result: &CascadeResult) -> Waterfall {
    let mut waterfall = Waterfall::new();
    for line in WaterfallLine::ALL {
        let real = result.real.value(line);
        let simulado = result.simulated.value(line);
        let (atingimento_real, atingimento_simulado) = match ledger.budget(result.scope, line) {
            Some(target) => (
                Attainment::against(real, target),
                Attainment::against(simulado, target),
            ),
            None => (Attainment::NoTarget, Attainment::NoTarget),
        };

        let dp = line.display_precision();
        waterfall.insert(
            line,
            LineValue {
                real: real.round_dp(dp),
                simulado: simulado.round_dp(dp),
                atingimento_real,
                atingimento_simulado,
            },
        );
    }
    waterfall
}
