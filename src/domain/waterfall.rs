//! P&L waterfall lines and the report shape handed to the presentation layer.

use super::decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// A line of the cascade, waterfall lines first, then indicators.
///
/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WaterfallLine {
    #[serde(rename = "MOB")]
    Mob,
    #[serde(rename = "PDD")]
    Pdd,
    #[serde(rename = "MOL")]
    Mol,
    #[serde(rename = "ORYP")]
    Oryp,
    #[serde(rename = "Demais Ativos")]
    DemaisAtivos,
    #[serde(rename = "Total Gastos")]
    TotalGastos,
    #[serde(rename = "BAI")]
    Bai,
    #[serde(rename = "Impostos")]
    Impostos,
    #[serde(rename = "BDI")]
    Bdi,
    #[serde(rename = "Taxa Impositiva")]
    TaxaImpositiva,
    #[serde(rename = "Eficiência")]
    Eficiencia,
    #[serde(rename = "RWA")]
    Rwa,
    #[serde(rename = "RORWA")]
    Rorwa,
}

impl WaterfallLine {
    pub const ALL: [WaterfallLine; 13] = [
        WaterfallLine::Mob,
        WaterfallLine::Pdd,
        WaterfallLine::Mol,
        WaterfallLine::Oryp,
        WaterfallLine::DemaisAtivos,
        WaterfallLine::TotalGastos,
        WaterfallLine::Bai,
        WaterfallLine::Impostos,
        WaterfallLine::Bdi,
        WaterfallLine::TaxaImpositiva,
        WaterfallLine::Eficiencia,
        WaterfallLine::Rwa,
        WaterfallLine::Rorwa,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            WaterfallLine::Mob => "MOB",
            WaterfallLine::Pdd => "PDD",
            WaterfallLine::Mol => "MOL",
            WaterfallLine::Oryp => "ORYP",
            WaterfallLine::DemaisAtivos => "Demais Ativos",
            WaterfallLine::TotalGastos => "Total Gastos",
            WaterfallLine::Bai => "BAI",
            WaterfallLine::Impostos => "Impostos",
            WaterfallLine::Bdi => "BDI",
            WaterfallLine::TaxaImpositiva => "Taxa Impositiva",
            WaterfallLine::Eficiencia => "Eficiência",
            WaterfallLine::Rwa => "RWA",
            WaterfallLine::Rorwa => "RORWA",
        }
    }

    /// Key of the line inside a document `cascada` object.
    ///
    /// Identical to the label except ORYP, which the document spells `Oryp`.
    pub fn document_key(&self) -> &'static str {
        match self {
            WaterfallLine::Oryp => "Oryp",
            other => other.label(),
        }
    }

    /// Key of the line's budget target (`PPTO_MOB`, `PPTO_Demais Ativos`, ...).
    pub fn budget_key(&self) -> String {
        format!("PPTO_{}", self.document_key())
    }

    /// Decimal places kept when the line is reported.
    pub fn display_precision(&self) -> u32 {
        match self {
            WaterfallLine::TaxaImpositiva | WaterfallLine::Eficiencia => 1,
            WaterfallLine::Rorwa => 2,
            _ => 0,
        }
    }
}

/// Budget attainment: a percentage, or "-" when no target exists.
///
/// "No target" is not zero; it serializes as the string `"-"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attainment {
    Percent(Decimal),
    #[default]
    NoTarget,
}

impl Attainment {
    /// `value / target * 100`, or `NoTarget` for a zero target.
    pub fn against(value: Decimal, target: Decimal) -> Self {
        if target.is_zero() {
            return Attainment::NoTarget;
        }
        Attainment::Percent(value.percent_of(target).round_dp(1))
    }

    pub fn percent(&self) -> Option<Decimal> {
        match self {
            Attainment::Percent(p) => Some(*p),
            Attainment::NoTarget => None,
        }
    }
}

impl Serialize for Attainment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Attainment::Percent(p) => p.serialize(serializer),
            Attainment::NoTarget => serializer.serialize_str("-"),
        }
    }
}

/// One reported line: real and simulated value plus their attainment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineValue {
    pub real: Decimal,
    pub simulado: Decimal,
    pub atingimento_real: Attainment,
    pub atingimento_simulado: Attainment,
}

/// Full cascade report for one segment or the Total.
///
/// Values are rounded for display: monetary lines to integers, Taxa
/// Impositiva and Eficiência to one decimal, RORWA to two.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Waterfall {
    lines: BTreeMap<WaterfallLine, LineValue>,
}

impl Waterfall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, line: WaterfallLine, value: LineValue) {
        self.lines.insert(line, value);
    }

    /// Value of a line; absent lines read as all-zero with no target.
    pub fn line(&self, line: WaterfallLine) -> LineValue {
        self.lines.get(&line).copied().unwrap_or_default()
    }

    pub fn simulado(&self, line: WaterfallLine) -> Decimal {
        self.line(line).simulado
    }

    pub fn real(&self, line: WaterfallLine) -> Decimal {
        self.line(line).real
    }
}
