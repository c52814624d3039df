//! Real (actual) financial facts loaded from the indicators document.

use super::decimal::Decimal;
use super::primitives::{Field, ProductType};
use super::waterfall::WaterfallLine;
use serde::Serialize;
use std::collections::BTreeMap;

/// Actual figures for one product of one segment in one category.
///
/// Funding rows leave `provisao`/`rwa` at zero; commission rows only carry
/// `valor`. `provisao` follows the PDD convention: a non-positive cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RealRecord {
    pub carteira: Decimal,
    pub spread: Decimal,
    pub provisao: Decimal,
    pub margem: Decimal,
    pub rwa: Decimal,
    pub valor: Decimal,
}

impl RealRecord {
    pub fn credit(
        carteira: Decimal,
        spread: Decimal,
        provisao: Decimal,
        margem: Decimal,
        rwa: Decimal,
    ) -> Self {
        Self {
            carteira,
            spread,
            provisao: as_cost(provisao),
            margem,
            rwa,
            valor: Decimal::zero(),
        }
    }

    pub fn funding(carteira: Decimal, spread: Decimal, margem: Decimal) -> Self {
        Self {
            carteira,
            spread,
            margem,
            ..Default::default()
        }
    }

    pub fn commission(valor: Decimal) -> Self {
        Self {
            valor,
            ..Default::default()
        }
    }

    /// Real value of an adjustable field.
    pub fn value(&self, field: Field) -> Decimal {
        match field {
            Field::Carteira => self.carteira,
            Field::Spread => self.spread,
            Field::Provisao => self.provisao,
            Field::Valor => self.valor,
        }
    }

    /// Spread shown for the product.
    ///
    /// The residual bucket has no meaningful stored spread: it is derived as
    /// margem / carteira * 100 (zero for an empty portfolio).
    pub fn effective_spread(&self, product: &ProductType) -> Decimal {
        if product.is_residual() {
            self.margem.percent_of(self.carteira)
        } else {
            self.spread
        }
    }
}

/// Normalize a provision or PDD figure to the negative-cost convention.
pub fn as_cost(value: Decimal) -> Decimal {
    -value.abs()
}

/// The loaded `cascada` of a segment or the Total: real lines plus budget targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeRecord {
    actual: BTreeMap<WaterfallLine, Decimal>,
    budget: BTreeMap<WaterfallLine, Decimal>,
}

impl CascadeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a real line value. PDD is normalized to a negative cost.
    pub fn set_actual(&mut self, line: WaterfallLine, value: Decimal) {
        let value = if line == WaterfallLine::Pdd {
            as_cost(value)
        } else {
            value
        };
        self.actual.insert(line, value);
    }

    /// Record a budget target. PDD targets follow the same sign convention.
    pub fn set_budget(&mut self, line: WaterfallLine, value: Decimal) {
        let value = if line == WaterfallLine::Pdd {
            as_cost(value)
        } else {
            value
        };
        self.budget.insert(line, value);
    }

    pub fn with_actual(mut self, line: WaterfallLine, value: Decimal) -> Self {
        self.set_actual(line, value);
        self
    }

    pub fn with_budget(mut self, line: WaterfallLine, value: Decimal) -> Self {
        self.set_budget(line, value);
        self
    }

    /// Loaded real value; absent lines read as zero.
    pub fn actual(&self, line: WaterfallLine) -> Decimal {
        self.actual.get(&line).copied().unwrap_or_default()
    }

    /// Budget target; absent or zero means "no target".
    pub fn budget(&self, line: WaterfallLine) -> Option<Decimal> {
        self.budget.get(&line).copied().filter(|v| !v.is_zero())
    }
}
