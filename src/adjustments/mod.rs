//! Adjustment Store: user overrides keyed by (segment, category, product, field).
//!
//! An entry exists only while its simulated value differs from the real one
//! by at least the field's tolerance; equal values are pruned on write, so
//! "is anything adjusted" is a plain emptiness check.

use crate::domain::{as_cost, catalog, Category, Decimal, Field, ProductType, Segment};
use crate::engine::product::scaled_provision;
use crate::ledger::Ledger;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdjustmentError {
    #[error("unknown product {product} for {segment} in {category}")]
    UnknownProduct {
        segment: Segment,
        category: Category,
        product: ProductType,
    },
    #[error("field {field} is not editable for {category}")]
    FieldNotEditable { category: Category, field: Field },
    #[error("segment {segment} has no loaded data")]
    SegmentUnavailable { segment: Segment },
    #[error("value {value} for {field} is out of range")]
    OutOfRange { field: Field, value: Decimal },
}

/// Largest magnitude accepted for an override.
fn max_override() -> Decimal {
    Decimal::from_parts(1_000_000_000_000_000, 0)
}

/// Whether an override was typed by the user or derived from another edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Explicit,
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    pub simulated: Decimal,
    /// `simulated - real`.
    pub delta: Decimal,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdjustmentKey {
    pub segment: Segment,
    pub category: Category,
    pub product: ProductType,
    pub field: Field,
}

/// Pruning tolerances. Amounts and spreads (0..100 terms) differ in scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tolerances {
    pub amount: Decimal,
    pub spread: Decimal,
}

impl Tolerances {
    pub fn for_field(&self, field: Field) -> Decimal {
        if field.is_percentage() {
            self.spread
        } else {
            self.amount
        }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            amount: Decimal::from_parts(1, 2),
            spread: Decimal::from_parts(5, 3),
        }
    }
}

/// Result of a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideOutcome {
    /// An entry now holds the simulated value.
    Stored,
    /// The value matched the real one; any entry was removed.
    Pruned,
    /// The residual bucket; nothing was recorded.
    Ignored,
}

/// One row of the adjustment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentEntry {
    pub segment: Segment,
    pub category: Category,
    pub product: ProductType,
    pub field: Field,
    pub real: Decimal,
    pub simulated: Decimal,
    pub delta: Decimal,
    pub origin: Origin,
}

#[derive(Debug, Clone, Default)]
pub struct AdjustmentStore {
    entries: BTreeMap<AdjustmentKey, Adjustment>,
    tolerances: Tolerances,
}

impl AdjustmentStore {
    pub fn new(tolerances: Tolerances) -> Self {
        Self {
            entries: BTreeMap::new(),
            tolerances,
        }
    }

    /// Record a user override.
    ///
    /// Provisions are normalized to the negative-cost convention. A carteira
    /// edit on a credit product also derives the provision proportionally,
    /// unless the provision was explicitly overridden.
    ///
    /// # Errors
    /// `SegmentUnavailable` when the segment was skipped at load,
    /// `UnknownProduct` for products outside the segment's catalog,
    /// `FieldNotEditable` for fields the category does not carry and
    /// `OutOfRange` for values above 10^15 in magnitude.
    pub fn set_override(
        &mut self,
        ledger: &Ledger,
        segment: Segment,
        category: Category,
        product: &ProductType,
        field: Field,
        value: Decimal,
    ) -> Result<OverrideOutcome, AdjustmentError> {
        if product.is_residual() {
            warn!(%segment, %category, %field, "Ignoring override of residual product");
            return Ok(OverrideOutcome::Ignored);
        }
        if !ledger.is_available(segment) {
            return Err(AdjustmentError::SegmentUnavailable { segment });
        }
        if !category.accepts(field) {
            return Err(AdjustmentError::FieldNotEditable { category, field });
        }
        if !catalog::is_listed(segment, category, product) {
            return Err(AdjustmentError::UnknownProduct {
                segment,
                category,
                product: product.clone(),
            });
        }
        if value.abs() > max_override() {
            return Err(AdjustmentError::OutOfRange { field, value });
        }

        let real = ledger.get_real(segment, category, product);
        let value = if field == Field::Provisao {
            as_cost(value)
        } else {
            value
        };

        let key = AdjustmentKey {
            segment,
            category,
            product: product.clone(),
            field,
        };
        let outcome = self.write(key, value, real.value(field), Origin::Explicit);

        if field == Field::Carteira && category == Category::Credit {
            let provision_key = AdjustmentKey {
                segment,
                category,
                product: product.clone(),
                field: Field::Provisao,
            };
            let explicit = self
                .entries
                .get(&provision_key)
                .map(|adj| adj.origin == Origin::Explicit)
                .unwrap_or(false);
            if !explicit {
                let derived = scaled_provision(real.provisao, real.carteira, value);
                self.write(provision_key, derived, real.provisao, Origin::Derived);
            }
        }

        debug!(%segment, %category, %product, %field, ?outcome, "Override recorded");
        Ok(outcome)
    }

    fn write(
        &mut self,
        key: AdjustmentKey,
        simulated: Decimal,
        real: Decimal,
        origin: Origin,
    ) -> OverrideOutcome {
        if simulated.within(real, self.tolerances.for_field(key.field)) {
            self.entries.remove(&key);
            return OverrideOutcome::Pruned;
        }
        self.entries.insert(
            key,
            Adjustment {
                simulated,
                delta: simulated - real,
                origin,
            },
        );
        OverrideOutcome::Stored
    }

    /// Remove every override of one segment, or of all segments.
    ///
    /// Returns how many entries were removed.
    pub fn clear(&mut self, segment: Option<Segment>) -> usize {
        let before = self.entries.len();
        match segment {
            Some(segment) => self.entries.retain(|key, _| key.segment != segment),
            None => self.entries.clear(),
        }
        before - self.entries.len()
    }

    pub fn get(
        &self,
        segment: Segment,
        category: Category,
        product: &ProductType,
        field: Field,
    ) -> Option<&Adjustment> {
        self.entries.get(&AdjustmentKey {
            segment,
            category,
            product: product.clone(),
            field,
        })
    }

    /// Simulated value of an override, if one exists.
    pub fn get_override(
        &self,
        segment: Segment,
        category: Category,
        product: &ProductType,
        field: Field,
    ) -> Option<Decimal> {
        self.get(segment, category, product, field)
            .map(|adj| adj.simulated)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn has_segment(&self, segment: Segment) -> bool {
        self.entries.keys().any(|key| key.segment == segment)
    }

    /// Every override, ordered by segment, category, product and field.
    pub fn list(&self) -> Vec<AdjustmentEntry> {
        self.entries
            .iter()
            .map(|(key, adj)| AdjustmentEntry {
                segment: key.segment,
                category: key.category,
                product: key.product.clone(),
                field: key.field,
                real: adj.simulated - adj.delta,
                simulated: adj.simulated,
                delta: adj.delta,
                origin: adj.origin,
            })
            .collect()
    }
}
