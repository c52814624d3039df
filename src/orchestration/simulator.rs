//! The simulator: explicitly constructed application state.
//!
//! Owns the ledger, the adjustment store and the last computed cascade of
//! every segment and of the Total. Each edit records the override, recomputes
//! the owning segment and re-consolidates the Total.

use crate::adjustments::{
    AdjustmentEntry, AdjustmentError, AdjustmentStore, OverrideOutcome, Tolerances,
};
use crate::domain::{catalog, Category, Decimal, Field, ProductType, Scope, Segment, Waterfall};
use crate::engine::{self, CascadeParams, CascadeResult, EngineError, ProductRow};
use crate::ledger::Ledger;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Availability and catalog of one segment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSummary {
    pub segment: Segment,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    pub adjusted: bool,
    pub products: BTreeMap<Category, Vec<&'static str>>,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    ledger: Ledger,
    adjustments: AdjustmentStore,
    params: CascadeParams,
    views: BTreeMap<Segment, CascadeResult>,
    total: Option<CascadeResult>,
}

impl Simulator {
    /// Build the simulator and compute every initial view.
    pub fn new(ledger: Ledger, params: CascadeParams, tolerances: Tolerances) -> Self {
        let mut simulator = Self {
            ledger,
            adjustments: AdjustmentStore::new(tolerances),
            params,
            views: BTreeMap::new(),
            total: None,
        };
        for segment in simulator.ledger.available_segments() {
            simulator.recompute_segment(segment);
        }
        if let Err(e) = simulator.consolidate_total() {
            warn!("Initial Total consolidation failed: {}", e);
        }
        info!(segments = simulator.views.len(), "Simulator ready");
        simulator
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Record an override, then recompute the owning segment and the Total.
    ///
    /// # Errors
    /// Rejected overrides leave every view untouched.
    pub fn set_override(
        &mut self,
        segment: Segment,
        category: Category,
        product: &ProductType,
        field: Field,
        value: Decimal,
    ) -> Result<OverrideOutcome, AdjustmentError> {
        let outcome =
            self.adjustments
                .set_override(&self.ledger, segment, category, product, field, value)?;

        if outcome != OverrideOutcome::Ignored {
            self.recompute_segment(segment);
            if let Err(e) = self.consolidate_total() {
                warn!("Total not consolidated: {}", e);
            }
        }
        Ok(outcome)
    }

    /// Drop the overrides of one segment (or all) and reset the affected views.
    pub fn clear_adjustments(&mut self, segment: Option<Segment>) -> usize {
        let removed = self.adjustments.clear(segment);
        let affected = match segment {
            Some(segment) => vec![segment],
            None => self.ledger.available_segments(),
        };
        for segment in affected {
            self.recompute_segment(segment);
        }
        if let Err(e) = self.consolidate_total() {
            warn!("Total not consolidated: {}", e);
        }
        info!(removed, scope = ?segment, "Adjustments cleared");
        removed
    }

    /// Recompute a scope from the ledger and the adjustments without touching
    /// the stored views.
    pub fn compute_cascade(&self, scope: Scope) -> Result<Waterfall, EngineError> {
        let result = engine::compute_cascade(&self.ledger, &self.adjustments, &self.params, scope)?;
        Ok(engine::build_waterfall(&self.ledger, &result))
    }

    /// Rebuild the stored Total from the stored segment views.
    ///
    /// On failure the previous Total view is kept.
    pub fn consolidate_total(&mut self) -> Result<(), EngineError> {
        let total = engine::consolidate_total(
            &self.ledger,
            &self.adjustments,
            &self.params,
            self.views.values(),
        )?;
        self.total = Some(total);
        Ok(())
    }

    fn recompute_segment(&mut self, segment: Segment) {
        let scope = Scope::Segment(segment);
        match engine::compute_cascade(&self.ledger, &self.adjustments, &self.params, scope) {
            Ok(result) => {
                debug!(%segment, "Segment view updated");
                self.views.insert(segment, result);
            }
            Err(e) => warn!(%segment, "Keeping last view: {}", e),
        }
    }

    /// Stored view of a scope, rounded for display.
    pub fn waterfall(&self, scope: Scope) -> Result<Waterfall, EngineError> {
        self.result(scope)
            .map(|result| engine::build_waterfall(&self.ledger, result))
            .ok_or(EngineError::MissingSegmentData { scope })
    }

    /// Stored unrounded figures of a scope.
    pub fn result(&self, scope: Scope) -> Option<&CascadeResult> {
        match scope {
            Scope::Segment(segment) => self.views.get(&segment),
            Scope::Total => self.total.as_ref(),
        }
    }

    pub fn product_rows(&self, segment: Segment, category: Category) -> Vec<ProductRow> {
        engine::product_rows(&self.ledger, &self.adjustments, segment, category)
    }

    pub fn adjustments(&self) -> Vec<AdjustmentEntry> {
        self.adjustments.list()
    }

    pub fn has_adjustments(&self) -> bool {
        !self.adjustments.is_empty()
    }

    pub fn get_override(
        &self,
        segment: Segment,
        category: Category,
        product: &ProductType,
        field: Field,
    ) -> Option<Decimal> {
        self.adjustments.get_override(segment, category, product, field)
    }

    /// Every configured segment with its catalog and load status.
    pub fn segments(&self) -> Vec<SegmentSummary> {
        Segment::ALL
            .iter()
            .map(|&segment| SegmentSummary {
                segment,
                available: self.ledger.is_available(segment),
                issue: self
                    .ledger
                    .issues()
                    .iter()
                    .find(|i| i.segment == segment.as_str())
                    .map(|i| i.reason.clone()),
                adjusted: self.adjustments.has_segment(segment),
                products: Category::ALL
                    .iter()
                    .map(|&c| (c, catalog::product_names(segment, c).to_vec()))
                    .collect(),
            })
            .collect()
    }
}
