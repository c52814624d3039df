//! Ledger Store: immutable real facts loaded once from the indicators document.
//!
//! Holds, per segment, the real product records of each category, the loaded
//! cascade with its budget targets and the base aggregates used as
//! recomputation anchors. The Total only carries a cascade.

mod parse;

use crate::domain::{
    catalog, CascadeRecord, Category, Decimal, ProductType, RealRecord, Scope, Segment,
    WaterfallLine,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub use parse::decimal_from_json;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Data format error: {0}")]
    DataFormat(String),
}

/// Why a segment is unavailable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentIssue {
    pub segment: String,
    pub reason: String,
}

/// Segment-level sums over the real product records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseAggregate {
    /// Credit and funding margem plus commission valor.
    pub mob_base: Decimal,
    /// Credit provisao (non-positive).
    pub pdd_base: Decimal,
    /// Credit rwa.
    pub rwa_base: Decimal,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SegmentBook {
    pub(crate) credit: BTreeMap<ProductType, RealRecord>,
    pub(crate) funding: BTreeMap<ProductType, RealRecord>,
    pub(crate) commission: BTreeMap<ProductType, RealRecord>,
    pub(crate) cascade: CascadeRecord,
    pub(crate) base: BaseAggregate,
}

impl SegmentBook {
    fn records(&self, category: Category) -> &BTreeMap<ProductType, RealRecord> {
        match category {
            Category::Credit => &self.credit,
            Category::Funding => &self.funding,
            Category::Commission => &self.commission,
        }
    }

    pub(crate) fn compute_base(&mut self) {
        let margins: Decimal = self
            .credit
            .values()
            .chain(self.funding.values())
            .map(|r| r.margem)
            .sum();
        let commissions: Decimal = self.commission.values().map(|r| r.valor).sum();

        self.base = BaseAggregate {
            mob_base: margins + commissions,
            pdd_base: self.credit.values().map(|r| r.provisao).sum(),
            rwa_base: self.credit.values().map(|r| r.rwa).sum(),
        };
    }
}

/// Snapshot of the real side of the simulator. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    segments: BTreeMap<Segment, SegmentBook>,
    total: Option<CascadeRecord>,
    issues: Vec<SegmentIssue>,
}

impl Ledger {
    /// Parse the indicators document.
    ///
    /// # Errors
    /// `LedgerError::DataFormat` when the document is not an object or no
    /// segment carries the required keys. A single malformed segment is only
    /// recorded as a [`SegmentIssue`].
    pub fn from_document(document: &serde_json::Value) -> Result<Self, LedgerError> {
        parse::parse_document(document)
    }

    /// Real record of a product; a zero record when absent.
    pub fn get_real(
        &self,
        segment: Segment,
        category: Category,
        product: &ProductType,
    ) -> RealRecord {
        self.segments
            .get(&segment)
            .and_then(|book| book.records(category).get(product))
            .copied()
            .unwrap_or_default()
    }

    /// Products of a segment in a category: catalog order first, then any
    /// product present in the document but not in the catalog.
    pub fn products(&self, segment: Segment, category: Category) -> Vec<ProductType> {
        let mut products = catalog::product_types(segment, category);
        if let Some(book) = self.segments.get(&segment) {
            for product in book.records(category).keys() {
                if !products.contains(product) {
                    products.push(product.clone());
                }
            }
        }
        products
    }

    /// Loaded cascade of a segment or of the Total.
    pub fn cascade(&self, scope: Scope) -> Option<&CascadeRecord> {
        match scope {
            Scope::Segment(segment) => self.segments.get(&segment).map(|book| &book.cascade),
            Scope::Total => self.total.as_ref(),
        }
    }

    /// Budget target of a line. A segment without its own target falls back
    /// to the Total's.
    pub fn budget(&self, scope: Scope, line: WaterfallLine) -> Option<Decimal> {
        let own = self.cascade(scope).and_then(|c| c.budget(line));
        match scope {
            Scope::Segment(_) => own.or_else(|| self.cascade(Scope::Total)?.budget(line)),
            Scope::Total => own,
        }
    }

    pub fn base_aggregate(&self, segment: Segment) -> Option<BaseAggregate> {
        self.segments.get(&segment).map(|book| book.base)
    }

    pub fn is_available(&self, segment: Segment) -> bool {
        self.segments.contains_key(&segment)
    }

    /// Segments that loaded successfully, in display order.
    pub fn available_segments(&self) -> Vec<Segment> {
        self.segments.keys().copied().collect()
    }

    pub fn has_total(&self) -> bool {
        self.total.is_some()
    }

    /// Segments skipped at load and why.
    pub fn issues(&self) -> &[SegmentIssue] {
        &self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn document() -> serde_json::Value {
        json!({
            "Especial": {
                "credito": {
                    "carteira": {"Cartões": 1000, "CP": 500},
                    "spread": {"Cartões": 5, "CP": 10},
                    "provisao": {"Cartões": 20, "CP": -5},
                    "margem": {"Cartões": 50, "CP": 50},
                    "rwa": {"Cartões": 300, "CP": 100}
                },
                "captacoes": {
                    "carteira": {"CDB": 800},
                    "spread": {"CDB": 1},
                    "margem": {"CDB": 8}
                },
                "comissoes": {"Seguros Open": 12},
                "cascada": {"MOB": 120, "PDD": -25, "PPTO_MOB": 100}
            },
            "Prospera": {"credito": {}, "captacoes": {}},
            "Total": {"cascada": {"MOB": 500, "PPTO_MOB": 400, "PPTO_BAI": 90}}
        })
    }

    #[test]
    fn test_base_aggregate_sums_real_records() {
        let ledger = Ledger::from_document(&document()).unwrap();
        let base = ledger.base_aggregate(Segment::Especial).unwrap();
        assert_eq!(base.mob_base, d("120"));
        assert_eq!(base.pdd_base, d("-25"));
        assert_eq!(base.rwa_base, d("400"));
    }

    #[test]
    fn test_get_real_absent_is_zero() {
        let ledger = Ledger::from_document(&document()).unwrap();
        let rec = ledger.get_real(Segment::Especial, Category::Credit, &"Autos".into());
        assert_eq!(rec, RealRecord::default());
        let rec = ledger.get_real(Segment::Private, Category::Credit, &"Autos".into());
        assert_eq!(rec, RealRecord::default());
    }

    #[test]
    fn test_incomplete_segment_is_skipped_not_fatal() {
        let ledger = Ledger::from_document(&document()).unwrap();
        assert!(ledger.is_available(Segment::Especial));
        assert!(!ledger.is_available(Segment::Prospera));
        assert!(ledger
            .issues()
            .iter()
            .any(|i| i.segment == "Prospera" && i.reason.contains("comissoes")));
    }

    #[test]
    fn test_budget_falls_back_to_total() {
        let ledger = Ledger::from_document(&document()).unwrap();
        let especial = Scope::Segment(Segment::Especial);
        assert_eq!(ledger.budget(especial, WaterfallLine::Mob), Some(d("100")));
        assert_eq!(ledger.budget(especial, WaterfallLine::Bai), Some(d("90")));
        assert_eq!(ledger.budget(especial, WaterfallLine::Rwa), None);
        assert_eq!(ledger.budget(Scope::Total, WaterfallLine::Mob), Some(d("400")));
    }

    #[test]
    fn test_products_follow_catalog_then_extras() {
        let doc = json!({
            "Consumer": {
                "credito": {"carteira": {"Leasing": 10}, "margem": {"Leasing": 1}},
                "captacoes": {},
                "comissoes": {},
                "cascada": {}
            }
        });
        let ledger = Ledger::from_document(&doc).unwrap();
        let names: Vec<String> = ledger
            .products(Segment::Consumer, Category::Credit)
            .into_iter()
            .map(|p| p.0)
            .collect();
        assert_eq!(names, vec!["CP", "Autos", "Demais", "Leasing"]);
    }

    #[test]
    fn test_non_object_document_is_fatal() {
        assert!(matches!(
            Ledger::from_document(&json!([1, 2, 3])),
            Err(LedgerError::DataFormat(_))
        ));
        assert!(matches!(
            Ledger::from_document(&json!({"Total": {"cascada": {}}})),
            Err(LedgerError::DataFormat(_))
        ));
    }
}
