use super::{Ledger, LedgerError, SegmentBook, SegmentIssue};
use crate::domain::{
    normalize, CascadeRecord, Decimal, ProductType, RealRecord, Segment, WaterfallLine,
};
use rust_decimal::prelude::FromPrimitive;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

const TOTAL_KEY: &str = "Total";
const REQUIRED_KEYS: [&str; 4] = ["credito", "captacoes", "comissoes", "cascada"];

/// Read a document number leniently: JSON numbers, numeric strings (either
/// decimal convention) and null are accepted; anything else is zero.
pub fn decimal_from_json(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str_canonical(&text)
                .or_else(|_| rust_decimal::Decimal::from_scientific(&text).map(Decimal::new))
                .ok()
                .or_else(|| {
                    n.as_f64()
                        .and_then(rust_decimal::Decimal::from_f64)
                        .map(Decimal::new)
                })
                .unwrap_or_default()
        }
        Value::String(s) => normalize(s),
        _ => Decimal::zero(),
    }
}

pub(super) fn parse_document(document: &Value) -> Result<Ledger, LedgerError> {
    let root = document
        .as_object()
        .ok_or_else(|| LedgerError::DataFormat("document is not a JSON object".to_string()))?;

    let mut ledger = Ledger::default();

    for segment in Segment::ALL {
        let Some(raw) = root.get(segment.as_str()) else {
            ledger.issues.push(issue(segment.as_str(), "missing from document"));
            continue;
        };
        match parse_segment(raw) {
            Ok(book) => {
                ledger.segments.insert(segment, book);
            }
            Err(reason) => {
                warn!(segment = %segment, %reason, "Skipping segment");
                ledger.issues.push(issue(segment.as_str(), &reason));
            }
        }
    }

    match root
        .get(TOTAL_KEY)
        .and_then(|t| t.get("cascada"))
        .and_then(Value::as_object)
    {
        Some(cascada) => ledger.total = Some(parse_cascade(cascada)),
        None => {
            warn!("Total has no cascada; Total views are unavailable");
            ledger.issues.push(issue(TOTAL_KEY, "missing cascada"));
        }
    }

    for key in root.keys() {
        if key != TOTAL_KEY && key.parse::<Segment>().is_err() {
            debug!(key = %key, "Ignoring unknown document key");
        }
    }

    if ledger.segments.is_empty() {
        return Err(LedgerError::DataFormat(
            "no segment has credito, captacoes, comissoes and cascada".to_string(),
        ));
    }

    info!(
        segments = ledger.segments.len(),
        skipped = ledger.issues.len(),
        "Ledger loaded"
    );
    Ok(ledger)
}

fn issue(segment: &str, reason: &str) -> SegmentIssue {
    SegmentIssue {
        segment: segment.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_segment(raw: &Value) -> Result<SegmentBook, String> {
    let obj = raw
        .as_object()
        .ok_or_else(|| "segment entry is not an object".to_string())?;

    let missing: Vec<&str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| object_at(obj, key).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing {}", missing.join(", ")));
    }

    let section = |key: &str| object_at(obj, key).ok_or_else(|| format!("missing {}", key));
    let credito = section("credito")?;
    let captacoes = section("captacoes")?;

    let mut book = SegmentBook::default();

    for product in product_names(credito) {
        let field = |name: &str| field_value(credito, name, &product);
        book.credit.insert(
            ProductType::new(product.clone()),
            RealRecord::credit(
                field("carteira"),
                field("spread"),
                field("provisao"),
                field("margem"),
                field("rwa"),
            ),
        );
    }

    for product in product_names(captacoes) {
        let field = |name: &str| field_value(captacoes, name, &product);
        book.funding.insert(
            ProductType::new(product.clone()),
            RealRecord::funding(field("carteira"), field("spread"), field("margem")),
        );
    }

    for (product, value) in section("comissoes")? {
        book.commission.insert(
            ProductType::new(product.clone()),
            RealRecord::commission(decimal_from_json(value)),
        );
    }

    book.cascade = parse_cascade(section("cascada")?);
    book.compute_base();
    Ok(book)
}

fn parse_cascade(cascada: &Map<String, Value>) -> CascadeRecord {
    let mut record = CascadeRecord::new();
    for line in WaterfallLine::ALL {
        if let Some(value) = cascada.get(line.document_key()) {
            record.set_actual(line, decimal_from_json(value));
        }
        if let Some(value) = cascada.get(&line.budget_key()) {
            record.set_budget(line, decimal_from_json(value));
        }
    }
    record
}

fn object_at<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}

/// Every product named under any field of a category object.
fn product_names(category: &Map<String, Value>) -> Vec<String> {
    let names: BTreeSet<&String> = category
        .values()
        .filter_map(Value::as_object)
        .flat_map(|per_field| per_field.keys())
        .collect();
    names.into_iter().cloned().collect()
}

fn field_value(category: &Map<String, Value>, field: &str, product: &str) -> Decimal {
    category
        .get(field)
        .and_then(|per_field| per_field.get(product))
        .map(decimal_from_json)
        .unwrap_or_default()
}
