//! Domain primitives: Segment, Scope, Category, Field, ProductType.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Business segment. The set is fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Segment {
    Especial,
    Prospera,
    Select,
    #[serde(rename = "PJ")]
    Pj,
    Corporate,
    #[serde(rename = "SCIB")]
    Scib,
    Private,
    Consumer,
}

impl Segment {
    /// All segments in display order.
    pub const ALL: [Segment; 8] = [
        Segment::Especial,
        Segment::Prospera,
        Segment::Select,
        Segment::Pj,
        Segment::Corporate,
        Segment::Scib,
        Segment::Private,
        Segment::Consumer,
    ];

    /// Name used as the document key and in every external surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Especial => "Especial",
            Segment::Prospera => "Prospera",
            Segment::Select => "Select",
            Segment::Pj => "PJ",
            Segment::Corporate => "Corporate",
            Segment::Scib => "SCIB",
            Segment::Private => "Private",
            Segment::Consumer => "Consumer",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown segment: {0}")]
pub struct UnknownSegment(pub String);

impl FromStr for Segment {
    type Err = UnknownSegment;

    /// Case-insensitive so URLs like `/v1/cascade/pj` work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Segment::ALL
            .iter()
            .copied()
            .find(|seg| seg.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSegment(s.to_string()))
    }
}

/// Which waterfall a computation targets: one segment, or the consolidated Total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Segment(Segment),
    Total,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Segment(s) => write!(f, "{}", s),
            Scope::Total => f.write_str("Total"),
        }
    }
}

impl FromStr for Scope {
    type Err = UnknownSegment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("total") {
            return Ok(Scope::Total);
        }
        s.parse().map(Scope::Segment)
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Credit portfolios.
    #[serde(rename = "credito")]
    Credit,
    /// Funding portfolios.
    #[serde(rename = "captacoes")]
    Funding,
    /// Commissions (fee income).
    #[serde(rename = "comissoes")]
    Commission,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Credit, Category::Funding, Category::Commission];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Credit => "credito",
            Category::Funding => "captacoes",
            Category::Commission => "comissoes",
        }
    }

    /// Fields a user may override for products of this category.
    pub fn editable_fields(&self) -> &'static [Field] {
        match self {
            Category::Credit => &[Field::Carteira, Field::Spread, Field::Provisao],
            Category::Funding => &[Field::Carteira, Field::Spread],
            Category::Commission => &[Field::Valor],
        }
    }

    pub fn accepts(&self, field: Field) -> bool {
        self.editable_fields().contains(&field)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Adjustable field of a product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Portfolio balance.
    Carteira,
    /// Spread, a percentage in 0..100 terms.
    Spread,
    /// Provision (expected loss), stored as a negative cost.
    Provisao,
    /// Commission amount.
    Valor,
}

impl Field {
    /// Spreads are percentages; everything else is an amount.
    pub fn is_percentage(&self) -> bool {
        matches!(self, Field::Spread)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Carteira => "carteira",
            Field::Spread => "spread",
            Field::Provisao => "provisao",
            Field::Valor => "valor",
        };
        f.write_str(name)
    }
}

/// Product type name, scoped to a segment and category by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductType(pub String);

impl ProductType {
    /// Name of the residual bucket that is never adjustable.
    pub const RESIDUAL: &'static str = "Demais";

    pub fn new(name: impl Into<String>) -> Self {
        ProductType(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the residual "Demais" bucket.
    pub fn is_residual(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case(Self::RESIDUAL)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductType {
    fn from(s: &str) -> Self {
        ProductType(s.to_string())
    }
}
