//! Domain types for the P&L what-if simulator.
//!
//! This module provides:
//! - Decimal wrapper and the permissive input normalizer
//! - Domain primitives: Segment, Scope, Category, Field, ProductType
//! - Static catalog of per-segment product types
//! - Real records, loaded cascades and the waterfall report shape

pub mod catalog;
pub mod decimal;
pub mod primitives;
pub mod records;
pub mod waterfall;

pub use decimal::{normalize, Decimal};
pub use primitives::{Category, Field, ProductType, Scope, Segment, UnknownSegment};
pub use records::{as_cost, CascadeRecord, RealRecord};
pub use waterfall::{Attainment, LineValue, Waterfall, WaterfallLine};
