//! Per-product projections of margin, provision and RWA.

use crate::adjustments::AdjustmentStore;
use crate::domain::{catalog, Category, Decimal, Field, ProductType, RealRecord, Segment};
use crate::ledger::Ledger;
use serde::Serialize;

/// `carteira * spread / 100`.
pub fn simulated_margin(carteira: Decimal, spread: Decimal) -> Decimal {
    carteira * spread.div_or_zero(Decimal::hundred())
}

/// RWA scaled with the portfolio; zero for an empty real portfolio.
pub fn scaled_rwa(rwa_real: Decimal, carteira_real: Decimal, carteira_sim: Decimal) -> Decimal {
    rwa_real.div_or_zero(carteira_real) * carteira_sim
}

/// Provision scaled with the portfolio; zero for an empty real portfolio.
pub fn scaled_provision(
    provisao_real: Decimal,
    carteira_real: Decimal,
    carteira_sim: Decimal,
) -> Decimal {
    provisao_real.div_or_zero(carteira_real) * carteira_sim
}

/// Simulated record of one product.
///
/// Without a carteira or spread override the stored margem is kept, so an
/// untouched product never contributes a delta.
pub fn project(
    adjustments: &AdjustmentStore,
    segment: Segment,
    category: Category,
    product: &ProductType,
    real: &RealRecord,
) -> RealRecord {
    let ov = |field| adjustments.get_override(segment, category, product, field);

    if category == Category::Commission {
        return RealRecord {
            valor: ov(Field::Valor).unwrap_or(real.valor),
            ..*real
        };
    }

    let carteira_ov = ov(Field::Carteira);
    let spread_ov = ov(Field::Spread);
    let carteira = carteira_ov.unwrap_or(real.carteira);
    let spread = spread_ov.unwrap_or_else(|| real.effective_spread(product));

    let margem = if carteira_ov.is_some() || spread_ov.is_some() {
        simulated_margin(carteira, spread)
    } else {
        real.margem
    };

    let mut sim = RealRecord {
        carteira,
        spread,
        margem,
        ..*real
    };

    if category == Category::Credit {
        sim.rwa = match carteira_ov {
            Some(c) => scaled_rwa(real.rwa, real.carteira, c),
            None => real.rwa,
        };
        sim.provisao = ov(Field::Provisao).unwrap_or(real.provisao);
    }
    sim
}

/// One product row as shown in the product tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub product: ProductType,
    /// Catalog products other than the residual bucket.
    pub editable: bool,
    pub real: RealRecord,
    pub simulated: RealRecord,
}

/// Rows of a segment in a category, largest real carteira (valor for
/// commissions) first and the residual bucket last.
pub fn product_rows(
    ledger: &Ledger,
    adjustments: &AdjustmentStore,
    segment: Segment,
    category: Category,
) -> Vec<ProductRow> {
    let mut rows: Vec<ProductRow> = ledger
        .products(segment, category)
        .into_iter()
        .map(|product| {
            let mut real = ledger.get_real(segment, category, &product);
            real.spread = real.effective_spread(&product);
            let simulated = project(adjustments, segment, category, &product, &real);
            ProductRow {
                editable: !product.is_residual()
                    && catalog::is_listed(segment, category, &product),
                product,
                real,
                simulated,
            }
        })
        .collect();

    let size = |row: &ProductRow| match category {
        Category::Commission => row.real.valor,
        _ => row.real.carteira,
    };
    rows.sort_by(|a, b| {
        a.product
            .is_residual()
            .cmp(&b.product.is_residual())
            .then_with(|| size(b).cmp(&size(a)))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_calculators() {
        assert_eq!(simulated_margin(d("2000"), d("5")), d("100"));
        assert_eq!(scaled_rwa(d("300"), d("1000"), d("2000")), d("600"));
        assert_eq!(scaled_provision(d("-100"), d("1000"), d("1500")), d("-150"));
    }

    #[test]
    fn test_zero_portfolio_guard() {
        assert_eq!(scaled_rwa(d("300"), Decimal::zero(), d("2000")), Decimal::zero());
        assert_eq!(
            scaled_provision(d("-100"), Decimal::zero(), d("2000")),
            Decimal::zero()
        );
    }

    #[test]
    fn test_untouched_product_keeps_stored_margin() {
        let store = AdjustmentStore::default();
        let real = RealRecord::credit(d("1000"), d("5"), d("20"), d("47"), d("300"));
        let sim = project(&store, Segment::Especial, Category::Credit, &"CP".into(), &real);
        assert_eq!(sim, real);
    }
}
