//! Static reference data: allowed product types per segment and category.
//!
//! The lists are asymmetric across segments (Consumer has no funding
//! products, SCIB carries LF, ...). Every non-empty list ends with the
//! residual "Demais" bucket, into which unlisted products are folded when the
//! indicators document is produced.

use super::primitives::{Category, ProductType, Segment};

/// Product names allowed for a segment in a category, in catalog order.
pub fn product_names(segment: Segment, category: Category) -> &'static [&'static str] {
    match category {
        Category::Credit => credit(segment),
        Category::Funding => funding(segment),
        Category::Commission => commission(segment),
    }
}

/// Owned product types for a segment in a category.
pub fn product_types(segment: Segment, category: Category) -> Vec<ProductType> {
    product_names(segment, category)
        .iter()
        .map(|name| ProductType::new(*name))
        .collect()
}

/// Whether `product` is a catalog product of `segment` in `category`.
pub fn is_listed(segment: Segment, category: Category, product: &ProductType) -> bool {
    product_names(segment, category)
        .iter()
        .any(|name| *name == product.as_str())
}

fn credit(segment: Segment) -> &'static [&'static str] {
    match segment {
        Segment::Especial => &[
            "Cheque Especial",
            "Cartões",
            "CP",
            "Consignado",
            "Hipotecas",
            "Autos",
            "Demais",
        ],
        Segment::Prospera => &[
            "Cheque Especial",
            "Cartões",
            "CP",
            "Consignado",
            "Hipotecas",
            "Autos",
            "Microcrédito",
            "Demais",
        ],
        Segment::Select => &[
            "Cheque Especial",
            "Cartões",
            "CP",
            "Consignado",
            "Hipotecas",
            "Autos",
            "Agro",
            "Comex",
            "Demais",
        ],
        Segment::Pj => &[
            "Cheque Emp/ADP",
            "Cartões",
            "Hipotecas",
            "Autos",
            "Agro",
            "Capital de Giro",
            "Comex",
            "Conta Garantida",
            "Confirming",
            "Internegócios",
            "Demais",
        ],
        Segment::Corporate => &[
            "Hipotecas",
            "Autos",
            "Agro",
            "Capital de Giro",
            "Comex",
            "Conta Garantida",
            "Confirming",
            "Internegócios",
            "Demais",
        ],
        Segment::Scib => &[
            "Cartões",
            "Hipotecas",
            "Autos",
            "Agro",
            "Capital de Giro",
            "Comex",
            "Confirming",
            "Internegócios",
            "Demais",
        ],
        Segment::Private => &[
            "Cartões",
            "CP",
            "Hipotecas",
            "Autos",
            "Agro",
            "Capital de Giro",
            "Comex",
            "Internegócios",
            "Demais",
        ],
        Segment::Consumer => &["CP", "Autos", "Demais"],
    }
}

fn funding(segment: Segment) -> &'static [&'static str] {
    match segment {
        Segment::Especial | Segment::Prospera => {
            &["DAV", "Contamax", "CDB", "Poupança", "Letras", "Demais"]
        }
        Segment::Select => &[
            "DAV",
            "Contamax",
            "CDB",
            "Poupança",
            "Letras",
            "Captações Comex",
            "Demais",
        ],
        Segment::Pj => &[
            "DAV",
            "Contamax",
            "CDB",
            "Poupança",
            "Letras",
            "Captações Comex",
            "Time Deposit",
            "Demais",
        ],
        Segment::Corporate => &[
            "DAV",
            "Contamax",
            "CDB",
            "Letras",
            "Captações Comex",
            "Time Deposit",
            "Demais",
        ],
        Segment::Scib => &[
            "DAV",
            "Contamax",
            "CDB",
            "Letras",
            "Captações Comex",
            "Time Deposit",
            "LF",
            "Demais",
        ],
        Segment::Private => &[
            "DAV",
            "Contamax",
            "CDB",
            "Letras",
            "Captações Comex",
            "COE",
            "Demais",
        ],
        Segment::Consumer => &[],
    }
}

fn commission(segment: Segment) -> &'static [&'static str] {
    match segment {
        Segment::Especial | Segment::Prospera => &[
            "Cartões",
            "Seguros Open",
            "Seguros Related",
            "Tarifas C/C",
            "Capitalização",
            "Consórcio",
            "Esfera",
            "Fidelização INSS",
            "Tecban",
            "Demais",
        ],
        Segment::Select => &[
            "Cartões",
            "Seguros Open",
            "Seguros Related",
            "Tarifas C/C",
            "Capitalização",
            "Consórcio",
            "Esfera",
            "Tecban",
            "AAA",
            "Demais",
        ],
        Segment::Pj => &[
            "Cartões",
            "Seguros Open",
            "Seguros Related",
            "Tarifas C/C",
            "Capitalização",
            "Consórcio",
            "Esfera",
            "Tecban",
            "Abertura Conta",
            "Adquirência",
            "FX",
            "Cash",
            "Demais",
        ],
        Segment::Corporate => &[
            "Cartões",
            "Seguros Open",
            "Seguros Related",
            "Tarifas C/C",
            "Capitalização",
            "Consórcio",
            "Mercado de Capitais",
            "Fiança",
            "Abertura Conta",
            "Adquirência",
            "FX",
            "Cash",
            "Demais",
        ],
        Segment::Scib => &[
            "Mercado de Capitais",
            "FX",
            "Fiança",
            "Comex",
            "Cash",
            "Corretagem",
            "Demais",
        ],
        Segment::Private => &[
            "Previdência",
            "Fundos",
            "FX",
            "Mercado de Capitais",
            "Comex",
            "Esfera",
            "Cartões",
            "Demais",
        ],
        Segment::Consumer => &[
            "Seguros Open",
            "Seguros Related",
            "Tarifas de Crédito",
            "Demais",
        ],
    }
}
