use pl_simulator::adjustments::{AdjustmentError, Tolerances};
use pl_simulator::domain::{
    normalize, Attainment, Category, Decimal, Field, ProductType, Scope, Segment, WaterfallLine,
};
use pl_simulator::engine::{self, CascadeParams};
use pl_simulator::{Ledger, OverrideOutcome, Simulator};
use std::str::FromStr;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn fixture(name: &str) -> serde_json::Value {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    let raw = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn simulator() -> Simulator {
    let ledger = Ledger::from_document(&fixture("indicadores.json")).unwrap();
    Simulator::new(ledger, CascadeParams::default(), Tolerances::default())
}

fn cartoes() -> ProductType {
    ProductType::new("Cartões")
}

const ESPECIAL: Scope = Scope::Segment(Segment::Especial);

#[test]
fn test_end_to_end_carteira_edit() {
    let mut sim = simulator();
    let outcome = sim
        .set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Carteira, d("2000"))
        .unwrap();
    assert_eq!(outcome, OverrideOutcome::Stored);
    assert_eq!(
        sim.get_override(Segment::Especial, Category::Credit, &cartoes(), Field::Provisao),
        Some(d("-40"))
    );

    let rows = sim.product_rows(Segment::Especial, Category::Credit);
    let row = rows.iter().find(|r| r.product == cartoes()).unwrap();
    assert_eq!(row.simulated.margem, d("100"));
    assert_eq!(row.simulated.provisao, d("-40"));
    assert_eq!(row.simulated.rwa, d("600"));

    let result = sim.result(ESPECIAL).unwrap();
    assert_eq!(result.simulated.mob, d("1050"));
    assert_eq!(result.simulated.pdd, d("-220"));
    assert_eq!(result.simulated.mol, d("830"));
    assert_eq!(result.simulated.bai, d("530"));
    assert_eq!(result.simulated.impostos, d("-160.6275"));
    assert_eq!(result.simulated.bdi, d("369.3725"));
    assert_eq!(result.simulated.rwa, d("5300"));

    let wf = sim.waterfall(ESPECIAL).unwrap();
    assert_eq!(wf.simulado(WaterfallLine::Mob), d("1050"));
    assert_eq!(wf.simulado(WaterfallLine::Pdd), d("-220"));
    assert_eq!(wf.simulado(WaterfallLine::Mol), d("830"));
    assert_eq!(wf.simulado(WaterfallLine::Bai), d("530"));
    assert_eq!(wf.simulado(WaterfallLine::Impostos), d("-161"));
    assert_eq!(wf.simulado(WaterfallLine::Bdi), d("369"));
    assert_eq!(wf.simulado(WaterfallLine::TaxaImpositiva), d("30.3"));
    assert_eq!(wf.simulado(WaterfallLine::Eficiencia), d("28.6"));
    assert_eq!(wf.simulado(WaterfallLine::Rwa), d("5300"));
    assert_eq!(wf.simulado(WaterfallLine::Rorwa), d("6.97"));

    assert_eq!(wf.real(WaterfallLine::Mob), d("1000"));
    assert_eq!(wf.real(WaterfallLine::TaxaImpositiva), d("30"));
    assert_eq!(wf.real(WaterfallLine::Eficiencia), d("30"));
}

#[test]
fn test_non_adjustable_lines_stay_real() {
    let mut sim = simulator();
    sim.set_override(Segment::Pj, Category::Commission, &"FX".into(), Field::Valor, d("80"))
        .unwrap();

    let wf = sim.waterfall(Scope::Segment(Segment::Pj)).unwrap();
    for line in [WaterfallLine::Oryp, WaterfallLine::DemaisAtivos, WaterfallLine::TotalGastos] {
        assert_eq!(wf.simulado(line), wf.real(line), "{:?}", line);
    }
    assert_eq!(wf.simulado(WaterfallLine::Mob), d("650"));
}

#[test]
fn test_attainment_uses_own_target_then_total_target() {
    let mut sim = simulator();
    sim.set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Carteira, d("2000"))
        .unwrap();
    let wf = sim.waterfall(ESPECIAL).unwrap();

    let mob = wf.line(WaterfallLine::Mob);
    assert_eq!(mob.atingimento_real, Attainment::Percent(d("83.3")));
    assert_eq!(mob.atingimento_simulado, Attainment::Percent(d("87.5")));

    // Zero own target and none at Total.
    assert_eq!(wf.line(WaterfallLine::Bai).atingimento_simulado, Attainment::NoTarget);

    let bdi = wf.line(WaterfallLine::Bdi);
    assert_eq!(bdi.atingimento_real, Attainment::Percent(d("50")));
    assert_eq!(bdi.atingimento_simulado, Attainment::Percent(d("52.8")));

    assert_eq!(
        wf.line(WaterfallLine::Rorwa).atingimento_simulado,
        Attainment::Percent(d("69.7"))
    );
}

#[test]
fn test_compute_cascade_is_idempotent() {
    let mut sim = simulator();
    sim.set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Spread, d("6.5"))
        .unwrap();

    let first = sim.compute_cascade(ESPECIAL).unwrap();
    let second = sim.compute_cascade(ESPECIAL).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, sim.waterfall(ESPECIAL).unwrap());
}

#[test]
fn test_no_adjustment_views_match_real() {
    let sim = simulator();
    for scope in [ESPECIAL, Scope::Segment(Segment::Pj), Scope::Total] {
        let wf = sim.waterfall(scope).unwrap();
        for line in WaterfallLine::ALL {
            assert_eq!(wf.simulado(line), wf.real(line), "{} {:?}", scope, line);
        }
    }
}

#[test]
fn test_total_fast_path_is_verbatim_real() {
    let mut sim = simulator();
    sim.set_override(Segment::Pj, Category::Commission, &"FX".into(), Field::Valor, d("31"))
        .unwrap();
    sim.set_override(Segment::Pj, Category::Commission, &"FX".into(), Field::Valor, d("30"))
        .unwrap();
    assert!(!sim.has_adjustments());

    let total = sim.result(Scope::Total).unwrap();
    assert_eq!(total.simulated, total.real);
}

#[test]
fn test_total_consolidation_after_segment_edit() {
    let mut sim = simulator();
    sim.set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Carteira, d("2000"))
        .unwrap();

    let total = sim.result(Scope::Total).unwrap();
    assert_eq!(total.simulated.mob - total.real.mob, d("50"));
    assert_eq!(total.simulated.oryp, d("10"));
    assert_eq!(total.simulated.demais_ativos, d("-10"));
    assert_eq!(total.simulated.total_gastos, d("-500"));
    assert_eq!(total.simulated.bai, d("830"));
    assert_eq!(total.simulated.impostos, d("-250.6275"));

    let segments_mob: Decimal = [Segment::Especial, Segment::Pj]
        .iter()
        .map(|s| sim.result(Scope::Segment(*s)).unwrap().simulated.mob)
        .sum();
    assert_eq!(total.simulated.mob, segments_mob);

    let segments_rwa: Decimal = [Segment::Especial, Segment::Pj]
        .iter()
        .map(|s| sim.result(Scope::Segment(*s)).unwrap().simulated.rwa)
        .sum();
    assert_eq!(total.simulated.rwa, segments_rwa);

    let wf = sim.waterfall(Scope::Total).unwrap();
    assert_eq!(wf.simulado(WaterfallLine::Bdi), d("579"));
    assert_eq!(wf.line(WaterfallLine::Mob).atingimento_simulado, Attainment::Percent(d("82.5")));
}

#[test]
fn test_consolidator_agrees_with_total_as_segment() {
    let mut sim = simulator();
    sim.set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Carteira, d("1700"))
        .unwrap();
    let giro = ProductType::new("Capital de Giro");
    sim.set_override(Segment::Pj, Category::Credit, &giro, Field::Spread, d("3")).unwrap();

    assert_eq!(
        sim.compute_cascade(Scope::Total).unwrap(),
        sim.waterfall(Scope::Total).unwrap()
    );
}

#[test]
fn test_ratios_recomputed_not_summed_at_total() {
    let mut sim = simulator();
    sim.set_override(Segment::Pj, Category::Commission, &"FX".into(), Field::Valor, d("130"))
        .unwrap();
    let total = sim.result(Scope::Total).unwrap();

    let expected = engine::indicators::rorwa(total.simulated.bdi, total.simulated.rwa);
    assert_eq!(total.simulated.rorwa, expected);
    assert_eq!(
        total.simulated.value(WaterfallLine::TaxaImpositiva),
        engine::indicators::taxa_impositiva(total.simulated.impostos, total.simulated.bai)
    );
}

#[test]
fn test_residual_override_changes_nothing() {
    let mut sim = simulator();
    let before = sim.waterfall(ESPECIAL).unwrap();
    let rows_before = sim.product_rows(Segment::Especial, Category::Funding);

    let outcome = sim
        .set_override(Segment::Especial, Category::Funding, &"Demais".into(), Field::Spread, d("9"))
        .unwrap();
    assert_eq!(outcome, OverrideOutcome::Ignored);
    assert!(!sim.has_adjustments());
    assert_eq!(sim.waterfall(ESPECIAL).unwrap(), before);

    let rows_after = sim.product_rows(Segment::Especial, Category::Funding);
    assert_eq!(rows_before, rows_after);
    let demais = rows_after.last().unwrap();
    assert!(demais.product.is_residual());
    assert!(!demais.editable);
    assert_eq!(demais.simulated.spread, d("3"));
    assert_eq!(demais.simulated.margem, d("3"));
}

#[test]
fn test_missing_segment_data() {
    let sim = simulator();
    let err = sim.compute_cascade(Scope::Segment(Segment::Prospera)).unwrap_err();
    assert_eq!(
        err,
        engine::EngineError::MissingSegmentData {
            scope: Scope::Segment(Segment::Prospera)
        }
    );
    assert!(sim.waterfall(Scope::Segment(Segment::Consumer)).is_err());
}

#[test]
fn test_clear_adjustments_resets_views() {
    let mut sim = simulator();
    let initial = sim.waterfall(Scope::Total).unwrap();
    sim.set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Carteira, d("2000"))
        .unwrap();
    sim.set_override(Segment::Pj, Category::Commission, &"FX".into(), Field::Valor, d("60"))
        .unwrap();

    assert_eq!(sim.clear_adjustments(Some(Segment::Especial)), 2);
    assert_eq!(sim.waterfall(ESPECIAL).unwrap().simulado(WaterfallLine::Mob), d("1000"));
    assert_eq!(
        sim.waterfall(Scope::Segment(Segment::Pj)).unwrap().simulado(WaterfallLine::Mob),
        d("630")
    );

    assert_eq!(sim.clear_adjustments(None), 1);
    assert_eq!(sim.waterfall(Scope::Total).unwrap(), initial);
}

#[test]
fn test_huge_input_is_rejected_and_views_survive() {
    let mut sim = simulator();
    let before = sim.waterfall(ESPECIAL).unwrap();
    let huge = normalize("50000000000000000000000000000");

    let err = sim
        .set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Spread, huge)
        .unwrap_err();
    assert!(matches!(err, AdjustmentError::OutOfRange { field: Field::Spread, .. }));
    assert!(!sim.has_adjustments());
    assert_eq!(sim.waterfall(ESPECIAL).unwrap(), before);

    let outcome = sim
        .set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Carteira, d("2000"))
        .unwrap();
    assert_eq!(outcome, OverrideOutcome::Stored);
    assert_eq!(sim.waterfall(ESPECIAL).unwrap().simulado(WaterfallLine::Mob), d("1050"));
}

#[test]
fn test_largest_accepted_input_does_not_overflow() {
    let mut sim = simulator();
    let big = d("1000000000000000");
    sim.set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Spread, big).unwrap();
    sim.set_override(Segment::Especial, Category::Credit, &cartoes(), Field::Carteira, big)
        .unwrap();

    let wf = sim.waterfall(ESPECIAL).unwrap();
    assert!(wf.simulado(WaterfallLine::Mob) > d("1000"));
    assert!(sim.waterfall(Scope::Total).is_ok());
}

#[test]
fn test_edit_on_unloaded_segment_is_rejected() {
    let mut sim = simulator();
    let initial = sim.waterfall(Scope::Total).unwrap();

    let err = sim
        .set_override(Segment::Prospera, Category::Commission, &cartoes(), Field::Valor, d("99"))
        .unwrap_err();
    assert_eq!(
        err,
        AdjustmentError::SegmentUnavailable {
            segment: Segment::Prospera
        }
    );
    assert!(!sim.has_adjustments());
    assert!(sim.adjustments().is_empty());
    assert_eq!(sim.waterfall(Scope::Total).unwrap(), initial);
}
