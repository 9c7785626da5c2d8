//! Integration tests for the estimation core.

use qre_core::EstimateError;
use qre_core::code;
use qre_core::cost::PhysicalCost;
use qre_core::metrics;
use qre_core::params::{AlgoOpts, CodeType, LowLevelOpts, Params};
use qre_core::search::{self, SweepRanges};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Gauge-code bundle with every evaluation-required field set.
fn gauge_params(d: u64) -> Params {
    Params::new(
        CodeType::ThreeDColor,
        AlgoOpts::new(829, metrics::ne_size(829))
            .with_we(Some(5))
            .with_wm(Some(5))
            .with_m(Some(20)),
        LowLevelOpts::default().with_d(Some(d)),
    )
}

fn uncorrected_params() -> Params {
    Params::new(
        CodeType::Uncorrected,
        AlgoOpts::new(6, metrics::ne_size(6))
            .with_we(Some(3))
            .with_wm(Some(2))
            .with_m(Some(5)),
        LowLevelOpts::default(),
    )
}

#[test]
fn test_exp_t_regimes() {
    let timing = PhysicalCost::new(0.3, 7.5).time_only();
    assert_eq!(timing.exp_t(), 7.5);

    assert_eq!(PhysicalCost::new(1.0, 3.0).exp_t(), f64::INFINITY);
    assert_eq!(PhysicalCost::new(1.5, 3.0).exp_t(), f64::INFINITY);

    assert_eq!(PhysicalCost::new(0.5, 10.0).exp_t(), 20.0);
}

#[test]
fn test_ne_size_literals() {
    assert_eq!(metrics::ne_size(6), 6);
    assert_eq!(metrics::ne_size(829), 1242);
    assert_eq!(metrics::ne_size(2048), 3029);
    // The correction delta (20) starts at 1024 bits and shifts the
    // result by twice its value.
    assert_eq!(metrics::ne_size(1023), 1533);
    assert_eq!(metrics::ne_size(1024), 1493);
    assert_eq!(metrics::ne_size(1023) - metrics::ne_size(1024), 40);
}

#[test]
fn test_code_type_parsing() {
    assert_eq!("3dcolor".parse::<CodeType>().unwrap(), CodeType::ThreeDColor);
    assert_eq!("none".parse::<CodeType>().unwrap(), CodeType::Uncorrected);
    assert!(matches!(
        "5dcolor".parse::<CodeType>(),
        Err(EstimateError::UnknownCodeType(_))
    ));
}

#[test]
fn test_even_distance_rejected() {
    assert!(matches!(
        code::build(&gauge_params(4)),
        Err(EstimateError::EvenDistance(4))
    ));
}

#[test]
fn test_invalid_debitage_rejected() {
    let params = gauge_params(25);
    let params = params.with_low_level(params.low_level.with_debitage(3));
    assert!(matches!(
        code::build(&params),
        Err(EstimateError::InvalidDebitage(3))
    ));
}

#[test]
fn test_missing_slack_rejected() {
    let params = gauge_params(25);
    let params = params.with_algo(params.algo.with_m(None));
    assert!(matches!(
        code::build(&params),
        Err(EstimateError::MissingParameter("m"))
    ));
}

#[test]
fn test_gauge_code_geometry_and_elementary_costs() {
    let model = code::build(&gauge_params(25)).unwrap();

    // Cut 2 of a distance-25 tetrahedron.
    assert_eq!(model.memory_qubits(), (25u64.pow(3) + 25) / 2);
    assert_eq!(model.space_modes(), (3 * 25 * 25 + 2 * 25 - 3) / 2);
    assert_eq!(model.time_modes(), 23);
    assert_eq!(model.proc_qubits(), 4 * model.space_modes());

    let err = 0.033 * (0.516_f64 * (1e-3_f64 / 0.0075).ln() * 25f64.powf(0.822)).exp();
    let cycle = 2.0 * 1e-6 * 23.0;
    assert!(close(model.gate1().p.unwrap(), err));
    assert!(close(model.gate1().t, cycle));
    assert!(close(model.cnot().p.unwrap(), 1.0 - (1.0 - err) * (1.0 - err)));
    assert!(close(model.init().t, cycle / 2.0));
    assert!(close(model.measure().t, 1e-6 + cycle / 2.0));
    assert!(close(model.correct_time(), cycle / 2.0));
}

#[test]
fn test_gauge_code_deand_strategies() {
    let measured = code::build(&gauge_params(25)).unwrap();

    let base = gauge_params(25);
    let gate_based_params = base.with_algo(base.algo.with_measure_based_deand(false));
    let gate_based = code::build(&gate_based_params).unwrap();

    let expected_measured = measured.measure() + 0.5 * measured.cnot();
    let expected_gates = 5.0 * gate_based.gate1() + 3.0 * gate_based.cnot();
    assert!(close(measured.deand().t, expected_measured.t));
    assert!(close(gate_based.deand().t, expected_gates.t));
    assert!(close(gate_based.deand().p.unwrap(), expected_gates.p.unwrap()));
    assert!(gate_based.deand().t != measured.deand().t);
}

#[test]
fn test_uncorrected_elementary_costs() {
    let model = code::build(&uncorrected_params()).unwrap();

    assert_eq!(model.gate1(), PhysicalCost::new(1e-3, 1e-6));
    assert!(close(model.cnot().p.unwrap(), 1.0 - (1.0 - 1e-3) * (1.0 - 1e-3)));
    let toffoli_err = 1.0 - (1.0 - 1e-3) * (1.0 - 1e-3) * (1.0 - 1e-3);
    assert!(close(model.toffoli().p.unwrap(), toffoli_err));
    assert_eq!(model.toffoli().t, 1e-6);
    assert_eq!(model.measure().t, 1e-6);

    assert!(model.correct_time().is_nan());
    assert_eq!(model.proc_qubits(), 3);
    assert_eq!(model.memory_qubits(), 1);
    assert_eq!(model.space_modes(), 1);
    assert_eq!(model.time_modes(), 1);

    // Toffoli is native: the AND gadget collapses onto it.
    assert_eq!(model.and_gate(), model.toffoli());
    assert_eq!(model.deand(), model.toffoli());
}

#[test]
fn test_toffoli_override_slot() {
    let mut model = code::build(&gauge_params(25)).unwrap();
    let computed = model.and_deand() + model.cnot();
    assert_eq!(model.toffoli(), computed);

    let imposed = PhysicalCost::new(0.1, 1.0);
    model.set_toffoli(Some(imposed));
    assert_eq!(model.toffoli(), imposed);

    model.set_toffoli(None);
    assert_eq!(model.toffoli(), computed);
}

#[test]
fn test_logical_qubit_formulas() {
    let windowed = uncorrected_params();
    assert_eq!(
        metrics::logical_qubits(&windowed).unwrap(),
        4 * 6 + 3 * 5 + 3 - 1
    );

    let controlled = windowed.with_algo(windowed.algo.with_windowed(false));
    assert_eq!(metrics::logical_qubits(&controlled).unwrap(), 3 * (6 + 5) + 1);
}

#[test]
fn test_memory_metrics() {
    let model = code::build(&gauge_params(25)).unwrap();
    let logical = metrics::logical_qubits(model.params()).unwrap();

    assert_eq!(
        metrics::memory_physical_qubits(model.as_ref()).unwrap(),
        model.memory_qubits() * logical
    );
    assert_eq!(
        metrics::memory_modes(model.as_ref()).unwrap(),
        (model.space_modes() * logical, 23)
    );
    assert!(close(
        metrics::full_correction_time(model.as_ref()).unwrap(),
        model.correct_time() * logical as f64 / 2.0
    ));
    assert!(close(
        metrics::memory_limited_time(model.as_ref()).unwrap(),
        metrics::memory_physical_qubits(model.as_ref()).unwrap() as f64 / (4.0 * 12e6 / 10.0)
    ));
}

#[test]
fn test_inter_read_time_is_timing_only() {
    let model = code::build(&gauge_params(45)).unwrap();
    let reading = model.inter_read_time();
    assert!(reading.p.is_none());
    assert!(reading.t > 0.0);
}

#[test]
fn test_iterate_prunes_swapped_windows() {
    let base = uncorrected_params();
    let ranges = SweepRanges::for_code(CodeType::Uncorrected);

    for candidate in search::iterate(&base, &ranges) {
        if let (Some(we), Some(wm)) = (candidate.algo.we, candidate.algo.wm) {
            assert!(wm <= we, "explored a redundant window ordering");
        }
    }
    assert!(
        search::iterate(&base, &ranges)
            .all(|c| !(c.algo.we == Some(3) && c.algo.wm == Some(5)))
    );
}

#[test]
fn test_iterate_substitutes_every_axis() {
    let base = gauge_params(25);
    let ranges = SweepRanges::for_code(CodeType::ThreeDColor)
        .with_ds(vec![Some(31)])
        .with_wes(vec![Some(4)])
        .with_wms(vec![Some(2)])
        .with_ms(vec![Some(17)]);
    let candidates: Vec<_> = search::iterate(&base, &ranges).collect();
    assert_eq!(candidates.len(), 1);
    let candidate = candidates[0];
    assert_eq!(candidate.low_level.d, Some(31));
    assert_eq!(candidate.low_level.d1, None);
    assert_eq!(candidate.algo.we, Some(4));
    assert_eq!(candidate.algo.wm, Some(2));
    assert_eq!(candidate.algo.m, Some(17));
}

#[test]
fn test_find_best_params_uncorrected_end_to_end() {
    let base = Params::new(
        CodeType::Uncorrected,
        AlgoOpts::new(6, metrics::ne_size(6)),
        LowLevelOpts::default(),
    );
    let ranges = SweepRanges::for_code(CodeType::Uncorrected);
    let best = search::find_best_params(&base, 10.0, &ranges).unwrap();

    let (cost, qubits) = search::prepare_resources(&best).unwrap();
    assert!(cost.exp_t().is_finite());
    assert_eq!(qubits, 3);

    let expected_logical = 4 * 6 + 3 * best.algo.m.unwrap() + best.algo.we.unwrap() - 1;
    assert_eq!(metrics::logical_qubits(&best).unwrap(), expected_logical);
}

#[test]
fn test_find_best_params_gauge_restricted() {
    let base = gauge_params(45);
    let ranges = SweepRanges::for_code(CodeType::ThreeDColor)
        .with_ds(vec![Some(45), Some(47)])
        .with_wes(vec![Some(5)])
        .with_wms(vec![Some(5)])
        .with_ms(vec![Some(20), Some(25)]);
    let best = search::find_best_params(&base, 1.0, &ranges).unwrap();

    let (cost, qubits) = search::prepare_resources(&best).unwrap();
    assert!(cost.exp_t().is_finite());
    assert!(qubits > 0);
}

#[test]
fn test_search_exhaustion_on_even_distances() {
    let base = gauge_params(45);
    let ranges = SweepRanges::for_code(CodeType::ThreeDColor)
        .with_ds(vec![Some(2), Some(4)])
        .with_wes(vec![Some(3)])
        .with_wms(vec![Some(2)])
        .with_ms(vec![Some(10)]);
    assert!(matches!(
        search::find_best_params(&base, 1.0, &ranges),
        Err(EstimateError::NoConvergence)
    ));
}
