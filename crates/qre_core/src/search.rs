//! Parameter-space search.
//!
//! Enumerates every combination of the five free axes (distillation
//! distance, code distance, exponentiation window, multiplication
//! window, coset slack), evaluates the full-circuit cost of each
//! candidate, and keeps the one minimizing `expected time *
//! qubits^bias`. Candidates whose cost model cannot be built are
//! skipped; a fully infeasible space is a convergence failure.

use crate::EstimateError;
use crate::code;
use crate::cost::PhysicalCost;
use crate::params::{CodeType, Params};

/// Value ranges for the free parameter axes.
///
/// Each axis is a list of optional values substituted into the base
/// bundle; `None` entries leave the corresponding field unset, for axes
/// a code family or arithmetic mode does not use.
#[derive(Debug, Clone)]
pub struct SweepRanges {
    /// Distillation distances.
    pub d1s: Vec<Option<u64>>,
    /// Main code distances.
    pub ds: Vec<Option<u64>>,
    /// Exponentiation window sizes.
    pub wes: Vec<Option<u64>>,
    /// Multiplication window sizes.
    pub wms: Vec<Option<u64>>,
    /// Coset slack sizes.
    pub ms: Vec<Option<u64>>,
}

impl SweepRanges {
    /// Default ranges for a code family.
    ///
    /// The gauge code sweeps odd distances densely; the uncorrected
    /// model has no distance axes to explore.
    pub fn for_code(code: CodeType) -> Self {
        match code {
            CodeType::ThreeDColor => Self {
                d1s: vec![None],
                ds: (1..100).step_by(2).map(Some).collect(),
                wes: (1..10).map(Some).collect(),
                wms: (1..10).map(Some).collect(),
                ms: (1..40).map(Some).collect(),
            },
            CodeType::Uncorrected => Self {
                d1s: vec![None],
                ds: vec![None],
                wes: (1..10).map(Some).collect(),
                wms: (1..10).map(Some).collect(),
                ms: (1..40).map(Some).collect(),
            },
        }
    }

    /// Same ranges with the distillation-distance axis replaced.
    pub fn with_d1s(mut self, d1s: Vec<Option<u64>>) -> Self {
        self.d1s = d1s;
        self
    }

    /// Same ranges with the code-distance axis replaced.
    pub fn with_ds(mut self, ds: Vec<Option<u64>>) -> Self {
        self.ds = ds;
        self
    }

    /// Same ranges with the exponentiation-window axis replaced.
    pub fn with_wes(mut self, wes: Vec<Option<u64>>) -> Self {
        self.wes = wes;
        self
    }

    /// Same ranges with the multiplication-window axis replaced.
    pub fn with_wms(mut self, wms: Vec<Option<u64>>) -> Self {
        self.wms = wms;
        self
    }

    /// Same ranges with the coset-slack axis replaced.
    pub fn with_ms(mut self, ms: Vec<Option<u64>>) -> Self {
        self.ms = ms;
        self
    }
}

/// Lazily enumerates the candidate bundles of a sweep.
///
/// Yields the Cartesian product of the configured ranges substituted
/// into the base bundle. Since the two window sizes play the same role,
/// only one ordering of each pair is explored.
pub fn iterate<'a>(
    base: &'a Params,
    ranges: &'a SweepRanges,
) -> impl Iterator<Item = Params> + 'a {
    ranges.d1s.iter().copied().flat_map(move |d1| {
        ranges.ds.iter().copied().flat_map(move |d| {
            ranges.wes.iter().copied().flat_map(move |we| {
                ranges.wms.iter().copied().flat_map(move |wm| {
                    ranges.ms.iter().copied().filter_map(move |m| {
                        if let (Some(we), Some(wm)) = (we, wm) {
                            if wm > we {
                                return None;
                            }
                        }
                        Some(Params {
                            algo: base.algo.with_we(we).with_wm(wm).with_m(m),
                            low_level: base.low_level.with_d1(d1).with_d(d),
                            ..*base
                        })
                    })
                })
            })
        })
    })
}

/// Scores the quality of a resource cost; lower is better.
///
/// `bias` weights the qubit count against the expected runtime.
pub fn score(cost: &PhysicalCost, qubits: u64, bias: f64) -> f64 {
    cost.exp_t() * (qubits as f64).powf(bias)
}

/// Full-circuit cost and processor qubit count of one parameter bundle.
pub fn prepare_resources(params: &Params) -> Result<(PhysicalCost, u64), EstimateError> {
    let model = code::build(params)?;
    Ok((model.modular_exp(), model.proc_qubits()))
}

/// Finds the best parameter bundle over the given ranges.
///
/// Candidates failing with a candidate-local error are treated as
/// infeasible and skipped; any other error aborts the search. Returns
/// `NoConvergence` when no candidate is feasible.
pub fn find_best_params(
    base: &Params,
    bias: f64,
    ranges: &SweepRanges,
) -> Result<Params, EstimateError> {
    let mut best_score = f64::INFINITY;
    let mut best: Option<Params> = None;
    for candidate in iterate(base, ranges) {
        let (cost, qubits) = match prepare_resources(&candidate) {
            Ok(resources) => resources,
            Err(err) if err.is_candidate_local() => continue,
            Err(err) => return Err(err),
        };
        let candidate_score = score(&cost, qubits, bias);
        if candidate_score < best_score {
            best_score = candidate_score;
            best = Some(candidate);
        }
    }
    best.ok_or(EstimateError::NoConvergence)
}
