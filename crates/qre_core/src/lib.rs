//! Core cost model for factoring-circuit resource estimation.
//!
//! This crate estimates the physical resources (qubit count, runtime,
//! error probability) required to run a large modular-exponentiation
//! circuit under a chosen quantum error-correcting code, and searches the
//! discrete parameter space for the configuration minimizing a cost
//! metric. The core is purely analytic: it composes closed-form gate
//! costs, performs no I/O, and is deterministic given its inputs.

use thiserror::Error;

/// Composable probabilistic cost values.
///
/// Provides the `PhysicalCost` value type: an error probability paired
/// with a runtime, with operators for serial execution, real-valued
/// repetition, parallel execution, and the expected runtime when failed
/// runs must be retried. All higher-level circuit costs are built by
/// composing these values.
pub mod cost;

/// Parameter records describing the algorithm and the hardware.
///
/// Immutable bundles for the algorithm shape (bit widths, window sizes,
/// coset slack, execution mode) and the low-level code parameters
/// (distances, cycle and reaction times, physical error rate), plus the
/// code-type discriminator that selects the cost model.
pub mod params;

/// Error-correction cost models.
///
/// The `ErrCorrCode` trait exposes the elementary gate costs of a code
/// variant and composes them into costs for circuit primitives up to the
/// full modular exponentiation. One implementation exists per code
/// family, selected from the configuration at construction time.
pub mod code;

/// Derived hardware metrics.
///
/// Pure functions over a constructed cost model: logical-qubit count,
/// in-memory physical qubits, spatial and temporal mode counts, the
/// full-memory correction cadence, and the exponent-size heuristic for
/// the factoring algorithm.
pub mod metrics;

/// Parameter-space search.
///
/// Enumerates candidate parameter bundles over five free axes, prunes
/// redundant orderings, evaluates each candidate through the cost model,
/// and returns the bundle minimizing the `expected time * qubits^bias`
/// metric. Candidates that cannot be evaluated are skipped.
pub mod search;

/// Error type returned by estimator operations.
///
/// Configuration errors are raised when a cost model is built from
/// invalid parameters; the search raises `NoConvergence` after
/// exhausting the candidate space. During a parameter sweep the
/// construction-time errors are candidate-local: the search skips the
/// offending candidate instead of aborting.
#[derive(Debug, Error)]
pub enum EstimateError {
    /// The code-type name is not a known error-correction family.
    ///
    /// Raised at the parsing boundary; within the typed API the invalid
    /// state is unrepresentable.
    #[error("unknown error correction code type: {0:?}")]
    UnknownCodeType(String),

    /// The 3-D gauge color code requires an odd code distance.
    #[error("code distance must be odd, got {0}")]
    EvenDistance(u64),

    /// The tetrahedron cut selector is outside its domain.
    ///
    /// `debitage` is 1 (parallel to the large tetrahedron face) or 2
    /// (orthogonal to two faces).
    #[error("'debitage' takes value 1 or 2, got {0}")]
    InvalidDebitage(u8),

    /// A parameter required to evaluate the configuration is unset.
    ///
    /// The cost formulas need the coset slack `m` (and the window sizes
    /// `we`/`wm` in windowed mode, the distance `d` for the gauge code);
    /// a bundle missing one of them cannot be costed.
    #[error("missing parameter '{0}' required for evaluation")]
    MissingParameter(&'static str),

    /// The search exhausted the candidate space without a feasible point.
    #[error(
        "optimization did not converge: no parameter set allows finishing \
         the computation in finite time"
    )]
    NoConvergence,
}

impl EstimateError {
    /// Whether the error invalidates only one swept candidate.
    ///
    /// The search loop catches exactly this class and continues the
    /// enumeration; every other error propagates to the caller.
    pub fn is_candidate_local(&self) -> bool {
        matches!(
            self,
            Self::EvenDistance(_) | Self::InvalidDebitage(_) | Self::MissingParameter(_)
        )
    }
}
