//! Error-correction cost models.
//!
//! The `ErrCorrCode` trait describes an error-correcting code by its
//! elementary gate costs and composes them into costs for circuit
//! primitives: AND computation and uncomputation, MAJ/UMA adder blocks,
//! full and semi-classical additions, table lookups, coset-register
//! initialization, up to the complete modular exponentiation. The shared
//! compositions live in the trait's default methods; each code family
//! overrides the pieces its hardware does differently. `build` selects
//! the implementation from the configuration's code type.
//!
//! Initializing or measuring in the X or Z basis is assumed to cost the
//! same, and CZ is assumed as costly as CNOT.

use qre_common::fit;

use crate::EstimateError;
use crate::cost::PhysicalCost;
use crate::params::{AlgoOpts, CodeType, Params};

/// Algorithm shape with every evaluation-required size resolved.
///
/// Built once at model construction so that the cost methods are total:
/// the coset slack is always present, and the window sizes are present
/// whenever windowed arithmetic is selected. Sizes are kept as `f64`
/// because repetition counts are real-valued.
#[derive(Debug, Clone, Copy)]
pub struct AlgoShape {
    /// Modulus bit width.
    pub n: f64,
    /// Exponent bit width.
    pub ne: f64,
    /// Exponentiation window size (0 when not windowed).
    pub we: f64,
    /// Multiplication window size (0 when not windowed).
    pub wm: f64,
    /// Coset representation slack bits.
    pub m: f64,
    /// Windowed rather than controlled arithmetic.
    pub windowed: bool,
    /// Measurement-based AND uncomputation.
    pub measure_based_deand: bool,
}

impl AlgoShape {
    fn resolve(algo: &AlgoOpts) -> Result<Self, EstimateError> {
        let m = algo.m.ok_or(EstimateError::MissingParameter("m"))? as f64;
        let (we, wm) = if algo.windowed {
            (
                algo.we.ok_or(EstimateError::MissingParameter("we"))? as f64,
                algo.wm.ok_or(EstimateError::MissingParameter("wm"))? as f64,
            )
        } else {
            // Unused by the controlled-arithmetic formulas.
            (
                algo.we.map_or(0.0, |v| v as f64),
                algo.wm.map_or(0.0, |v| v as f64),
            )
        };
        Ok(Self {
            n: algo.n as f64,
            ne: algo.ne as f64,
            we,
            wm,
            m,
            windowed: algo.windowed,
            measure_based_deand: algo.measure_based_deand,
        })
    }

    /// Size of a register in coset representation, `n + m`.
    pub fn coset_size(&self) -> f64 {
        self.n + self.m
    }

    /// Total window input size, `we + wm`.
    pub fn window_total(&self) -> f64 {
        self.we + self.wm
    }
}

// Default table-lookup sizes: total window as address, modulus width as
// target (numbers read are below N, so size n holds despite the coset
// representation).
fn lookup_sizes(shape: &AlgoShape, w: Option<f64>, n: Option<f64>) -> (f64, f64) {
    (
        w.unwrap_or_else(|| shape.window_total()),
        n.unwrap_or(shape.n),
    )
}

/// Cost model of one error-correcting code family.
///
/// Implementations store the elementary gate costs and the processor
/// geometry computed from the low-level parameters; the default methods
/// compose them into the circuit-primitive costs. Instances are built by
/// [`build`] and never mutated afterwards, except for the overridable
/// Toffoli cost.
pub trait ErrCorrCode {
    /// Parameters the model was built from.
    fn params(&self) -> &Params;

    /// Resolved algorithm shape.
    fn shape(&self) -> &AlgoShape;

    /// Cost of one single-qubit logical gate.
    fn gate1(&self) -> PhysicalCost;

    /// Cost of one logical CNOT.
    fn cnot(&self) -> PhysicalCost;

    /// Cost of initializing one logical qubit.
    fn init(&self) -> PhysicalCost;

    /// Cost of measuring one logical qubit.
    fn measure(&self) -> PhysicalCost;

    /// Time for error-correcting one logical qubit, NaN when the code
    /// has no correction cycle.
    fn correct_time(&self) -> f64;

    /// Physical qubits in the processor.
    fn proc_qubits(&self) -> u64;

    /// Physical qubits per logical qubit in memory.
    fn memory_qubits(&self) -> u64;

    /// Spatial modes per logical qubit.
    fn space_modes(&self) -> u64;

    /// Temporal modes of the code.
    ///
    /// Signed: the geometric formulas go negative below the minimal
    /// sensible distance and are preserved as written.
    fn time_modes(&self) -> i64;

    /// Externally imposed Toffoli cost, if any.
    fn toffoli_override(&self) -> Option<PhysicalCost>;

    /// Install or clear an external Toffoli cost.
    fn set_toffoli(&mut self, cost: Option<PhysicalCost>);

    /// Cost of AND computation into an ancillary qubit.
    ///
    /// See arXiv:1805.03662, fig. 4. `|T> = T |+>`, preparing `|+>`
    /// assumed at the same cost as `|0>`.
    fn and_gate(&self) -> PhysicalCost {
        self.init() + 6.0 * self.gate1() + 3.0 * self.cnot()
    }

    /// Cost of AND uncomputation (measurement-based).
    ///
    /// Hadamard gates are merged with preparation/measurements as X and
    /// Z basis measurements are assumed to have equal cost (as in CSS
    /// codes).
    fn deand(&self) -> PhysicalCost {
        self.measure() + 0.5 * self.cnot()
    }

    /// Cost of computing and uncomputing AND.
    fn and_deand(&self) -> PhysicalCost {
        self.and_gate() + self.deand()
    }

    /// Cost of a full Toffoli gate.
    ///
    /// The override slot wins when set; the default decomposition uses
    /// one ancillary qubit.
    fn toffoli(&self) -> PhysicalCost {
        self.toffoli_override()
            .unwrap_or_else(|| self.and_deand() + self.cnot())
    }

    /// Cost of the MAJ operation, with ancillary qubit.
    ///
    /// See arXiv:quant-ph/0410184 for the MAJ and UMA notation.
    fn maj(&self) -> PhysicalCost {
        self.and_gate() + 3.0 * self.cnot()
    }

    /// Cost of the UMA operation, with ancillary qubit.
    ///
    /// No parallelization in this architecture.
    fn uma(&self) -> PhysicalCost {
        3.0 * self.cnot() + self.deand()
    }

    /// Cost of a full adder modulo a power of two, with ancillary
    /// qubits. Defaults to the coset register size.
    fn add(&self, n: Option<f64>) -> PhysicalCost {
        let n = n.unwrap_or_else(|| self.shape().coset_size());
        (n - 2.0) * (self.maj() + self.uma()) + 3.0 * self.cnot() + self.and_deand()
    }

    /// Cost of MAJ, controlled semi-classical version.
    fn semi_classical_ctrl_maj(&self) -> PhysicalCost {
        self.and_gate() + 3.0 * self.cnot()
    }

    /// Cost of UMA, controlled semi-classical version.
    fn semi_classical_ctrl_uma(&self) -> PhysicalCost {
        self.deand() + 2.5 * self.cnot()
    }

    /// Cost of controlled semi-classical addition.
    fn semi_classical_ctrl_add(&self, n: Option<f64>) -> PhysicalCost {
        let n = n.unwrap_or_else(|| self.shape().coset_size());
        (n - 2.0) * (self.semi_classical_ctrl_maj() + self.semi_classical_ctrl_uma())
            + 2.0 * self.cnot()
            + 0.5 * self.and_deand()
    }

    /// Cost of doubly controlled semi-classical addition.
    fn semi_classical_ctrl_ctrl_add(&self, n: Option<f64>) -> PhysicalCost {
        self.and_deand() + self.semi_classical_ctrl_add(n)
    }

    /// Cost of MAJ, semi-classical version.
    fn semi_classical_maj(&self) -> PhysicalCost {
        self.and_gate() + 2.0 * self.cnot() + self.gate1()
    }

    /// Cost of the adjoint MAJ, semi-classical version.
    fn semi_classical_maj_dag(&self) -> PhysicalCost {
        self.deand() + 2.0 * self.cnot() + self.gate1()
    }

    /// Cost of a semi-classical comparison.
    fn semi_classical_comparison(&self, n: Option<f64>) -> PhysicalCost {
        let n = n.unwrap_or_else(|| self.shape().coset_size());
        (n - 1.0) * (self.semi_classical_maj() + self.semi_classical_maj_dag()) + self.cnot()
    }

    /// Cost of the table-lookup circuit, address of size `w`, target of
    /// size `n`.
    fn lookup(&self, w: Option<f64>, n: Option<f64>) -> PhysicalCost {
        let (w, n) = lookup_sizes(self.shape(), w, n);
        2.0 * self.gate1()
            + (2f64.powf(w) - 2.0 + 2f64.powf(w) * n / 2.0) * self.cnot()
            + (2f64.powf(w) - 2.0) * self.and_deand()
    }

    /// Cost of unary representation computation and uncomputation.
    ///
    /// The first NOT is not counted as `|1>` can be directly
    /// initialized.
    fn unary_ununary(&self, size: Option<f64>) -> PhysicalCost {
        let size = size.unwrap_or_else(|| (self.shape().window_total() / 2.0).floor());
        self.init() + 2.0 * (size - 1.0) * self.cnot() + (size - 1.0) * self.and_deand()
    }

    /// Cost of the table-lookup uncomputation.
    ///
    /// Hadamard gates are merged with preparation/measurement.
    fn unlookup(&self, w: Option<f64>, n: Option<f64>) -> PhysicalCost {
        let (w, n) = lookup_sizes(self.shape(), w, n);
        n * self.measure()
            + self.unary_ununary(Some((w / 2.0).floor()))
            + self.lookup(Some((w / 2.0).ceil()), Some((w / 2.0).floor()))
    }

    /// Cost of a table lookup followed by its uncomputation.
    fn look_unlookup(&self, w: Option<f64>, n: Option<f64>) -> PhysicalCost {
        let (w, n) = lookup_sizes(self.shape(), w, n);
        self.lookup(Some(w), Some(n)) + self.unlookup(Some(w), Some(n))
    }

    /// Coset-representation register initialization.
    fn initialize_coset_reg(&self) -> PhysicalCost {
        let shape = self.shape();
        let (m, size) = (shape.m, shape.coset_size());
        m * (self.init() + self.measure())
            + m * self.semi_classical_ctrl_add(Some(size))
            + 0.5 * m * (self.semi_classical_comparison(Some(size)) + self.gate1())
    }

    /// Cost of the modular exponentiation, with windowed arithmetic.
    fn modular_exp_windowed(&self) -> PhysicalCost {
        let shape = self.shape();
        let reps = 2.0 * (shape.ne / shape.we) * shape.coset_size() / shape.wm;
        let classical_error = PhysicalCost::new(2f64.powf(-shape.m), 0.0);
        reps * (self.add(None) + self.look_unlookup(None, None) + classical_error)
            + 2.0 * self.initialize_coset_reg()
    }

    /// Cost of the modular exponentiation, with controlled arithmetic.
    fn modular_exp_controlled(&self) -> PhysicalCost {
        let shape = self.shape();
        let reps = 2.0 * shape.ne * shape.coset_size();
        let classical_error = PhysicalCost::new(2f64.powf(-shape.m), 0.0);
        reps * (self.semi_classical_ctrl_ctrl_add(None) + classical_error)
            + 2.0 * self.initialize_coset_reg()
            + shape.ne * shape.coset_size() * (2.0 * self.cnot() + self.toffoli())
    }

    /// Modular exponentiation cost, strategy taken from the parameters.
    fn modular_exp(&self) -> PhysicalCost {
        if self.shape().windowed {
            self.modular_exp_windowed()
        } else {
            self.modular_exp_controlled()
        }
    }

    /// Maximum time between two readings of a given qubit.
    ///
    /// Time of one product addition; only the timing is meaningful, so
    /// the returned cost tracks no error probability.
    fn inter_read_time(&self) -> PhysicalCost {
        let shape = self.shape();
        if shape.windowed {
            let reps = shape.coset_size() / shape.wm;
            (reps * (self.add(None) + self.look_unlookup(None, None))).time_only()
        } else {
            let reps = shape.coset_size();
            (reps * self.semi_classical_ctrl_ctrl_add(None)).time_only()
        }
    }
}

/// Builds the cost model selected by the configuration's code type.
///
/// Validates the code geometry and the evaluation-required algorithm
/// fields; every failure is raised here, before any cost is computed.
pub fn build(params: &Params) -> Result<Box<dyn ErrCorrCode>, EstimateError> {
    match params.code {
        CodeType::ThreeDColor => Ok(Box::new(ThreeDGaugeCode::new(*params)?)),
        CodeType::Uncorrected => Ok(Box::new(NoCorrCode::new(*params)?)),
    }
}

/// 3-D gauge color code, with code switching.
#[derive(Debug, Clone)]
pub struct ThreeDGaugeCode {
    params: Params,
    shape: AlgoShape,
    gate1: PhysicalCost,
    cnot: PhysicalCost,
    init: PhysicalCost,
    measure: PhysicalCost,
    correct_time: f64,
    proc_qubits: u64,
    memory_qubits: u64,
    space_modes: u64,
    time_modes: i64,
    toffoli: Option<PhysicalCost>,
}

impl ThreeDGaugeCode {
    pub fn new(params: Params) -> Result<Self, EstimateError> {
        let d = params
            .low_level
            .d
            .ok_or(EstimateError::MissingParameter("d"))?;
        let debitage = params.low_level.debitage;
        if d % 2 != 1 {
            return Err(EstimateError::EvenDistance(d));
        }
        if debitage != 1 && debitage != 2 {
            return Err(EstimateError::InvalidDebitage(debitage));
        }
        let shape = AlgoShape::resolve(&params.algo)?;

        // Geometrical characteristics of the tetrahedron cut.
        let memory_qubits = (d.pow(3) + d) / 2;
        let space_modes = if debitage == 1 {
            (1 + 3 * d * d) / 4
        } else {
            (3 * d * d + 2 * d - 3) / 2
        };
        let time_modes = if debitage == 1 {
            2 * d as i64 - 4
        } else {
            d as i64 - 2
        };

        // 2 logical qubit slices, each doubled by measurement ancillas.
        let proc_qubits = 2 * 2 * space_modes;

        // Logical error scaling, arXiv:1503.08217.
        let low = &params.low_level;
        let err = fit::PREFACTOR
            * (fit::ALPHA * (low.pp / fit::THRESHOLD).ln() * (d as f64).powf(fit::BETA)).exp();
        let err_2 = 1.0 - (1.0 - err) * (1.0 - err);
        // Factor 2: one pass for the gate, one for the stabilizer
        // measurement; the actual correction is delayed to the next use
        // and neglected.
        let time = 2.0 * low.tc * time_modes as f64;

        Ok(Self {
            // T, T^dag, H, S, S^dag, CNOT and CZ are transversal.
            gate1: PhysicalCost::new(err, time),
            cnot: PhysicalCost::new(err_2, time),
            init: PhysicalCost::new(err, time / 2.0), // 1 pass
            measure: PhysicalCost::new(err, low.tr + time / 2.0),
            correct_time: time / 2.0,
            proc_qubits,
            memory_qubits,
            space_modes,
            time_modes,
            toffoli: None,
            params,
            shape,
        })
    }
}

impl ErrCorrCode for ThreeDGaugeCode {
    fn params(&self) -> &Params {
        &self.params
    }

    fn shape(&self) -> &AlgoShape {
        &self.shape
    }

    fn gate1(&self) -> PhysicalCost {
        self.gate1
    }

    fn cnot(&self) -> PhysicalCost {
        self.cnot
    }

    fn init(&self) -> PhysicalCost {
        self.init
    }

    fn measure(&self) -> PhysicalCost {
        self.measure
    }

    fn correct_time(&self) -> f64 {
        self.correct_time
    }

    fn proc_qubits(&self) -> u64 {
        self.proc_qubits
    }

    fn memory_qubits(&self) -> u64 {
        self.memory_qubits
    }

    fn space_modes(&self) -> u64 {
        self.space_modes
    }

    fn time_modes(&self) -> i64 {
        self.time_modes
    }

    fn toffoli_override(&self) -> Option<PhysicalCost> {
        self.toffoli
    }

    fn set_toffoli(&mut self, cost: Option<PhysicalCost>) {
        self.toffoli = cost;
    }

    /// AND uncomputation.
    ///
    /// The measurement-based technique is most of the time more
    /// efficient; the gate-based alternative keeps only the gates before
    /// the last CNOT in fig. 4 of arXiv:1805.03662.
    fn deand(&self) -> PhysicalCost {
        if self.shape.measure_based_deand {
            self.measure() + 0.5 * self.cnot() // CZ assumed as CNOT
        } else {
            5.0 * self.gate1() + 3.0 * self.cnot()
        }
    }
}

/// No error correction. The Toffoli gate is assumed elementary.
#[derive(Debug, Clone)]
pub struct NoCorrCode {
    params: Params,
    shape: AlgoShape,
    gate1: PhysicalCost,
    cnot: PhysicalCost,
    init: PhysicalCost,
    measure: PhysicalCost,
    correct_time: f64,
    proc_qubits: u64,
    memory_qubits: u64,
    space_modes: u64,
    time_modes: i64,
    toffoli: Option<PhysicalCost>,
}

impl NoCorrCode {
    pub fn new(params: Params) -> Result<Self, EstimateError> {
        let shape = AlgoShape::resolve(&params.algo)?;
        let low = &params.low_level;
        let err_2 = 1.0 - (1.0 - low.pp).powi(2);
        let err_3 = 1.0 - (1.0 - low.pp).powi(3);
        Ok(Self {
            gate1: PhysicalCost::new(low.pp, low.tc),
            cnot: PhysicalCost::new(err_2, low.tc),
            init: PhysicalCost::new(low.pp, low.tc),
            measure: PhysicalCost::new(low.pp, low.tr),
            // Native three-qubit gate, installed in the override slot.
            toffoli: Some(PhysicalCost::new(err_3, low.tc)),
            correct_time: f64::NAN,
            proc_qubits: 3,
            memory_qubits: 1,
            space_modes: 1,
            time_modes: 1,
            params,
            shape,
        })
    }
}

impl ErrCorrCode for NoCorrCode {
    fn params(&self) -> &Params {
        &self.params
    }

    fn shape(&self) -> &AlgoShape {
        &self.shape
    }

    fn gate1(&self) -> PhysicalCost {
        self.gate1
    }

    fn cnot(&self) -> PhysicalCost {
        self.cnot
    }

    fn init(&self) -> PhysicalCost {
        self.init
    }

    fn measure(&self) -> PhysicalCost {
        self.measure
    }

    fn correct_time(&self) -> f64 {
        self.correct_time
    }

    fn proc_qubits(&self) -> u64 {
        self.proc_qubits
    }

    fn memory_qubits(&self) -> u64 {
        self.memory_qubits
    }

    fn space_modes(&self) -> u64 {
        self.space_modes
    }

    fn time_modes(&self) -> i64 {
        self.time_modes
    }

    fn toffoli_override(&self) -> Option<PhysicalCost> {
        self.toffoli
    }

    fn set_toffoli(&mut self, cost: Option<PhysicalCost>) {
        self.toffoli = cost;
    }

    /// AND computation; no initialization cost as the qubit is recycled.
    fn and_gate(&self) -> PhysicalCost {
        self.toffoli()
    }

    /// AND uncomputation; no measurement cost as the qubit is recycled.
    fn deand(&self) -> PhysicalCost {
        self.toffoli()
    }

    fn maj(&self) -> PhysicalCost {
        self.toffoli() + 2.0 * self.cnot()
    }

    fn uma(&self) -> PhysicalCost {
        self.toffoli() + 2.0 * self.cnot()
    }

    /// Addition with Toffoli gates, see arXiv:quant-ph/0410184.
    fn add(&self, n: Option<f64>) -> PhysicalCost {
        let n = n.unwrap_or_else(|| self.shape().coset_size());
        (n - 3.0) * (self.maj() + self.uma()) + 7.0 * self.cnot() + 3.0 * self.toffoli()
    }
}
