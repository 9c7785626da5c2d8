//! Parameter records describing the algorithm and the hardware.
//!
//! The records are small `Copy` values; deriving a variant replaces one
//! field through the `with_*` builders and leaves the original intact.
//! `Params` ties an algorithm shape and a set of low-level parameters to
//! the code family that will cost them.

use std::str::FromStr;

use qre_common::hardware;

use crate::EstimateError;

/// Options describing the shape of the factoring algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgoOpts {
    /// Bit width of the number to factor.
    pub n: u64,
    /// Bit width of the exponent.
    pub ne: u64,
    /// Size of the exponentiation window.
    pub we: Option<u64>,
    /// Size of the multiplication window.
    pub wm: Option<u64>,
    /// Bits added for the coset representation.
    pub m: Option<u64>,
    /// Windowed arithmetic rather than fully controlled arithmetic.
    pub windowed: bool,
    /// Measurement-based AND uncomputation.
    ///
    /// Only the 3-D gauge color code offers the choice; the uncorrected
    /// model always uses its native Toffoli and ignores this flag.
    pub measure_based_deand: bool,
}

impl AlgoOpts {
    /// Options for an `n`-bit modulus and `ne`-bit exponent, with window
    /// and slack sizes left unset and windowed arithmetic selected.
    pub fn new(n: u64, ne: u64) -> Self {
        Self {
            n,
            ne,
            we: None,
            wm: None,
            m: None,
            windowed: true,
            measure_based_deand: true,
        }
    }

    /// Same options with the exponentiation window replaced.
    pub fn with_we(self, we: Option<u64>) -> Self {
        Self { we, ..self }
    }

    /// Same options with the multiplication window replaced.
    pub fn with_wm(self, wm: Option<u64>) -> Self {
        Self { wm, ..self }
    }

    /// Same options with the coset slack replaced.
    pub fn with_m(self, m: Option<u64>) -> Self {
        Self { m, ..self }
    }

    /// Same options with the execution mode replaced.
    pub fn with_windowed(self, windowed: bool) -> Self {
        Self { windowed, ..self }
    }

    /// Same options with the AND-uncomputation strategy replaced.
    pub fn with_measure_based_deand(self, measure_based_deand: bool) -> Self {
        Self {
            measure_based_deand,
            ..self
        }
    }
}

/// Low-level code and hardware parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowLevelOpts {
    /// Cut of the tetrahedron for the 3-D gauge color code.
    ///
    /// 1 is parallel to the large tetrahedron face, 2 is orthogonal to
    /// two faces (the article presentation).
    pub debitage: u8,
    /// Distance of the first distillation step.
    pub d1: Option<u64>,
    /// Main code distance.
    pub d: Option<u64>,
    /// Cycle time, in seconds.
    pub tc: f64,
    /// Reaction time, in seconds.
    pub tr: f64,
    /// Error probability of physical gates, identity included.
    pub pp: f64,
}

impl Default for LowLevelOpts {
    fn default() -> Self {
        Self {
            debitage: 2,
            d1: None,
            d: None,
            tc: hardware::CYCLE_TIME,
            tr: hardware::REACTION_TIME,
            pp: hardware::PHYS_GATE_ERROR,
        }
    }
}

impl LowLevelOpts {
    /// Same options with the distillation distance replaced.
    pub fn with_d1(self, d1: Option<u64>) -> Self {
        Self { d1, ..self }
    }

    /// Same options with the main code distance replaced.
    pub fn with_d(self, d: Option<u64>) -> Self {
        Self { d, ..self }
    }

    /// Same options with the tetrahedron cut replaced.
    pub fn with_debitage(self, debitage: u8) -> Self {
        Self { debitage, ..self }
    }

    /// Same options with the physical gate error replaced.
    pub fn with_pp(self, pp: f64) -> Self {
        Self { pp, ..self }
    }

    /// Same options with the cycle time replaced.
    pub fn with_tc(self, tc: f64) -> Self {
        Self { tc, ..self }
    }

    /// Same options with the reaction time replaced.
    pub fn with_tr(self, tr: f64) -> Self {
        Self { tr, ..self }
    }
}

/// Error-correction code family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    /// 3-D gauge color code with code switching.
    ThreeDColor,
    /// No error correction; the Toffoli gate is elementary.
    Uncorrected,
}

impl FromStr for CodeType {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3dcolor" => Ok(Self::ThreeDColor),
            "none" | "uncorrected" => Ok(Self::Uncorrected),
            other => Err(EstimateError::UnknownCodeType(other.to_string())),
        }
    }
}

/// Complete parameter bundle for one estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Code family costing the circuit.
    pub code: CodeType,
    /// Algorithm options.
    pub algo: AlgoOpts,
    /// Low-level options.
    pub low_level: LowLevelOpts,
}

impl Params {
    pub fn new(code: CodeType, algo: AlgoOpts, low_level: LowLevelOpts) -> Self {
        Self {
            code,
            algo,
            low_level,
        }
    }

    /// Same bundle with the algorithm options replaced.
    pub fn with_algo(self, algo: AlgoOpts) -> Self {
        Self { algo, ..self }
    }

    /// Same bundle with the low-level options replaced.
    pub fn with_low_level(self, low_level: LowLevelOpts) -> Self {
        Self { low_level, ..self }
    }
}
