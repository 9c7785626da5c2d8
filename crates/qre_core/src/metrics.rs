//! Derived hardware metrics.
//!
//! Pure functions over a constructed cost model and its parameters:
//! qubit counts, mode counts, correction cadence and the exponent-size
//! heuristic. The reporting layers consume these as plain numbers.

use qre_common::hardware;

use crate::EstimateError;
use crate::code::ErrCorrCode;
use crate::params::Params;

/// Logical qubit count of the algorithm.
///
/// Adapts to the type of arithmetic: `4n + 3m + we - 1` for windowed,
/// `3(n + m) + 1` for controlled.
pub fn logical_qubits(params: &Params) -> Result<u64, EstimateError> {
    let algo = &params.algo;
    let m = algo.m.ok_or(EstimateError::MissingParameter("m"))?;
    if algo.windowed {
        let we = algo.we.ok_or(EstimateError::MissingParameter("we"))?;
        Ok(4 * algo.n + 3 * m + we - 1)
    } else {
        Ok(3 * (algo.n + m) + 1)
    }
}

/// Number of physical qubits resident in memory.
pub fn memory_physical_qubits(code: &dyn ErrCorrCode) -> Result<u64, EstimateError> {
    Ok(code.memory_qubits() * logical_qubits(code.params())?)
}

/// Spatial and temporal mode counts of the memory.
pub fn memory_modes(code: &dyn ErrCorrCode) -> Result<(u64, i64), EstimateError> {
    Ok((
        code.space_modes() * logical_qubits(code.params())?,
        code.time_modes(),
    ))
}

/// Time for error-correcting the whole memory.
///
/// Two qubit slices in the processor allow correcting two logical
/// qubits at a time.
pub fn full_correction_time(code: &dyn ErrCorrCode) -> Result<f64, EstimateError> {
    Ok(code.correct_time() * logical_qubits(code.params())? as f64 / 2.0)
}

/// Cycle time when limited by the memory readout rate.
pub fn memory_limited_time(code: &dyn ErrCorrCode) -> Result<f64, EstimateError> {
    Ok(memory_physical_qubits(code)? as f64 / hardware::QUBIT_ACCESS_RATE)
}

/// Estimates the exponent size `ne` for an `n`-bit number to factor.
///
/// See A.2.1 of eprint.iacr.org/2017/1122; the correction delta applies
/// from 1024 bits up.
pub fn ne_size(n: u64) -> u64 {
    let delta = if n >= 1024 { 20 } else { 0 };
    let m = n.div_ceil(2) - 1;
    let l = m - delta;
    m + 2 * l
}
