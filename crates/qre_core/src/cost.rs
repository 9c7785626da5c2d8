//! Composable cost of probabilistic circuit executions.
//!
//! A `PhysicalCost` carries the failure probability and the runtime of
//! one circuit fragment. Fragments compose with `+` (serial execution),
//! `k *` (serial repetition, `k` real since some gates are applied
//! probabilistically), `|` (parallel execution) and `-` (reverting a
//! previous or future addition). The underlying `f64` representation
//! carries infinite and astronomically large durations without overflow.

use std::ops::{Add, BitOr, Mul, Sub};

/// Error probability and runtime of some gates.
///
/// `p` is `None` when error tracking has been intentionally discarded
/// and only the timing is meaningful; any composition involving such a
/// value stays time-only. Otherwise `0 <= p <= 1` is the caller's
/// invariant (subtraction can leave the range if misused, see `Sub`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalCost {
    /// Failure probability, `None` once error tracking is discarded.
    pub p: Option<f64>,
    /// Runtime in seconds.
    pub t: f64,
}

impl PhysicalCost {
    /// Cost with a tracked failure probability.
    pub fn new(p: f64, t: f64) -> Self {
        Self { p: Some(p), t }
    }

    /// Same cost with error tracking discarded.
    pub fn time_only(self) -> Self {
        Self { p: None, t: self.t }
    }

    /// Average runtime, several attempts possibly being required.
    ///
    /// Passes the raw time through when no probability is tracked,
    /// returns infinity on certain failure, and `t / (1 - p)` otherwise.
    pub fn exp_t(&self) -> f64 {
        match self.p {
            None => self.t,
            Some(p) if p >= 1.0 => f64::INFINITY,
            Some(p) => self.t / (1.0 - p),
        }
    }
}

// Independent-failure union; time-only operands stay time-only.
fn union(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(pa), Some(pb)) => Some(1.0 - (1.0 - pa) * (1.0 - pb)),
        _ => None,
    }
}

impl Add for PhysicalCost {
    type Output = Self;

    /// Cost of sequential execution of `self` and `rhs`.
    fn add(self, rhs: Self) -> Self {
        Self {
            p: union(self.p, rhs.p),
            t: self.t + rhs.t,
        }
    }
}

impl Sub for PhysicalCost {
    type Output = Self;

    /// Reverts a previous or future addition.
    ///
    /// Defined as serial composition with the inverse repetition,
    /// `self + (-1) * rhs`. Well-defined only while the reverted term
    /// keeps the probability in [0, 1]; callers own that invariant.
    fn sub(self, rhs: Self) -> Self {
        self + -1.0 * rhs
    }
}

impl Mul<f64> for PhysicalCost {
    type Output = Self;

    /// Cost of sequential execution of `self`, `rhs` times.
    fn mul(self, rhs: f64) -> Self {
        Self {
            p: self.p.map(|p| 1.0 - (1.0 - p).powf(rhs)),
            t: self.t * rhs,
        }
    }
}

impl Mul<PhysicalCost> for f64 {
    type Output = PhysicalCost;

    fn mul(self, rhs: PhysicalCost) -> PhysicalCost {
        rhs * self
    }
}

impl BitOr for PhysicalCost {
    type Output = Self;

    /// Cost of parallel execution of `self` and `rhs`.
    fn bitor(self, rhs: Self) -> Self {
        Self {
            p: union(self.p, rhs.p),
            t: self.t.max(rhs.t),
        }
    }
}
