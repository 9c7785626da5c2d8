//! Full resource report for one modulus size.
//!
//! Runs the parameter search for both arithmetic modes and prints the
//! resulting costs and derived metrics. This is the experiment driver
//! behind the `estimate` subcommand.

use anyhow::{Context, Result};
use qre_core::code;
use qre_core::metrics;
use qre_core::params::{AlgoOpts, CodeType, LowLevelOpts, Params};
use qre_core::search::{self, SweepRanges};

use crate::format::format_time;

/// Runs the windowed and controlled estimates for an `n`-bit modulus.
pub fn run_estimate(code_type: CodeType, n: u64, bias: f64) -> Result<()> {
    let base = Params::new(
        code_type,
        AlgoOpts::new(n, metrics::ne_size(n)),
        LowLevelOpts::default(),
    );

    println!("Windowed arithmetic");
    println!("===================");
    let ranges = SweepRanges::for_code(code_type);
    report_one(&base, bias, &ranges).context("windowed estimate failed")?;

    println!();
    println!("Controlled arithmetic");
    println!("=====================");
    let base = base.with_algo(base.algo.with_windowed(false));
    let ranges = SweepRanges::for_code(code_type)
        .with_wes(vec![None])
        .with_wms(vec![None]);
    report_one(&base, bias, &ranges).context("controlled estimate failed")?;

    Ok(())
}

fn report_one(base: &Params, bias: f64, ranges: &SweepRanges) -> Result<()> {
    let best = search::find_best_params(base, bias, ranges)?;
    let model = code::build(&best)?;
    let (cost, qubits) = search::prepare_resources(&best)?;

    println!(
        "Best parameters: d={} we={} wm={} m={}",
        opt(best.low_level.d),
        opt(best.algo.we),
        opt(best.algo.wm),
        opt(best.algo.m),
    );
    println!(
        "Best cost: p = {:.3e}, t = {}, expected time = {} ; {} processor qubits",
        cost.p.unwrap_or(f64::NAN),
        format_time(cost.t, true),
        format_time(cost.exp_t(), true),
        qubits,
    );
    println!(
        "Logical qubits: {}",
        metrics::logical_qubits(&best)?
    );
    println!(
        "Max time between two readings: {}",
        format_time(model.inter_read_time().t, true)
    );
    println!(
        "In-memory physical qubits: {}",
        metrics::memory_physical_qubits(model.as_ref())?
    );
    println!(
        "Full error-correction time: {}",
        format_time(metrics::full_correction_time(model.as_ref())?, true)
    );
    println!(
        "Time if one spatial mode: {}",
        format_time(
            cost.exp_t() * metrics::memory_limited_time(model.as_ref())? / best.low_level.tc,
            true
        )
    );
    Ok(())
}

fn opt(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
