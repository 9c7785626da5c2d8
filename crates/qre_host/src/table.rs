//! LaTeX results table for the article supplemental material.
//!
//! Evaluates the best configuration for a set of modulus sizes and
//! prints a `tabular` environment meant for
//! `\usepackage[table-figures-decimal=0,table-number-alignment=center]{siunitx}`.
//! Rows are independent searches and are evaluated in parallel.

use anyhow::Result;
use rayon::prelude::*;

use qre_core::EstimateError;
use qre_core::code;
use qre_core::metrics;
use qre_core::params::{AlgoOpts, CodeType, LowLevelOpts, Params};
use qre_core::search::{self, SweepRanges};

use crate::format::format_time;

const HEADERS: [&str; 13] = [
    "$n$",
    "$n_e$",
    "$m$",
    "$w_e$",
    "$w_m$",
    "$d$",
    r"$n_{\text{qubits}}$",
    r"$t_{\text{exp}}$",
    "logical qubits",
    "total modes",
    "spatial modes",
    "temporal modes",
    "all memory correction",
];

// Formatted-time columns, excluded from the width computation.
const SKIP_SIZE: [usize; 2] = [7, 12];
// Vertical separators after the parameter, processor and memory groups.
const SEPS: [usize; 3] = [2, 6, 8];
const JUST: usize = 30;

/// Modulus sizes of the published table, with the metric bias making
/// the small instance meaningful.
const CASES: [(u64, f64); 3] = [(6, 10.0), (829, 1.0), (2048, 1.0)];

/// Prints the supplemental-material table.
pub fn run_table(code_type: CodeType, windowed: bool) -> Result<()> {
    let rows = CASES
        .par_iter()
        .map(|&(n, bias)| {
            let base = Params::new(
                code_type,
                AlgoOpts::new(n, metrics::ne_size(n)).with_windowed(windowed),
                LowLevelOpts::default(),
            );
            let ranges = if windowed {
                SweepRanges::for_code(code_type)
            } else {
                SweepRanges::for_code(code_type)
                    .with_wes(vec![None])
                    .with_wms(vec![None])
            };
            let best = search::find_best_params(&base, bias, &ranges)?;
            table_row(&best)
        })
        .collect::<Result<Vec<_>, EstimateError>>()?;

    let sizes: Vec<Option<usize>> = (0..HEADERS.len())
        .map(|col| {
            if SKIP_SIZE.contains(&col) {
                None
            } else {
                Some(rows.iter().map(|row| row[col].len()).max().unwrap_or(0))
            }
        })
        .collect();

    println!(r"\begin{{tabular}}{{{}}}", table_shape(&sizes, &SEPS, "|"));
    let header = HEADERS
        .iter()
        .map(|h| format!("{:<width$}", format!("{{{h}}}"), width = JUST))
        .collect::<Vec<_>>()
        .join("&");
    println!("\t{header}\\\\ \\hline");
    for row in &rows {
        let line = row
            .iter()
            .map(|cell| format!("{:<width$}", cell, width = JUST))
            .collect::<Vec<_>>()
            .join("&");
        println!("\t{line}\\\\");
    }
    println!(r"\end{{tabular}}");
    Ok(())
}

/// One line of the table.
fn table_row(params: &Params) -> Result<Vec<String>, EstimateError> {
    let model = code::build(params)?;
    let (cost, qubits) = search::prepare_resources(params)?;
    let (space_modes, time_modes) = metrics::memory_modes(model.as_ref())?;
    Ok(vec![
        params.algo.n.to_string(),
        params.algo.ne.to_string(),
        opt_cell(params.algo.m),
        opt_cell(params.algo.we),
        opt_cell(params.algo.wm),
        opt_cell(params.low_level.d),
        qubits.to_string(),
        format_time(cost.exp_t(), false),
        metrics::logical_qubits(params)?.to_string(),
        metrics::memory_physical_qubits(model.as_ref())?.to_string(),
        space_modes.to_string(),
        time_modes.to_string(),
        format_time(metrics::full_correction_time(model.as_ref())?, false),
    ])
}

/// Column layout of the table: `S` columns sized to their contents,
/// `c` for the preformatted ones, separators inserted from the right.
fn table_shape(widths: &[Option<usize>], sep_places: &[usize], sep: &str) -> String {
    let mut columns: Vec<String> = widths
        .iter()
        .map(|width| match width {
            Some(size) => format!("S[table-figures-integer={size}]"),
            None => "c".to_string(),
        })
        .collect();
    let mut places = sep_places.to_vec();
    places.sort_unstable_by(|a, b| b.cmp(a));
    for pos in places {
        columns.insert(pos, sep.to_string());
    }
    columns.concat()
}

fn opt_cell(value: Option<u64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| v.to_string())
}
