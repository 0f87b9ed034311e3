//! Plain-text rendering of an experiment report.

use std::fmt::Write;

use cf_inference::ExperimentReport;

fn fmt_num(v: f64) -> String {
    if v.is_nan() { "NaN".to_string() } else { format!("{v:.4}") }
}

fn fmt_p(p: f64) -> String {
    if p.is_nan() {
        "NaN".to_string()
    } else if p < 1e-4 {
        "<1e-4".to_string()
    } else {
        format!("{p:.4}")
    }
}

/// One block per model: coefficient, std error, t, p, population target.
pub fn render_tables(report: &ExperimentReport) -> String {
    let mut out = String::new();
    writeln!(out, "rows: {}  seed: {}", report.n_rows, report.seed).unwrap();
    writeln!(out, "total treatment effect: {}", fmt_num(report.total_treatment_effect)).unwrap();

    for m in &report.models {
        writeln!(out).unwrap();
        writeln!(out, "{}", m.formula).unwrap();
        writeln!(
            out,
            "{:<14}{:>12}{:>12}{:>12}{:>10}{:>12}",
            "term", "estimate", "std.error", "t", "p", "population"
        )
        .unwrap();
        for (c, pop) in m.fit.coefficients.iter().zip(&m.population) {
            writeln!(
                out,
                "{:<14}{:>12}{:>12}{:>12}{:>10}{:>12}",
                c.name,
                fmt_num(c.estimate),
                fmt_num(c.std_error),
                fmt_num(c.t_value),
                fmt_p(c.p_value),
                fmt_num(*pop)
            )
        .unwrap();
        }
        writeln!(
            out,
            "R² = {}, residual s.e. = {} on {} df",
            fmt_num(m.fit.r_squared),
            fmt_num(m.fit.residual_std_error),
            m.fit.df_resid
        )
        .unwrap();
    }
    out
}
