//! Formatted terminal output.
//!
//! Formatting lives here so the computation stays free of presentation and
//! output changes stay localized.

use crate::app::pipeline::RunOutput;
use crate::models::PenetrationCurves;
use crate::report::SummaryStats;

/// Format the run header (inputs + grid sizes) and the statistics block.
pub fn format_run_summary(run: &RunOutput) -> String {
    let p = &run.params;
    let mut out = String::new();

    out.push_str("=== biasmap - Foam Sampler Bias Map ===\n");
    out.push_str(&format!(
        "Reference curve: {} | respirable as fraction of: {} | density: {}\n",
        p.data_set,
        p.compare,
        p.density.name()
    ));
    out.push_str(&format!(
        "GSD:  [{}, {}] step {} -> {} values\n",
        p.gsd_min,
        p.gsd_max,
        p.gsd_step,
        run.grid.gsd.len()
    ));
    out.push_str(&format!(
        "MMAD: [{}, {}] step {} -> {} values\n",
        p.mmad_min,
        p.mmad_max,
        p.mmad_step,
        run.grid.mmad.len()
    ));
    out.push_str(&format!(
        "Diameters: n={} | range=[{:.3}, {:.3}] um\n",
        run.curves.diameters.len(),
        run.curves.diameters.first().copied().unwrap_or(f64::NAN),
        run.curves.diameters.last().copied().unwrap_or(f64::NAN),
    ));
    out.push_str(&format!(
        "Area of interest only: {} | cap: {} ({} cells clipped)\n",
        if p.area_of_interest { "yes" } else { "no" },
        p.max_value,
        run.clipped
    ));

    out.push('\n');
    match &run.stats {
        Some(stats) => out.push_str(&format_stats(stats)),
        None => out.push_str("Every cell is masked; no statistics available.\n"),
    }

    out
}

/// Statistics lines in the wording earlier reports used.
pub fn format_stats(stats: &SummaryStats) -> String {
    format!(
        "The average absolute bias: {:.2}\nThe percentage within 10% bias: {:.2}%\n",
        stats.average_abs_bias, stats.percent_within_10
    )
}

/// Fixed-width table of the penetration curves.
pub fn format_curves_table(curves: &PenetrationCurves) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>10} {:>10} {:>10} {:>12} {:>12}\n",
        "dp_um", "foam", "inhalable", "resp/inhal", "resp/total"
    ));
    for (i, d) in curves.diameters.iter().enumerate() {
        out.push_str(&format!(
            "{:>10.3} {:>10.5} {:>10.5} {:>12.5} {:>12.5}\n",
            d,
            curves.foam[i],
            curves.inhalable[i],
            curves.respirable_of_inhalable[i],
            curves.respirable_of_total[i]
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DataSet;

    #[test]
    fn stats_lines_use_two_decimals() {
        let stats = SummaryStats {
            average_abs_bias: 28.0 / 3.0,
            percent_within_10: 200.0 / 3.0,
            cells: 3,
            masked: 0,
        };
        assert_eq!(
            format_stats(&stats),
            "The average absolute bias: 9.33\nThe percentage within 10% bias: 66.67%\n"
        );
    }

    #[test]
    fn curves_table_has_row_per_diameter() {
        let curves = PenetrationCurves::evaluate(&[1.0, 2.0, 3.0], DataSet::Original).unwrap();
        let table = format_curves_table(&curves);
        assert_eq!(table.lines().count(), 4);
        assert!(table.lines().next().unwrap().contains("resp/total"));
    }
}
