use analytics::PcaReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use core_types::LabeledMatrix;
use eigensolver::ConvergenceStatus;

/// Prints the summary, eigen table, and (optionally) correlation matrix.
pub fn print_report(report: &PcaReport, show_correlation: bool) {
    println!("{}", summary_table(report));
    println!("{}", eigen_table(report));
    if show_correlation {
        println!("{}", matrix_table(&report.correlation));
    }

    if let ConvergenceStatus::IterationCapReached { rotations, residual } = report.result.convergence {
        println!(
            "Note: eigensolver stopped after {} rotations with off-diagonal residual {:.3e}; results are best-effort.",
            rotations, residual
        );
    }
}

fn summary_table(report: &PcaReport) -> Table {
    let result = &report.result;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Main Trend Instrument".to_string(),
        result.main_trend_instrument.to_string(),
    ]);
    table.add_row(vec![
        "Variance Explained (PC1)".to_string(),
        format!("{:.2}%", result.variance_explained),
    ]);
    table.add_row(vec![
        "Total Variance".to_string(),
        format!("{:.6}", result.total_variance),
    ]);
    table.add_row(vec![
        "Trading Days".to_string(),
        report.trading_days.to_string(),
    ]);
    for r in &report.cumulative_returns {
        table.add_row(vec![
            format!("Cumulative Return {}", r.instrument),
            format!("{:.2}%", r.cumulative_return * 100.0),
        ]);
    }
    table
}

/// One row per component: label, eigenvalue, variance share, then one loading per instrument.
fn eigen_table(report: &PcaReport) -> Table {
    let result = &report.result;
    let mut header = vec![
        "Component".to_string(),
        "Eigenvalue".to_string(),
        "Explained".to_string(),
    ];
    header.extend(result.instruments.iter().map(|i| i.to_string()));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);

    for component in &result.components {
        let mut row = vec![
            Cell::new(component.label()),
            Cell::new(format!("{:.6}", component.eigenvalue)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}%", component.variance_explained_pct))
                .set_alignment(CellAlignment::Right),
        ];
        row.extend(component.loadings.iter().map(|w| {
            Cell::new(format!("{:.4}", w)).set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }
    table
}

fn matrix_table(matrix: &LabeledMatrix) -> Table {
    let mut header = vec![String::new()];
    header.extend(matrix.labels().iter().map(|l| l.to_string()));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);

    for (i, label) in matrix.labels().iter().enumerate() {
        let mut row = vec![Cell::new(label)];
        row.extend(matrix.matrix().row(i).iter().map(|v| {
            Cell::new(format!("{:.4}", v)).set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }
    table
}
