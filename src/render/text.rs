//! Plain text renderer implementation.

use crate::fund::{FifoOutcome, Report};
use unicode_width::UnicodeWidthStr;

/// Render the report as the human-readable summary.
pub fn to_text(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("== Resumen de simulación ==\n");
    output.push_str(&format!(
        "Saldo de cuotapartes: {:.2}\n",
        report.remaining_units
    ));
    output.push_str(&format!(
        "Saldo valorizado (FIFO): {:.2}\n",
        report.valued_balance
    ));
    output.push_str("Totales consolidados de FCI:\n");

    let valuation = [
        ("Valuación Impositiva:", report.tax_valuation_total),
        ("Valuación Contable:", report.accounting_valuation_total),
    ];
    let label_width = valuation
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or(0);
    for (label, value) in valuation {
        output.push_str(&format!("  {} {:.2}\n", pad(label, label_width), value));
    }

    output.push_str(&format!(
        "Rentas de fuente argentina (IIBB): {:.2}\n",
        report.argentine_source_income_total
    ));

    output
}

/// Render the open FIFO lots as an ASCII table followed by the balances.
pub fn lots_to_text(outcome: &FifoOutcome) -> String {
    let header = ["#", "Cuotapartes", "Valor cuotaparte", "Valorizado"];
    let rows: Vec<[String; 4]> = outcome
        .open_lots
        .iter()
        .enumerate()
        .map(|(i, lot)| {
            [
                (i + 1).to_string(),
                format!("{:.6}", lot.units),
                format!("{:.6}", lot.unit_value),
                format!("{:.2}", lot.units * lot.unit_value),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let border = {
        let mut line = String::from("+");
        for w in &widths {
            line.push_str(&"-".repeat(*w + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut output = String::new();
    output.push_str(&border);
    output.push('|');
    for (cell, w) in header.iter().zip(&widths) {
        output.push_str(&format!(" {} |", pad(cell, *w)));
    }
    output.push('\n');
    output.push_str(&border);
    for row in &rows {
        output.push('|');
        for (cell, w) in row.iter().zip(&widths) {
            output.push_str(&format!(" {:>width$} |", cell, width = *w));
        }
        output.push('\n');
    }
    if !rows.is_empty() {
        output.push_str(&border);
    }

    output.push_str(&format!(
        "Saldo de cuotapartes: {:.6}\n",
        outcome.balance_units
    ));
    output.push_str(&format!(
        "Último valor cuotaparte: {:.6}\n",
        outcome.last_unit_value
    ));
    output.push_str(&format!(
        "Saldo valorizado (FIFO): {:.2}\n",
        outcome.balance_value
    ));
    if outcome.unmatched_units > 0.0 {
        output.push_str(&format!(
            "Rescates sin cuotapartes disponibles: {:.6}\n",
            outcome.unmatched_units
        ));
    }

    output
}

/// Left-align `text` to a display width; `format!` pads by chars, not columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}
