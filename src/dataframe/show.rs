//! Text table rendering for `DataFrame::show`.

use sparkling_core::{Row, Value};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cells longer than this are cut by `show()`.
pub const DEFAULT_TRUNCATE: usize = 20;

const MIN_COL_WIDTH: usize = 3;

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Long(i) => i.to_string(),
        Value::Double(d) => double_text(*d),
        Value::String(s) => s.clone(),
    }
}

/// Doubles print like the JVM's `Double.toString`: plain decimal for
/// magnitudes in `[1e-3, 1e7)`, otherwise `<mantissa>E<exp>` with at least
/// one fractional digit.
fn double_text(d: f64) -> String {
    if d.is_nan() {
        return "NaN".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let abs = d.abs();
    if abs == 0.0 || (1e-3..1e7).contains(&abs) {
        return format!("{d:?}");
    }
    let sci = format!("{d:e}");
    match sci.split_once('e') {
        Some((mantissa, exp)) if mantissa.contains('.') => format!("{mantissa}E{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}.0E{exp}"),
        None => sci,
    }
}

/// Longest prefix of `text` whose display width fits in `max_width`.
fn take_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= max_width
        })
        .collect()
}

fn truncate_cell(text: String, truncate: usize) -> String {
    if truncate == 0 || text.width() <= truncate {
        return text;
    }
    if truncate < 4 {
        take_width(&text, truncate)
    } else {
        let mut cut = take_width(&text, truncate - 3);
        cut.push_str("...");
        cut
    }
}

/// Render header and rows as a bordered table. Column widths are display
/// widths, so fullwidth characters take two columns. Cells are right-aligned when
/// truncating and left-aligned otherwise. `shown_of_more` is `Some(n)` when
/// rows beyond the first `n` were left out.
pub(super) fn render_table(
    names: &[String],
    rows: &[Row],
    truncate: usize,
    shown_of_more: Option<usize>,
) -> String {
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    grid.push(
        names
            .iter()
            .map(|n| truncate_cell(n.clone(), truncate))
            .collect(),
    );
    for row in rows {
        grid.push(
            row.values()
                .iter()
                .map(|v| truncate_cell(cell_text(v), truncate))
                .collect(),
        );
    }

    let mut widths = vec![MIN_COL_WIDTH; names.len()];
    for line in &grid {
        for (w, cell) in widths.iter_mut().zip(line) {
            *w = (*w).max(cell.width());
        }
    }

    let sep: String = widths
        .iter()
        .fold(String::from("+"), |mut acc, w| {
            acc.push_str(&"-".repeat(*w));
            acc.push('+');
            acc
        })
        + "\n";

    let render_line = |line: &[String]| -> String {
        let mut out = String::from("|");
        for (cell, &w) in line.iter().zip(&widths) {
            let pad = " ".repeat(w.saturating_sub(cell.width()));
            if truncate > 0 {
                out.push_str(&pad);
                out.push_str(cell);
            } else {
                out.push_str(cell);
                out.push_str(&pad);
            }
            out.push('|');
        }
        out.push('\n');
        out
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push_str(&render_line(&grid[0]));
    out.push_str(&sep);
    for line in &grid[1..] {
        out.push_str(&render_line(line));
    }
    out.push_str(&sep);
    if let Some(n) = shown_of_more {
        let noun = if n == 1 { "row" } else { "rows" };
        out.push_str(&format!("only showing top {n} {noun}\n"));
    }
    out
}
