//! Text charts for terminals.
//!
//! Bars scale so the largest value fills `width` cells. Partial cells use the
//! eighth-block characters so small differences stay visible.

use crate::analyser::logic::YearLanguageMatrix;

const EIGHTHS: [char; 8] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Horizontal bar chart, one line per `(label, value)` row.
pub fn bar_chart(rows: &[(String, f64)], width: usize) -> String {
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        .min(28);

    let mut out = String::new();
    for (label, value) in rows {
        let label: String = label.chars().take(label_width).collect();
        out.push_str(&format!(
            "{label:<label_width$} │{} {}\n",
            bar(*value, max, width),
            format_value(*value)
        ));
    }
    out
}

fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 || width == 0 {
        return String::new();
    }
    let eighths = (value / max * width as f64 * 8.0).round() as usize;
    let full = eighths / 8;
    let rest = eighths % 8;

    let mut s = "█".repeat(full);
    if rest > 0
        && let Some(c) = EIGHTHS.get(rest - 1)
    {
        s.push(*c);
    }
    s
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Shaded year × language grid; darker cells hold more books.
pub fn heat_grid(matrix: &YearLanguageMatrix) -> String {
    let max = matrix
        .year_lang_counts
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str("       ");
    for lang in &matrix.languages {
        let short: String = lang.chars().take(3).collect();
        out.push_str(&format!("{short:>4}"));
    }
    out.push('\n');

    for (year, cells) in matrix.years.iter().zip(&matrix.year_lang_counts) {
        out.push_str(&format!("{year:<6} "));
        for &count in cells {
            let shade = shade(count, max);
            out.push_str(&format!("  {shade}{shade}"));
        }
        out.push('\n');
    }

    out.push_str(&format!("\nScale: ' ' = 0 … '█' = {max}\n"));
    out
}

fn shade(count: usize, max: usize) -> char {
    if count == 0 || max == 0 {
        return ' ';
    }
    // Any non-zero count gets at least the lightest visible shade.
    let steps = SHADES.len() - 1;
    let level = (count * steps).div_ceil(max).clamp(1, steps);
    SHADES.get(level).copied().unwrap_or('█')
}
