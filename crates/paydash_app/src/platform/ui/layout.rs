use super::constants::COLUMN_SEPARATOR;

/// Lays out a header row, a rule and the body rows with padded columns.
pub fn table_lines(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let widths = column_widths(headers, rows);
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_padded(headers, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(rows.iter().map(|row| join_padded(row, &widths)));
    lines
}

/// `label: value` pairs with labels aligned.
pub fn key_value_lines<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<String> {
    let pairs: Vec<_> = pairs.into_iter().collect();
    let width = pairs
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    pairs
        .into_iter()
        .map(|(label, value)| format!("{label:<width$} : {value}"))
        .collect()
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
        .trim_end()
        .to_string()
}
