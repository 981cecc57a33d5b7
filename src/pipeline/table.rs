//! Table formatting: markdown-style table text → 2D array of cell strings.
//!
//! The backend emits table content as text with pipe- or
//! whitespace-delimited rows. This module restructures that into
//! `Vec<Vec<String>>` with trimmed cells and no type inference. Malformed
//! input never fails the conversion: ragged rows log a warning and the
//! best-effort partial array is emitted as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static RE_MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}|\t").unwrap());

/// Convert raw table text into a 2D array of trimmed cell strings.
///
/// - Blank lines and GFM separator rows (`| --- | --- |`) are skipped.
/// - Rows containing `|` are split on pipes, with outer pipes stripped.
/// - Other rows are split on runs of two or more spaces (or tabs).
/// - Empty cells become empty strings.
///
/// Idempotent on well-formed row/column text: re-splitting rows rendered
/// with ` | ` between cells yields the same array.
pub fn format_table(raw: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_separator_row(trimmed) {
            continue;
        }
        rows.push(split_row(trimmed));
    }

    if let Some(width) = rows.first().map(Vec::len) {
        if rows.iter().any(|r| r.len() != width) {
            warn!(
                "Malformed table text: ragged row widths (first row has {} cells); \
                 emitting best-effort array",
                width
            );
        }
    }

    rows
}

/// A separator row contains only `|`, `-`, `:`, and whitespace.
fn is_separator_row(line: &str) -> bool {
    line.starts_with('|')
        && line.contains('-')
        && line
            .chars()
            .all(|c| c == '|' || c == '-' || c == ':' || c == ' ')
}

/// Split one row into trimmed cells.
fn split_row(line: &str) -> Vec<String> {
    if line.contains('|') {
        let mut inner = line;
        inner = inner.strip_prefix('|').unwrap_or(inner);
        inner = inner.strip_suffix('|').unwrap_or(inner);
        inner.split('|').map(|c| c.trim().to_string()).collect()
    } else {
        RE_MULTI_SPACE
            .split(line)
            .map(|c| c.trim().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(rows: &[Vec<String>]) -> Vec<Vec<&str>> {
        rows.iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn pipe_table_with_separator() {
        let raw = "| Name | Value |\n| --- | --- |\n| a | 1 |\n| b | 2 |";
        let table = format_table(raw);
        assert_eq!(
            cells(&table),
            vec![vec!["Name", "Value"], vec!["a", "1"], vec!["b", "2"]]
        );
    }

    #[test]
    fn pipe_table_without_outer_pipes() {
        let raw = "Name | Value\na | 1";
        let table = format_table(raw);
        assert_eq!(cells(&table), vec![vec!["Name", "Value"], vec!["a", "1"]]);
    }

    #[test]
    fn whitespace_delimited_rows() {
        let raw = "Name    Value   Unit\nspeed   42      m/s";
        let table = format_table(raw);
        assert_eq!(
            cells(&table),
            vec![vec!["Name", "Value", "Unit"], vec!["speed", "42", "m/s"]]
        );
    }

    #[test]
    fn empty_cells_become_empty_strings() {
        let table = format_table("| a |  | c |");
        assert_eq!(cells(&table), vec![vec!["a", "", "c"]]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let table = format_table("| a | b |\n\n| c | d |");
        assert_eq!(cells(&table), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn single_cell_row_survives() {
        let table = format_table("just one value");
        assert_eq!(cells(&table), vec![vec!["just one value"]]);
    }

    #[test]
    fn ragged_rows_are_kept_best_effort() {
        let raw = "| a | b | c |\n| 1 | 2 |";
        let table = format_table(raw);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].len(), 3);
        assert_eq!(table[1].len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_array() {
        assert!(format_table("").is_empty());
        assert!(format_table("\n\n").is_empty());
    }

    #[test]
    fn formatting_is_idempotent_on_well_formed_rows() {
        let raw = "| Name | Value |\n| --- | --- |\n| a | 1 |\n| b |  |";
        let first = format_table(raw);

        // Render the array back to row/column text and reformat it.
        let rendered = first
            .iter()
            .map(|row| format!("| {} |", row.join(" | ")))
            .collect::<Vec<_>>()
            .join("\n");
        let second = format_table(&rendered);

        assert_eq!(first, second);
    }

    #[test]
    fn separator_variants_are_skipped() {
        let raw = "| a | b |\n|:---|---:|\n| 1 | 2 |";
        let table = format_table(raw);
        assert_eq!(table.len(), 2);
    }
}
