//! Heuristic column inference for schemaless scraped tables.

use crate::config::InferenceConfig;
use crate::model::RawTable;

/// Inferred column roles for one raw table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferredColumns {
    pub name_col: usize,
    pub value_col: usize,
    /// True when neither threshold was cleared and positional defaults won.
    pub fallback: bool,
}

/// Guess which column holds entity names and which holds the measurement.
///
/// Per column, over non-blank cells: the fraction containing at least one
/// alphabetic character, and the fraction containing at least one ASCII
/// digit. First column (original order) clearing the alpha threshold is the
/// name column; first column other than it clearing the digit threshold is
/// the value column. Missing either falls back to columns 0 and 1.
pub fn infer_columns(table: &RawTable, config: &InferenceConfig) -> InferredColumns {
    let cols = table.column_count();
    let mut alpha_fraction = vec![0.0f64; cols];
    let mut digit_fraction = vec![0.0f64; cols];

    for col in 0..cols {
        let mut non_blank = 0usize;
        let mut alpha = 0usize;
        let mut digit = 0usize;

        for row in 0..table.rows.len() {
            let cell = table.cell(row, col).trim();
            if cell.is_empty() {
                continue;
            }
            non_blank += 1;
            if cell.chars().any(char::is_alphabetic) {
                alpha += 1;
            }
            if cell.chars().any(|c| c.is_ascii_digit()) {
                digit += 1;
            }
        }

        if non_blank > 0 {
            alpha_fraction[col] = alpha as f64 / non_blank as f64;
            digit_fraction[col] = digit as f64 / non_blank as f64;
        }
    }

    let name_candidate = (0..cols).find(|&c| alpha_fraction[c] > config.name_alpha_fraction);
    let value_candidate = (0..cols)
        .filter(|&c| Some(c) != name_candidate)
        .find(|&c| digit_fraction[c] > config.value_digit_fraction);

    let fallback = name_candidate.is_none() || value_candidate.is_none();

    let name_col = name_candidate.unwrap_or(0);
    // The positional default must never collide with a claimed name column.
    let value_col = value_candidate.unwrap_or(if name_col == 1 { 0 } else { 1 });

    InferredColumns {
        name_col,
        value_col,
        fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn picks_text_and_numeric_columns() {
        let t = table(
            &["Rank", "Country", "GDP"],
            &[
                &["1", "Monaco", "$240,862"],
                &["2", "Liechtenstein", "$187,267"],
                &["3", "Luxembourg", "$135,321"],
            ],
        );
        let inferred = infer_columns(&t, &InferenceConfig::default());
        assert_eq!(inferred.name_col, 1);
        // Rank is first by original order and clears the digit threshold.
        assert_eq!(inferred.value_col, 0);
        assert!(!inferred.fallback);
    }

    #[test]
    fn name_column_wins_over_value_claim() {
        // A single column that is both alphabetic and numeric is claimed as
        // the name column first; value inference must skip it.
        let t = table(
            &["Country", "Life expectancy"],
            &[
                &["Japan[5]", "84.7"],
                &["Switzerland", "84.0"],
                &["Australia", "83.9"],
            ],
        );
        let inferred = infer_columns(&t, &InferenceConfig::default());
        assert_eq!(inferred.name_col, 0);
        assert_eq!(inferred.value_col, 1);
    }

    #[test]
    fn footnotes_do_not_break_name_detection() {
        let t = table(
            &["A", "B"],
            &[
                &["Japan[5]", "84.7"],
                &["France[1]", "82.5"],
                &["Chad", "54.2"],
                &["Peru", "76.5"],
                &["Oman", "73.9"],
            ],
        );
        let inferred = infer_columns(&t, &InferenceConfig::default());
        assert_eq!(inferred.name_col, 0);
        assert_eq!(inferred.value_col, 1);
        assert!(!inferred.fallback);
    }

    #[test]
    fn positional_fallback_when_nothing_clears() {
        let t = table(&["A", "B"], &[&["", ""], &["", ""]]);
        let inferred = infer_columns(&t, &InferenceConfig::default());
        assert_eq!(inferred.name_col, 0);
        assert_eq!(inferred.value_col, 1);
        assert!(inferred.fallback);
    }

    #[test]
    fn fallback_value_never_collides_with_name() {
        // Name lands in column 1 and nothing clears the digit threshold; the
        // positional default must not hand the value role to the same column.
        let t = table(
            &["Notes", "Country"],
            &[&["", "Japan"], &["", "Chad"], &["", "Peru"]],
        );
        let inferred = infer_columns(&t, &InferenceConfig::default());
        assert_eq!(inferred.name_col, 1);
        assert_eq!(inferred.value_col, 0);
        assert!(inferred.fallback);
    }

    #[test]
    fn blank_cells_excluded_from_fractions() {
        // 2 of 2 non-blank cells alphabetic; blanks must not dilute below 0.8.
        let t = table(
            &["Country", "Value"],
            &[
                &["Japan", "84.7"],
                &["", "1.0"],
                &["Chad", "54.2"],
                &["", "2.0"],
                &["", "3.0"],
            ],
        );
        let inferred = infer_columns(&t, &InferenceConfig::default());
        assert_eq!(inferred.name_col, 0);
        assert!(!inferred.fallback);
    }

    #[test]
    fn thresholds_are_configurable() {
        let t = table(
            &["Mixed", "Value"],
            &[
                &["Japan", "84.7"],
                &["123", "54.2"],
                &["Chad", "76.5"],
                &["456", "73.9"],
            ],
        );
        // 0.5 alpha fraction fails the default threshold...
        let strict = infer_columns(&t, &InferenceConfig::default());
        assert!(strict.fallback);
        // ...but clears a relaxed one.
        let relaxed = InferenceConfig {
            name_alpha_fraction: 0.4,
            value_digit_fraction: 0.3,
        };
        let inferred = infer_columns(&t, &relaxed);
        assert_eq!(inferred.name_col, 0);
        assert_eq!(inferred.value_col, 1);
        assert!(!inferred.fallback);
    }
}
