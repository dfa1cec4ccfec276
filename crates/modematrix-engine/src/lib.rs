//! modematrix_engine - Per-row mode computation over a numeric grid.

pub mod engine;
pub mod error;

pub use error::ModeError;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    fn row(text: &[&str]) -> Vec<Cell> {
        text.iter().map(|t| parse_cell(t)).collect()
    }

    #[test]
    fn test_evaluate_from_entry_text() {
        let grid = vec![
            row(&["1", "1", "2"]),
            row(&["", "abc", "  "]),
            row(&["3", "x", "3"]),
        ];
        let batch = evaluate(&grid);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].row, 1);
        assert_eq!(batch[0].mode, 1.0);
        assert_eq!(batch[1].row, 3);
        assert_eq!(batch[1].values, vec![3.0, 3.0]);
    }

    #[test]
    fn test_typo_is_dropped_like_a_blank() {
        let with_typo = evaluate(&[row(&["2", "2o", "5"])]);
        let with_blank = evaluate(&[row(&["2", "", "5"])]);
        assert_eq!(with_typo, with_blank);
    }

    #[test]
    fn test_row_mode_formatting() {
        let batch = evaluate(&[row(&["0.5", "1.5", "0.5"])]);
        assert_eq!(format_values(&batch[0].values), "0.5, 1.5, 0.5");
        assert_eq!(format_number(batch[0].mode), "0.5");
    }
}
