//! Cell data structures for the entry grid.
//!
//! A cell is either a finite number or absent. Text that does not parse as a
//! finite number (blank input, typos, `NaN`, `inf`) is treated as absent rather
//! than as an error, so data entry stays forgiving.

/// A single grid cell: `Some(n)` for a finite number, `None` when absent.
pub type Cell = Option<f64>;

/// Rows of cells, in entry order.
pub type Grid = Vec<Vec<Cell>>;

/// Parse raw cell text into a [`Cell`].
///
/// Surrounding whitespace is ignored. Anything that is not a finite decimal
/// or floating-point literal yields `None`.
pub fn parse_cell(input: &str) -> Cell {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_numbers() {
        assert_eq!(parse_cell("42"), Some(42.0));
        assert_eq!(parse_cell("-3.5"), Some(-3.5));
        assert_eq!(parse_cell(" 7 "), Some(7.0));
        assert_eq!(parse_cell("1e3"), Some(1000.0));
        assert_eq!(parse_cell(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_cell_absent() {
        assert_eq!(parse_cell(""), None);
        assert_eq!(parse_cell("   "), None);
        assert_eq!(parse_cell("abc"), None);
        assert_eq!(parse_cell("12abc"), None);
        assert_eq!(parse_cell("1,5"), None);
    }

    #[test]
    fn test_parse_cell_rejects_non_finite() {
        assert_eq!(parse_cell("NaN"), None);
        assert_eq!(parse_cell("inf"), None);
        assert_eq!(parse_cell("-infinity"), None);
        assert_eq!(parse_cell("1e400"), None);
    }
}
