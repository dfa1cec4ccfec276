use super::state::{CellPos, Document, column_label};
use crate::error::{ModeMatrixError, Result};

impl Document {
    /// Append a blank row at the bottom.
    pub fn add_row(&mut self) {
        self.rows.push(vec![String::new(); self.column_count()]);
    }

    /// Append a blank column at the right, labelled `Column <count+1>`.
    pub fn add_column(&mut self) {
        self.labels.push(column_label(self.column_count() + 1));
        for row in &mut self.rows {
            row.push(String::new());
        }
    }

    /// Remove the bottom row. The last remaining row cannot be removed.
    pub fn remove_row(&mut self) -> Result<()> {
        if self.rows.len() <= 1 {
            return Err(ModeMatrixError::CannotRemoveLastRow);
        }
        self.rows.pop();
        Ok(())
    }

    /// Remove the rightmost column. The last remaining column cannot be removed.
    pub fn remove_column(&mut self) -> Result<()> {
        if self.labels.len() <= 1 {
            return Err(ModeMatrixError::CannotRemoveLastColumn);
        }
        self.labels.pop();
        for row in &mut self.rows {
            row.pop();
        }
        Ok(())
    }

    pub fn set_cell(&mut self, pos: CellPos, text: &str) -> Result<()> {
        let cell = self
            .rows
            .get_mut(pos.row)
            .and_then(|row| row.get_mut(pos.col))
            .ok_or(ModeMatrixError::CellOutOfBounds {
                row: pos.row,
                col: pos.col,
            })?;
        *cell = text.to_string();
        Ok(())
    }

    /// Blank every cell, keeping the table's shape and labels.
    pub fn clear_values(&mut self) {
        for cell in self.rows.iter_mut().flatten() {
            cell.clear();
        }
    }

    /// Move to the same column one row down, appending a row when `pos` is on
    /// the bottom row.
    pub fn advance_down(&mut self, pos: CellPos) -> CellPos {
        let next = CellPos::new(pos.row + 1, pos.col.min(self.column_count() - 1));
        while next.row >= self.row_count() {
            self.add_row();
        }
        next
    }

    /// Move to the top cell of the next column, appending a column when `pos`
    /// is in the rightmost column.
    pub fn advance_right(&mut self, pos: CellPos) -> CellPos {
        let next = CellPos::new(0, pos.col + 1);
        while next.col >= self.column_count() {
            self.add_column();
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_enforces_minimum_shape() {
        let doc = Document::new(0, 0);
        assert_eq!(doc.row_count(), 1);
        assert_eq!(doc.column_count(), 1);
        assert_eq!(doc.column_labels(), ["Column 1"]);
    }

    #[test]
    fn test_add_row_and_column() {
        let mut doc = Document::new(2, 2);
        doc.add_column();
        doc.add_row();
        assert_eq!(doc.row_count(), 3);
        assert_eq!(doc.column_count(), 3);
        assert_eq!(doc.column_labels()[2], "Column 3");
        assert!(doc.rows().iter().all(|row| row.len() == 3));
    }

    #[test]
    fn test_remove_keeps_last_row_and_column() {
        let mut doc = Document::new(2, 2);
        doc.remove_row().unwrap();
        doc.remove_column().unwrap();
        assert!(matches!(doc.remove_row(), Err(ModeMatrixError::CannotRemoveLastRow)));
        assert!(matches!(
            doc.remove_column(),
            Err(ModeMatrixError::CannotRemoveLastColumn)
        ));
        assert_eq!((doc.row_count(), doc.column_count()), (1, 1));
    }

    #[test]
    fn test_remove_column_drops_values() {
        let mut doc = Document::new(1, 2);
        doc.set_cell(CellPos::new(0, 1), "9").unwrap();
        doc.remove_column().unwrap();
        doc.add_column();
        assert_eq!(doc.cell(CellPos::new(0, 1)), Some(""));
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut doc = Document::new(1, 1);
        assert!(matches!(
            doc.set_cell(CellPos::new(1, 0), "1"),
            Err(ModeMatrixError::CellOutOfBounds { row: 1, col: 0 })
        ));
        assert_eq!(doc.cell(CellPos::new(0, 5)), None);
    }

    #[test]
    fn test_clear_values_keeps_shape() {
        let mut doc = Document::new(2, 3);
        doc.set_cell(CellPos::new(1, 2), "4").unwrap();
        doc.clear_values();
        assert_eq!(doc.cell(CellPos::new(1, 2)), Some(""));
        assert_eq!((doc.row_count(), doc.column_count()), (2, 3));
    }

    #[test]
    fn test_advance_down_appends_row_at_bottom() {
        let mut doc = Document::new(2, 2);
        assert_eq!(doc.advance_down(CellPos::new(0, 1)), CellPos::new(1, 1));
        assert_eq!(doc.row_count(), 2);
        assert_eq!(doc.advance_down(CellPos::new(1, 1)), CellPos::new(2, 1));
        assert_eq!(doc.row_count(), 3);
    }

    #[test]
    fn test_advance_right_jumps_to_top_of_next_column() {
        let mut doc = Document::new(3, 2);
        assert_eq!(doc.advance_right(CellPos::new(2, 0)), CellPos::new(0, 1));
        assert_eq!(doc.column_count(), 2);
        assert_eq!(doc.advance_right(CellPos::new(1, 1)), CellPos::new(0, 2));
        assert_eq!(doc.column_count(), 3);
        assert_eq!(doc.column_labels()[2], "Column 3");
    }

    #[test]
    fn test_to_grid_parses_cells() {
        let mut doc = Document::new(2, 2);
        doc.set_cell(CellPos::new(0, 0), "1.5").unwrap();
        doc.set_cell(CellPos::new(0, 1), "oops").unwrap();
        assert_eq!(doc.to_grid(), vec![vec![Some(1.5), None], vec![None, None]]);
    }
}
