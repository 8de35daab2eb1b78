//! Pipe table parsing.

/// Table with a header row and uniform data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Number of header cells; every data row has exactly this many cells.
    pub column_count: usize,
    pub header_row: Vec<String>,
    pub data_rows: Vec<Vec<String>>,
}

/// Reason a run of pipe-delimited lines is not a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// First line has no non-empty cells.
    #[error("table header has no cells")]
    EmptyHeader,
    /// Fewer than two lines (header and separator) were given.
    #[error("table requires a header and a separator line")]
    MissingSeparator,
}

/// Parse pipe-delimited lines into a [`Table`].
///
/// The first line is the header. The second line is the separator and is
/// skipped without validation, so `---`, `:---:` and similar all work.
/// Data rows whose cell count differs from the header are dropped.
///
/// # Example
///
/// ```
/// use mdnotion_blocks::parse_table;
///
/// let table = parse_table(&["a|b", "--|--", "1|2"]).unwrap();
/// assert_eq!(table.column_count, 2);
/// assert_eq!(table.data_rows, vec![vec!["1".to_owned(), "2".to_owned()]]);
/// ```
pub fn parse_table<S: AsRef<str>>(lines: &[S]) -> Result<Table, TableError> {
    let [header, _separator, rows @ ..] = lines else {
        return Err(TableError::MissingSeparator);
    };

    let header_row = split_cells(header.as_ref());
    if header_row.is_empty() {
        return Err(TableError::EmptyHeader);
    }
    let column_count = header_row.len();

    let data_rows = rows
        .iter()
        .map(|line| split_cells(line.as_ref()))
        .filter(|cells| cells.len() == column_count)
        .collect();

    Ok(Table {
        column_count,
        header_row,
        data_rows,
    })
}

/// Split on `|`, trim each piece and drop empty ones.
///
/// Empty cells in the middle of a row are dropped too, which shifts the row
/// out of shape and gets it discarded by [`parse_table`].
fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_owned)
        .collect()
}
