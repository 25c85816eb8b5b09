// ==========================================
// Labstock - header locator
// ==========================================
// Uploaded sheets carry a varying number of preamble rows (titles,
// legends, blank lines) before the actual header. Scan a bounded
// window of leading rows; the first row containing a sentinel label
// wins.
// ==========================================

/// Default scan window (rows)
pub const HEADER_SCAN_WINDOW: usize = 10;

/// Cell labels that identify the header row. Exact match after trim.
pub const HEADER_SENTINELS: [&str; 2] = ["Name", "Item ID"];

pub struct HeaderLocator;

impl HeaderLocator {
    /// Find the header row within the first `scan_window` rows.
    ///
    /// Returns the 0-based grid index of the header row, or None if
    /// no row in the window qualifies.
    pub fn locate(grid: &[Vec<String>], scan_window: usize) -> Option<usize> {
        grid.iter()
            .take(scan_window)
            .position(|row| Self::is_header_row(row))
    }

    fn is_header_row(row: &[String]) -> bool {
        row.iter()
            .any(|cell| HEADER_SENTINELS.contains(&cell.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_locates_header_after_preamble() {
        let grid = vec![
            row(&["Bestillingsliste kjemi", "", ""]),
            row(&["", "", ""]),
            row(&["Name", "Supplier", "Price"]),
            row(&["NaCl", "VWR", "120,50"]),
        ];

        assert_eq!(HeaderLocator::locate(&grid, HEADER_SCAN_WINDOW), Some(2));
    }

    #[test]
    fn test_sentinel_matches_after_trim_only() {
        let grid = vec![row(&["  Name  ", "Price"])];
        assert_eq!(HeaderLocator::locate(&grid, HEADER_SCAN_WINDOW), Some(0));

        // Substring hits do not qualify
        let grid = vec![row(&["Name of owner", "Price"])];
        assert_eq!(HeaderLocator::locate(&grid, HEADER_SCAN_WINDOW), None);
    }

    #[test]
    fn test_external_id_label_is_a_sentinel() {
        let grid = vec![row(&["Item ID", "Price"])];
        assert_eq!(HeaderLocator::locate(&grid, HEADER_SCAN_WINDOW), Some(0));
    }

    #[test]
    fn test_never_scans_beyond_window() {
        let mut grid: Vec<Vec<String>> = (0..HEADER_SCAN_WINDOW)
            .map(|i| row(&[&format!("preamble {}", i)]))
            .collect();
        grid.push(row(&["Name", "Price"])); // row 11, outside the window

        assert_eq!(HeaderLocator::locate(&grid, HEADER_SCAN_WINDOW), None);
    }

    #[test]
    fn test_first_qualifying_row_wins() {
        let grid = vec![
            row(&["Name", "Price"]),
            row(&["Name", "Supplier", "Price"]),
        ];
        assert_eq!(HeaderLocator::locate(&grid, HEADER_SCAN_WINDOW), Some(0));
    }
}
