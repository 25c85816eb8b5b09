// ==========================================
// Labstock - file parsers
// ==========================================
// Supported: spreadsheets (.xlsx/.xls, first sheet only) and
// delimiter-separated text (.csv/.tsv/.txt).
// Output is a positional grid of trimmed cell text. Rows are NOT
// filtered or keyed by header here: header detection happens later
// and row messages refer to grid positions.
// ==========================================

use crate::importer::error::ImportError;
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Raw grid: ordered rows of raw cell values.
pub type RawGrid = Vec<Vec<String>>;

// ==========================================
// FileParser trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// Parse a document into a raw grid of cell text.
    fn parse_to_grid(&self, file_path: &Path) -> Result<RawGrid, Box<dyn Error>>;
}

// ==========================================
// CSV parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// Sniff the cell delimiter from the leading lines. Spreadsheet
    /// exports in this domain are usually semicolon-separated; plain
    /// comma and tab also occur. Counted over several lines because
    /// preamble/title rows often contain no delimiter at all.
    fn sniff_delimiter(path: &Path) -> Result<u8, Box<dyn Error>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let candidates = [b';', b',', b'\t'];
        let mut counts = [0usize; 3];
        for line in reader.lines().take(10) {
            let line = line?;
            for (i, &delimiter) in candidates.iter().enumerate() {
                counts[i] += line.bytes().filter(|&b| b == delimiter).count();
            }
        }

        let best = counts
            .iter()
            .enumerate()
            .max_by_key(|(_, &count)| count)
            .map(|(i, _)| i)
            .unwrap_or(1);
        if counts[best] == 0 {
            return Ok(b',');
        }
        Ok(candidates[best])
    }
}

impl FileParser for CsvParser {
    fn parse_to_grid(&self, file_path: &Path) -> Result<RawGrid, Box<dyn Error>> {
        let path = file_path;

        if !path.exists() {
            return Err(Box::new(ImportError::FileNotFound(
                path.display().to_string(),
            )));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" && ext != "tsv" && ext != "txt" {
            return Err(Box::new(ImportError::UnsupportedFormat(ext)));
        }

        let delimiter = Self::sniff_delimiter(path)?;

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // rows may have uneven lengths
            .delimiter(delimiter)
            .from_reader(file);

        let mut grid = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<String> = record.iter().map(|cell| cell.trim().to_string()).collect();
            grid.push(row);
        }

        Ok(grid)
    }
}

// ==========================================
// Spreadsheet parser
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_grid(&self, file_path: &Path) -> Result<RawGrid, Box<dyn Error>> {
        let path = file_path;

        if !path.exists() {
            return Err(Box::new(ImportError::FileNotFound(
                path.display().to_string(),
            )));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(Box::new(ImportError::UnsupportedFormat(ext.to_string())));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        // First sheet only
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(Box::new(ImportError::ExcelParseError(
                "workbook has no sheets".to_string(),
            )));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut grid = Vec::new();
        for data_row in range.rows() {
            let row: Vec<String> = data_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();
            grid.push(row);
        }

        Ok(grid)
    }
}

// ==========================================
// Universal parser (extension dispatch)
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_grid(&self, file_path: &Path) -> Result<RawGrid, Box<dyn Error>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" | "tsv" | "txt" => CsvParser.parse_to_grid(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_grid(file_path),
            _ => Err(Box::new(ImportError::UnsupportedFormat(ext))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_csv_parser_semicolon_grid() {
        let temp_file = write_csv("Liste over varer;;\nName;Supplier;Price\nNaCl;VWR;120,50\n");

        let grid = CsvParser.parse_to_grid(temp_file.path()).unwrap();

        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1][0], "Name");
        assert_eq!(grid[2][2], "120,50");
    }

    #[test]
    fn test_csv_parser_comma_grid() {
        let temp_file = write_csv("Name,Supplier,Price\nNaCl,VWR,12.50\n");

        let grid = CsvParser.parse_to_grid(temp_file.path()).unwrap();

        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0], vec!["Name", "Supplier", "Price"]);
    }

    #[test]
    fn test_csv_parser_keeps_blank_rows_in_place() {
        let temp_file = write_csv("Name;Price\n;\nNaCl;10\n");

        let grid = CsvParser.parse_to_grid(temp_file.path()).unwrap();

        // Blank rows stay so grid positions (and row messages) are stable
        assert_eq!(grid.len(), 3);
        assert!(grid[1].iter().all(|cell| cell.is_empty()));
        assert_eq!(grid[2][0], "NaCl");
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_grid(Path::new("does_not_exist.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse_to_grid(Path::new("catalog.pdf"));
        assert!(result.is_err());
    }
}
