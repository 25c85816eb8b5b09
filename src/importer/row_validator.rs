// ==========================================
// Labstock - row validator
// ==========================================
// Decides whether a mapped row is a genuine catalog item or noise.
// The source sheets interleave data with section headings
// ("Kjemikalier", "Utstyr", divider rows), which must be rejected
// without aborting the batch.
// ==========================================

use crate::domain::item::RawItemRow;
use crate::importer::error::{ImportError, ImportResult};

/// Exact section names used in the source sheets (case-insensitive).
const SECTION_NAMES: [&str; 5] = [
    "kjemikalier",
    "forbruksvarer",
    "utstyr",
    "glassutstyr",
    "diverse",
];

/// Substrings that mark divider/annotation rows.
const SECTION_MARKERS: [&str; 3] = ["---", "se egen liste", "bestilles separat"];

pub struct RowValidator {
    min_name_length: usize,
}

impl RowValidator {
    pub fn new(min_name_length: usize) -> Self {
        Self { min_name_length }
    }

    /// Reject rows that do not represent a catalog item. The error is
    /// row-scoped; the coordinator records it and moves on.
    pub fn validate(&self, row: &RawItemRow) -> ImportResult<()> {
        let name = match row.name.as_deref().map(str::trim) {
            None | Some("") => return Err(ImportError::MissingName),
            Some(name) => name,
        };

        if name.chars().count() < self.min_name_length {
            return Err(ImportError::NameTooShort {
                name: name.to_string(),
            });
        }

        let lowered = name.to_lowercase();
        if SECTION_NAMES.iter().any(|section| lowered == *section)
            || SECTION_MARKERS.iter().any(|marker| lowered.contains(marker))
        {
            return Err(ImportError::SectionHeading {
                name: name.to_string(),
            });
        }

        Ok(())
    }
}

impl Default for RowValidator {
    fn default() -> Self {
        Self::new(crate::config::config_defaults::MIN_NAME_LENGTH)
    }
}
