//! In-memory slot table parsed from the database CSV.
//!
//! Cells are kept verbatim — no trimming, no quoting rules. The database is
//! machine-managed and its fields are hostnames and conf-file names;
//! embedded commas are out of contract. Persisting writes every non-target
//! column back byte-for-byte.

use hostsync_core::Hostname;

/// Parsed database rows. `rows[0]` is the header and is excluded from
/// hostname lookup and allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    rows: Vec<Vec<String>>,
}

impl SlotTable {
    /// Parse CSV text into rows of verbatim cells.
    pub fn parse(text: &str) -> SlotTable {
        let rows = text
            .lines()
            .map(|line| line.split(',').map(str::to_string).collect())
            .collect();
        SlotTable { rows }
    }

    /// Serialize back to CSV text with a trailing newline.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    /// Whether `hostname` occupies the first column of any data row.
    pub fn contains_host(&self, hostname: &Hostname) -> bool {
        self.data_rows()
            .any(|row| row.first().is_some_and(|cell| cell == &hostname.0))
    }

    /// Write `hostname` into the first data row whose first column is empty.
    ///
    /// Returns the mutated row index (0 = header, so always ≥ 1), or `None`
    /// when every slot is occupied.
    pub fn allocate(&mut self, hostname: &Hostname) -> Option<usize> {
        let row_index = self
            .rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.first().is_some_and(|cell| cell.is_empty()))
            .map(|(i, _)| i)?;
        self.rows[row_index][0] = hostname.0.clone();
        Some(row_index)
    }

    /// Number of data rows with a non-empty first column.
    pub fn occupied_slots(&self) -> usize {
        self.data_rows()
            .filter(|row| row.first().is_some_and(|cell| !cell.is_empty()))
            .count()
    }

    fn data_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.rows.iter().skip(1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
