//! The brand roster: which archives to scrape and how each brand is tagged.
//!
//! The roster is a CSV with header `BrandName,Url,isFastFashion`. Iteration
//! order is the order in which brand names first appear in the file, and that
//! order drives the row order of the output.

use crate::error::RosterError;
use crate::models::BrandRecord;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Ordered, name-keyed set of brands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    brands: Vec<BrandRecord>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Build a roster from records in file order.
    ///
    /// A repeated name keeps the position of its first row and the values of
    /// its last one.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = BrandRecord>,
    {
        let mut roster = Self::default();
        for record in records {
            match roster.index.get(&record.name) {
                Some(&pos) => {
                    warn!(brand = %record.name, "Duplicate brand in roster; later row wins");
                    roster.brands[pos] = record;
                }
                None => {
                    roster.index.insert(record.name.clone(), roster.brands.len());
                    roster.brands.push(record);
                }
            }
        }
        roster
    }

    /// Parse a roster from CSV data.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, RosterError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let records = reader
            .deserialize::<BrandRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_records(records))
    }

    /// Load a roster file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        let file = std::fs::File::open(path).map_err(|source| RosterError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let roster = Self::from_reader(file)?;
        info!(
            brands = roster.len(),
            fast_fashion = roster.brands.iter().filter(|b| b.is_fast_fashion).count(),
            "Loaded brand roster"
        );
        debug!(names = ?roster.names().collect::<Vec<_>>(), "Roster brands");
        Ok(roster)
    }

    /// Brands in roster order.
    pub fn brands(&self) -> &[BrandRecord] {
        &self.brands
    }

    /// Brand names in roster order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.brands.iter().map(|b| b.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}
