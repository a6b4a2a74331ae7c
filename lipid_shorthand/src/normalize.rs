//! Normalization of names taken from external lipid databases
//!
//! Each database row is parsed with the dialect of its source and rendered
//! at the lipid's own level with normalized head groups. Rows that cannot be
//! normalized carry a marker instead of a name.

use crate::grammar::dialect::Dialect;
use crate::pipeline::{self, PipelineError};
use crate::resolution::ResolutionError;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};

/// Name rejected by the dialect grammar
pub const NOT_DETECTED: &str = "N.D.";
/// Name parsed, but uses a feature the resolver does not implement
pub const NOT_IMPLEMENTED: &str = "N.I.";

pub const SWISS_LIPIDS_URL: &str = "https://www.swisslipids.org/#/entity/";

const TSV_HEADER: &str =
    "databaseUrl\tdatabaseElementId\tlipidLevel\tnativeAbbreviation\tnativeName\tnormalizedName";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDatabaseReference {
    pub database_url: String,
    pub database_element_id: String,
    /// Level label as reported by the database
    pub lipid_level: String,
    pub native_abbreviation: String,
    pub native_name: String,
    pub normalized_name: String,
}

impl ExternalDatabaseReference {
    pub fn new(
        database_url: &str,
        database_element_id: &str,
        lipid_level: &str,
        native_abbreviation: &str,
        native_name: &str,
        normalized_name: String,
    ) -> Self {
        Self {
            database_url: database_url.to_string(),
            database_element_id: database_element_id.to_string(),
            lipid_level: lipid_level.to_string(),
            native_abbreviation: native_abbreviation.to_string(),
            native_name: native_name.to_string(),
            normalized_name,
        }
    }

    /// SwissLipids export row: `SLID  LEVEL  NAME  ABBREVIATION  SYNONYMS...`
    ///
    /// The NAME column is the one normalized. Rows with fewer than four
    /// columns are skipped.
    pub fn from_swiss_lipids_row(row: &str) -> Option<Self> {
        let columns: Vec<&str> = row.split('\t').collect();
        if columns.len() < 4 {
            return None;
        }
        let normalized = normalize_abbreviation(Dialect::SwissLipids, columns[2]);
        Some(Self::new(
            SWISS_LIPIDS_URL,
            columns[0],
            columns[1],
            columns[3],
            columns[2],
            normalized,
        ))
    }

    pub fn tsv_header() -> &'static str {
        TSV_HEADER
    }

    pub fn to_tsv_row(&self) -> String {
        [
            self.database_url.as_str(),
            self.database_element_id.as_str(),
            self.lipid_level.as_str(),
            self.native_abbreviation.as_str(),
            self.native_name.as_str(),
            self.normalized_name.as_str(),
        ]
        .join("\t")
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized_name != NOT_DETECTED && self.normalized_name != NOT_IMPLEMENTED
    }
}

/// Normalized name at the lipid's own level, or one of the two markers
pub fn normalize_abbreviation(dialect: Dialect, text: &str) -> String {
    match pipeline::parse(dialect, text) {
        Ok(adduct) => adduct
            .lipid()
            .map(|lipid| lipid.lipid_string(true))
            .unwrap_or_default(),
        Err(error) => {
            let marker = marker_for(&error);
            crate::log_warning!(code = error.error_code(), "Name not normalized",
                "name" => text,
                "dialect" => dialect.as_str(),
                "marker" => marker
            );
            marker.to_string()
        }
    }
}

fn marker_for(error: &PipelineError) -> &'static str {
    match error {
        PipelineError::Resolution(
            ResolutionError::UnsupportedFeature { .. }
            | ResolutionError::NumberFormat { .. }
            | ResolutionError::MalformedTree { .. },
        ) => NOT_IMPLEMENTED,
        // grammar rejects and constraint violations alike
        _ => NOT_DETECTED,
    }
}

/// Normalize a SwissLipids export, skipping its header line
///
/// Returns the number of rows written.
pub fn normalize_swiss_lipids_table<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<usize> {
    writeln!(output, "{}", ExternalDatabaseReference::tsv_header())?;

    let mut written = 0;
    for line in input.lines().skip(1) {
        let line = line?;
        if let Some(reference) = ExternalDatabaseReference::from_swiss_lipids_row(&line) {
            writeln!(output, "{}", reference.to_tsv_row())?;
            written += 1;
        }
    }

    crate::log_info!("Normalized database table", "rows" => written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_markers() {
        assert_eq!(normalize_abbreviation(Dialect::SwissLipids, "PE(18:0/"), NOT_DETECTED);
        assert_eq!(normalize_abbreviation(Dialect::SwissLipids, ""), NOT_DETECTED);
        assert_eq!(normalize_abbreviation(Dialect::SwissLipids, "PE(i-16:0/18:1)"), NOT_IMPLEMENTED);
        assert_eq!(
            normalize_abbreviation(Dialect::SwissLipids, "PE(99999999999:0/18:1)"),
            NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_normalized_at_native_level() {
        assert_eq!(normalize_abbreviation(Dialect::SwissLipids, "CE(12:1)"), "ChE 12:1");
        assert_eq!(
            normalize_abbreviation(Dialect::SwissLipids, "TG(14:0_16:0_18:1)"),
            "TG 14:0_16:0_18:1"
        );
        assert_eq!(normalize_abbreviation(Dialect::SwissLipids, "SM(d32:0)"), "SM 32:0;2");
    }

    #[test]
    fn test_swiss_lipids_table() {
        let table = "SLID\tLEVEL\tNAME\tABBREVIATION\tSYNONYMS1\n\
                     SLM:000000510\tSpecies\tCE(12:1)\tCE 12:1\t\n\
                     SLM:000000511\tSpecies\tPE(18:0/\tPE broken\t\n\
                     short row\n";
        let mut output = Vec::new();
        let written = normalize_swiss_lipids_table(Cursor::new(table), &mut output).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ExternalDatabaseReference::tsv_header());
        assert!(lines[1].ends_with("\tChE 12:1"));
        assert!(lines[1].starts_with(SWISS_LIPIDS_URL));
        assert!(lines[2].ends_with(NOT_DETECTED));
    }

    #[test]
    fn test_row_fields() {
        let reference =
            ExternalDatabaseReference::from_swiss_lipids_row("SLM:1\tSpecies\tFA(18:4)\tFA 18:4").unwrap();
        assert_eq!(reference.database_element_id, "SLM:1");
        assert_eq!(reference.native_name, "FA(18:4)");
        assert_eq!(reference.native_abbreviation, "FA 18:4");
        assert_eq!(reference.normalized_name, "FA 18:4");
        assert!(reference.is_normalized());
    }
}
