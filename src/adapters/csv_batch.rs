use crate::core::hooks::TaxIdHooks;
use crate::domain::model::{DocType, PartyRecord};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug, Deserialize)]
struct InputRow {
    doctype: String,
    name: String,
    #[serde(default)]
    tax_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Valid,
    Invalid,
    Skipped,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    doctype: DocType,
    name: &'a str,
    tax_id: &'a str,
    status: RowStatus,
    error: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub skipped: usize,
}

impl BatchReport {
    fn record(&mut self, status: RowStatus) {
        self.total += 1;
        match status {
            RowStatus::Valid => self.valid += 1,
            RowStatus::Invalid => self.invalid += 1,
            RowStatus::Skipped => self.skipped += 1,
        }
    }
}

/// Runs the save-time `tax_id` hook over a CSV of `doctype,name,tax_id` rows.
///
/// Valid tax ids are written back formatted; invalid ones keep the original
/// value and carry the localized message in the `error` column.
pub fn process_csv<R: Read, W: Write>(input: R, output: W, hooks: &TaxIdHooks) -> Result<BatchReport> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let mut report = BatchReport::default();

    for (line, row) in reader.deserialize::<InputRow>().enumerate() {
        let row = row?;
        let doctype: DocType = row.doctype.parse()?;
        let mut record = PartyRecord::new(doctype, row.name, row.tax_id.as_deref());

        let (status, error) = match hooks.validate_tax_id(&mut record) {
            Ok(true) => (RowStatus::Valid, String::new()),
            Ok(false) => (RowStatus::Skipped, String::new()),
            Err(e) if e.is_rejection() => (RowStatus::Invalid, e.to_string()),
            Err(e) => return Err(e),
        };
        tracing::debug!("Row {} ({} {}): {:?}", line + 1, record.doctype, record.name, status);

        writer.serialize(OutputRow {
            doctype: record.doctype,
            name: &record.name,
            tax_id: record.tax_id.as_deref().unwrap_or(""),
            status,
            error: &error,
        })?;
        report.record(status);
    }

    writer.flush()?;
    tracing::info!(
        "Processed {} records: {} valid, {} invalid, {} skipped",
        report.total,
        report.valid,
        report.invalid,
        report.skipped
    );
    Ok(report)
}
