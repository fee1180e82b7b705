use serde::Deserialize;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::model::{Cents, Event};
use crate::service::MachineInfo;

/// Errors that can occur when parsing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized event '{event}'")]
    UnrecognizedEvent { line: usize, event: String },

    #[error("line {line}: insert missing coin value")]
    MissingValue { line: usize },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    event: String,
    value: Option<Cents>,
}

/// Read machine events from a csv script
pub fn read_events(path: impl AsRef<Path>) -> impl Iterator<Item = Result<Event, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .expect("failed to open csv file");

    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            match row.event.as_str() {
                "insert" => {
                    let value = row.value.ok_or(CsvError::MissingValue { line })?;
                    Ok(Event::InsertCoin(value))
                }
                "dispense" => Ok(Event::Dispense),
                "cancel" => Ok(Event::Cancel),
                other => Err(CsvError::UnrecognizedEvent {
                    line,
                    event: other.to_string(),
                }),
            }
        })
}

/// write the per-event machine snapshots to stdout in csv format
pub fn write_transcript(rows: impl IntoIterator<Item = MachineInfo>) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    for row in rows {
        writer.serialize(&row).expect("failed to write csv row");
    }

    writer.flush().expect("failed to flush csv writer");
}
