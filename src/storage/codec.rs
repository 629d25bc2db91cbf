//! Flat line codec for ledger records
//!
//! A record is stored as six comma-separated fields in the order
//! `date,description,category,kind,amount,notes`. There is no quoting: commas
//! in the notes are replaced with semicolons when writing (the original comma
//! cannot be recovered), and a comma in any other field will make the line
//! unreadable on the next load.

use thiserror::Error;

use crate::models::Record;

/// Field delimiter of the ledger file
pub const DELIMITER: char = ',';

/// Replacement for delimiters found in the notes field
pub const NOTES_SUBSTITUTE: char = ';';

/// Number of fields in a well-formed line
pub const FIELD_COUNT: usize = 6;

/// Why a stored line could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("expected 6 fields, found {found}")]
    FieldCount { found: usize },

    #[error("unknown kind '{0}' (expected Income or Expense)")]
    UnknownKind(String),
}

/// Parse one stored line
///
/// Date and amount are taken verbatim; only the field count and the kind
/// label are checked here.
pub fn parse(line: &str) -> Result<Record, ParseFailure> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    let &[date, description, category, kind, amount, notes] = fields.as_slice() else {
        return Err(ParseFailure::FieldCount {
            found: fields.len(),
        });
    };

    let kind = kind
        .parse()
        .map_err(|_| ParseFailure::UnknownKind(kind.to_string()))?;

    Ok(Record {
        date: date.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        kind,
        amount: amount.to_string(),
        notes: notes.to_string(),
    })
}

/// Serialize a record into one stored line
pub fn serialize(record: &Record) -> String {
    let notes = record.notes.replace(DELIMITER, &NOTES_SUBSTITUTE.to_string());
    [
        record.date.as_str(),
        record.description.as_str(),
        record.category.as_str(),
        record.kind.as_str(),
        record.amount.as_str(),
        notes.as_str(),
    ]
    .join(&DELIMITER.to_string())
}
