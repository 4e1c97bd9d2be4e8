//! CSV serialization of classifier tables.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::error::CoreError;

/// Serializes rows as CSV text.
///
/// Every cell is quoted (embedded quotes are doubled), cells are joined by
/// commas and rows by `\n` with no trailing newline. Rows may differ in length.
pub fn write_table(rows: &[Vec<String>]) -> Result<String, CoreError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| {
        csv::Error::from(std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;

    let mut content = String::from_utf8_lossy(&bytes).into_owned();
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}
