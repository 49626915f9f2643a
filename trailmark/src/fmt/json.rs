use crate::{FieldMap, Record};
use serde_json::Value;
use std::fmt;
use tracing_core::Level;
use tracing_subscriber::fmt::format::Writer;

/// Key of the timestamp in a JSON record.
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Key of the level in a JSON record.
pub const LEVEL_KEY: &str = "level";

/// Key of the message in a JSON record.
pub const MESSAGE_KEY: &str = "message";

/// Writes the record as a single-line JSON object. Data fields that would
/// overwrite one of the fixed keys are moved to `fields.<key>`.
pub(super) fn write_record(
    writer: &mut Writer<'_>,
    record: &Record<'_>,
    timestamp: &str,
) -> fmt::Result {
    let mut object = FieldMap::new();

    for (key, value) in record.fields() {
        let key = match key.as_str() {
            TIMESTAMP_KEY | LEVEL_KEY | MESSAGE_KEY => format!("fields.{key}"),
            _ => key.clone(),
        };
        object.insert(key, value.clone());
    }

    object.insert(TIMESTAMP_KEY.to_string(), Value::from(timestamp));
    object.insert(LEVEL_KEY.to_string(), Value::from(level_name(record.level())));
    object.insert(MESSAGE_KEY.to_string(), Value::from(record.message()));

    let line = serde_json::to_string(&object).map_err(|_| fmt::Error)?;

    writeln!(writer, "{line}")
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::ERROR => "error",
        Level::WARN => "warning",
        Level::INFO => "info",
        Level::DEBUG => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn fixed_keys_and_clashes() {
        // Given
        let record = Record::new(Level::WARN, "careful")
            .with_caller("/src/main.rs", 3)
            .with_field("level", "user-supplied")
            .with_field("attempt", 2);
        let mut buffer = String::new();

        // When
        write_record(&mut Writer::new(&mut buffer), &record, "01-02-2026 03:04:05").unwrap();

        // Then
        assert!(buffer.ends_with('\n'));
        let actual_output: Value = serde_json::from_str(buffer.trim_end()).unwrap();
        assert_eq!(
            actual_output,
            json!({
                "timestamp": "01-02-2026 03:04:05",
                "level": "warning",
                "message": "careful",
                "fields.level": "user-supplied",
                "attempt": 2,
            }),
        );
    }
}
