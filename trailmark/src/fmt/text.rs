use crate::Record;
use crate::color::paint;
use colored::Color;
use serde_json::Value;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use tracing_core::Level;
use tracing_subscriber::fmt::format::Writer;

/// Writes one line: `DD-MM-YYYY HH:MM:SS  LEVEL  file.rs:42  message  key=value ...`
///
/// With `ansi`, the level and the field keys are painted in the level’s color.
pub(super) fn write_record(
    writer: &mut Writer<'_>,
    record: &Record<'_>,
    timestamp: &str,
    ansi: bool,
) -> fmt::Result {
    let color = level_color(record.level());
    let level = format!("{:<5}", record.level().as_str());

    write!(writer, "{timestamp}  ")?;
    if ansi {
        writer.write_str(&paint(&level, color))?;
    } else {
        writer.write_str(&level)?;
    }

    if let (Some(file), Some(line)) = (record.file(), record.line()) {
        write!(writer, "  {}:{}", base_name(file), line)?;
    }

    write!(writer, "  {}", record.message())?;

    for (index, (key, value)) in record.fields().iter().enumerate() {
        writer.write_str(if index == 0 { "  " } else { " " })?;
        if ansi {
            write!(writer, "{}=", paint(key, color))?;
        } else {
            write!(writer, "{key}=")?;
        }
        write_value(writer, value)?;
    }

    writeln!(writer)
}

/// Strips the directories from a source path.
fn base_name(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(file)
}

fn level_color(level: Level) -> Color {
    match level {
        Level::ERROR => Color::Red,
        Level::WARN => Color::Yellow,
        Level::INFO => Color::Cyan,
        _ => Color::White,
    }
}

fn write_value(writer: &mut Writer<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(text) if !needs_quoting(text) => writer.write_str(text),
        quoted => write!(writer, "{quoted}"),
    }
}

/// Strings made only of ASCII alphanumerics and `-._/@^+` go out bare.
fn needs_quoting(text: &str) -> bool {
    text.chars()
        .any(|ch| !(ch.is_ascii_alphanumeric() || "-._/@^+".contains(ch)))
}
