use serde_json::Value;

use crate::domain::{Category, Description, Title, VideoDetails, Views};
use crate::error::{ConsoleError, Result};

/// Builds one validated `VideoDetails` from a raw API record.
///
/// Any invalid field aborts the whole record; no partially-built video is
/// ever returned.
pub fn video_details(record: &Value) -> Result<VideoDetails> {
    let id = int_field(record, "id")?;
    let title = Title::new(str_field(record, "title")?)?;
    let description = Description::new(str_field(record, "description")?)?;
    let author_name = str_field(record, "author_name")?;
    let category = Category::from_code(str_field(record, "category")?)?;
    let views = Views::new(int_field(record, "views")?)?;

    VideoDetails::new(id, title, description, author_name, category, views)
}

fn str_field<'a>(record: &'a Value, field: &'static str) -> Result<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ConsoleError::MissingField(field.to_string()))
}

/// The API serves integers both as JSON numbers and as numeric strings,
/// so both are accepted here.
fn int_field(record: &Value, field: &'static str) -> Result<i64> {
    let value = record
        .get(field)
        .ok_or_else(|| ConsoleError::MissingField(field.to_string()))?;
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| ConsoleError::Validation {
            field,
            reason: format!("not an integer: {n}"),
        }),
        Value::String(s) => s.trim().parse().map_err(|_| ConsoleError::Validation {
            field,
            reason: format!("not an integer: '{s}'"),
        }),
        other => Err(ConsoleError::Validation {
            field,
            reason: format!("expected an integer, got {other}"),
        }),
    }
}
