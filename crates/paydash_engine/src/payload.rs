use paydash_core::{FetchFailure, PayloadShape, Record};
use serde_json::Value;

/// Pulls the records out of a decoded response body.
///
/// The collection field must exist and be an array; anything else is a
/// malformed payload. Array elements that are not objects are skipped.
pub fn extract_records(
    payload: Value,
    collection: &str,
    shape: PayloadShape,
) -> Result<Vec<Record>, FetchFailure> {
    let Value::Object(mut body) = payload else {
        return Err(FetchFailure::no_data());
    };
    let Some(Value::Array(items)) = body.remove(collection) else {
        return Err(FetchFailure::no_data());
    };
    let records = items.into_iter().filter_map(Record::from_value);
    Ok(match shape {
        PayloadShape::Collection => records.collect(),
        PayloadShape::FirstOnly => records.take(1).collect(),
    })
}
