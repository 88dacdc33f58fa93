//! Typed field values of the document-store wire format.
//!
//! Firestore documents carry each field as a one-key object naming its type
//! (`{"stringValue": "..."}`, `{"timestampValue": "..."}`,
//! `{"arrayValue": {"values": [...]}}`). Reading goes through
//! `serde_json::Value` so documents with extra fields of any type pass
//! through untouched.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::domain::foundation::{Timestamp, TopicId};
use crate::domain::preferences::{Topic, UserProfile};
use crate::ports::StoreError;

/// Wraps a string as a typed field value.
pub(crate) fn string_value(s: impl Into<String>) -> Value {
    json!({ "stringValue": s.into() })
}

/// Wraps a timestamp as a typed field value.
pub(crate) fn timestamp_value(ts: &Timestamp) -> Value {
    json!({ "timestampValue": ts.to_rfc3339() })
}

/// Wraps strings as a typed array-of-strings field value.
pub(crate) fn string_array_value<'a>(items: impl IntoIterator<Item = &'a str>) -> Value {
    let values: Vec<Value> = items.into_iter().map(string_value).collect();
    json!({ "arrayValue": { "values": values } })
}

/// Reads a string field, if present and string-typed.
pub(crate) fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)?
        .get("stringValue")?
        .as_str()
        .map(str::to_string)
}

/// Reads a timestamp field, if present and parseable.
pub(crate) fn timestamp_field(fields: &Map<String, Value>, name: &str) -> Option<Timestamp> {
    let raw = fields.get(name)?.get("timestampValue")?.as_str()?;
    Timestamp::parse_rfc3339(raw).ok()
}

/// Reads an array-of-strings field. Non-string entries are skipped; an
/// absent or differently-typed field reads as absent.
pub(crate) fn string_array_field(
    fields: &Map<String, Value>,
    name: &str,
) -> Option<Vec<String>> {
    let values = fields.get(name)?.get("arrayValue")?.get("values");
    let values = match values {
        Some(Value::Array(values)) => values,
        // An empty arrayValue omits "values" entirely.
        _ => return Some(Vec::new()),
    };
    Some(
        values
            .iter()
            .filter_map(|v| v.get("stringValue")?.as_str().map(str::to_string))
            .collect(),
    )
}

/// Renders a profile as the full document field map.
pub(crate) fn profile_fields(profile: &UserProfile) -> Value {
    json!({
        "email": string_value(&profile.email),
        "createdAt": timestamp_value(&profile.created_at),
        "topics": string_array_value(profile.topics.iter().map(TopicId::as_str)),
    })
}

/// Renders just the topics field, for the partial save.
pub(crate) fn topics_fields<'a>(topics: impl IntoIterator<Item = &'a TopicId>) -> Value {
    json!({
        "topics": string_array_value(topics.into_iter().map(TopicId::as_str)),
    })
}

/// Reads a profile out of a document field map.
///
/// `email` and `createdAt` are required (every document this crate writes
/// has them); a missing or foreign-typed `topics` field reads as an empty
/// set, and entries that are not valid topic ids are skipped.
pub(crate) fn profile_from_fields(fields: &Map<String, Value>) -> Result<UserProfile, StoreError> {
    let email =
        string_field(fields, "email").ok_or_else(|| StoreError::malformed("missing email"))?;
    let created_at = timestamp_field(fields, "createdAt")
        .ok_or_else(|| StoreError::malformed("missing or unparseable createdAt"))?;

    let mut profile = UserProfile::new(email, created_at);
    for raw in string_array_field(fields, "topics").unwrap_or_default() {
        match TopicId::new(&raw) {
            Ok(id) => {
                profile.topics.insert(id);
            }
            Err(err) => debug!(topic = %raw, error = %err, "skipping invalid topic id"),
        }
    }
    Ok(profile)
}

/// Reads a catalog topic out of a `topics` collection document.
///
/// The document id (the last segment of the resource name) is the topic id;
/// a missing `name` field falls back to the id.
pub(crate) fn topic_from_document(
    resource_name: &str,
    fields: &Map<String, Value>,
) -> Result<Topic, StoreError> {
    let doc_id = resource_name
        .rsplit('/')
        .next()
        .unwrap_or(resource_name);
    let id = TopicId::new(doc_id)
        .map_err(|e| StoreError::malformed(format!("bad topic document id: {}", e)))?;

    let name = string_field(fields, "name").unwrap_or_else(|| doc_id.to_string());
    let description = string_field(fields, "description");

    Ok(Topic {
        id,
        name,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn tid(s: &str) -> TopicId {
        TopicId::new(s).unwrap()
    }

    fn as_fields(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn profile_fields_roundtrip() {
        let topics: BTreeSet<_> = [tid("business"), tid("science")].into_iter().collect();
        let profile = UserProfile::new(
            "alice@example.com",
            Timestamp::parse_rfc3339("2024-01-15T10:30:00Z").unwrap(),
        )
        .with_topics(topics);

        let fields = as_fields(profile_fields(&profile));
        let restored = profile_from_fields(&fields).unwrap();

        assert_eq!(restored, profile);
    }

    #[test]
    fn profile_from_fields_defaults_missing_topics_to_empty() {
        let fields = as_fields(json!({
            "email": { "stringValue": "alice@example.com" },
            "createdAt": { "timestampValue": "2024-01-15T10:30:00Z" },
        }));

        let profile = profile_from_fields(&fields).unwrap();

        assert!(profile.topics.is_empty());
    }

    #[test]
    fn profile_from_fields_ignores_foreign_typed_topics() {
        let fields = as_fields(json!({
            "email": { "stringValue": "alice@example.com" },
            "createdAt": { "timestampValue": "2024-01-15T10:30:00Z" },
            "topics": { "stringValue": "not-an-array" },
        }));

        let profile = profile_from_fields(&fields).unwrap();

        assert!(profile.topics.is_empty());
    }

    #[test]
    fn profile_from_fields_skips_non_string_array_entries() {
        let fields = as_fields(json!({
            "email": { "stringValue": "alice@example.com" },
            "createdAt": { "timestampValue": "2024-01-15T10:30:00Z" },
            "topics": { "arrayValue": { "values": [
                { "stringValue": "science" },
                { "integerValue": "7" },
            ] } },
        }));

        let profile = profile_from_fields(&fields).unwrap();

        assert_eq!(profile.topics, [tid("science")].into_iter().collect());
    }

    #[test]
    fn profile_from_fields_requires_email() {
        let fields = as_fields(json!({
            "createdAt": { "timestampValue": "2024-01-15T10:30:00Z" },
        }));

        assert!(matches!(
            profile_from_fields(&fields),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn empty_array_value_reads_as_empty() {
        let fields = as_fields(json!({
            "topics": { "arrayValue": {} },
        }));

        assert_eq!(string_array_field(&fields, "topics"), Some(Vec::new()));
    }

    #[test]
    fn topics_fields_renders_sorted_ids() {
        let topics: BTreeSet<_> = [tid("science"), tid("business")].into_iter().collect();

        let value = topics_fields(&topics);

        let rendered = serde_json::to_string(&value).unwrap();
        assert!(rendered.contains("business"));
        assert!(rendered.contains("science"));
    }

    #[test]
    fn topic_from_document_uses_id_segment_and_fields() {
        let fields = as_fields(json!({
            "name": { "stringValue": "Science" },
            "description": { "stringValue": "Discoveries and research" },
        }));

        let topic = topic_from_document(
            "projects/daybrief/databases/(default)/documents/topics/science",
            &fields,
        )
        .unwrap();

        assert_eq!(topic.id, tid("science"));
        assert_eq!(topic.name, "Science");
        assert_eq!(topic.description.as_deref(), Some("Discoveries and research"));
    }

    #[test]
    fn topic_from_document_falls_back_to_id_for_name() {
        let fields = Map::new();

        let topic = topic_from_document("documents/topics/climate", &fields).unwrap();

        assert_eq!(topic.name, "climate");
        assert!(topic.description.is_none());
    }
}
