//! Schema normalizer — coerces a raw record into the canonical shape.
//!
//! This is a total function over JSON values: any object (including `{}`)
//! produces a well-formed [`CanonicalDailyLog`] with every key present.
//! Values that cannot be carried over never fail the record; they fall back
//! to the field's empty default and surface as [`FieldWarning`]s on the side
//! channel.
//!
//! Input aliases are honored for fields that drifted between camelCase and
//! snake_case over the life of the source data (`timeStamp`, `mood_level`,
//! `trigger_events`, ...).

use serde_json::Value;

use crate::models::{CanonicalDailyLog, Insights, RawRecord, Status};

/// Side-channel note about a field that could not be carried over as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    pub field: String,
    pub reason: String,
}

impl std::fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field `{}`: {}", self.field, self.reason)
    }
}

/// Normalize one raw record. Always succeeds.
pub fn normalize(raw: &RawRecord) -> (CanonicalDailyLog, Vec<FieldWarning>) {
    let mut warnings = Vec::new();

    let status_obj = object_field(raw, "status", &mut warnings);
    let insights_obj = object_field(raw, "insights", &mut warnings);

    let status = Status {
        mood_level: string_field(status_obj, "status", &["moodLevel", "mood_level"], &mut warnings),
        sleep_quality: string_field(
            status_obj,
            "status",
            &["sleepQuality", "sleep_quality"],
            &mut warnings,
        ),
        sleep_duration: string_field(
            status_obj,
            "status",
            &["sleepDuration", "sleep_duration"],
            &mut warnings,
        ),
        energy_level: string_field(
            status_obj,
            "status",
            &["energyLevel", "energy_level"],
            &mut warnings,
        ),
        stability_score: string_field(
            status_obj,
            "status",
            &["stabilityScore", "stability_score"],
            &mut warnings,
        ),
    };

    let insights = Insights {
        wins: list_field(insights_obj, "insights", &["wins"], &mut warnings),
        losses: list_field(insights_obj, "insights", &["losses"], &mut warnings),
        ideas: list_field(insights_obj, "insights", &["ideas"], &mut warnings),
    };

    let log = CanonicalDailyLog {
        timestamp: string_field(Some(raw), "", &["timestamp", "timeStamp"], &mut warnings),
        summary: string_field(Some(raw), "", &["summary"], &mut warnings),
        status,
        insights,
        goals: list_field(Some(raw), "", &["goals"], &mut warnings),
        tags: list_field(Some(raw), "", &["tags"], &mut warnings),
        trigger_events: list_field(
            Some(raw),
            "",
            &["triggerEvents", "trigger_events"],
            &mut warnings,
        ),
        symptom_checklist: list_field(
            Some(raw),
            "",
            &["symptomChecklist", "symptom_checklist"],
            &mut warnings,
        ),
    };

    (log, warnings)
}

/// First alias present in `obj`, together with the key that matched.
fn lookup<'a>(obj: Option<&'a RawRecord>, aliases: &[&str]) -> Option<(String, &'a Value)> {
    let obj = obj?;
    aliases
        .iter()
        .find_map(|key| obj.get(*key).map(|v| (key.to_string(), v)))
}

fn field_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// A string-valued field: scalars coerce to text, anything structured
/// defaults with a warning. `null` reads as absent.
fn string_field(
    obj: Option<&RawRecord>,
    prefix: &str,
    aliases: &[&str],
    warnings: &mut Vec<FieldWarning>,
) -> String {
    match lookup(obj, aliases) {
        None => String::new(),
        Some((_, Value::Null)) => String::new(),
        Some((_, Value::String(s))) => s.clone(),
        Some((_, Value::Number(n))) => n.to_string(),
        Some((_, Value::Bool(b))) => b.to_string(),
        Some((key, other)) => {
            warnings.push(FieldWarning {
                field: field_path(prefix, &key),
                reason: format!("expected a scalar, found {}; using empty string", type_name(other)),
            });
            String::new()
        }
    }
}

/// A sequence-valued field: scalar elements coerce to text, structured
/// elements are dropped with a warning. A non-sequence value defaults with
/// a warning. `null` reads as absent.
fn list_field(
    obj: Option<&RawRecord>,
    prefix: &str,
    aliases: &[&str],
    warnings: &mut Vec<FieldWarning>,
) -> Vec<String> {
    match lookup(obj, aliases) {
        None => Vec::new(),
        Some((_, Value::Null)) => Vec::new(),
        Some((key, Value::Array(items))) => {
            let mut out = Vec::with_capacity(items.len());
            let mut dropped = 0usize;
            for item in items {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    Value::Number(n) => out.push(n.to_string()),
                    Value::Bool(b) => out.push(b.to_string()),
                    _ => dropped += 1,
                }
            }
            if dropped > 0 {
                warnings.push(FieldWarning {
                    field: field_path(prefix, &key),
                    reason: format!("dropped {} non-string element(s)", dropped),
                });
            }
            out
        }
        Some((key, other)) => {
            warnings.push(FieldWarning {
                field: field_path(prefix, &key),
                reason: format!(
                    "expected a sequence, found {}; using empty sequence",
                    type_name(other)
                ),
            });
            Vec::new()
        }
    }
}

/// A nested object like `status` or `insights`. Missing or `null` is fine;
/// any other non-object shape warns and reads as absent.
fn object_field<'a>(
    raw: &'a RawRecord,
    name: &str,
    warnings: &mut Vec<FieldWarning>,
) -> Option<&'a RawRecord> {
    match raw.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            warnings.push(FieldWarning {
                field: name.to_string(),
                reason: format!("expected an object, found {}; using defaults", type_name(other)),
            });
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawRecord {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn empty_object_yields_full_default_shape() {
        let (log, warnings) = normalize(&raw(json!({})));
        assert_eq!(log, CanonicalDailyLog::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn well_formed_record_passes_through() {
        let (log, warnings) = normalize(&raw(json!({
            "timestamp": "2025-05-15T10:00:00Z",
            "summary": "a fine day",
            "status": {
                "moodLevel": "7",
                "sleepQuality": "good",
                "sleepDuration": "8",
                "energyLevel": "6",
                "stabilityScore": "8"
            },
            "insights": {
                "wins": ["shipped"],
                "losses": [],
                "ideas": ["try mornings"]
            },
            "goals": ["run"],
            "tags": ["work"],
            "triggerEvents": ["noise"],
            "symptomChecklist": ["none"]
        })));
        assert!(warnings.is_empty());
        assert_eq!(log.timestamp, "2025-05-15T10:00:00Z");
        assert_eq!(log.summary, "a fine day");
        assert_eq!(log.status.mood_level, "7");
        assert_eq!(log.insights.wins, vec!["shipped"]);
        assert_eq!(log.goals, vec!["run"]);
        assert_eq!(log.trigger_events, vec!["noise"]);
    }

    #[test]
    fn snake_case_aliases_are_honored() {
        let (log, warnings) = normalize(&raw(json!({
            "timeStamp": "2025-05-15",
            "status": { "mood_level": "4", "sleep_quality": "poor" },
            "trigger_events": ["late call"],
            "symptom_checklist": ["headache"]
        })));
        assert!(warnings.is_empty());
        assert_eq!(log.timestamp, "2025-05-15");
        assert_eq!(log.status.mood_level, "4");
        assert_eq!(log.status.sleep_quality, "poor");
        assert_eq!(log.trigger_events, vec!["late call"]);
        assert_eq!(log.symptom_checklist, vec!["headache"]);
    }

    #[test]
    fn scalars_coerce_to_text() {
        let (log, warnings) = normalize(&raw(json!({
            "summary": 42,
            "status": { "moodLevel": 7, "stabilityScore": 8.5 },
            "tags": ["a", 1, true]
        })));
        assert!(warnings.is_empty());
        assert_eq!(log.summary, "42");
        assert_eq!(log.status.mood_level, "7");
        assert_eq!(log.status.stability_score, "8.5");
        assert_eq!(log.tags, vec!["a", "1", "true"]);
    }

    #[test]
    fn structured_scalar_defaults_with_warning() {
        let (log, warnings) = normalize(&raw(json!({
            "summary": {"nested": true}
        })));
        assert_eq!(log.summary, "");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "summary");
    }

    #[test]
    fn non_sequence_list_defaults_with_warning() {
        let (log, warnings) = normalize(&raw(json!({
            "goals": "not a list"
        })));
        assert!(log.goals.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "goals");
    }

    #[test]
    fn structured_elements_are_dropped_with_warning() {
        let (log, warnings) = normalize(&raw(json!({
            "insights": { "wins": ["real", {"not": "a string"}, ["nested"]] }
        })));
        assert_eq!(log.insights.wins, vec!["real"]);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "insights.wins");
        assert!(warnings[0].reason.contains("2"));
    }

    #[test]
    fn non_object_status_defaults_with_warning() {
        let (log, warnings) = normalize(&raw(json!({
            "status": "fine"
        })));
        assert_eq!(log.status, Status::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "status");
    }

    #[test]
    fn null_reads_as_absent_without_warning() {
        let (log, warnings) = normalize(&raw(json!({
            "summary": null,
            "goals": null,
            "status": null
        })));
        assert_eq!(log, CanonicalDailyLog::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let (log, warnings) = normalize(&raw(json!({
            "summary": "ok",
            "somethingElse": {"deep": [1, 2, 3]}
        })));
        assert_eq!(log.summary, "ok");
        assert!(warnings.is_empty());
    }
}
