use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field-level difference between two same-kind objects.
///
/// `breaking` is true when the change can alter runtime behavior or the
/// object's external contract (body text, language, column types, index
/// uniqueness); false for informational changes (planner hints, defaults,
/// advisory flags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDifference {
    pub attribute_name: String,
    pub source_value: Option<String>,
    pub destination_value: Option<String>,
    pub breaking: bool,
}

impl AttributeDifference {
    pub fn breaking(
        attribute_name: impl Into<String>,
        source_value: Option<String>,
        destination_value: Option<String>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            source_value,
            destination_value,
            breaking: true,
        }
    }

    pub fn non_breaking(
        attribute_name: impl Into<String>,
        source_value: Option<String>,
        destination_value: Option<String>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            source_value,
            destination_value,
            breaking: false,
        }
    }
}

impl fmt::Display for AttributeDifference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = if self.breaking { "breaking" } else { "non-breaking" };
        write!(
            f,
            "{} ({}): {} -> {}",
            self.attribute_name,
            severity,
            self.source_value.as_deref().unwrap_or("<absent>"),
            self.destination_value.as_deref().unwrap_or("<absent>"),
        )
    }
}

/// Record a difference when the two values disagree
pub(crate) fn push_if_differs<T>(
    differences: &mut Vec<AttributeDifference>,
    attribute_name: &str,
    source: &T,
    destination: &T,
    breaking: bool,
) where
    T: PartialEq + fmt::Display + ?Sized,
{
    if source != destination {
        differences.push(AttributeDifference {
            attribute_name: attribute_name.to_string(),
            source_value: Some(source.to_string()),
            destination_value: Some(destination.to_string()),
            breaking,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_if_differs_records_mismatch() {
        let mut differences = Vec::new();
        push_if_differs(&mut differences, "Language", "sql", "plpgsql", true);
        push_if_differs(&mut differences, "Strict", &false, &false, false);

        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].attribute_name, "Language");
        assert_eq!(differences[0].source_value.as_deref(), Some("sql"));
        assert_eq!(differences[0].destination_value.as_deref(), Some("plpgsql"));
        assert!(differences[0].breaking);
    }

    #[test]
    fn test_display_marks_severity() {
        let diff = AttributeDifference::non_breaking(
            "Volatility",
            Some("VOLATILE".to_string()),
            Some("STABLE".to_string()),
        );
        let rendered = diff.to_string();
        assert!(rendered.contains("non-breaking"));
        assert!(rendered.contains("VOLATILE -> STABLE"));
    }

    #[test]
    fn test_serialized_field_names() {
        let diff = AttributeDifference::breaking("Definition", None, Some("SELECT 1".to_string()));
        let json = serde_json::to_value(&diff).unwrap();
        assert!(json.get("attributeName").is_some());
        assert!(json.get("sourceValue").is_some());
        assert!(json.get("destinationValue").is_some());
        assert_eq!(json["breaking"], true);
    }
}
