//! Interaction log adapter
//!
//! Parses interaction logs into a sequence of interaction kinds. Two layouts
//! are accepted: newline-delimited JSON (one record per line) and a JSON array.
//! A record is either `{"kind": "expand"}` or the bare string `"expand"`.

use crate::error::AdaptError;
use crate::types::{InteractionKind, InteractionRecord};

/// Parser for interaction logs
pub struct InteractionLogAdapter;

impl InteractionLogAdapter {
    /// Parse newline-delimited JSON records, skipping blank lines
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<InteractionKind>, AdaptError> {
        let mut kinds = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<InteractionRecord>(trimmed) {
                Ok(record) => kinds.push(record.kind()),
                Err(e) => {
                    return Err(AdaptError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(kinds)
    }

    /// Parse a JSON array of records
    pub fn parse_array(json: &str) -> Result<Vec<InteractionKind>, AdaptError> {
        let records: Vec<InteractionRecord> = serde_json::from_str(json)?;
        Ok(records.iter().map(InteractionRecord::kind).collect())
    }

    /// Parse either layout, choosing by the first non-whitespace character
    pub fn parse_auto(input: &str) -> Result<Vec<InteractionKind>, AdaptError> {
        if input.trim_start().starts_with('[') {
            Self::parse_array(input)
        } else {
            Self::parse_ndjson(input)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::types::InteractionKind::{Collapse as C, Expand as E};

    #[test]
    fn test_parse_ndjson_mixed_records() {
        let input = r#"{"kind": "expand"}

"collapse"
{"kind": "expand"}
"#;
        assert_eq!(InteractionLogAdapter::parse_ndjson(input).unwrap(), vec![E, C, E]);
    }

    #[test]
    fn test_parse_ndjson_reports_line_number() {
        let input = "\"expand\"\n\"toggle\"\n";
        let err = InteractionLogAdapter::parse_ndjson(input).unwrap_err();
        match err {
            AdaptError::ParseError(msg) => assert!(msg.contains("line 2"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_array() {
        let input = r#"["expand", {"kind": "collapse"}, "expand"]"#;
        assert_eq!(InteractionLogAdapter::parse_array(input).unwrap(), vec![E, C, E]);
    }

    #[test]
    fn test_parse_array_rejects_garbage() {
        assert!(matches!(
            InteractionLogAdapter::parse_array("not json"),
            Err(AdaptError::JsonError(_))
        ));
        assert!(matches!(
            InteractionLogAdapter::parse_array(r#"["expand", "toggle"]"#),
            Err(AdaptError::JsonError(_))
        ));
    }

    #[test]
    fn test_parse_auto_detects_layout() {
        assert_eq!(
            InteractionLogAdapter::parse_auto("  [\"collapse\"]").unwrap(),
            vec![C]
        );
        assert_eq!(
            InteractionLogAdapter::parse_auto("\"expand\"\n\"expand\"").unwrap(),
            vec![E, E]
        );
        assert!(InteractionLogAdapter::parse_auto("").unwrap().is_empty());
    }
}
