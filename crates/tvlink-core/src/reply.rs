// ── Executor reply interpretation ──
//
// The executor answers every keypress with a single string. Pairing
// brands answer with a JSON object that may carry `new_key`; everything
// else answers with plain text. Decoding is attempted first and plain
// text is the fallback, never an error.

use serde_json::{Map, Value};

/// Decoded JSON object reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyPayload {
    /// Credential handed out by the TV during a pairing handshake.
    pub new_key: Option<String>,
    /// Every other field, untouched.
    pub fields: Map<String, Value>,
}

/// A classified executor reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorReply {
    Structured(ReplyPayload),
    PlainText(String),
}

impl ExecutorReply {
    /// Classify a raw reply string.
    ///
    /// Only a JSON object counts as structured. Other JSON values (strings,
    /// numbers, arrays) carry no named fields and are kept as plain text.
    /// A non-string `new_key` is treated as absent.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(mut fields)) => {
                let new_key = match fields.remove("new_key") {
                    Some(Value::String(key)) => Some(key),
                    Some(other) => {
                        fields.insert("new_key".to_owned(), other);
                        None
                    }
                    None => None,
                };
                Self::Structured(ReplyPayload { new_key, fields })
            }
            _ => Self::PlainText(raw.to_owned()),
        }
    }

    /// The pairing credential carried by this reply, if any. Empty keys
    /// don't count.
    pub fn new_key(&self) -> Option<&str> {
        match self {
            Self::Structured(payload) => payload.new_key.as_deref().filter(|k| !k.is_empty()),
            Self::PlainText(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn plain_acknowledgement_is_text() {
        assert_eq!(
            ExecutorReply::parse("Comando enviado OK"),
            ExecutorReply::PlainText("Comando enviado OK".into())
        );
        assert_eq!(ExecutorReply::parse("OK").new_key(), None);
    }

    #[test]
    fn object_with_new_key_is_pairing() {
        let reply = ExecutorReply::parse(r#"{"new_key":"XYZ123"}"#);
        assert_eq!(reply.new_key(), Some("XYZ123"));
    }

    #[test]
    fn object_without_new_key_keeps_fields() {
        let reply = ExecutorReply::parse(r#"{"status":"ok"}"#);

        let ExecutorReply::Structured(payload) = &reply else {
            panic!("expected structured reply, got {reply:?}");
        };
        assert_eq!(payload.new_key, None);
        assert_eq!(payload.fields.get("status"), Some(&json!("ok")));
        assert_eq!(reply.new_key(), None);
    }

    #[test]
    fn empty_new_key_is_ignored() {
        assert_eq!(ExecutorReply::parse(r#"{"new_key":""}"#).new_key(), None);
    }

    #[test]
    fn non_string_new_key_is_ignored() {
        let reply = ExecutorReply::parse(r#"{"new_key":42}"#);
        assert_eq!(reply.new_key(), None);
        let ExecutorReply::Structured(payload) = reply else {
            panic!("expected structured reply");
        };
        assert_eq!(payload.fields.get("new_key"), Some(&json!(42)));
    }

    #[test]
    fn json_scalars_are_text() {
        assert!(matches!(ExecutorReply::parse(r#""OK""#), ExecutorReply::PlainText(_)));
        assert!(matches!(ExecutorReply::parse("[1,2]"), ExecutorReply::PlainText(_)));
        assert!(matches!(ExecutorReply::parse("null"), ExecutorReply::PlainText(_)));
    }

    #[test]
    fn truncated_json_is_text() {
        assert_eq!(
            ExecutorReply::parse(r#"{"new_key":"ab"#),
            ExecutorReply::PlainText(r#"{"new_key":"ab"#.into())
        );
    }
}
