//! Decoding of web request results into [`ServiceReply`] values.

use super::messages::{CallKind, KeyRegenerationResult, ServiceReply, CONTEXT_CALL, CONTEXT_GENERATION};
use crate::domain::TransformResult;
use std::collections::BTreeMap;

const MAX_BODY_EXCERPT: usize = 120;

/// Decodes a web request result.
///
/// Returns `None` when the context map does not belong to a call issued by
/// this plugin. A reply whose body is not JSON becomes
/// [`ServiceReply::Failed`] regardless of the HTTP status; a JSON body is
/// handed on as-is and judged by its `success` field.
pub fn decode_reply(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<ServiceReply> {
    let Some(call) = context.get(CONTEXT_CALL).and_then(|name| CallKind::from_name(name)) else {
        tracing::debug!(status, "ignoring web request result without a known call context");
        return None;
    };

    match call {
        CallKind::Transform => {
            let Some(generation) = context.get(CONTEXT_GENERATION).and_then(|g| g.parse::<u64>().ok()) else {
                tracing::warn!(status, "transform reply is missing its generation");
                return None;
            };
            Some(match serde_json::from_slice::<TransformResult>(body) {
                Ok(reply) => ServiceReply::Transformed { generation, reply },
                Err(e) => ServiceReply::Failed {
                    call,
                    generation: Some(generation),
                    message: failure_message(status, body, &e),
                },
            })
        }
        CallKind::RegenerateKeys => Some(match serde_json::from_slice::<KeyRegenerationResult>(body) {
            Ok(reply) => ServiceReply::KeysRegenerated { reply },
            Err(e) => ServiceReply::Failed {
                call,
                generation: None,
                message: failure_message(status, body, &e),
            },
        }),
    }
}

fn failure_message(status: u16, body: &[u8], error: &serde_json::Error) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    if text.is_empty() {
        return format!("empty response (HTTP {status})");
    }

    tracing::debug!(status, error = %error, "reply body is not the expected JSON");

    let excerpt: String = text.chars().take(MAX_BODY_EXCERPT).collect();
    if excerpt.starts_with('{') || excerpt.starts_with('[') {
        format!("malformed response (HTTP {status}): {error}")
    } else {
        format!("request failed (HTTP {status}): {excerpt}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(call: &str, generation: Option<u64>) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(CONTEXT_CALL.to_string(), call.to_string());
        if let Some(g) = generation {
            map.insert(CONTEXT_GENERATION.to_string(), g.to_string());
        }
        map
    }

    #[test]
    fn successful_transform_reply() {
        let reply = decode_reply(
            200,
            br#"{"success": true, "result": "KHOOR"}"#,
            &context("transform", Some(4)),
        );
        assert_eq!(
            reply,
            Some(ServiceReply::Transformed {
                generation: 4,
                reply: TransformResult {
                    success: true,
                    result: Some("KHOOR".to_string()),
                    error: None,
                },
            })
        );
    }

    #[test]
    fn json_error_body_is_passed_on_even_with_error_status() {
        let reply = decode_reply(
            400,
            br#"{"success": false, "error": "Invalid algorithm"}"#,
            &context("transform", Some(1)),
        );
        let Some(ServiceReply::Transformed { reply, .. }) = reply else {
            panic!("expected a transformed reply, got {reply:?}");
        };
        assert!(!reply.success);
        assert_eq!(reply.error.as_deref(), Some("Invalid algorithm"));
    }

    #[test]
    fn html_body_is_a_transport_failure() {
        let reply = decode_reply(500, b"<html>Internal Server Error</html>", &context("transform", Some(2)));
        let Some(ServiceReply::Failed { call, generation, message }) = reply else {
            panic!("expected a failure, got {reply:?}");
        };
        assert_eq!(call, CallKind::Transform);
        assert_eq!(generation, Some(2));
        assert_eq!(message, "request failed (HTTP 500): <html>Internal Server Error</html>");
    }

    #[test]
    fn empty_body_names_the_status() {
        let reply = decode_reply(502, b"", &context("regenerate_keys", None));
        assert_eq!(
            reply,
            Some(ServiceReply::Failed {
                call: CallKind::RegenerateKeys,
                generation: None,
                message: "empty response (HTTP 502)".to_string(),
            })
        );
    }

    #[test]
    fn truncated_json_is_malformed() {
        let reply = decode_reply(200, br#"{"success": tr"#, &context("transform", Some(3)));
        let Some(ServiceReply::Failed { message, .. }) = reply else {
            panic!("expected a failure, got {reply:?}");
        };
        assert!(message.starts_with("malformed response (HTTP 200): "));
    }

    #[test]
    fn key_regeneration_reply() {
        let reply = decode_reply(
            200,
            br#"{"success": true, "message": "New keys generated"}"#,
            &context("regenerate_keys", None),
        );
        let Some(ServiceReply::KeysRegenerated { reply }) = reply else {
            panic!("expected a key regeneration reply, got {reply:?}");
        };
        assert!(reply.success);
    }

    #[test]
    fn foreign_or_incomplete_context_is_ignored() {
        assert_eq!(decode_reply(200, b"{}", &BTreeMap::new()), None);
        assert_eq!(decode_reply(200, b"{}", &context("weather", None)), None);
        assert_eq!(decode_reply(200, b"{}", &context("transform", None)), None);
    }
}
