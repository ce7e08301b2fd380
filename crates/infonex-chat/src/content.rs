//! Content normalization between the internal message model and the
//! OpenAI-dialect wire format, plus artifact-envelope parsing.
//!
//! Everything here is pure: no I/O, no clocks. Provider clients call
//! [`render_history`] on the way out and [`content_from_wire`] on the
//! way back; the orchestrator uses [`parse_artifact`] and the compose
//! helpers to build final replies.

use crate::{Content, ContentPart, Message, Role};
use serde_json::{json, Value};

/// Render a message body into the provider wire shape. Plain text stays
/// a JSON string; mixed bodies become a part array. PDF references have
/// no provider-native part type, so they go out as a markdown-style
/// text part and the link survives history replay.
pub fn content_to_wire(content: &Content) -> Value {
    match content {
        Content::Text(text) => json!(text),
        Content::Parts(parts) => {
            let rendered: Vec<Value> = parts.iter().map(part_to_wire).collect();
            Value::Array(rendered)
        }
    }
}

fn part_to_wire(part: &ContentPart) -> Value {
    match part {
        ContentPart::Text { text } => json!({ "type": "text", "text": text }),
        ContentPart::ImageRef { url } => json!({
            "type": "image_url",
            "image_url": { "url": url }
        }),
        ContentPart::PdfRef { url, title } => json!({
            "type": "text",
            "text": format!("[PDF: {title}]({url})")
        }),
    }
}

/// Parse a wire content value back into the internal model. All-text
/// part arrays canonicalize to the `Text` form, so text-only content
/// round-trips losslessly even when the shape changes.
pub fn content_from_wire(value: &Value) -> Content {
    match value {
        Value::String(text) => Content::Text(text.clone()),
        Value::Array(items) => {
            let parts: Vec<ContentPart> = items.iter().filter_map(part_from_wire).collect();
            Content::from_parts(parts)
        }
        Value::Null => Content::Text(String::new()),
        other => Content::Text(other.to_string()),
    }
}

fn part_from_wire(value: &Value) -> Option<ContentPart> {
    match value.get("type").and_then(Value::as_str) {
        Some("text") => Some(ContentPart::Text {
            text: value.get("text").and_then(Value::as_str).unwrap_or_default().to_string(),
        }),
        Some("image_url") => Some(ContentPart::ImageRef {
            url: value
                .get("image_url")
                .and_then(|u| u.get("url"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }),
        // Unknown part kinds: salvage any text, drop the rest.
        _ => value.get("text").and_then(Value::as_str).map(|text| ContentPart::Text {
            text: text.to_string(),
        }),
    }
}

/// Render one message for the chat-completions `messages` array.
pub fn message_to_wire(message: &Message) -> Value {
    let content = if message.content.is_empty() && !message.tool_calls.is_empty() {
        Value::Null
    } else {
        content_to_wire(&message.content)
    };
    let mut wire = json!({
        "role": message.role.as_str(),
        "content": content,
    });

    if message.role == Role::Tool {
        if let Some(id) = &message.tool_call_id {
            wire["tool_call_id"] = json!(id);
        }
    }

    if !message.tool_calls.is_empty() {
        let calls: Vec<Value> = message
            .tool_calls
            .iter()
            .map(|call| {
                json!({
                    "id": call.id,
                    "type": "function",
                    "function": {
                        "name": call.name,
                        "arguments": call.arguments,
                    }
                })
            })
            .collect();
        wire["tool_calls"] = Value::Array(calls);
    }

    wire
}

pub fn render_history(messages: &[Message]) -> Vec<Value> {
    messages.iter().map(message_to_wire).collect()
}

/// A specialized tool result the orchestrator finalizes directly instead
/// of narrating through another provider round.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Image { message: String, url: String },
    Pdf { message: String, url: String, title: String },
}

/// Inspect a tool-result body for an artifact envelope.
///
/// Returns `None` for plain narration, non-JSON bodies, unknown
/// discriminators, and envelopes without their display flag set; those
/// results go back through the model as ordinary tool output.
pub fn parse_artifact(content: &str) -> Option<Artifact> {
    let value: Value = serde_json::from_str(content).ok()?;
    let kind = value.get("type").and_then(Value::as_str)?;
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match kind {
        "image_generation_result" => {
            if !value.get("display_image").and_then(Value::as_bool).unwrap_or(false) {
                return None;
            }
            let url = value.get("image_url").and_then(Value::as_str)?.to_string();
            Some(Artifact::Image { message, url })
        }
        "pdf_generation_result" => {
            if !value.get("display_pdf").and_then(Value::as_bool).unwrap_or(false) {
                return None;
            }
            let url = value.get("pdf_url").and_then(Value::as_str)?.to_string();
            let title = value
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("Document")
                .to_string();
            Some(Artifact::Pdf { message, url, title })
        }
        _ => None,
    }
}

/// Final reply body from preserved lead text plus the closing response.
/// Lead text is content the model sent alongside earlier tool calls; it
/// is never dropped.
pub fn compose_text(lead: &[String], text: &str) -> Content {
    let mut pieces: Vec<&str> = lead.iter().map(String::as_str).collect();
    if !text.is_empty() {
        pieces.push(text);
    }
    Content::Text(pieces.join("\n\n"))
}

/// Final reply body for an artifact short-circuit: lead text, then the
/// artifact's own message, then the reference part. An empty message
/// never produces an empty leading text part.
pub fn compose_artifact(lead: &[String], artifact: &Artifact) -> Content {
    let message = match artifact {
        Artifact::Image { message, .. } => message,
        Artifact::Pdf { message, .. } => message,
    };
    let mut pieces: Vec<&str> = lead.iter().map(String::as_str).collect();
    if !message.is_empty() {
        pieces.push(message);
    }
    let text = pieces.join("\n\n");

    let mut parts = Vec::new();
    if !text.is_empty() {
        parts.push(ContentPart::Text { text });
    }
    match artifact {
        Artifact::Image { url, .. } => parts.push(ContentPart::ImageRef { url: url.clone() }),
        Artifact::Pdf { url, title, .. } => parts.push(ContentPart::PdfRef {
            url: url.clone(),
            title: title.clone(),
        }),
    }
    Content::from_parts(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolCallRequest;

    #[test]
    fn text_content_renders_as_string() {
        let wire = content_to_wire(&Content::text("hello"));
        assert_eq!(wire, json!("hello"));
    }

    #[test]
    fn image_part_renders_as_image_url() {
        let content = Content::Parts(vec![
            ContentPart::Text { text: "look".into() },
            ContentPart::ImageRef {
                url: "data:image/png;base64,abc".into(),
            },
        ]);
        let wire = content_to_wire(&content);
        assert_eq!(wire[0], json!({ "type": "text", "text": "look" }));
        assert_eq!(
            wire[1],
            json!({ "type": "image_url", "image_url": { "url": "data:image/png;base64,abc" } })
        );
    }

    #[test]
    fn pdf_part_renders_as_markdown_text() {
        let content = Content::Parts(vec![ContentPart::PdfRef {
            url: "https://example.com/r.pdf".into(),
            title: "Report".into(),
        }]);
        let wire = content_to_wire(&content);
        assert_eq!(
            wire[0],
            json!({ "type": "text", "text": "[PDF: Report](https://example.com/r.pdf)" })
        );
    }

    #[test]
    fn text_roundtrips_through_wire() {
        let original = Content::text("plain reply");
        let back = content_from_wire(&content_to_wire(&original));
        assert_eq!(back, original);
    }

    #[test]
    fn all_text_array_canonicalizes_to_text() {
        let wire = json!([
            { "type": "text", "text": "first" },
            { "type": "text", "text": "second" }
        ]);
        let content = content_from_wire(&wire);
        assert_eq!(content, Content::Text("first\nsecond".into()));
    }

    #[test]
    fn mixed_array_parses_to_parts() {
        let wire = json!([
            { "type": "text", "text": "see" },
            { "type": "image_url", "image_url": { "url": "https://example.com/x.png" } }
        ]);
        let content = content_from_wire(&wire);
        match content {
            Content::Parts(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(
                    parts[1],
                    ContentPart::ImageRef {
                        url: "https://example.com/x.png".into()
                    }
                );
            }
            other => panic!("expected parts, got {other:?}"),
        }
    }

    #[test]
    fn null_content_parses_to_empty_text() {
        assert_eq!(content_from_wire(&Value::Null), Content::Text(String::new()));
    }

    #[test]
    fn tool_message_carries_call_id() {
        let message = Message::tool("searched", "call_9");
        let wire = message_to_wire(&message);
        assert_eq!(wire["role"], "tool");
        assert_eq!(wire["tool_call_id"], "call_9");
        assert_eq!(wire["content"], "searched");
    }

    #[test]
    fn assistant_call_message_keeps_raw_arguments() {
        let message = Message::assistant_with_calls(
            "",
            vec![ToolCallRequest {
                id: "call_1".into(),
                name: "web_search".into(),
                arguments: "{\"query\":\"rust\"}".into(),
            }],
        );
        let wire = message_to_wire(&message);
        assert_eq!(wire["content"], Value::Null);
        assert_eq!(wire["tool_calls"][0]["id"], "call_1");
        assert_eq!(wire["tool_calls"][0]["type"], "function");
        assert_eq!(wire["tool_calls"][0]["function"]["name"], "web_search");
        assert_eq!(
            wire["tool_calls"][0]["function"]["arguments"],
            "{\"query\":\"rust\"}"
        );
    }

    #[test]
    fn history_renders_in_order() {
        let history = vec![
            Message::system("be brief"),
            Message::user("hi"),
            Message::assistant("hello"),
        ];
        let wire = render_history(&history);
        assert_eq!(wire.len(), 3);
        assert_eq!(wire[0]["role"], "system");
        assert_eq!(wire[1]["role"], "user");
        assert_eq!(wire[2]["role"], "assistant");
    }

    #[test]
    fn image_envelope_parses() {
        let body = r#"{
            "type": "image_generation_result",
            "display_image": true,
            "image_url": "https://example.com/img.png",
            "message": "Here is your image"
        }"#;
        assert_eq!(
            parse_artifact(body),
            Some(Artifact::Image {
                message: "Here is your image".into(),
                url: "https://example.com/img.png".into(),
            })
        );
    }

    #[test]
    fn image_envelope_without_display_flag_is_narration() {
        let body = r#"{
            "type": "image_generation_result",
            "display_image": false,
            "image_url": "https://example.com/img.png"
        }"#;
        assert_eq!(parse_artifact(body), None);
    }

    #[test]
    fn pdf_envelope_parses_with_default_title() {
        let body = r#"{
            "type": "pdf_generation_result",
            "display_pdf": true,
            "pdf_url": "https://example.com/out.pdf",
            "message": "Done"
        }"#;
        assert_eq!(
            parse_artifact(body),
            Some(Artifact::Pdf {
                message: "Done".into(),
                url: "https://example.com/out.pdf".into(),
                title: "Document".into(),
            })
        );
    }

    #[test]
    fn unknown_discriminator_is_narration() {
        let body = r#"{ "type": "spreadsheet_result", "display_image": true }"#;
        assert_eq!(parse_artifact(body), None);
    }

    #[test]
    fn plain_prose_is_narration() {
        assert_eq!(parse_artifact("The weather in Paris is 15C"), None);
        assert_eq!(parse_artifact(""), None);
    }

    #[test]
    fn compose_text_concatenates_lead() {
        let lead = vec!["Let me check.".to_string()];
        let content = compose_text(&lead, "All done.");
        assert_eq!(content, Content::Text("Let me check.\n\nAll done.".into()));
    }

    #[test]
    fn compose_text_without_lead() {
        let content = compose_text(&[], "Just this.");
        assert_eq!(content, Content::Text("Just this.".into()));
    }

    #[test]
    fn compose_artifact_builds_text_then_ref() {
        let artifact = Artifact::Image {
            message: "M".into(),
            url: "X".into(),
        };
        let content = compose_artifact(&[], &artifact);
        assert_eq!(
            content,
            Content::Parts(vec![
                ContentPart::Text { text: "M".into() },
                ContentPart::ImageRef { url: "X".into() },
            ])
        );
    }

    #[test]
    fn compose_artifact_merges_lead_text() {
        let artifact = Artifact::Pdf {
            message: "Your report is ready".into(),
            url: "https://example.com/r.pdf".into(),
            title: "Report".into(),
        };
        let lead = vec!["Generating now.".to_string()];
        let content = compose_artifact(&lead, &artifact);
        match content {
            Content::Parts(parts) => {
                assert_eq!(
                    parts[0],
                    ContentPart::Text {
                        text: "Generating now.\n\nYour report is ready".into()
                    }
                );
                assert!(matches!(parts[1], ContentPart::PdfRef { .. }));
            }
            other => panic!("expected parts, got {other:?}"),
        }
    }

    #[test]
    fn compose_artifact_with_empty_message_has_no_text_part() {
        let artifact = Artifact::Image {
            message: String::new(),
            url: "X".into(),
        };
        let content = compose_artifact(&[], &artifact);
        assert_eq!(
            content,
            Content::Parts(vec![ContentPart::ImageRef { url: "X".into() }])
        );
    }
}
