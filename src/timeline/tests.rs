//! Tests for the message timeline

use super::*;
use crate::MessageMetadata;
use pretty_assertions::assert_eq;

#[test]
fn test_append_and_lookup() {
    let mut timeline = Timeline::new();
    timeline
        .append(ChatMessage::user("hi"))
        .append(ChatMessage::assistant("hello").with_id("msg_1"));

    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.tail().unwrap().content, "hello");
    assert_eq!(timeline.find_by_id("msg_1").unwrap().content, "hello");
    assert!(timeline.find_by_id("msg_2").is_none());
    assert_eq!(timeline.all()[0].role, MessageRole::User);
}

#[test]
fn test_text_delta_matches_id() {
    let mut timeline = Timeline::new();
    timeline.append(ChatMessage::assistant("Hel").with_id("msg_1"));
    timeline.append(ChatMessage::tool_call("c1", "calling x", "{}"));

    // The tail is a tool bubble, but the id still routes the chunk
    assert!(timeline.append_text_delta("msg_1", "lo"));
    assert_eq!(timeline.find_by_id("msg_1").unwrap().content, "Hello");
    assert_eq!(timeline.len(), 2);
}

#[test]
fn test_text_delta_extends_untagged_tail() {
    let mut timeline = Timeline::new();
    timeline.append(ChatMessage::user("q"));
    timeline.start_assistant_message(None);

    assert!(timeline.append_text_delta("msg_1", "Hel"));
    assert!(timeline.append_text_delta("msg_1", "lo world"));

    assert_eq!(timeline.len(), 2);
    let tail = timeline.tail().unwrap();
    assert_eq!(tail.content, "Hello world");
    assert_eq!(tail.id(), Some("msg_1"));
}

#[test]
fn test_text_delta_after_tool_bubble_starts_new_message() {
    let mut timeline = Timeline::new();
    timeline.append(ChatMessage::user("q"));
    timeline.append(ChatMessage::tool_call("c1", "calling x", "{}"));

    assert!(timeline.append_text_delta("msg_2", "Answer"));
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.tail().unwrap().id(), Some("msg_2"));
    assert_eq!(timeline.find_by_id("tool-c1").unwrap().content, "{}");
}

#[test]
fn test_text_delta_after_user_message_starts_new_message() {
    let mut timeline = Timeline::from_history(vec![ChatMessage::user("q")]);

    assert!(!timeline.append_text_delta("msg_1", ""));
    assert_eq!(timeline.len(), 1);

    assert!(timeline.append_text_delta("msg_1", "A"));
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.tail().unwrap().role, MessageRole::Assistant);
}

#[test]
fn test_upsert_tool_message() {
    let mut timeline = Timeline::new();

    assert_eq!(timeline.upsert_tool_message("c1", "calling f".into(), "{\"a"), ToolUpsert::Created);
    assert_eq!(timeline.upsert_tool_message("c1", "f label".into(), "{\"a\":1}"), ToolUpsert::Updated);

    assert_eq!(timeline.len(), 1);
    let msg = timeline.find_by_id("tool-c1").unwrap();
    assert_eq!(msg.content, "{\"a\":1}");
    assert_eq!(msg.metadata.title.as_deref(), Some("f label"));
    assert_eq!(timeline.pending_tool_ids(), vec!["tool-c1"]);
}

#[test]
fn test_done_tool_message_is_frozen() {
    let mut timeline = Timeline::new();
    timeline.upsert_tool_message("c1", "calling f".into(), "{}");
    assert_eq!(timeline.finalize_pending(), 1);

    assert_eq!(timeline.upsert_tool_message("c1", "other".into(), "{\"late\":1}"), ToolUpsert::Frozen);
    let msg = timeline.find_by_id("tool-c1").unwrap();
    assert_eq!(msg.content, "{}");
    assert_eq!(msg.metadata.status, Some(MessageStatus::Done));
}

#[test]
fn test_finalize_is_idempotent() {
    let mut timeline = Timeline::new();
    timeline.append(ChatMessage::user("q"));
    timeline.upsert_tool_message("c1", "calling f".into(), "{\"x\":1}");
    timeline.upsert_tool_message("c2", "calling g".into(), "{\"y\":2}");

    assert_eq!(timeline.finalize_pending(), 2);
    let first = timeline.clone();
    assert_eq!(timeline.finalize_pending(), 0);
    assert_eq!(timeline, first);
    assert!(timeline.pending_tool_ids().is_empty());
}

#[test]
fn test_history_round_trip() {
    let history = vec![
        ChatMessage::user("earlier question"),
        ChatMessage {
            role: MessageRole::Assistant,
            content: "{\"city\":\"Paris\"}".to_string(),
            metadata: MessageMetadata {
                title: Some("calling fetch_weather".to_string()),
                status: Some(MessageStatus::Done),
                id: Some("tool-c0".to_string()),
            },
        },
        ChatMessage::assistant("It is sunny.").with_id("msg_0"),
    ];

    let timeline = Timeline::from_history(history.clone());
    assert_eq!(timeline.all(), history.as_slice());
    assert_eq!(timeline.into_messages(), history);
}
