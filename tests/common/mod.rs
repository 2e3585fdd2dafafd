//! Shared fixtures for integration tests.

#![allow(dead_code)]

/// Frames of a complete generation with a module replaced mid-stream.
pub const SCENARIO: &[(&str, &str)] = &[
    ("draft_started", r#"{"draftId":"d1"}"#),
    (
        "outline",
        r#"{"courseTitle":"Intro to X","level":"Beginner","durationWeeks":4,"description":"desc"}"#,
    ),
    (
        "module",
        r#"{"moduleNumber":1,"moduleTitle":"M1","weeks":[1],"topics":[]}"#,
    ),
    (
        "module",
        r#"{"moduleNumber":1,"moduleTitle":"M1-renamed","weeks":[1],"topics":[]}"#,
    ),
    (
        "complete",
        r#"{"draftId":"d1","draft":{"courseTitle":"Intro to X","level":"Beginner","durationWeeks":4,"description":"desc","modules":[{"moduleNumber":1,"moduleTitle":"M1-renamed","weeks":[1],"topics":[]}]}}"#,
    ),
];

/// Serialize frames as an event stream, each terminated by a blank line.
pub fn event_stream(frames: &[(&str, &str)]) -> String {
    frames
        .iter()
        .map(|(event, data)| format!("event: {}\ndata: {}\n\n", event, data))
        .collect()
}

/// Same as [`event_stream`] but without the blank line after the last frame.
pub fn unterminated_event_stream(frames: &[(&str, &str)]) -> String {
    let mut body = event_stream(frames);
    body.truncate(body.len() - 1);
    body
}

pub fn test_token() -> String {
    "test-auth-token".to_string()
}
