//! Line and frame types produced by the SSE decoder.

/// One classified line of the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// `event: <name>` with the name trimmed
    Event(String),
    /// `data: <payload>` with one leading space removed
    Data(String),
    /// Blank line, ends the current frame
    Empty,
    /// Anything else (comments, `id:`, `retry:`, garbage)
    Ignored(String),
}

/// A complete frame: the announced event name plus its joined data lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFrame {
    /// Name from the most recent `event:` line, `None` for legacy producers
    pub event: Option<String>,
    /// All `data:` payloads of the frame joined with `\n`
    pub data: String,
}

impl StreamFrame {
    pub fn new(event: Option<String>, data: impl Into<String>) -> Self {
        Self {
            event,
            data: data.into(),
        }
    }

    /// Frame announced with an explicit `event:` line.
    pub fn named(event: &str, data: impl Into<String>) -> Self {
        Self::new(Some(event.to_string()), data)
    }

    /// Event name for logging; `"<none>"` when the producer omitted it.
    pub fn event_name(&self) -> &str {
        self.event.as_deref().unwrap_or("<none>")
    }
}
