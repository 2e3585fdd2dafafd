//! Line-level SSE parsing.
//!
//! [`FrameParser`] accumulates classified lines and emits a [`StreamFrame`]
//! whenever a blank line closes a frame that carried data.

use super::events::{SseLine, StreamFrame};

/// Parse a single SSE line (newline and trailing `\r` already removed).
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        return SseLine::Data(rest.to_string());
    }

    SseLine::Ignored(line.to_string())
}

/// Stateful parser that accumulates lines and emits complete frames.
#[derive(Debug, Default)]
pub struct FrameParser {
    /// Event name for the frame being built; last `event:` line wins
    current_event: Option<String>,
    /// Joined `data:` payloads for the frame being built
    data_buffer: String,
}

impl FrameParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line, returning a frame if the line completed one.
    pub fn feed_line(&mut self, line: &str) -> Option<StreamFrame> {
        match parse_sse_line(line) {
            SseLine::Event(name) => {
                self.current_event = Some(name);
                None
            }
            SseLine::Data(data) => {
                if !self.data_buffer.is_empty() {
                    self.data_buffer.push('\n');
                }
                self.data_buffer.push_str(&data);
                None
            }
            // Keep-alive blank lines with nothing buffered are no-ops.
            SseLine::Empty => self.take_frame(),
            SseLine::Ignored(other) => {
                tracing::trace!("Ignoring SSE line: {}", other);
                None
            }
        }
    }

    /// Flush pending data at end of stream.
    pub fn finish(&mut self) -> Option<StreamFrame> {
        self.take_frame()
    }

    /// True if data has been buffered but no blank line seen yet.
    pub fn has_pending(&self) -> bool {
        !self.data_buffer.is_empty()
    }

    pub fn reset(&mut self) {
        self.current_event = None;
        self.data_buffer.clear();
    }

    fn take_frame(&mut self) -> Option<StreamFrame> {
        if self.data_buffer.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data_buffer);
        Some(StreamFrame::new(self.current_event.take(), data))
    }
}
