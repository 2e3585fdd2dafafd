//! Byte-level frame decoding.
//!
//! Chunks from the transport can split anything: a UTF-8 sequence, a line,
//! or a frame. [`FrameDecoder`] keeps the incomplete tail of each so feeding
//! a stream in arbitrary pieces yields the same frames as feeding it whole.

use super::events::StreamFrame;
use super::parser::FrameParser;

/// Incremental decoder from raw bytes to [`StreamFrame`]s.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Trailing bytes of an incomplete UTF-8 sequence
    pending_bytes: Vec<u8>,
    /// Decoded text not yet terminated by `\n`
    buffer: String,
    parser: FrameParser,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every frame it completed, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamFrame> {
        self.decode_utf8(chunk);

        let mut frames = Vec::new();
        while let Some(newline_pos) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=newline_pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
            if let Some(frame) = self.parser.feed_line(&line) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Signal end of stream and flush whatever is still buffered.
    ///
    /// An unterminated last line is parsed as if it had ended with `\n`, then
    /// pending data is emitted as one final frame.
    pub fn finish(&mut self) -> Option<StreamFrame> {
        if !self.pending_bytes.is_empty() {
            self.pending_bytes.clear();
            self.buffer.push(char::REPLACEMENT_CHARACTER);
        }

        if !self.buffer.is_empty() {
            let mut line = std::mem::take(&mut self.buffer);
            if line.ends_with('\r') {
                line.pop();
            }
            if let Some(frame) = self.parser.feed_line(&line) {
                return Some(frame);
            }
        }

        self.parser.finish()
    }

    /// Decode everything in one go. Mostly useful in tests.
    pub fn decode_all<I, B>(chunks: I) -> Vec<StreamFrame>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut decoder = Self::new();
        let mut frames = Vec::new();
        for chunk in chunks {
            frames.extend(decoder.feed(chunk.as_ref()));
        }
        frames.extend(decoder.finish());
        frames
    }

    pub fn reset(&mut self) {
        self.pending_bytes.clear();
        self.buffer.clear();
        self.parser.reset();
    }

    /// Append `chunk` to the text buffer, holding back an incomplete trailing
    /// sequence. Invalid bytes become U+FFFD.
    fn decode_utf8(&mut self, chunk: &[u8]) {
        self.pending_bytes.extend_from_slice(chunk);

        let mut consumed = 0;
        loop {
            let rest = &self.pending_bytes[consumed..];
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    consumed = self.pending_bytes.len();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    self.buffer
                        .push_str(&String::from_utf8_lossy(&rest[..valid]));
                    match e.error_len() {
                        Some(bad) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            consumed += valid + bad;
                        }
                        None => {
                            consumed += valid;
                            break;
                        }
                    }
                }
            }
        }

        self.pending_bytes.drain(..consumed);
    }
}
