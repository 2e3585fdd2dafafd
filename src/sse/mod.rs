//! SSE (Server-Sent Events) frame decoding
//!
//! Decodes the draft generation stream. The format is line based:
//! - `event: <name>` - names the frame being built
//! - `data: <json>` - payload line; several are joined with `\n`
//! - Empty line - ends the frame
//! - Anything else - ignored
//!
//! # Module structure
//! - `events` - `SseLine` and `StreamFrame`
//! - `parser` - line classification and the line-level `FrameParser`
//! - `decoder` - byte-level `FrameDecoder` (UTF-8 and line reassembly)
//! - `stream` - async adapter over a byte-chunk stream

mod decoder;
mod events;
mod parser;
mod stream;

pub use decoder::FrameDecoder;
pub use events::{SseLine, StreamFrame};
pub use parser::{parse_sse_line, FrameParser};
pub use stream::frame_stream;
