//! Async adapter from a byte-chunk stream to a frame stream.

use std::collections::VecDeque;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;

use super::decoder::FrameDecoder;
use super::events::StreamFrame;

/// Turn a stream of byte chunks into a stream of frames.
///
/// Pull-based: a chunk is only requested once every frame decoded from the
/// previous one has been consumed. A transport error is yielded once and
/// then the stream ends; no end-of-stream flush happens after an error.
pub fn frame_stream<S, B, E>(chunks: S) -> impl Stream<Item = Result<StreamFrame, E>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    stream::unfold(
        (chunks, FrameDecoder::new(), VecDeque::new(), false),
        |(mut chunks, mut decoder, mut ready, mut done)| async move {
            loop {
                if let Some(frame) = ready.pop_front() {
                    return Some((Ok(frame), (chunks, decoder, ready, done)));
                }
                if done {
                    return None;
                }

                match chunks.next().await {
                    Some(Ok(chunk)) => {
                        ready.extend(decoder.feed(chunk.as_ref()));
                    }
                    Some(Err(e)) => {
                        done = true;
                        return Some((Err(e), (chunks, decoder, ready, done)));
                    }
                    None => {
                        done = true;
                        ready.extend(decoder.finish());
                    }
                }
            }
        },
    )
}
