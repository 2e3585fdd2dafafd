//! Error handling for the Twigg client.
//!
//! - **Error Categories**: high-level classification for reporting decisions
//! - **Domain errors**: `NetworkError`, `StreamError`, `RequestError`
//! - **Unified error**: `TwiggError` with codes, user messages and retry hints
//!
//! Frame-level problems (bad JSON in one frame) never surface through these
//! types as a `Result::Err`; the assembler records them and keeps going.
//! Only session-level failures reach the caller.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, lost stream | Yes |
//! | Auth | Missing or rejected token | No |
//! | Server | 5xx, in-stream `error`, early end | Yes |
//! | Client | Undecodable data | No |
//! | User | Invalid input, cancellation | No |
//! | Configuration | Bad environment values | No |

mod category;
mod network;
mod request;
mod stream;
mod twigg_error;

pub use category::ErrorCategory;
pub use network::{classify_reqwest_error, NetworkError};
pub use request::RequestError;
pub use stream::StreamError;
pub use twigg_error::TwiggError;

/// Type alias for Results using TwiggError.
pub type TwiggResult<T> = Result<T, TwiggError>;
