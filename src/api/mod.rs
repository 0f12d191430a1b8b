//! Framework-agnostic HTTP adapters.
//!
//! No server is bundled: a web framework decodes the request, calls the
//! adapter and writes the returned status and JSON body.

pub mod chat;

pub use chat::{ChatReply, ChatRequestBody, ChatResponseBody, handle_chat, handle_chat_json};
