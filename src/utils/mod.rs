pub mod text;

pub use text::{chunk_text, sanitize_reply, truncate_text};
