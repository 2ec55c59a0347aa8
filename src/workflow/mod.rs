pub mod post_ctx;
pub mod post_flow;

pub use post_ctx::PostCtx;
pub use post_flow::{EngageOutcome, PostFlow};
