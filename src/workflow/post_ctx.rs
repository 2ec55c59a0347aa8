//! 帖子处理上下文
//!
//! 封装"我正在处理本轮的第几条帖子"这一信息

use std::fmt::Display;

/// 帖子处理上下文
#[derive(Debug, Clone)]
pub struct PostCtx {
    /// 帖子 ID
    pub post_id: String,

    /// 帖子在本轮中的序号（从 1 开始，仅用于日志显示）
    pub post_index: usize,
}

impl PostCtx {
    /// 创建新的帖子上下文
    pub fn new(post_id: String, post_index: usize) -> Self {
        Self {
            post_id,
            post_index,
        }
    }
}

impl Display for PostCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[帖子 {} #{}]", self.post_index, self.post_id)
    }
}
