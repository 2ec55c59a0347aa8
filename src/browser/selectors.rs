//! 页面选择器
//!
//! 与目标站点页面结构的固定契约。站点改版即失效，没有回退策略。

/// 帖子正文
pub const POST_TEXT: &str = "[data-testid=\"tweetText\"]";

/// 帖子固定链接锚点（相对正文元素所在的 article）
pub const PERMALINK_ANCHOR: &str = "a[href*=\"/status/\"]";

/// 点赞按钮
pub const LIKE: &str = "[data-testid=\"like\"]";

/// 转发按钮
pub const RESHARE: &str = "[data-testid=\"retweet\"]";

/// 转发确认按钮（点击转发后出现）
pub const RESHARE_CONFIRM: &str = "[data-testid=\"retweetConfirm\"]";

/// 回复按钮
pub const REPLY: &str = "[data-testid=\"reply\"]";

/// 回复输入框
pub const COMPOSE_BOX: &str = "[data-testid=\"tweetTextarea_0\"]";

/// 提交按钮
pub const SUBMIT: &str = "[data-testid=\"tweetButton\"]";
