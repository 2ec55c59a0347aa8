//! # Auto Feed Engage
//!
//! 一个基于会话 Cookie 的信息流自动互动机器人
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageDriver` - 唯一的 page owner，提供 navigate / eval / wait / click /
//!   type / screenshot 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条 Post
//! - `FeedScraper` - 信息流滚动采集能力
//! - `DecisionService` - 分类模型决策能力（失败降级为 Skip）
//! - `ReplyService` - 生成模型回复起草能力（失败返回 None）
//! - `ActionExecutor` - 点赞 / 转发 / 回复的浏览器动作能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条帖子"的完整处理流程
//! - `PostCtx` - 上下文封装（post_id + post_index）
//! - `PostFlow` - 流程编排（decide → compose → execute）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/engage_loop` - 无限主循环，管理浏览器资源与已回复集合，
//!   按错误种类选择冷却时长
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::launch_session;
pub use config::Config;
pub use error::{AppError, Result};
pub use infrastructure::PageDriver;
pub use models::{ActionDecision, EngageAction, Post};
pub use orchestrator::App;
pub use workflow::{EngageOutcome, PostCtx, PostFlow};
