//! 帖子处理流程 - 流程层
//!
//! 核心职责：定义"一条帖子"的完整处理流程
//!
//! 流程顺序：
//! 1. 决策服务选动作
//! 2. Reply 时先生成回复文案（失败即放弃回复，不打开输入框）
//! 3. 交给执行器完成浏览器动作
//!
//! 每个分支独立兜错：单条帖子的失败不会向上传播。

use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::models::{EngageAction, Post};
use crate::services::{ActionExecutor, DecisionService, ReplyService};
use crate::utils::truncate_text;
use crate::workflow::post_ctx::PostCtx;

/// 单条帖子的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngageOutcome {
    /// 已点赞
    Liked,
    /// 已转发
    Reshared,
    /// 已回复（只有该结果允许记入已回复集合）
    Replied,
    /// 跳过（决策为 Skip，或没有可用的回复文案）
    Skipped,
    /// 动作执行失败
    Failed,
}

/// 帖子处理流程
///
/// - 编排决策 → 生成 → 执行
/// - 不持有任何资源（page）
/// - 只依赖业务能力（services）
pub struct PostFlow {
    decision_service: DecisionService,
    reply_service: ReplyService,
    executor: ActionExecutor,
}

impl PostFlow {
    /// 创建新的帖子处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            decision_service: DecisionService::new(config),
            reply_service: ReplyService::new(config),
            executor: ActionExecutor::new(config),
        }
    }

    pub async fn run(&self, driver: &PageDriver, post: &Post, ctx: &PostCtx) -> EngageOutcome {
        info!("{} 正文: {}", ctx, truncate_text(&post.text, 80));

        let decision = self.decision_service.decide(&post.text).await;
        info!(
            "{} 🤖 决策: {:?} ({})",
            ctx,
            decision.action,
            truncate_text(&decision.content, 80)
        );

        match decision.action {
            EngageAction::Like => match self.executor.like(driver, ctx).await {
                Ok(()) => EngageOutcome::Liked,
                Err(e) => {
                    error!("{} 点赞动作失败: {}", ctx, e);
                    EngageOutcome::Failed
                }
            },

            EngageAction::Reshare => match self.executor.reshare(driver, ctx).await {
                Ok(()) => EngageOutcome::Reshared,
                Err(e) => {
                    error!("{} 转发动作失败: {}", ctx, e);
                    EngageOutcome::Failed
                }
            },

            EngageAction::Reply => {
                // 没有可用文案就不碰输入框
                let Some(reply_text) = self
                    .reply_service
                    .compose(&post.text, &decision.content)
                    .await
                else {
                    warn!("{} 没有可用的回复文案，跳过", ctx);
                    return EngageOutcome::Skipped;
                };
                info!("{} 💬 回复文案: {}", ctx, truncate_text(&reply_text, 80));

                if self.executor.reply(driver, ctx, &reply_text).await {
                    EngageOutcome::Replied
                } else {
                    EngageOutcome::Failed
                }
            }

            EngageAction::Skip => {
                info!("{} ⏭️ 跳过: {}", ctx, decision.content);
                EngageOutcome::Skipped
            }
        }
    }
}
