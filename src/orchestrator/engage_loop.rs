//! 互动主循环 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责资源管理和无限循环的调度。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建截图目录、启动带 Cookie 的浏览器会话、创建 PageDriver
//! 2. **单轮处理**：抓取信息流 → 逐条帖子（打开 → 停顿 → 决策+执行 → 停顿）→ 刷新等待
//! 3. **资源所有者**：唯一持有 Browser、PageDriver 和已回复集合的模块
//! 4. **错误恢复**：单轮失败按错误种类选择冷却时长后无限重试
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator (无限循环，持有资源与已回复集合)
//!     ↓
//! workflow::PostFlow (处理单条 Post)
//!     ↓
//! services (能力层：scrape / decide / compose / execute)
//!     ↓
//! infrastructure (基础设施：PageDriver)
//! ```

use std::collections::HashSet;
use std::fs;
use std::time::Duration;

use chromiumoxide::Browser;
use tokio::time::sleep;
use tracing::{error, info};

use crate::browser::{self, human};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::infrastructure::PageDriver;
use crate::services::{action_executor, FeedScraper};
use crate::workflow::{EngageOutcome, PostCtx, PostFlow};

/// 应用主结构
///
/// 浏览器会话与已回复集合都只被本结构持有，单任务驱动，无并发写者。
pub struct App {
    config: Config,
    _browser: Browser,
    driver: PageDriver,
    scraper: FeedScraper,
    flow: PostFlow,
    /// 本次运行内已成功回复过的帖子 ID，只增不减
    replied_ids: HashSet<String>,
}

impl App {
    /// 初始化应用
    ///
    /// 此阶段的任何失败都是致命的，直接返回错误由进程退出。
    pub async fn initialize(config: Config) -> Result<Self> {
        // 错误截图目录必须在首次写入前存在
        fs::create_dir_all(&config.screenshot_dir)?;

        log_startup(&config);

        let (browser, page) = browser::launch_session(&config).await?;
        let driver = PageDriver::new(page);

        Ok(Self {
            scraper: FeedScraper::new(&config),
            flow: PostFlow::new(&config),
            replied_ids: HashSet::new(),
            config,
            _browser: browser,
            driver,
        })
    }

    /// 运行主循环，直到进程被外部终止
    pub async fn run(mut self) -> Result<()> {
        loop {
            if let Err(e) = self.run_pass().await {
                let cooldown = cooldown_for(&e, &self.config);
                error!("❌ 主循环错误: {}，{} 秒后重试", e, cooldown.as_secs());
                sleep(cooldown).await;
            }
        }
    }

    /// 完整跑一轮：抓取 → 逐条处理 → 刷新等待
    async fn run_pass(&mut self) -> Result<()> {
        let posts = self.scraper.scrape(&self.driver, &self.replied_ids).await?;

        for (idx, post) in posts.iter().enumerate() {
            let ctx = PostCtx::new(post.id.clone(), idx + 1);

            self.driver
                .navigate(&action_executor::permalink(&self.config.base_url, &post.id))
                .await?;
            human::random_delay(
                self.config.post_settle_min_secs,
                self.config.post_settle_max_secs,
            )
            .await;

            let outcome = self.flow.run(&self.driver, post, &ctx).await;
            if outcome == EngageOutcome::Replied {
                // 只有回复成功才记录，保证同一帖子本次运行内不会被二次回复
                self.replied_ids.insert(post.id.clone());
                info!(
                    "{} 已记录回复: {}",
                    ctx,
                    action_executor::permalink(&self.config.base_url, &post.id)
                );
            }

            human::random_delay(
                self.config.action_delay_min_secs,
                self.config.action_delay_max_secs,
            )
            .await;
        }

        let refresh_secs = human::random_secs(
            self.config.refresh_delay_min_secs,
            self.config.refresh_delay_max_secs,
        );
        info!("🔄 {:.2} 秒后刷新信息流...", refresh_secs);
        sleep(Duration::from_secs_f64(refresh_secs)).await;

        Ok(())
    }
}

/// 根据错误种类决定冷却时长
///
/// AI 服务抖动恢复较快，用短冷却；其余种类用默认冷却。
pub fn cooldown_for(err: &AppError, config: &Config) -> Duration {
    match err {
        AppError::Ai(_) => Duration::from_secs(config.ai_error_cooldown_secs),
        AppError::Session(_)
        | AppError::Browser(_)
        | AppError::Scrape(_)
        | AppError::Action(_)
        | AppError::File(_) => Duration::from_secs(config.error_cooldown_secs),
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 信息流自动互动模式");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📊 单轮目标帖子数: {}", config.max_posts_per_scrape);
    info!("🎯 信息流: {}", config.feed_url);
    info!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_by_error_kind() {
        let config = Config::default();

        let ai_err = AppError::Ai("timeout".to_string());
        assert_eq!(
            cooldown_for(&ai_err, &config),
            Duration::from_secs(config.ai_error_cooldown_secs)
        );

        let scrape_err = AppError::Scrape("page gone".to_string());
        assert_eq!(
            cooldown_for(&scrape_err, &config),
            Duration::from_secs(config.error_cooldown_secs)
        );

        let browser_err = AppError::Browser("element missing".to_string());
        assert_eq!(
            cooldown_for(&browser_err, &config),
            Duration::from_secs(config.error_cooldown_secs)
        );
    }
}
