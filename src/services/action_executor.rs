//! 动作执行 - 业务能力层
//!
//! 在浏览器中执行决策给出的互动动作：
//! - Like：点击点赞按钮
//! - Reshare：点击转发按钮 + 确认按钮（两段式提交）
//! - Reply：打开帖子页，分块模拟打字后提交，失败时保存截图
//!
//! 各动作互不影响，单个动作失败不会中断主循环。

use std::path::PathBuf;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info};

use crate::browser::selectors;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::infrastructure::PageDriver;
use crate::utils::chunk_text;
use crate::workflow::PostCtx;

/// 打开帖子页后的固定停顿
const POST_NAV_SETTLE: Duration = Duration::from_secs(3);
/// 点击回复按钮后等待输入框弹出的停顿
const COMPOSE_OPEN_DELAY: Duration = Duration::from_secs(2);
/// 聚焦输入框后的停顿
const FOCUS_DELAY: Duration = Duration::from_millis(500);
/// 转发确认按钮弹出前的停顿
const RESHARE_CONFIRM_DELAY: Duration = Duration::from_secs(1);
/// 输入完成到点击提交之间的停顿
const PRE_SUBMIT_DELAY: Duration = Duration::from_secs(1);
/// 提交后等待页面落定的停顿
const POST_SUBMIT_DELAY: Duration = Duration::from_secs(5);

/// 帖子固定链接
pub fn permalink(base_url: &str, post_id: &str) -> String {
    format!("{}/i/web/status/{}", base_url, post_id)
}

/// 动作执行器
pub struct ActionExecutor {
    base_url: String,
    screenshot_dir: PathBuf,
    element_wait: Duration,
    compose_wait: Duration,
    typing_chunk_size: usize,
    typing_chunk_delay: Duration,
}

impl ActionExecutor {
    /// 创建新的动作执行器
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            screenshot_dir: PathBuf::from(&config.screenshot_dir),
            element_wait: Duration::from_secs(config.element_wait_secs),
            compose_wait: Duration::from_secs(config.compose_wait_secs),
            typing_chunk_size: config.typing_chunk_size,
            typing_chunk_delay: Duration::from_millis(config.typing_chunk_delay_ms),
        }
    }

    /// 点赞当前打开的帖子
    pub async fn like(&self, driver: &PageDriver, ctx: &PostCtx) -> Result<()> {
        driver
            .click(selectors::LIKE, self.element_wait)
            .await
            .map_err(|e| AppError::Action(format!("点赞失败: {}", e)))?;

        info!("{} 👍 已点赞", ctx);
        Ok(())
    }

    /// 转发当前打开的帖子
    ///
    /// 两段式提交：确认按钮在超时内未出现即视为失败，不重试。
    pub async fn reshare(&self, driver: &PageDriver, ctx: &PostCtx) -> Result<()> {
        driver
            .click(selectors::RESHARE, self.element_wait)
            .await
            .map_err(|e| AppError::Action(format!("点击转发失败: {}", e)))?;

        sleep(RESHARE_CONFIRM_DELAY).await;

        driver
            .click(selectors::RESHARE_CONFIRM, self.element_wait)
            .await
            .map_err(|e| AppError::Action(format!("确认转发失败: {}", e)))?;

        info!("{} 🔁 已转发", ctx);
        Ok(())
    }

    /// 回复帖子
    ///
    /// 失败时按帖子 ID 保存截图并返回 `false`；调用方只有在返回 `true`
    /// 时才能把该帖子记入已回复集合。
    pub async fn reply(&self, driver: &PageDriver, ctx: &PostCtx, text: &str) -> bool {
        match self.submit_reply(driver, ctx, text).await {
            Ok(()) => {
                info!("{} ✓ 回复已提交", ctx);
                true
            }
            Err(e) => {
                error!("{} ❌ 回复失败: {}", ctx, e);
                self.capture_failure(driver, &ctx.post_id).await;
                false
            }
        }
    }

    async fn submit_reply(&self, driver: &PageDriver, ctx: &PostCtx, text: &str) -> Result<()> {
        driver
            .navigate(&permalink(&self.base_url, &ctx.post_id))
            .await?;
        sleep(POST_NAV_SETTLE).await;

        driver.click(selectors::REPLY, self.compose_wait).await?;
        sleep(COMPOSE_OPEN_DELAY).await;

        let compose = driver
            .wait_for(selectors::COMPOSE_BOX, self.compose_wait)
            .await?;
        compose
            .click()
            .await
            .map_err(|e| AppError::Browser(format!("聚焦输入框失败: {}", e)))?;
        sleep(FOCUS_DELAY).await;
        driver.clear_focused().await?;

        // 分行、分块模拟人工打字，行与行之间显式发送换行键
        let lines: Vec<&str> = text.split('\n').collect();
        for (i, line) in lines.iter().enumerate() {
            for chunk in chunk_text(line, self.typing_chunk_size) {
                driver.type_text(&compose, &chunk).await?;
                sleep(self.typing_chunk_delay).await;
            }
            if i + 1 < lines.len() {
                driver.press_key(&compose, "Enter").await?;
                sleep(self.typing_chunk_delay).await;
            }
        }

        sleep(PRE_SUBMIT_DELAY).await;
        driver.click(selectors::SUBMIT, self.compose_wait).await?;
        sleep(POST_SUBMIT_DELAY).await;

        Ok(())
    }

    /// 保存失败现场截图
    async fn capture_failure(&self, driver: &PageDriver, post_id: &str) {
        let path = self
            .screenshot_dir
            .join(format!("error_screenshot_{}.png", post_id));
        match driver.screenshot(&path).await {
            Ok(()) => info!("截图已保存: {}", path.display()),
            Err(e) => error!("保存截图失败 ({}): {}", post_id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permalink() {
        assert_eq!(
            permalink("https://x.com", "123"),
            "https://x.com/i/web/status/123"
        );
    }
}
