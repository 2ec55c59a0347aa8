//! 页面驱动 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露能力

use std::path::Path;
use std::time::Duration;

use chromiumoxide::element::Element;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio::time::{sleep, Instant};

use crate::error::{AppError, Result};

/// 元素轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 页面驱动
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 navigate / eval / wait_for / click / type / screenshot 能力
/// - 不认识 Post / Decision
/// - 不处理业务流程
pub struct PageDriver {
    page: Page,
}

impl PageDriver {
    /// 创建新的页面驱动
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 导航到指定 URL
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::Browser(format!("导航到 {} 失败: {}", url, e)))?;
        Ok(())
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result
            .into_value()
            .map_err(|e| AppError::Browser(format!("解析脚本返回值失败: {}", e)))?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)
            .map_err(|e| AppError::Browser(format!("脚本返回值类型不匹配: {}", e)))?;
        Ok(typed_value)
    }

    /// 等待元素出现
    ///
    /// 以固定间隔轮询选择器，超时返回 `AppError::Browser`。
    pub async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<Element> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(AppError::Browser(format!("等待元素超时: {}", selector)));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// 等待元素出现并点击
    pub async fn click(&self, selector: &str, timeout: Duration) -> Result<()> {
        let element = self.wait_for(selector, timeout).await?;
        element
            .click()
            .await
            .map_err(|e| AppError::Browser(format!("点击 {} 失败: {}", selector, e)))?;
        Ok(())
    }

    /// 向元素输入文本（模拟键盘事件）
    pub async fn type_text(&self, element: &Element, text: &str) -> Result<()> {
        element
            .type_str(text)
            .await
            .map_err(|e| AppError::Browser(format!("输入文本失败: {}", e)))?;
        Ok(())
    }

    /// 向元素发送按键
    pub async fn press_key(&self, element: &Element, key: &str) -> Result<()> {
        element
            .press_key(key)
            .await
            .map_err(|e| AppError::Browser(format!("按键 {} 失败: {}", key, e)))?;
        Ok(())
    }

    /// 清空当前聚焦的输入区域
    pub async fn clear_focused(&self) -> Result<()> {
        self.eval(
            "(() => { \
                document.execCommand('selectAll', false, null); \
                document.execCommand('delete', false, null); \
                return true; \
            })()",
        )
        .await?;
        Ok(())
    }

    /// 滚动到页面底部
    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.eval("(() => { window.scrollTo(0, document.body.scrollHeight); return true; })()")
            .await?;
        Ok(())
    }

    /// 获取当前页面高度
    pub async fn scroll_height(&self) -> Result<i64> {
        self.eval_as("document.body.scrollHeight").await
    }

    /// 保存页面截图
    pub async fn screenshot(&self, path: &Path) -> Result<()> {
        self.page
            .save_screenshot(ScreenshotParams::builder().build(), path)
            .await
            .map_err(|e| AppError::Browser(format!("保存截图失败: {}", e)))?;
        Ok(())
    }
}
