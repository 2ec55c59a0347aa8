//! 自动化特征屏蔽
//!
//! 在每次导航前注入 navigator 属性覆盖，隐藏常见的自动化检测信号。

use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::Page;
use tracing::debug;

use crate::error::{AppError, Result};

/// navigator 属性覆盖脚本
const STEALTH_SCRIPT: &str = r#"
    Object.defineProperty(navigator, 'webdriver', {get: () => undefined});
    window.navigator.chrome = {runtime: {}};
    Object.defineProperty(navigator, 'languages', {get: () => ['en-US', 'en']});
    Object.defineProperty(navigator, 'plugins', {get: () => [1, 2, 3]});
"#;

/// 为页面注册指纹屏蔽脚本
///
/// 通过 `Page.addScriptToEvaluateOnNewDocument` 注册，对之后的每次导航都生效。
pub async fn apply(page: &Page) -> Result<()> {
    page.evaluate_on_new_document(
        AddScriptToEvaluateOnNewDocumentParams::builder()
            .source(STEALTH_SCRIPT)
            .build()
            .map_err(AppError::Session)?,
    )
    .await?;

    debug!("指纹屏蔽脚本已注册");
    Ok(())
}
