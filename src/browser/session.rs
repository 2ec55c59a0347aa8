//! 浏览器会话
//!
//! 启动带会话 Cookie 的浏览器上下文。此处的任何失败都是致命的，
//! 不做重试，由进程直接退出。

use chromiumoxide::browser::BrowserConfig;
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::browser::{human, stealth};
use crate::config::Config;
use crate::error::{AppError, Result};

/// 启动浏览器并注入会话 Cookie
///
/// 流程：随机窗口尺寸 → 启动浏览器 → 注册指纹屏蔽脚本 → 打开站点 →
/// 写入 Cookie → 重新导航使会话生效。
pub async fn launch_session(config: &Config) -> Result<(Browser, Page)> {
    let (width, height) = human::random_viewport(config);
    info!("🚀 启动浏览器，窗口尺寸 {}x{}", width, height);

    let mut builder = BrowserConfig::builder()
        .window_size(width, height)
        .user_data_dir(&config.user_data_dir)
        .args(launch_args(config));
    if !config.headless {
        builder = builder.with_head();
    }
    let browser_config = builder.build().map_err(AppError::Session)?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        AppError::Session(e.to_string())
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        AppError::Session(e.to_string())
    })?;

    stealth::apply(&page).await?;

    // 先打开站点域名，才能对该域写入 Cookie
    page.goto(config.base_url.as_str())
        .await
        .map_err(|e| AppError::Session(format!("导航到 {} 失败: {}", config.base_url, e)))?;

    page.set_cookies(session_cookies(config)?)
        .await
        .map_err(|e| AppError::Session(format!("写入会话 Cookie 失败: {}", e)))?;
    debug!("会话 Cookie 已写入");

    // 重新导航使 Cookie 生效
    page.goto(config.base_url.as_str())
        .await
        .map_err(|e| AppError::Session(format!("应用会话失败: {}", e)))?;

    info!("✓ 浏览器会话已就绪: {}", config.base_url);
    Ok((browser, page))
}

/// 浏览器启动参数
fn launch_args(config: &Config) -> Vec<String> {
    vec![
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-blink-features=AutomationControlled".to_string(),
        "--ignore-certificate-errors".to_string(),
        "--ignore-ssl-errors".to_string(),
        format!("--user-agent={}", config.user_agent),
    ]
}

/// 构造会话 Cookie
fn session_cookies(config: &Config) -> Result<Vec<CookieParam>> {
    Ok(vec![
        session_cookie("auth_token", &config.auth_token, &config.cookie_domain)?,
        session_cookie("ct0", &config.ct0, &config.cookie_domain)?,
    ])
}

fn session_cookie(name: &str, value: &str, domain: &str) -> Result<CookieParam> {
    CookieParam::builder()
        .name(name)
        .value(value)
        .domain(domain)
        .path("/")
        .secure(true)
        .build()
        .map_err(|e| AppError::Session(format!("构造 Cookie {} 失败: {}", name, e)))
}
