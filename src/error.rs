//! 应用程序错误类型
//!
//! 按失败类别划分错误种类，顶层主循环根据种类决定冷却时长。

use thiserror::Error;

/// 应用程序错误
///
/// 每个变体对应一类失败：
/// - `Session`：会话初始化失败（致命，不重试）
/// - `Browser`：页面操作失败（元素未出现、脚本执行失败等）
/// - `Scrape`：信息流抓取失败
/// - `Ai`：AI 服务调用失败（网络错误、响应格式错误）
/// - `Action`：互动动作执行失败
/// - `File`：文件操作失败
#[derive(Debug, Error)]
pub enum AppError {
    #[error("会话初始化失败: {0}")]
    Session(String),

    #[error("浏览器操作失败: {0}")]
    Browser(String),

    #[error("信息流抓取失败: {0}")]
    Scrape(String),

    #[error("AI 服务调用失败: {0}")]
    Ai(String),

    #[error("互动动作执行失败: {0}")]
    Action(String),

    #[error("文件操作失败: {0}")]
    File(String),
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Ai(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::Ai(err.to_string())
    }
}
