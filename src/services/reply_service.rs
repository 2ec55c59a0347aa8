//! 回复生成服务 - 业务能力层
//!
//! 调用生成模型起草回复文案，净化后交给执行层。
//! 任何失败都返回 `None`，调用方视为"不回复"。

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::utils::sanitize_reply;

/// 回复人设系统提示词
const PERSONA_SYSTEM_PROMPT: &str = "You are a sharp, slightly sarcastic commentator. \
    You reply to posts with your own ideas and concepts on startups, design, business and tech. \
    Be very specific and clear, keep the reply concise yet profound, don't be rude. \
    Just reply with the reply text, don't add any prefix or suffixes. \
    Also keep your replies to 1 liner if you don't have anything specific to say.";

/// 消息 API 协议版本
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<GenerateMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct GenerateMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// 回复生成服务
pub struct ReplyService {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_tokens: u32,
}

impl ReplyService {
    /// 创建新的回复生成服务
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.anthropic_api_key.clone(),
            api_base: config.anthropic_api_base.clone(),
            model: config.reply_model.clone(),
            max_tokens: config.reply_max_tokens,
        }
    }

    /// 为一条帖子起草回复
    ///
    /// 返回已净化的回复文本；失败或内容为空时返回 `None`。
    pub async fn compose(&self, post_text: &str, rationale: &str) -> Option<String> {
        match self.request_reply(post_text, rationale).await {
            Ok(raw) => finalize_reply(&raw),
            Err(e) => {
                error!("生成回复失败: {}", e);
                None
            }
        }
    }

    async fn request_reply(&self, post_text: &str, rationale: &str) -> Result<String> {
        debug!("调用生成模型，模型: {}", self.model);

        let body = GenerateRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: 0.0,
            system: PERSONA_SYSTEM_PROMPT,
            messages: vec![GenerateMessage {
                role: "user",
                content: format!(
                    "Reply for this post: {}\nContext from analysis: {}",
                    post_text, rationale
                ),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.api_base))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        extract_text(&response).ok_or_else(|| AppError::Ai("生成模型返回内容为空".to_string()))
    }
}

/// 从响应中提取首个文本块
fn extract_text(response: &GenerateResponse) -> Option<String> {
    response
        .content
        .iter()
        .find(|block| block.kind == "text" && !block.text.is_empty())
        .map(|block| block.text.clone())
}

/// 净化回复并过滤空结果
fn finalize_reply(raw: &str) -> Option<String> {
    let sanitized = sanitize_reply(raw);
    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"content": [{"type": "text", "text": "Pricing is simple: pay once, complain forever."}]}"#,
        )
        .unwrap();
        assert_eq!(
            extract_text(&response).as_deref(),
            Some("Pricing is simple: pay once, complain forever.")
        );
    }

    #[test]
    fn test_extract_text_skips_non_text_blocks() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"content": [{"type": "tool_use"}, {"type": "text", "text": "hi"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&response).as_deref(), Some("hi"));
    }

    #[test]
    fn test_extract_text_empty_response() {
        let response: GenerateResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert_eq!(extract_text(&response), None);

        let response: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(extract_text(&response), None);
    }

    #[test]
    fn test_finalize_reply_passes_clean_text() {
        // 已符合约束的文本原样通过
        let text = "Pricing is simple: pay once, complain forever.";
        assert_eq!(finalize_reply(text).as_deref(), Some(text));
    }

    #[test]
    fn test_finalize_reply_rejects_empty() {
        assert_eq!(finalize_reply(""), None);
        assert_eq!(finalize_reply("   \n\t  "), None);
        assert_eq!(finalize_reply("\u{1f600}\u{1f601}"), None);
    }
}
