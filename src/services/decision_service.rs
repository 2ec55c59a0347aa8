//! 决策服务 - 业务能力层
//!
//! 只负责"为一条帖子选互动动作"，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 通过 json_schema 结构化输出约束模型返回
//! - 兼容 OpenAI API 的服务
//!
//! 任何失败路径都降级为兜底的 Skip 决策，绝不向调用方抛错。

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
        ResponseFormatJsonSchema,
    },
    Client,
};
use serde_json::json;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::ActionDecision;

/// 决策系统提示词
const DECISION_SYSTEM_PROMPT: &str = "Analyze social feed posts and decide the best action to take. Consider:\n\
    - Post content quality and relevance\n\
    - Potential for meaningful engagement\n\
    - Appropriateness of different interaction types\n\
    - Risk of spam or inappropriate content";

/// 决策服务
pub struct DecisionService {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl DecisionService {
    /// 创建新的决策服务
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.openai_api_key)
            .with_api_base(&config.openai_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.decision_model.clone(),
            temperature: config.decision_temperature,
        }
    }

    /// 为一条帖子选择互动动作
    ///
    /// 决策失败（网络错误、响应格式错误）一律返回兜底决策，不向上抛错。
    pub async fn decide(&self, post_text: &str) -> ActionDecision {
        match self.request_decision(post_text).await {
            Ok(decision) => decision,
            Err(e) => {
                error!("决策调用失败，降级为跳过: {}", e);
                ActionDecision::fallback()
            }
        }
    }

    async fn request_decision(&self, post_text: &str) -> Result<ActionDecision> {
        debug!("调用分类模型，模型: {}", self.model);

        let mut messages = Vec::new();

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(DECISION_SYSTEM_PROMPT)
            .build()?;
        messages.push(ChatCompletionRequestMessage::System(system_msg));

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(format!("Decide action for this post:\n\n{}", post_text))
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .response_format(decision_response_format())
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("分类模型调用失败: {}", e);
            AppError::Ai(e.to_string())
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::Ai("分类模型返回内容为空".to_string()))?;

        parse_decision(&content)
    }
}

/// 决策输出的 JSON Schema（strict 模式）
fn decision_response_format() -> ResponseFormat {
    ResponseFormat::JsonSchema {
        json_schema: ResponseFormatJsonSchema {
            description: None,
            name: "engage_decision".to_string(),
            schema: Some(json!({
                "type": "object",
                "properties": {
                    "action": {
                        "type": "string",
                        "enum": ["Like", "Reshare", "Reply", "Skip"]
                    },
                    "content": {
                        "type": "string",
                        "description": "The content associated with the action."
                    }
                },
                "required": ["action", "content"],
                "additionalProperties": false
            })),
            strict: Some(true),
        },
    }
}

/// 解析模型返回的决策 JSON
fn parse_decision(raw: &str) -> Result<ActionDecision> {
    serde_json::from_str(raw).map_err(|e| AppError::Ai(format!("决策 JSON 解析失败: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EngageAction;

    #[test]
    fn test_parse_decision_valid() {
        let decision =
            parse_decision(r#"{"action": "Reply", "content": "engage with their pricing question"}"#)
                .unwrap();
        assert_eq!(decision.action, EngageAction::Reply);
        assert_eq!(decision.content, "engage with their pricing question");
    }

    #[test]
    fn test_parse_decision_invalid_json() {
        assert!(parse_decision("not json at all").is_err());
        assert!(parse_decision(r#"{"action": "Like"}"#).is_err());
        assert!(parse_decision(r#"{"action": "Dance", "content": "x"}"#).is_err());
    }

    #[test]
    fn test_invalid_decision_degrades_to_fallback() {
        // 解析失败走的兜底路径与 decide() 的失败路径一致
        let decision = parse_decision("{broken").unwrap_or_else(|_| ActionDecision::fallback());
        assert_eq!(decision.action, EngageAction::Skip);
        assert_eq!(decision.content, "Error in decision making process");
    }
}
