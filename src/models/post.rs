//! 帖子与互动决策模型

use serde::{Deserialize, Serialize};

/// 信息流中的一条帖子
///
/// `id` 从帖子固定链接中提取，在单轮循环内唯一标识该帖子。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub text: String,
}

/// 互动动作
///
/// 枚举标签同时是分类模型输出 Schema 中的合法取值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngageAction {
    Like,
    Reshare,
    Reply,
    Skip,
}

/// 分类模型给出的互动决策
///
/// `content` 在 Reply 时是回复思路，其余情况是决策理由。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionDecision {
    pub action: EngageAction,
    pub content: String,
}

impl ActionDecision {
    /// 决策失败时的兜底决策
    ///
    /// 任何分类调用失败（网络错误、JSON 格式错误）都降级为该值，不向上抛错。
    pub fn fallback() -> Self {
        Self {
            action: EngageAction::Skip,
            content: "Error in decision making process".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_decision() {
        let decision = ActionDecision::fallback();
        assert_eq!(decision.action, EngageAction::Skip);
        assert_eq!(decision.content, "Error in decision making process");
    }

    #[test]
    fn test_action_labels() {
        // 枚举标签是分类模型的输出契约，不能随重构改变
        let decision: ActionDecision =
            serde_json::from_str(r#"{"action": "Reshare", "content": "boost it"}"#).unwrap();
        assert_eq!(decision.action, EngageAction::Reshare);

        let invalid = serde_json::from_str::<ActionDecision>(
            r#"{"action": "Retweet", "content": "unknown label"}"#,
        );
        assert!(invalid.is_err());
    }
}
