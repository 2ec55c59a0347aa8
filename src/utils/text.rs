//! 文本工具
//!
//! 回复文本净化与日志显示辅助。

/// 平台单条帖子的最大长度（字符）
pub const MAX_POST_LEN: usize = 280;

/// 可打印 ASCII 之外额外保留的标点
const EXTRA_ALLOWED: [char; 4] = ['\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'];

/// 净化回复文本
///
/// 规则（发送任何回复前必须执行）：
/// 1. 仅保留可打印 ASCII（32-126）和少量弯引号标点
/// 2. 连续空白折叠为单个空格
/// 3. 截断到平台最大长度
///
/// 该函数满足幂等性：`sanitize_reply(sanitize_reply(x)) == sanitize_reply(x)`。
pub fn sanitize_reply(text: &str) -> String {
    let filtered: String = text
        .chars()
        .filter(|c| matches!(*c as u32, 32..=126) || EXTRA_ALLOWED.contains(c))
        .collect();

    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

    // 截断可能恰好停在词边界后，留下的尾部空格会破坏幂等性
    collapsed
        .chars()
        .take(MAX_POST_LEN)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// 将一行文本按固定字符数分块
///
/// 用于模拟人工输入时的分块打字。
pub fn chunk_text(line: &str, chunk_size: usize) -> Vec<String> {
    if chunk_size == 0 {
        return vec![line.to_string()];
    }

    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(chunk_size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_is_idempotent() {
        let boundary_cut = "a ".repeat(300);
        let inputs = [
            "Pricing is simple: pay once, complain forever.",
            "  multiple   spaces\tand\nnewlines  ",
            "emoji \u{1f680} and \u{4e2d}\u{6587} stripped",
            "\u{201c}curly quotes survive\u{201d}",
            boundary_cut.as_str(),
            "",
        ];
        for input in inputs {
            let once = sanitize_reply(input);
            assert_eq!(sanitize_reply(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_sanitize_length_and_charset() {
        let long_input = "word ".repeat(200);
        let sanitized = sanitize_reply(&long_input);
        assert!(sanitized.chars().count() <= MAX_POST_LEN);
        assert!(sanitized
            .chars()
            .all(|c| matches!(c as u32, 32..=126) || EXTRA_ALLOWED.contains(&c)));
    }

    #[test]
    fn test_sanitize_passes_clean_text_unchanged() {
        let text = "Pricing is simple: pay once, complain forever.";
        assert_eq!(sanitize_reply(text), text);
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(sanitize_reply("a  b\t\tc\n\nd"), "a b c d");
    }

    #[test]
    fn test_sanitize_strips_non_ascii() {
        assert_eq!(sanitize_reply("caf\u{e9} \u{1f389} time"), "caf time");
    }

    #[test]
    fn test_chunk_text() {
        assert_eq!(chunk_text("abcdef", 2), vec!["ab", "cd", "ef"]);
        assert_eq!(chunk_text("abcde", 2), vec!["ab", "cd", "e"]);
        assert_eq!(chunk_text("", 2), Vec::<String>::new());
        assert_eq!(chunk_text("abc", 0), vec!["abc"]);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 5), "hello...");
    }
}
