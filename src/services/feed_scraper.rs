//! 信息流抓取 - 业务能力层
//!
//! 职责：
//! - 打开信息流页面，滚动采集可见帖子
//! - 过滤已回复过的帖子
//! - 不做任何互动决策
//!
//! 终止条件：凑够目标数量，或页面高度连续两次测量不变（到底了）。
//! 单个元素提取失败直接跳过，等待渲染超时以已采集的结果提前结束。

use std::collections::HashSet;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::browser::{human, selectors};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::infrastructure::PageDriver;
use crate::models::Post;

/// 页面中采集到的原始帖子数据
#[derive(Debug, Deserialize)]
struct RawPost {
    href: String,
    text: String,
}

/// 信息流抓取器
pub struct FeedScraper {
    feed_url: String,
    max_posts: usize,
    feed_settle_secs: (f64, f64),
    scroll_delay_secs: (f64, f64),
    element_wait: Duration,
}

impl FeedScraper {
    pub fn new(config: &Config) -> Self {
        Self {
            feed_url: config.feed_url.clone(),
            max_posts: config.max_posts_per_scrape,
            feed_settle_secs: (config.feed_settle_min_secs, config.feed_settle_max_secs),
            scroll_delay_secs: (config.scroll_delay_min_secs, config.scroll_delay_max_secs),
            element_wait: Duration::from_secs(config.element_wait_secs),
        }
    }

    /// 抓取一轮信息流
    ///
    /// 返回的帖子不含 `seen` 中的 ID，也不含重复 ID。
    pub async fn scrape(&self, driver: &PageDriver, seen: &HashSet<String>) -> Result<Vec<Post>> {
        info!("📜 访问信息流页面...");
        driver.navigate(&self.feed_url).await?;
        human::random_delay(self.feed_settle_secs.0, self.feed_settle_secs.1).await;

        let permalink_re = Regex::new(r"/status/(\d+)")
            .map_err(|e| AppError::Scrape(format!("固定链接正则无效: {}", e)))?;

        let mut posts: Vec<Post> = Vec::new();
        let mut last_height = match driver.scroll_height().await {
            Ok(height) => height,
            Err(e) => {
                warn!("读取页面高度失败，结束抓取: {}", e);
                return Ok(posts);
            }
        };

        while posts.len() < self.max_posts {
            // 等待帖子渲染；超时则以现有结果提前结束
            if let Err(e) = driver.wait_for(selectors::POST_TEXT, self.element_wait).await {
                warn!("等待帖子渲染超时，提前结束抓取: {}", e);
                break;
            }

            match driver.eval_as::<Vec<RawPost>>(collect_posts_script()).await {
                Ok(raw) => {
                    let added =
                        accumulate_unique(&permalink_re, raw, seen, &mut posts, self.max_posts);
                    debug!("本轮新增 {} 条帖子，累计 {} 条", added, posts.len());
                }
                Err(e) => {
                    warn!("采集帖子元素失败，结束抓取: {}", e);
                    break;
                }
            }

            if posts.len() >= self.max_posts {
                break;
            }

            if let Err(e) = driver.scroll_to_bottom().await {
                warn!("滚动页面失败，结束抓取: {}", e);
                break;
            }
            human::random_delay(self.scroll_delay_secs.0, self.scroll_delay_secs.1).await;

            let new_height = match driver.scroll_height().await {
                Ok(height) => height,
                Err(e) => {
                    warn!("读取页面高度失败，结束抓取: {}", e);
                    break;
                }
            };
            if new_height == last_height {
                debug!("页面高度不再增长 ({})，到底了", new_height);
                break;
            }
            last_height = new_height;
        }

        info!("✓ 共抓取 {} 条帖子", posts.len());
        Ok(posts)
    }
}

/// 采集当前已渲染帖子的脚本
///
/// 脚本内部对每个元素单独 try/catch：单个异常元素不能中断整轮采集。
fn collect_posts_script() -> String {
    format!(
        r#"
        (() => {{
            const collected = [];
            const nodes = document.querySelectorAll('{post_text}');
            for (const node of nodes) {{
                try {{
                    const article = node.closest('article');
                    if (!article) continue;
                    const link = article.querySelector('{permalink}');
                    if (!link) continue;
                    collected.push({{
                        href: link.getAttribute('href') || '',
                        text: node.innerText || ''
                    }});
                }} catch (e) {{
                    continue;
                }}
            }}
            return collected;
        }})()
        "#,
        post_text = selectors::POST_TEXT,
        permalink = selectors::PERMALINK_ANCHOR,
    )
}

/// 将原始采集结果并入帖子列表
///
/// 过滤：无法解析 ID 的元素、`seen` 中已回复过的 ID、本轮已采集的 ID。
/// 返回新增数量，列表长度不超过 `max_posts`。
fn accumulate_unique(
    permalink_re: &Regex,
    raw: Vec<RawPost>,
    seen: &HashSet<String>,
    posts: &mut Vec<Post>,
    max_posts: usize,
) -> usize {
    let mut added = 0;
    for item in raw {
        if posts.len() >= max_posts {
            break;
        }
        let Some(id) = post_id_from_href(permalink_re, &item.href) else {
            continue;
        };
        if seen.contains(&id) || posts.iter().any(|p| p.id == id) {
            continue;
        }
        posts.push(Post {
            id,
            text: item.text,
        });
        added += 1;
    }
    added
}

/// 从固定链接中提取帖子 ID
fn post_id_from_href(permalink_re: &Regex, href: &str) -> Option<String> {
    permalink_re
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re() -> Regex {
        Regex::new(r"/status/(\d+)").unwrap()
    }

    fn raw(href: &str, text: &str) -> RawPost {
        RawPost {
            href: href.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_post_id_from_href() {
        let re = re();
        assert_eq!(
            post_id_from_href(&re, "/someone/status/1234567890").as_deref(),
            Some("1234567890")
        );
        assert_eq!(
            post_id_from_href(&re, "https://x.com/a/status/42?s=20").as_deref(),
            Some("42")
        );
        assert_eq!(post_id_from_href(&re, "/someone/with_replies"), None);
        assert_eq!(post_id_from_href(&re, ""), None);
    }

    #[test]
    fn test_accumulate_filters_seen_ids() {
        let re = re();
        let mut seen = HashSet::new();
        seen.insert("1".to_string());

        let mut posts = Vec::new();
        let added = accumulate_unique(
            &re,
            vec![raw("/a/status/1", "already replied"), raw("/b/status/2", "new")],
            &seen,
            &mut posts,
            20,
        );

        assert_eq!(added, 1);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "2");
    }

    #[test]
    fn test_accumulate_dedupes_within_run() {
        let re = re();
        let seen = HashSet::new();
        let mut posts = Vec::new();

        accumulate_unique(
            &re,
            vec![raw("/a/status/7", "first"), raw("/a/status/7", "dup")],
            &seen,
            &mut posts,
            20,
        );
        // 跨轮次滚动也不会重复采集
        accumulate_unique(&re, vec![raw("/a/status/7", "again")], &seen, &mut posts, 20);

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].text, "first");
    }

    #[test]
    fn test_accumulate_skips_malformed_elements() {
        let re = re();
        let seen = HashSet::new();
        let mut posts = Vec::new();

        let added = accumulate_unique(
            &re,
            vec![raw("", "no href"), raw("/profile", "no id"), raw("/a/status/5", "ok")],
            &seen,
            &mut posts,
            20,
        );

        assert_eq!(added, 1);
        assert_eq!(posts[0].id, "5");
    }

    #[test]
    fn test_accumulate_respects_max_posts() {
        let re = re();
        let seen = HashSet::new();
        let mut posts = Vec::new();

        let batch: Vec<RawPost> = (0..30)
            .map(|i| raw(&format!("/a/status/{}", i), "post"))
            .collect();
        let added = accumulate_unique(&re, batch, &seen, &mut posts, 20);

        assert_eq!(added, 20);
        assert_eq!(posts.len(), 20);
    }
}
