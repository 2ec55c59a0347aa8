/// 程序配置
///
/// 所有延迟与超时均可通过环境变量覆盖，默认值为经验值而非行为契约。
#[derive(Clone, Debug)]
pub struct Config {
    // --- 目标站点 ---
    /// 信息流页面 URL
    pub feed_url: String,
    /// 站点根 URL
    pub base_url: String,
    /// 会话 Cookie 所属域名
    pub cookie_domain: String,
    /// auth_token 会话 Cookie
    pub auth_token: String,
    /// ct0 会话 Cookie
    pub ct0: String,
    // --- 浏览器 ---
    /// 是否无头模式
    pub headless: bool,
    /// 浏览器 User-Agent
    pub user_agent: String,
    /// 用户数据目录（持久化浏览器配置）
    pub user_data_dir: String,
    /// 错误截图目录
    pub screenshot_dir: String,
    /// 窗口宽度随机范围
    pub viewport_width_min: u32,
    pub viewport_width_max: u32,
    /// 窗口高度随机范围
    pub viewport_height_min: u32,
    pub viewport_height_max: u32,
    // --- 分类模型（决策） ---
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub decision_model: String,
    pub decision_temperature: f32,
    // --- 生成模型（回复） ---
    pub anthropic_api_key: String,
    pub anthropic_api_base: String,
    pub reply_model: String,
    pub reply_max_tokens: u32,
    // --- 抓取 ---
    /// 单轮抓取的目标帖子数
    pub max_posts_per_scrape: usize,
    /// 进入信息流后的等待范围（秒）
    pub feed_settle_min_secs: f64,
    pub feed_settle_max_secs: f64,
    /// 滚动后等待加载的范围（秒）
    pub scroll_delay_min_secs: f64,
    pub scroll_delay_max_secs: f64,
    // --- 动作节奏 ---
    /// 打开帖子后的停顿范围（秒）
    pub post_settle_min_secs: f64,
    pub post_settle_max_secs: f64,
    /// 相邻动作之间的延迟范围（秒）
    pub action_delay_min_secs: f64,
    pub action_delay_max_secs: f64,
    /// 刷新信息流的间隔范围（秒）
    pub refresh_delay_min_secs: f64,
    pub refresh_delay_max_secs: f64,
    /// 主循环出错后的冷却时长（秒）
    pub error_cooldown_secs: u64,
    /// AI 服务出错后的冷却时长（秒）
    pub ai_error_cooldown_secs: u64,
    // --- 页面交互 ---
    /// 一般元素等待超时（秒）
    pub element_wait_secs: u64,
    /// 回复输入框/提交按钮等待超时（秒）
    pub compose_wait_secs: u64,
    /// 模拟打字的分块大小（字符）
    pub typing_chunk_size: usize,
    /// 分块之间的停顿（毫秒）
    pub typing_chunk_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: "https://x.com/home".to_string(),
            base_url: "https://x.com".to_string(),
            cookie_domain: "x.com".to_string(),
            auth_token: String::new(),
            ct0: String::new(),
            headless: false,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36".to_string(),
            user_data_dir: "user_data".to_string(),
            screenshot_dir: "errorScreenshots".to_string(),
            viewport_width_min: 1200,
            viewport_width_max: 1920,
            viewport_height_min: 800,
            viewport_height_max: 1080,
            openai_api_key: String::new(),
            openai_api_base: "https://api.openai.com/v1".to_string(),
            decision_model: "gpt-4o-mini".to_string(),
            decision_temperature: 1.0,
            anthropic_api_key: String::new(),
            anthropic_api_base: "https://api.anthropic.com".to_string(),
            reply_model: "claude-3-5-haiku-20241022".to_string(),
            reply_max_tokens: 1000,
            max_posts_per_scrape: 20,
            feed_settle_min_secs: 2.0,
            feed_settle_max_secs: 5.0,
            scroll_delay_min_secs: 1.5,
            scroll_delay_max_secs: 3.0,
            post_settle_min_secs: 2.0,
            post_settle_max_secs: 4.0,
            action_delay_min_secs: 60.0,
            action_delay_max_secs: 300.0,
            refresh_delay_min_secs: 300.0,
            refresh_delay_max_secs: 600.0,
            error_cooldown_secs: 300,
            ai_error_cooldown_secs: 60,
            element_wait_secs: 10,
            compose_wait_secs: 15,
            typing_chunk_size: 50,
            typing_chunk_delay_ms: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            feed_url: std::env::var("FEED_URL").unwrap_or(default.feed_url),
            base_url: std::env::var("BASE_URL").unwrap_or(default.base_url),
            cookie_domain: std::env::var("COOKIE_DOMAIN").unwrap_or(default.cookie_domain),
            auth_token: std::env::var("X_AUTH_TOKEN").unwrap_or(default.auth_token),
            ct0: std::env::var("X_CT0").unwrap_or(default.ct0),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            user_agent: std::env::var("USER_AGENT").unwrap_or(default.user_agent),
            user_data_dir: std::env::var("USER_DATA_DIR").unwrap_or(default.user_data_dir),
            screenshot_dir: std::env::var("SCREENSHOT_DIR").unwrap_or(default.screenshot_dir),
            viewport_width_min: std::env::var("VIEWPORT_WIDTH_MIN").ok().and_then(|v| v.parse().ok()).unwrap_or(default.viewport_width_min),
            viewport_width_max: std::env::var("VIEWPORT_WIDTH_MAX").ok().and_then(|v| v.parse().ok()).unwrap_or(default.viewport_width_max),
            viewport_height_min: std::env::var("VIEWPORT_HEIGHT_MIN").ok().and_then(|v| v.parse().ok()).unwrap_or(default.viewport_height_min),
            viewport_height_max: std::env::var("VIEWPORT_HEIGHT_MAX").ok().and_then(|v| v.parse().ok()).unwrap_or(default.viewport_height_max),
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or(default.openai_api_key),
            openai_api_base: std::env::var("OPENAI_API_BASE").unwrap_or(default.openai_api_base),
            decision_model: std::env::var("DECISION_MODEL").unwrap_or(default.decision_model),
            decision_temperature: std::env::var("DECISION_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.decision_temperature),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or(default.anthropic_api_key),
            anthropic_api_base: std::env::var("ANTHROPIC_API_BASE").unwrap_or(default.anthropic_api_base),
            reply_model: std::env::var("REPLY_MODEL").unwrap_or(default.reply_model),
            reply_max_tokens: std::env::var("REPLY_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reply_max_tokens),
            max_posts_per_scrape: std::env::var("MAX_POSTS_PER_SCRAPE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_posts_per_scrape),
            feed_settle_min_secs: std::env::var("FEED_SETTLE_MIN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.feed_settle_min_secs),
            feed_settle_max_secs: std::env::var("FEED_SETTLE_MAX_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.feed_settle_max_secs),
            scroll_delay_min_secs: std::env::var("SCROLL_DELAY_MIN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.scroll_delay_min_secs),
            scroll_delay_max_secs: std::env::var("SCROLL_DELAY_MAX_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.scroll_delay_max_secs),
            post_settle_min_secs: std::env::var("POST_SETTLE_MIN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.post_settle_min_secs),
            post_settle_max_secs: std::env::var("POST_SETTLE_MAX_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.post_settle_max_secs),
            action_delay_min_secs: std::env::var("ACTION_DELAY_MIN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.action_delay_min_secs),
            action_delay_max_secs: std::env::var("ACTION_DELAY_MAX_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.action_delay_max_secs),
            refresh_delay_min_secs: std::env::var("REFRESH_DELAY_MIN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.refresh_delay_min_secs),
            refresh_delay_max_secs: std::env::var("REFRESH_DELAY_MAX_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.refresh_delay_max_secs),
            error_cooldown_secs: std::env::var("ERROR_COOLDOWN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.error_cooldown_secs),
            ai_error_cooldown_secs: std::env::var("AI_ERROR_COOLDOWN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.ai_error_cooldown_secs),
            element_wait_secs: std::env::var("ELEMENT_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.element_wait_secs),
            compose_wait_secs: std::env::var("COMPOSE_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.compose_wait_secs),
            typing_chunk_size: std::env::var("TYPING_CHUNK_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.typing_chunk_size),
            typing_chunk_delay_ms: std::env::var("TYPING_CHUNK_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.typing_chunk_delay_ms),
        }
    }
}
