//! 日志初始化
//!
//! 同时输出到控制台（带颜色）和 bot.log 文件（无颜色）。

use std::sync::OnceLock;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化全局日志订阅器
///
/// 重复调用只生效一次（测试里每个用例都会调用）。
pub fn init() {
    let file_appender = tracing_appender::rolling::never(".", "bot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // guard 必须存活到进程结束，否则文件写入线程会提前退出
    static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init();
}
