use anyhow::Result;
use auto_feed_engage::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 读取 .env（不存在则忽略）
    dotenvy::dotenv().ok();

    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
