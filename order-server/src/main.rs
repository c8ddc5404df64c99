use order_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env 和配置
    dotenv::dotenv().ok();
    let config = Config::from_env();
    config.validate()?;

    // 2. 设置环境 (工作目录, 日志)
    setup_environment(&config)?;

    tracing::info!(
        "Bakery order server starting (env: {}, tz: {})",
        config.environment,
        config.business_timezone
    );

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
