use anyhow::Result;
use question_paper_check::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    // 初始化并运行应用
    let stats = App::initialize(config).await?.run().await?;

    if stats.failed > 0 {
        anyhow::bail!("{} 个试卷处理失败", stats.failed);
    }

    Ok(())
}
