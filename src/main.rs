use anyhow::Result;
use clap::Parser;
use dashie_rs::{cli, launch, utils::logging::init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    // .env中的密钥需要在读取默认配置之前加载
    dotenv::dotenv().ok();

    let args = cli::Args::parse();
    let config = args.into_config()?;
    init_logging(config.verbose);

    launch(&config).await
}
