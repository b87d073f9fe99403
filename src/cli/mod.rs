use crate::config::{Config, DEFAULT_CONFIG_FILE, LLMProvider};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Dashie - 由Rust与AI驱动的企业AI战略分析引擎
#[derive(Parser, Debug)]
#[command(name = "Dashie (dashie-rs)")]
#[command(
    about = "AI-based strategy analyst: classifies a company's industry, researches its market, proposes AI/ML use cases and finds supporting datasets, then writes a markdown proposal."
)]
#[command(version)]
pub struct Args {
    /// 需要分析的公司名称
    pub company: Option<String>,

    /// 输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,

    /// LLM Provider (openai, deepseek, openrouter, anthropic, ollama)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// LLM API KEY
    #[arg(long)]
    pub llm_api_key: Option<String>,

    /// LLM API基地址
    #[arg(long)]
    pub llm_api_base_url: Option<String>,

    /// 模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long)]
    pub temperature: Option<f64>,

    /// 搜索服务API KEY
    #[arg(long)]
    pub search_api_key: Option<String>,

    /// 搜索服务基地址
    #[arg(long)]
    pub search_api_base_url: Option<String>,

    /// 并发搜索请求上限
    #[arg(long)]
    pub max_parallels: Option<usize>,

    /// 单次模型调用超时（秒）
    #[arg(long)]
    pub llm_timeout: Option<u64>,

    /// 单次搜索调用超时（秒）
    #[arg(long)]
    pub search_timeout: Option<u64>,

    /// 模型与搜索调用的总尝试次数
    #[arg(long)]
    pub retry_attempts: Option<u32>,

    /// 跳过启动时的模型连接检查
    #[arg(long)]
    pub skip_connection_check: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            // 显式指定的配置文件必须可读
            Config::from_file(config_path)
                .with_context(|| format!("无法读取配置文件 {}", config_path.display()))?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path).with_context(|| {
                    format!("无法读取默认配置文件 {}", default_config_path.display())
                })?
            } else {
                Config::default()
            }
        };

        // CLI参数优先级最高
        if let Some(company) = self.company {
            config.company_name = Some(company);
        }
        if let Some(output_path) = self.output_path {
            config.output_path = output_path;
        }

        // 覆盖LLM配置
        if let Some(provider_str) = self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.llm.provider = provider;
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用默认provider",
                    provider_str
                );
            }
        }
        if let Some(llm_api_key) = self.llm_api_key {
            config.llm.api_key = llm_api_key;
        }
        if let Some(llm_api_base_url) = self.llm_api_base_url {
            config.llm.api_base_url = llm_api_base_url;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }
        if let Some(llm_timeout) = self.llm_timeout {
            config.llm.timeout_seconds = llm_timeout;
        }

        // 覆盖搜索配置
        if let Some(search_api_key) = self.search_api_key {
            config.search.api_key = search_api_key;
        }
        if let Some(search_api_base_url) = self.search_api_base_url {
            config.search.api_base_url = search_api_base_url;
        }
        if let Some(max_parallels) = self.max_parallels {
            config.search.max_parallels = max_parallels;
        }
        if let Some(search_timeout) = self.search_timeout {
            config.search.timeout_seconds = search_timeout;
        }

        if let Some(retry_attempts) = self.retry_attempts {
            config.llm.retry_attempts = retry_attempts;
            config.search.retry_attempts = retry_attempts;
        }

        // 其他配置
        config.skip_connection_check |= self.skip_connection_check;
        config.verbose |= self.verbose;

        Ok(config)
    }
}

#[cfg(test)]
mod tests;
