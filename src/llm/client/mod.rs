//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use async_trait::async_trait;

use crate::config::LLMConfig;

mod providers;

use providers::ProviderClient;

/// 默认系统提示词
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant specialised in market research and AI strategy.";

/// 语言模型协作方：单轮、无状态的请求/应答
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate_reply(&self, prompt: &str) -> Result<String>;

    /// 启动前的连通性检查，默认直接通过
    async fn check_connection(&self) -> Result<()> {
        Ok(())
    }
}

/// LLM客户端 - 基于rig的多provider实现
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// 单轮对话。每次调用都构建新的Agent，不保留任何对话历史
    pub async fn prompt(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let agent = self
            .client
            .create_agent(&self.config.model, system_prompt, &self.config);

        tracing::debug!(
            provider = %self.config.provider,
            model = %self.config.model,
            prompt_len = user_prompt.len(),
            "llm prompt"
        );

        agent.prompt(user_prompt).await
    }
}

#[async_trait]
impl LanguageModel for LLMClient {
    async fn generate_reply(&self, prompt: &str) -> Result<String> {
        self.prompt(DEFAULT_SYSTEM_PROMPT, prompt).await
    }

    /// 检查模型连接和功能是否正常
    async fn check_connection(&self) -> Result<()> {
        println!("🔄 正在检查模型连接...");
        match self.prompt("You are a helpful assistant.", "Hello").await {
            Ok(_) => {
                println!("✅ 模型连接正常");
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ 模型连接失败: {}", e);
                Err(e)
            }
        }
    }
}
