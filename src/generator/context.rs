use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::{
    config::Config,
    generator::error::Stage,
    generator::workflow::TimingScope,
    llm::{LLMClient, LanguageModel},
    search::{ExaClient, SearchEngine, SearchMode},
    types::{PipelineWarning, SearchResult},
    utils::retry::retry_with_backoff,
};

#[derive(Clone)]
pub struct GeneratorContext {
    /// 语言模型协作方
    pub llm: Arc<dyn LanguageModel>,
    /// 搜索协作方
    pub search: Arc<dyn SearchEngine>,
    /// 配置，运行期间只读
    pub config: Config,
    /// 本次运行中被降级处理的失败
    pub warnings: Arc<RwLock<Vec<PipelineWarning>>>,
    /// 各阶段耗时
    pub timing: Arc<RwLock<TimingScope>>,
}

impl GeneratorContext {
    /// 使用配置中的真实服务创建上下文
    pub fn new(config: Config) -> Result<Self> {
        let llm = Arc::new(LLMClient::new(config.llm.clone())?);
        let search = Arc::new(ExaClient::new(config.search.clone())?);
        Ok(Self::with_collaborators(config, llm, search))
    }

    /// 使用指定的协作方创建上下文
    pub fn with_collaborators(
        config: Config,
        llm: Arc<dyn LanguageModel>,
        search: Arc<dyn SearchEngine>,
    ) -> Self {
        Self {
            llm,
            search,
            config,
            warnings: Arc::new(RwLock::new(Vec::new())),
            timing: Arc::new(RwLock::new(TimingScope::new())),
        }
    }

    /// 模型调用：每次尝试单独计时，超时与其他错误一样按配置重试
    pub async fn generate_reply(&self, prompt: &str) -> Result<String> {
        let llm = &self.config.llm;
        retry_with_backoff(
            llm.retry_attempts,
            llm.retry_delay_ms,
            llm.timeout(),
            "llm",
            || self.llm.generate_reply(prompt),
        )
        .await
    }

    /// 搜索调用：每次尝试单独计时，超时与其他错误一样按配置重试
    pub async fn search(
        &self,
        query: &str,
        num_results: usize,
        mode: SearchMode,
    ) -> Result<Vec<SearchResult>> {
        let search = &self.config.search;
        retry_with_backoff(
            search.retry_attempts,
            search.retry_delay_ms,
            search.timeout(),
            "search",
            || self.search.search(query, num_results, mode),
        )
        .await
    }

    /// 记录一条警告
    pub async fn record_warning(&self, stage: Stage, message: impl Into<String>) {
        let warning = PipelineWarning {
            stage,
            message: message.into(),
        };
        tracing::warn!(stage = %warning.stage, "{}", warning.message);
        self.warnings.write().await.push(warning);
    }

    /// 获取目前为止的所有警告
    pub async fn warnings(&self) -> Vec<PipelineWarning> {
        self.warnings.read().await.clone()
    }

    /// 清空警告并重置计时，用于开始新的一次运行
    pub async fn reset_run(&self) {
        self.warnings.write().await.clear();
        *self.timing.write().await = TimingScope::new();
    }
}
