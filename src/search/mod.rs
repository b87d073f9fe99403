//! 搜索服务 - 提供统一的网页搜索接口

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::types::SearchResult;

mod exa;

pub use exa::ExaClient;

/// 结果排序模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SearchMode {
    /// 由服务端决定
    #[default]
    Default,
    /// 语义（神经网络）检索
    Neural,
}

/// 网页搜索协作方
#[async_trait]
pub trait SearchEngine: Send + Sync {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
        mode: SearchMode,
    ) -> Result<Vec<SearchResult>>;
}
