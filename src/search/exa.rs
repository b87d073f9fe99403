use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::search::{SearchEngine, SearchMode};
use crate::types::SearchResult;

/// Exa 搜索请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchRequest<'a> {
    query: &'a str,
    num_results: usize,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    search_type: Option<&'static str>,
    contents: ExaContents,
}

#[derive(Debug, Serialize)]
struct ExaContents {
    summary: bool,
}

#[derive(Debug, Deserialize)]
struct ExaSearchResponse {
    #[serde(default)]
    results: Vec<ExaSearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchResult {
    #[serde(default)]
    title: Option<String>,
    url: String,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl From<ExaSearchResult> for SearchResult {
    fn from(result: ExaSearchResult) -> Self {
        let summary = result
            .summary
            .filter(|s| !s.trim().is_empty())
            .or(result.text)
            .unwrap_or_default();

        SearchResult {
            title: result.title.unwrap_or_default().trim().to_string(),
            url: result.url,
            summary: summary.trim().to_string(),
            published_date: result
                .published_date
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }
}

/// 基于 Exa REST API 的搜索客户端
#[derive(Clone)]
pub struct ExaClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl ExaClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build search http client")?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.config.api_base_url.trim_end_matches('/'))
    }

    async fn search_once(
        &self,
        query: &str,
        num_results: usize,
        mode: SearchMode,
    ) -> Result<Vec<SearchResult>> {
        let request = ExaSearchRequest {
            query,
            num_results,
            search_type: match mode {
                SearchMode::Default => None,
                SearchMode::Neural => Some("neural"),
            },
            contents: ExaContents { summary: true },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Search request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("search service returned HTTP {}: {}", status, body));
        }

        let payload: ExaSearchResponse = response
            .json()
            .await
            .context("Failed to decode search response")?;

        Ok(payload.results.into_iter().map(SearchResult::from).collect())
    }
}

#[async_trait]
impl SearchEngine for ExaClient {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
        mode: SearchMode,
    ) -> Result<Vec<SearchResult>> {
        tracing::debug!(query, num_results, ?mode, "exa search");
        self.search_once(query, num_results, mode).await
    }
}
