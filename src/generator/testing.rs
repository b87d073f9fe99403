//! 单元测试用的内存协作方

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::llm::LanguageModel;
use crate::search::{SearchEngine, SearchMode};
use crate::types::SearchResult;

/// 远大于任何测试超时的挂起时长
pub const STALL: Duration = Duration::from_secs(3600);

/// 按顺序返回预设回复的模型
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, String>>>,
    stall_from: Option<usize>,
    pub prompts: Mutex<Vec<String>>,
    /// 已经返回的调用次数
    pub completed: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<&str, &str>>) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// 每次调用都挂起，直到被超时或取消
    pub fn stalling() -> Self {
        Self::default().stalling_after(0)
    }

    /// 前`answered`次调用正常返回，之后的调用挂起
    pub fn stalling_after(mut self, answered: usize) -> Self {
        self.stall_from = Some(answered);
        self
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate_reply(&self, prompt: &str) -> Result<String> {
        let call_index = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len() - 1
        };
        if self.stall_from.is_some_and(|from| call_index >= from) {
            tokio::time::sleep(STALL).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(e)) => Err(anyhow!(e)),
            None => Err(anyhow!("no scripted reply left")),
        }
    }
}

type SearchHandler = dyn Fn(&str) -> Result<Vec<SearchResult>> + Send + Sync;

/// 由闭包决定结果的搜索服务，并记录每次调用
pub struct ScriptedSearch {
    handler: Box<SearchHandler>,
    stall_on: Option<String>,
    pub calls: Mutex<Vec<(String, usize, SearchMode)>>,
}

impl ScriptedSearch {
    pub fn new(handler: impl Fn(&str) -> Result<Vec<SearchResult>> + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            stall_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 查询包含`pattern`时挂起，直到被超时或取消
    pub fn stalling_on(mut self, pattern: &str) -> Self {
        self.stall_on = Some(pattern.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(query, _, _)| query.clone())
            .collect()
    }
}

#[async_trait]
impl SearchEngine for ScriptedSearch {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
        mode: SearchMode,
    ) -> Result<Vec<SearchResult>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), num_results, mode));
        if let Some(pattern) = &self.stall_on
            && query.contains(pattern.as_str())
        {
            tokio::time::sleep(STALL).await;
        }
        (self.handler)(query)
    }
}

pub fn hit(title: &str, url: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        url: url.to_string(),
        summary: format!("About {}", title),
        published_date: None,
    }
}

pub fn context_with(
    model: Arc<ScriptedModel>,
    search: Arc<ScriptedSearch>,
) -> GeneratorContext {
    context_with_config(Config::default(), model, search)
}

pub fn context_with_config(
    config: Config,
    model: Arc<ScriptedModel>,
    search: Arc<ScriptedSearch>,
) -> GeneratorContext {
    GeneratorContext::with_collaborators(config, model, search)
}

/// 模型与搜索都只给1秒
pub fn short_timeout_config() -> Config {
    let mut config = Config::default();
    config.llm.timeout_seconds = 1;
    config.search.timeout_seconds = 1;
    config
}
