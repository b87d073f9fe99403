use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::generator::error::Stage;
use crate::types::research::ResearchInsights;

/// 单个AI/ML用例，`index`为生成顺序中的位置，作为资源映射的键
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    pub index: usize,
    pub text: String,
}

impl UseCase {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// 展示用的序号，从1开始
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// 数据集资源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetResource {
    pub title: String,
    pub url: String,
    /// 命中的平台，例如 `kaggle.com/datasets`
    pub platform: String,
}

/// 用例序号 -> 数据集资源（每个用例最多3条）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMap {
    entries: BTreeMap<usize, Vec<DatasetResource>>,
}

impl ResourceMap {
    pub const MAX_RESOURCES_PER_USE_CASE: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// 写入资源，超出上限的部分被截断
    pub fn insert(&mut self, use_case_index: usize, mut resources: Vec<DatasetResource>) {
        resources.truncate(Self::MAX_RESOURCES_PER_USE_CASE);
        self.entries.insert(use_case_index, resources);
    }

    pub fn get(&self, use_case_index: usize) -> Option<&[DatasetResource]> {
        self.entries.get(&use_case_index).map(Vec::as_slice)
    }

    pub fn resources_for(&self, use_case: &UseCase) -> &[DatasetResource] {
        self.get(use_case.index).unwrap_or(&[])
    }

    pub fn total_resources(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// 流水线中被降级处理的失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineWarning {
    pub stage: Stage,
    pub message: String,
}

impl std::fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}

/// 一次分析的完整产出
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub company: String,
    pub industry: String,
    pub insights: ResearchInsights,
    pub use_cases: Vec<UseCase>,
    pub resources: ResourceMap,
    /// markdown格式的最终方案
    pub proposal: String,
    pub warnings: Vec<PipelineWarning>,
    pub generated_at: DateTime<Local>,
}

/// 报告概要指标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub research_sources: usize,
    pub strategic_opportunities: usize,
    pub supporting_resources: usize,
}

impl AnalysisReport {
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            research_sources: self.insights.len(),
            strategic_opportunities: self.use_cases.len(),
            supporting_resources: self.resources.total_resources(),
        }
    }
}
