use regex::Regex;
use std::sync::LazyLock;

use crate::generator::context::GeneratorContext;
use crate::generator::error::PipelineError;
use crate::types::{ResearchInsights, UseCase};

/// 列表序号标记，例如 `1.`、`12.`
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.").expect("list marker pattern is valid"));

/// 将模型的自由文本拆分为用例列表。
///
/// 按序号标记切分，去除首尾空白并丢弃空片段；没有任何标记时整段文本作为唯一的用例。
/// 注意正文中的小数（如 `3.5%`）同样会被当作标记切开。
pub fn parse_use_cases(text: &str) -> Vec<UseCase> {
    LIST_MARKER
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| UseCase::new(index, segment))
        .collect()
}

/// 基于调研结果生成AI/ML用例
#[derive(Default)]
pub struct UseCaseGenerator;

impl UseCaseGenerator {
    pub fn build_prompt(
        &self,
        company: &str,
        industry: &str,
        insights: &ResearchInsights,
    ) -> Result<String, PipelineError> {
        let insights_json = serde_json::to_string(insights)
            .map_err(|e| PipelineError::Generation(format!("failed to encode insights: {}", e)))?;

        Ok(format!(
            include_str!("prompts/use_case_generate_user.tpl"),
            company, industry, insights_json
        ))
    }

    /// 失败即终止整个分析
    pub async fn generate(
        &self,
        context: &GeneratorContext,
        company: &str,
        industry: &str,
        insights: &ResearchInsights,
    ) -> Result<Vec<UseCase>, PipelineError> {
        let prompt = self.build_prompt(company, industry, insights)?;

        let reply = context
            .generate_reply(&prompt)
            .await
            .map_err(|e| PipelineError::Generation(format!("{:#}", e)))?;

        let use_cases = parse_use_cases(&reply);
        if use_cases.is_empty() {
            return Err(PipelineError::Generation(
                "model returned no use cases".to_string(),
            ));
        }

        tracing::debug!(count = use_cases.len(), "parsed use cases");
        Ok(use_cases)
    }
}
