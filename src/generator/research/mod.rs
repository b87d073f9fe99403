// 调研流水线，阶段之间严格串行:
// 1. IndustryClassifier 公司 -> 行业（LLM，失败即终止）
// 2. ResearchGatherer 行业/公司 -> 三组搜索结果（单个查询失败只记警告）
// 3. UseCaseGenerator 调研结果 -> AI/ML用例（LLM，失败即终止）
// 4. ResourceCollector 用例 -> 数据集资源（单个平台失败只记警告）

use crate::generator::context::GeneratorContext;
use crate::generator::error::PipelineError;
use crate::generator::research::orchestrator::ResearchOrchestrator;
use crate::types::{ResearchInsights, ResourceMap, UseCase};

pub mod agents;
pub mod orchestrator;

/// 调研阶段的全部产出
#[derive(Debug, Clone)]
pub struct ResearchOutcome {
    pub industry: String,
    pub insights: ResearchInsights,
    pub use_cases: Vec<UseCase>,
    pub resources: ResourceMap,
}

/// 执行调研阶段
pub async fn execute(
    context: &GeneratorContext,
    company: &str,
) -> Result<ResearchOutcome, PipelineError> {
    ResearchOrchestrator
        .execute_research_pipeline(context, company)
        .await
}
