use std::future::Future;

use crate::generator::context::GeneratorContext;
use crate::generator::error::PipelineError;
use crate::generator::research::ResearchOutcome;
use crate::generator::research::agents::industry_classifier::IndustryClassifier;
use crate::generator::research::agents::research_gatherer::ResearchGatherer;
use crate::generator::research::agents::resource_collector::ResourceCollector;
use crate::generator::research::agents::use_case_generator::UseCaseGenerator;
use crate::generator::workflow::TimingKeys;

/// 调研编排器：四个阶段严格按顺序执行，每个阶段依赖上一阶段的完整产出
#[derive(Default)]
pub struct ResearchOrchestrator;

impl ResearchOrchestrator {
    pub async fn execute_research_pipeline(
        &self,
        context: &GeneratorContext,
        company: &str,
    ) -> Result<ResearchOutcome, PipelineError> {
        println!("🚀 开始分析 {} ...", company);

        let industry = self
            .execute_stage(
                context,
                TimingKeys::CLASSIFICATION,
                "🔍 阶段1: 识别行业",
                IndustryClassifier.classify(context, company),
            )
            .await?;
        println!("   ✓ 行业: {}", industry);

        let insights = self
            .execute_stage(
                context,
                TimingKeys::RESEARCH,
                "🌐 阶段2: 收集市场情报",
                async {
                    let insights = ResearchGatherer.gather(context, company, &industry).await;
                    Ok::<_, PipelineError>(insights)
                },
            )
            .await?;

        let use_cases = self
            .execute_stage(
                context,
                TimingKeys::USE_CASES,
                "💡 阶段3: 识别战略机会",
                UseCaseGenerator.generate(context, company, &industry, &insights),
            )
            .await?;
        println!("   ✓ 生成{}个用例", use_cases.len());

        let resources = self
            .execute_stage(
                context,
                TimingKeys::RESOURCES,
                "📚 阶段4: 收集数据集资源",
                async {
                    let resources = ResourceCollector.collect(context, &use_cases).await;
                    Ok::<_, PipelineError>(resources)
                },
            )
            .await?;

        Ok(ResearchOutcome {
            industry,
            insights,
            use_cases,
            resources,
        })
    }

    /// 执行单个阶段并计时
    async fn execute_stage<T, F>(
        &self,
        context: &GeneratorContext,
        timing_key: &str,
        banner: &str,
        stage: F,
    ) -> Result<T, PipelineError>
    where
        F: Future<Output = Result<T, PipelineError>>,
    {
        println!("\n{}...", banner);
        context.timing.write().await.start_phase(timing_key);

        let result = stage.await;

        let elapsed = context.timing.write().await.end_phase(timing_key);
        if let Err(e) = &result {
            tracing::error!(stage = %e.stage(), "{}", e);
        } else if let Some(elapsed) = elapsed {
            tracing::debug!(
                stage = timing_key,
                elapsed_ms = elapsed.as_millis() as u64,
                "stage finished"
            );
        }
        result
    }
}
