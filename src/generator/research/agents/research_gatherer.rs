use crate::generator::context::GeneratorContext;
use crate::generator::error::{PipelineError, Stage};
use crate::search::SearchMode;
use crate::types::ResearchInsights;
use crate::utils::threads::do_parallel_with_limit;

/// 每个调研查询获取的结果数
pub const RESULTS_PER_QUERY: usize = 3;

/// 围绕公司与行业执行三组市场调研查询
#[derive(Default)]
pub struct ResearchGatherer;

impl ResearchGatherer {
    /// 三个固定模板生成的查询，顺序即展示顺序
    pub fn build_queries(company: &str, industry: &str) -> [String; 3] {
        [
            format!("{} industry overview and trends", industry),
            format!("{} strategic focus and market position", company),
            format!("{} technological innovations and future outlook", industry),
        ]
    }

    /// 单个查询失败只记录警告，结果中不出现该查询
    pub async fn gather(
        &self,
        context: &GeneratorContext,
        company: &str,
        industry: &str,
    ) -> ResearchInsights {
        let queries = Self::build_queries(company, industry);

        let search_futures: Vec<_> = queries
            .iter()
            .map(|query| async move {
                let result = context
                    .search(query, RESULTS_PER_QUERY, SearchMode::Neural)
                    .await;
                (query, result)
            })
            .collect();

        let outcomes =
            do_parallel_with_limit(search_futures, context.config.search.max_parallels).await;

        let mut insights = ResearchInsights::new();
        for (query, outcome) in outcomes {
            match outcome {
                Ok(results) => {
                    println!("   ✓ {} -> {}条结果", query, results.len());
                    insights.insert(query.as_str(), results);
                }
                Err(e) => {
                    let failure = PipelineError::Search {
                        query: query.clone(),
                        reason: format!("{:#}", e),
                    };
                    context
                        .record_warning(Stage::ResearchGathering, failure.to_string())
                        .await;
                }
            }
        }

        println!("   ✓ 共收集{}条调研结果", insights.total_results());
        insights
    }
}
