use std::collections::BTreeMap;

use crate::generator::context::GeneratorContext;
use crate::generator::error::{PipelineError, Stage};
use crate::search::SearchMode;
use crate::types::{DatasetResource, ResourceMap, UseCase};
use crate::utils::threads::do_parallel_with_limit;

/// 数据集托管平台，顺序决定资源的优先级
pub const DATASET_PLATFORMS: [&str; 3] = [
    "kaggle.com/datasets",
    "huggingface.co/datasets",
    "github.com/datasets",
];

/// URL中表明是数据集的关键字（大小写不敏感）
pub const DATASET_URL_TOKENS: [&str; 2] = ["dataset", "data"];

/// 每个平台查询的结果数
pub const RESULTS_PER_PLATFORM: usize = 3;

/// 为每个用例在数据集平台上查找可用数据
#[derive(Default)]
pub struct ResourceCollector;

impl ResourceCollector {
    pub fn build_query(use_case: &str, platform: &str) -> String {
        format!("\"{}\" dataset site:{}", use_case, platform)
    }

    /// URL需要同时包含平台地址与数据集关键字
    pub fn is_dataset_url(url: &str, platform: &str) -> bool {
        if !url.contains(platform) {
            return false;
        }
        let url = url.to_lowercase();
        DATASET_URL_TOKENS.iter().any(|token| url.contains(token))
    }

    /// 没有硬性失败：平台查询失败记录警告，用例仍保留其他平台的结果（可能为空）
    pub async fn collect(&self, context: &GeneratorContext, use_cases: &[UseCase]) -> ResourceMap {
        let jobs: Vec<(&UseCase, &str)> = use_cases
            .iter()
            .flat_map(|use_case| {
                DATASET_PLATFORMS
                    .iter()
                    .map(move |platform| (use_case, *platform))
            })
            .collect();

        let lookup_futures: Vec<_> = jobs
            .iter()
            .map(|&(use_case, platform)| async move {
                let query = Self::build_query(&use_case.text, platform);
                let result = context
                    .search(&query, RESULTS_PER_PLATFORM, SearchMode::Default)
                    .await;
                (use_case, platform, result)
            })
            .collect();

        // 结果顺序与jobs一致：先按用例，再按平台
        let outcomes =
            do_parallel_with_limit(lookup_futures, context.config.search.max_parallels).await;

        let mut grouped: BTreeMap<usize, Vec<DatasetResource>> = use_cases
            .iter()
            .map(|use_case| (use_case.index, Vec::new()))
            .collect();

        for (use_case, platform, outcome) in outcomes {
            match outcome {
                Ok(results) => {
                    let matched = results
                        .into_iter()
                        .filter(|result| Self::is_dataset_url(&result.url, platform))
                        .map(|result| DatasetResource {
                            title: result.title,
                            url: result.url,
                            platform: platform.to_string(),
                        });
                    grouped.entry(use_case.index).or_default().extend(matched);
                }
                Err(e) => {
                    let failure = PipelineError::Resource {
                        platform: platform.to_string(),
                        use_case: use_case.number(),
                        reason: format!("{:#}", e),
                    };
                    context
                        .record_warning(Stage::ResourceCollection, failure.to_string())
                        .await;
                }
            }
        }

        let mut resource_map = ResourceMap::new();
        for (index, resources) in grouped {
            resource_map.insert(index, resources);
        }

        println!(
            "   ✓ 为{}个用例找到{}个数据集",
            use_cases.len(),
            resource_map.total_resources()
        );
        resource_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::{
        ScriptedModel, ScriptedSearch, context_with, context_with_config, hit,
        short_timeout_config,
    };
    use std::sync::Arc;

    fn model() -> Arc<ScriptedModel> {
        Arc::new(ScriptedModel::default())
    }

    #[test]
    fn test_build_query() {
        assert_eq!(
            ResourceCollector::build_query("Predict churn.", "kaggle.com/datasets"),
            "\"Predict churn.\" dataset site:kaggle.com/datasets"
        );
    }

    #[test]
    fn test_dataset_url_filter() {
        let platform = "kaggle.com/datasets";
        assert!(ResourceCollector::is_dataset_url(
            "kaggle.com/datasets/x/robotics-data",
            platform
        ));
        assert!(!ResourceCollector::is_dataset_url(
            "kaggle.com/notebooks/x",
            platform
        ));
        assert!(!ResourceCollector::is_dataset_url(
            "https://huggingface.co/datasets/x",
            platform
        ));
        assert!(ResourceCollector::is_dataset_url(
            "https://huggingface.co/DATASETS/x",
            "huggingface.co/DATASETS"
        ));
    }

    #[tokio::test]
    async fn test_collect_accumulates_in_platform_order_and_caps() {
        let search = Arc::new(ScriptedSearch::new(|query| {
            let platform = DATASET_PLATFORMS
                .iter()
                .find(|p| query.ends_with(*p))
                .copied()
                .unwrap_or_default();
            Ok(vec![
                hit(&format!("{} a", platform), &format!("https://{}/u/a", platform)),
                hit(&format!("{} b", platform), &format!("https://{}/u/b", platform)),
                hit("noise", "https://example.com/blog"),
            ])
        }));
        let ctx = context_with(model(), search.clone());
        let use_cases = vec![UseCase::new(0, "Predict churn."), UseCase::new(1, "Route trucks.")];

        let map = ResourceCollector.collect(&ctx, &use_cases).await;

        assert_eq!(search.calls.lock().unwrap().len(), 6);
        assert!(map.get(0).is_some() && map.get(1).is_some());
        for use_case in &use_cases {
            let resources = map.resources_for(use_case);
            assert_eq!(resources.len(), 3);
            assert_eq!(resources[0].platform, "kaggle.com/datasets");
            assert_eq!(resources[1].platform, "kaggle.com/datasets");
            assert_eq!(resources[2].platform, "huggingface.co/datasets");
        }
        assert!(
            search
                .calls
                .lock()
                .unwrap()
                .iter()
                .all(|(_, n, mode)| *n == RESULTS_PER_PLATFORM && *mode == SearchMode::Default)
        );
    }

    #[tokio::test]
    async fn test_platform_failure_keeps_other_platforms() {
        let search = Arc::new(ScriptedSearch::new(|query| {
            if query.ends_with("kaggle.com/datasets") {
                Err(anyhow::anyhow!("connection reset"))
            } else if query.ends_with("github.com/datasets") {
                Ok(vec![hit(
                    "churn data",
                    "https://github.com/datasets/churn-data",
                )])
            } else {
                Ok(vec![])
            }
        }));
        let ctx = context_with(model(), search);
        let use_cases = vec![UseCase::new(0, "Predict churn.")];

        let map = ResourceCollector.collect(&ctx, &use_cases).await;

        let resources = map.resources_for(&use_cases[0]);
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].url, "https://github.com/datasets/churn-data");

        let warnings = ctx.warnings().await;
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].stage, Stage::ResourceCollection);
        assert!(warnings[0].message.contains("kaggle.com/datasets"));
        assert!(warnings[0].message.contains("use case 1"));
    }

    #[tokio::test]
    async fn test_no_matches_is_valid_outcome() {
        let search = Arc::new(ScriptedSearch::new(|_| Err(anyhow::anyhow!("offline"))));
        let ctx = context_with(model(), search);
        let use_cases = vec![UseCase::new(0, "Predict churn.")];

        let map = ResourceCollector.collect(&ctx, &use_cases).await;

        assert_eq!(map.get(0), Some(&[][..]));
        assert_eq!(map.total_resources(), 0);
        assert_eq!(ctx.warnings().await.len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_use_cases_get_separate_entries() {
        let search = Arc::new(ScriptedSearch::new(|_| {
            Ok(vec![hit("d", "https://kaggle.com/datasets/u/d")])
        }));
        let ctx = context_with(model(), search);
        let use_cases = vec![UseCase::new(0, "Same idea"), UseCase::new(1, "Same idea")];

        let map = ResourceCollector.collect(&ctx, &use_cases).await;

        assert_eq!(map.get(0).map(<[_]>::len), Some(1));
        assert_eq!(map.get(1).map(<[_]>::len), Some(1));
        assert_eq!(map.resources_for(&use_cases[0]).len(), 1);
        assert_eq!(map.resources_for(&use_cases[1]).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_platform_times_out_and_others_are_kept() {
        let search = Arc::new(
            ScriptedSearch::new(|query| {
                let platform = DATASET_PLATFORMS
                    .iter()
                    .find(|p| query.ends_with(*p))
                    .copied()
                    .unwrap_or_default();
                Ok(vec![hit("d", &format!("https://{}/u/d-data", platform))])
            })
            .stalling_on("site:kaggle.com/datasets"),
        );
        let ctx = context_with_config(short_timeout_config(), model(), search);
        let use_cases = vec![UseCase::new(0, "Predict churn.")];

        let map = ResourceCollector.collect(&ctx, &use_cases).await;

        let platforms: Vec<&str> = map
            .resources_for(&use_cases[0])
            .iter()
            .map(|r| r.platform.as_str())
            .collect();
        assert_eq!(platforms, vec!["huggingface.co/datasets", "github.com/datasets"]);

        let warnings = ctx.warnings().await;
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].stage, Stage::ResourceCollection);
        assert!(warnings[0].message.contains("kaggle.com/datasets"));
        assert!(warnings[0].message.contains("timed out after 1s"));
    }
}
