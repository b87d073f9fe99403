use serde::Serialize;
use std::fmt::Display;

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    IndustryClassification,
    ResearchGathering,
    UseCaseGeneration,
    ResourceCollection,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Stage::IndustryClassification => "industry classification",
            Stage::ResearchGathering => "research gathering",
            Stage::UseCaseGeneration => "use-case generation",
            Stage::ResourceCollection => "resource collection",
        };
        write!(f, "{}", str)
    }
}

/// 流水线失败类型
///
/// `Classification`、`Generation`与`InvalidCompanyName`会终止整个分析；
/// `Search`与`Resource`只影响单次调用，由所在阶段记录为警告后继续执行。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("company name must not be empty")]
    InvalidCompanyName,

    #[error("industry classification failed: {0}")]
    Classification(String),

    #[error("search failed for query '{query}': {reason}")]
    Search { query: String, reason: String },

    #[error("use-case generation failed: {0}")]
    Generation(String),

    #[error("dataset lookup on {platform} failed for use case {use_case}: {reason}")]
    Resource {
        platform: String,
        use_case: usize,
        reason: String,
    },
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::InvalidCompanyName | PipelineError::Classification(_) => {
                Stage::IndustryClassification
            }
            PipelineError::Search { .. } => Stage::ResearchGathering,
            PipelineError::Generation(_) => Stage::UseCaseGeneration,
            PipelineError::Resource { .. } => Stage::ResourceCollection,
        }
    }

    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            PipelineError::Search { .. } | PipelineError::Resource { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(PipelineError::InvalidCompanyName.is_fatal());
        assert!(PipelineError::Classification("boom".into()).is_fatal());
        assert!(PipelineError::Generation("boom".into()).is_fatal());

        let search = PipelineError::Search {
            query: "q".into(),
            reason: "quota".into(),
        };
        assert!(!search.is_fatal());
        assert_eq!(search.stage(), Stage::ResearchGathering);

        let resource = PipelineError::Resource {
            platform: "kaggle.com/datasets".into(),
            use_case: 2,
            reason: "timeout".into(),
        };
        assert!(!resource.is_fatal());
        assert_eq!(resource.stage(), Stage::ResourceCollection);
    }

    #[test]
    fn test_error_messages_name_the_failure() {
        let err = PipelineError::Search {
            query: "Robotics industry overview and trends".into(),
            reason: "HTTP 429".into(),
        };
        assert_eq!(
            err.to_string(),
            "search failed for query 'Robotics industry overview and trends': HTTP 429"
        );
        assert_eq!(
            PipelineError::Generation("timed out after 5s".into()).to_string(),
            "use-case generation failed: timed out after 5s"
        );
    }
}
