pub mod proposal;
pub mod research;

pub use proposal::{
    AnalysisReport, AnalysisSummary, DatasetResource, PipelineWarning, ResourceMap, UseCase,
};
pub use research::{ResearchEntry, ResearchInsights, SearchResult};
