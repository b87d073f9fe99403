pub mod cli;
pub mod config;
pub mod generator;
pub mod llm;
pub mod search;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use generator::context::GeneratorContext;
pub use generator::error::{PipelineError, Stage};
pub use generator::workflow::{launch, run_analysis, run_analysis_at};
pub use types::AnalysisReport;
