pub mod industry_classifier;
pub mod research_gatherer;
pub mod resource_collector;
pub mod use_case_generator;
