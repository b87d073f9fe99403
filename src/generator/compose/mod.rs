use chrono::{DateTime, TimeZone};

use crate::generator::research::ResearchOutcome;

pub mod proposal;

pub use proposal::ProposalAssembler;

/// 执行方案组装阶段
pub fn execute<Tz: TimeZone>(company: &str, outcome: &ResearchOutcome, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    println!("\n📊 正在组装最终方案...");
    ProposalAssembler.assemble(
        company,
        &outcome.industry,
        &outcome.use_cases,
        &outcome.resources,
        &outcome.insights,
        now,
    )
}
