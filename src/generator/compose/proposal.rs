use chrono::{DateTime, TimeZone};

use crate::types::{ResearchInsights, ResourceMap, SearchResult, UseCase};
use crate::utils::text::title_case;

/// 生成日期格式，例如 `October 05, 2026`
pub const GENERATED_ON_FORMAT: &str = "%B %d, %Y";

/// 将各阶段产出组装为markdown方案，纯函数、无I/O
#[derive(Default)]
pub struct ProposalAssembler;

impl ProposalAssembler {
    pub fn assemble<Tz: TimeZone>(
        &self,
        company: &str,
        industry: &str,
        use_cases: &[UseCase],
        resources: &ResourceMap,
        insights: &ResearchInsights,
        now: &DateTime<Tz>,
    ) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let mut proposal = String::new();

        proposal.push_str(&format!("# AI Strategy Analysis for {}\n\n", company));
        proposal.push_str(&format!("## Industry: {}\n\n", industry));
        proposal.push_str(&format!(
            "*Generated on {}*\n\n",
            now.format(GENERATED_ON_FORMAT)
        ));

        proposal.push_str("## Market Research Insights\n");
        for entry in insights.iter() {
            proposal.push_str(&format!("### {}\n\n", title_case(&entry.query)));
            for result in &entry.results {
                Self::push_research_result(&mut proposal, result);
            }
        }

        proposal.push_str("## Recommended AI/ML Use Cases\n\n");
        for use_case in use_cases {
            proposal.push_str(&format!(
                "### Use Case {}: {}\n\n",
                use_case.number(),
                use_case.text
            ));

            let datasets = resources.resources_for(use_case);
            if !datasets.is_empty() {
                proposal.push_str("#### Recommended Datasets:\n");
                for dataset in datasets {
                    proposal.push_str(&format!("- [{}]({})\n", dataset.title, dataset.url));
                }
            }

            proposal.push('\n');
        }

        proposal
    }

    fn push_research_result(proposal: &mut String, result: &SearchResult) {
        let date = result
            .published_date
            .as_deref()
            .map(|d| format!(" ({})", display_date(d)))
            .unwrap_or_default();

        proposal.push_str(&format!("#### {}{}\n\n", result.title, date));
        if !result.summary.is_empty() {
            proposal.push_str(&format!("{}\n\n", result.summary));
        }
        proposal.push_str(&format!("[Read more]({})\n\n", result.url));
        proposal.push_str("---\n\n");
    }
}

/// RFC 3339 时间只保留日期部分，其他格式原样展示
fn display_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}
