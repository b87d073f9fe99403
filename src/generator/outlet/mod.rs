use crate::generator::context::GeneratorContext;
use crate::types::AnalysisReport;
use crate::utils::text::sanitize_file_stem;
use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 固定名称的方案文件
pub const PROPOSAL_FILE_NAME: &str = "ai_strategy_proposal.md";

/// 带公司名与日期的导出文件名，例如 `Acme_analysis_20261005.md`
pub fn export_file_name<Tz: TimeZone>(company: &str, date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_analysis_{}.md",
        sanitize_file_stem(company),
        date.format("%Y%m%d")
    )
}

/// 已写入磁盘的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedProposal {
    pub proposal_path: PathBuf,
    pub export_path: PathBuf,
}

/// 保存方案到配置的输出目录
pub async fn save(context: &GeneratorContext, report: &AnalysisReport) -> Result<SavedProposal> {
    let outlet = DiskOutlet::new(&context.config.output_path);
    outlet.save(report).await
}

#[allow(async_fn_in_trait)]
pub trait Outlet {
    async fn save(&self, report: &AnalysisReport) -> Result<SavedProposal>;
}

pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

impl Outlet for DiskOutlet {
    async fn save(&self, report: &AnalysisReport) -> Result<SavedProposal> {
        println!("\n🖊️ 方案存储中...");
        // 已有目录中的其他文件保持不变
        fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("无法创建输出目录 {}", self.output_dir.display()))?;

        let proposal_path = self.output_dir.join(PROPOSAL_FILE_NAME);
        let export_path = self
            .output_dir
            .join(export_file_name(&report.company, &report.generated_at));

        for path in [&proposal_path, &export_path] {
            fs::write(path, &report.proposal)
                .await
                .with_context(|| format!("无法写入 {}", path.display()))?;
            tracing::debug!(path = %path.display(), "proposal written");
        }

        Ok(SavedProposal {
            proposal_path,
            export_path,
        })
    }
}
