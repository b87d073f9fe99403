use crate::config::Config;
use crate::generator::context::GeneratorContext;
use crate::generator::error::PipelineError;
use crate::types::AnalysisReport;

use anyhow::Result;
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// 时间跟踪作用域，阶段按结束顺序记录
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: Vec<(String, Instant)>,
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: Vec::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times.retain(|(name, _)| name != phase_name);
        self.phase_start_times
            .push((phase_name.to_string(), Instant::now()));
    }

    /// 结束一个阶段的计时，未开始的阶段返回None
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        let position = self
            .phase_start_times
            .iter()
            .position(|(name, _)| name == phase_name)?;
        let (name, start_time) = self.phase_start_times.remove(position);
        let duration = start_time.elapsed();
        self.phase_durations.push((name, duration));
        Some(duration)
    }

    /// 获取总执行时间
    pub fn get_total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 获取所有阶段的执行时间
    pub fn get_phase_durations(&self) -> &[(String, Duration)] {
        &self.phase_durations
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.get_total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 时间跟踪常量
pub struct TimingKeys;

impl TimingKeys {
    pub const CLASSIFICATION: &'static str = "classification";
    pub const RESEARCH: &'static str = "research";
    pub const USE_CASES: &'static str = "use_cases";
    pub const RESOURCES: &'static str = "resources";
    pub const COMPOSE: &'static str = "compose";
    pub const OUTPUT: &'static str = "output";
}

/// 对单个公司执行完整分析，使用当前本地时间作为生成日期
pub async fn run_analysis(
    context: &GeneratorContext,
    company: &str,
) -> Result<AnalysisReport, PipelineError> {
    run_analysis_at(context, company, Local::now()).await
}

/// 对单个公司执行完整分析。任一致命阶段失败时不产生方案
pub async fn run_analysis_at(
    context: &GeneratorContext,
    company: &str,
    now: DateTime<Local>,
) -> Result<AnalysisReport, PipelineError> {
    let company = company.trim();
    if company.is_empty() {
        return Err(PipelineError::InvalidCompanyName);
    }

    context.reset_run().await;

    let outcome = crate::generator::research::execute(context, company).await?;

    context.timing.write().await.start_phase(TimingKeys::COMPOSE);
    let proposal = crate::generator::compose::execute(company, &outcome, &now);
    context.timing.write().await.end_phase(TimingKeys::COMPOSE);

    Ok(AnalysisReport {
        company: company.to_string(),
        industry: outcome.industry,
        insights: outcome.insights,
        use_cases: outcome.use_cases,
        resources: outcome.resources,
        proposal,
        warnings: context.warnings().await,
        generated_at: now,
    })
}

/// 启动分析工作流
pub async fn launch(config: &Config) -> Result<()> {
    let Some(company) = config.get_company_name() else {
        anyhow::bail!("请提供需要分析的公司名称");
    };

    let context = GeneratorContext::new(config.clone())?;

    // 启动时检查模型连接
    if !config.skip_connection_check {
        context.llm.check_connection().await?;
    }

    let report = tokio::select! {
        result = run_analysis(&context, &company) => result?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n🛑 已取消分析");
            anyhow::bail!("analysis of {} was cancelled", company);
        }
    };

    print_summary(&report);

    context.timing.write().await.start_phase(TimingKeys::OUTPUT);
    let saved = crate::generator::outlet::save(&context, &report).await?;
    context.timing.write().await.end_phase(TimingKeys::OUTPUT);

    println!("💾 方案已保存: {}", saved.proposal_path.display());
    println!("💾 分析报告已导出: {}", saved.export_path.display());
    println!("\n{}", context.timing.read().await.generate_timing_report());

    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    let summary = report.summary();
    println!("\n✅ 分析完成: {} ({})", report.company, report.industry);
    println!("   - 调研来源: {}", summary.research_sources);
    println!("   - 战略机会: {}", summary.strategic_opportunities);
    println!("   - 数据集资源: {}", summary.supporting_resources);

    if !report.warnings.is_empty() {
        println!("\n⚠️ 本次运行共有{}条警告:", report.warnings.len());
        for warning in &report.warnings {
            println!("   - {}", warning);
        }
    }
}
