use crate::generator::context::GeneratorContext;
use crate::generator::error::PipelineError;
use crate::utils::text::strip_wrapping_quotes;

/// 识别公司所属行业
#[derive(Default)]
pub struct IndustryClassifier;

impl IndustryClassifier {
    pub fn build_prompt(&self, company: &str) -> String {
        format!(include_str!("prompts/industry_classify_user.tpl"), company)
    }

    /// 失败即终止整个分析，没有兜底行业
    pub async fn classify(
        &self,
        context: &GeneratorContext,
        company: &str,
    ) -> Result<String, PipelineError> {
        let prompt = self.build_prompt(company);

        let reply = context
            .generate_reply(&prompt)
            .await
            .map_err(|e| PipelineError::Classification(format!("{:#}", e)))?;

        let industry = strip_wrapping_quotes(&reply);
        if industry.is_empty() {
            return Err(PipelineError::Classification(
                "model returned an empty industry label".to_string(),
            ));
        }

        Ok(industry.to_string())
    }
}
