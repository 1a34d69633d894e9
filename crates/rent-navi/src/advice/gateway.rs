use std::sync::Arc;

use tracing::{debug, warn};

use super::openai::OpenAiProvider;
use super::prompt::{area_advice_request, salary_analysis_request};
use super::{
    fallback, AdviceError, AdviceProvider, AdviceTone, AnalysisInput, AreaAdvice,
    CompletionRequest, SalaryAnalysis,
};
use crate::config::AdviceConfig;
use crate::recommendation::domain::{FeatureTag, ScoredArea};

/// Extra attempts after a transient failure.
const AREA_ADVICE_RETRIES: u32 = 0;
const SALARY_ANALYSIS_RETRIES: u32 = 1;

const MAX_TIPS: usize = 3;

/// Entry point for enrichment; never surfaces provider failures to callers.
#[derive(Clone, Default)]
pub struct AdviceGateway {
    provider: Option<Arc<dyn AdviceProvider>>,
}

impl AdviceGateway {
    pub fn new(provider: Arc<dyn AdviceProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Gateway that always answers with static content.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn from_config(config: &AdviceConfig) -> Result<Self, AdviceError> {
        match &config.api_key {
            Some(api_key) => {
                let provider = OpenAiProvider::new(
                    api_key.clone(),
                    config.model.clone(),
                    &config.base_url,
                    config.timeout,
                )?;
                Ok(Self::new(Arc::new(provider)))
            }
            None => Ok(Self::disabled()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Comments for the ranked planner areas.
    ///
    /// `budget_ceiling` is only used to personalise the static summary.
    pub async fn area_advice(
        &self,
        areas: &[ScoredArea],
        features: &[FeatureTag],
        tone: AdviceTone,
        budget_ceiling: Option<u64>,
    ) -> AreaAdvice {
        let Some(provider) = &self.provider else {
            debug!("advice provider not configured; using static area advice");
            return fallback::area_advice(budget_ceiling);
        };

        let request = area_advice_request(areas, features, tone);
        let outcome = complete_with_retry(provider.as_ref(), &request, AREA_ADVICE_RETRIES)
            .await
            .and_then(|content| parse_area_advice(&content));

        match outcome {
            Ok(advice) => advice,
            Err(error) => {
                warn!(%error, "area advice unavailable; using static fallback");
                fallback::area_advice(budget_ceiling)
            }
        }
    }

    /// Income/rent analysis with saving tips.
    pub async fn salary_analysis(&self, input: &AnalysisInput) -> SalaryAnalysis {
        let Some(provider) = &self.provider else {
            debug!("advice provider not configured; using offline salary analysis");
            return fallback::offline_analysis(input);
        };

        let request = salary_analysis_request(input);
        let outcome = complete_with_retry(provider.as_ref(), &request, SALARY_ANALYSIS_RETRIES)
            .await
            .and_then(|content| parse_salary_analysis(&content));

        match outcome {
            Ok(analysis) => analysis,
            Err(error) => {
                warn!(%error, "salary analysis unavailable; using static fallback");
                fallback::unavailable_analysis()
            }
        }
    }
}

async fn complete_with_retry(
    provider: &dyn AdviceProvider,
    request: &CompletionRequest,
    retries: u32,
) -> Result<String, AdviceError> {
    let mut attempt = 0;
    loop {
        match provider.complete(request).await {
            Ok(content) => return Ok(content),
            Err(error) if error.is_transient() && attempt < retries => {
                attempt += 1;
                warn!(%error, attempt, "advice request failed; retrying");
            }
            Err(error) => return Err(error),
        }
    }
}

fn parse_area_advice(content: &str) -> Result<AreaAdvice, AdviceError> {
    serde_json::from_str(content.trim()).map_err(|err| AdviceError::Unparsable(err.to_string()))
}

/// First two non-empty lines form the analysis; bullet lines become tips.
fn parse_salary_analysis(content: &str) -> Result<SalaryAnalysis, AdviceError> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AdviceError::Unparsable("empty analysis".to_string()));
    }

    let analysis = lines.iter().take(2).copied().collect::<Vec<_>>().join(" ");
    let tips: Vec<String> = lines
        .iter()
        .skip(2)
        .filter(|line| line.contains('-') || line.contains('•'))
        .take(MAX_TIPS)
        .map(|line| line.to_string())
        .collect();

    Ok(SalaryAnalysis {
        analysis,
        tips: if tips.is_empty() {
            fallback::default_tips()
        } else {
            tips
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    struct ScriptedProvider {
        responses: Mutex<Vec<Result<String, AdviceError>>>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<String, AdviceError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl AdviceProvider for ScriptedProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, AdviceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().expect("responses mutex poisoned");
            if responses.is_empty() {
                return Err(AdviceError::EmptyResponse);
            }
            responses.remove(0)
        }
    }

    fn server_error() -> AdviceError {
        AdviceError::Status {
            status: 503,
            message: "overloaded".to_string(),
        }
    }

    fn analysis_input() -> AnalysisInput {
        AnalysisInput {
            salary: Some(250_000.0),
            budget: None,
            is_student: false,
            recommended_rent: 68_750,
            areas: vec!["川口市".to_string()],
        }
    }

    #[tokio::test]
    async fn area_advice_parses_provider_json() {
        let provider = ScriptedProvider::new(vec![Ok(r#"{
            "area1_comment": "一つ目",
            "area2_comment": "二つ目",
            "area3_comment": "三つ目",
            "summary": "まとめ"
        }"#
        .to_string())]);
        let gateway = AdviceGateway::new(provider.clone());

        let advice = gateway
            .area_advice(&[], &[], AdviceTone::General, None)
            .await;

        assert_eq!(advice.area1_comment, "一つ目");
        assert_eq!(advice.summary, "まとめ");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn area_advice_falls_back_without_retry_on_failure() {
        let provider = ScriptedProvider::new(vec![Err(server_error()), Ok("{}".to_string())]);
        let gateway = AdviceGateway::new(provider.clone());

        let advice = gateway
            .area_advice(&[], &[], AdviceTone::Student, Some(65_000))
            .await;

        assert_eq!(advice, fallback::area_advice(Some(65_000)));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn area_advice_falls_back_on_unparsable_output() {
        let provider = ScriptedProvider::new(vec![Ok("おすすめは川口市です".to_string())]);
        let gateway = AdviceGateway::new(provider);

        let advice = gateway
            .area_advice(&[], &[], AdviceTone::General, None)
            .await;

        assert_eq!(advice, fallback::area_advice(None));
    }

    #[tokio::test]
    async fn disabled_gateway_serves_static_content() {
        let gateway = AdviceGateway::disabled();
        assert!(!gateway.is_enabled());

        let advice = gateway
            .area_advice(&[], &[], AdviceTone::General, None)
            .await;
        assert_eq!(advice, fallback::area_advice(None));

        let analysis = gateway.salary_analysis(&analysis_input()).await;
        assert_eq!(analysis, fallback::offline_analysis(&analysis_input()));
    }

    #[tokio::test]
    async fn salary_analysis_retries_once_after_transient_failure() {
        let provider = ScriptedProvider::new(vec![
            Err(server_error()),
            Ok("収入に対して家賃は適正です。\n貯蓄に回す余裕もあります。\n- 固定費を見直す\n- 資格取得\n".to_string()),
        ]);
        let gateway = AdviceGateway::new(provider.clone());

        let analysis = gateway.salary_analysis(&analysis_input()).await;

        assert_eq!(provider.calls(), 2);
        assert_eq!(
            analysis.analysis,
            "収入に対して家賃は適正です。 貯蓄に回す余裕もあります。"
        );
        assert_eq!(analysis.tips, vec!["- 固定費を見直す", "- 資格取得"]);
    }

    #[tokio::test]
    async fn salary_analysis_gives_up_after_one_retry() {
        let provider = ScriptedProvider::new(vec![
            Err(server_error()),
            Err(server_error()),
            Ok("届かない".to_string()),
        ]);
        let gateway = AdviceGateway::new(provider.clone());

        let analysis = gateway.salary_analysis(&analysis_input()).await;

        assert_eq!(provider.calls(), 2);
        assert_eq!(analysis, fallback::unavailable_analysis());
        assert_eq!(analysis.tips.len(), 2);
    }

    #[test]
    fn salary_parse_uses_default_tips_without_bullets() {
        let analysis = parse_salary_analysis("一行目\n二行目\n三行目").expect("parses");
        assert_eq!(analysis.tips, fallback::default_tips());
        assert!(parse_salary_analysis("  \n ").is_err());
    }
}
