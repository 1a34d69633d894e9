//! Optional LLM commentary layered on top of the ranked areas.
//!
//! Every public entry point of [`AdviceGateway`] returns usable content. When no
//! provider is configured, or the provider fails, static text is substituted.

mod fallback;
pub mod gateway;
pub mod openai;
pub mod prompt;

pub use gateway::AdviceGateway;
pub use openai::OpenAiProvider;

use serde::{Deserialize, Serialize};

/// Voice used for the generated commentary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdviceTone {
    /// Professional real-estate consultant.
    #[default]
    General,
    /// Supportive senior advising a student or first-time renter.
    Student,
}

impl AdviceTone {
    pub fn from_student_flag(is_student: bool) -> Self {
        if is_student {
            Self::Student
        } else {
            Self::General
        }
    }
}

/// Per-area comments and an overall summary for the planner result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaAdvice {
    pub area1_comment: String,
    pub area2_comment: String,
    pub area3_comment: String,
    pub summary: String,
}

/// Short income/rent analysis with actionable tips for the quick-analyze page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryAnalysis {
    pub analysis: String,
    pub tips: Vec<String>,
}

/// Inputs of the salary analysis prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisInput {
    pub salary: Option<f64>,
    pub budget: Option<f64>,
    pub is_student: bool,
    pub recommended_rent: u64,
    pub areas: Vec<String>,
}

/// One chat completion request sent to a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Ask the model for a single JSON object.
    pub json_output: bool,
    pub max_tokens: Option<u32>,
}

/// Generative text backend.
#[async_trait::async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Return the raw text of the first completion choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AdviceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    #[error("advice transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("advice provider returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("advice provider returned no content")]
    EmptyResponse,
    #[error("advice output could not be parsed: {0}")]
    Unparsable(String),
}

impl AdviceError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AdviceError::Transport(_) => true,
            AdviceError::Status { status, .. } => *status == 429 || *status >= 500,
            AdviceError::EmptyResponse | AdviceError::Unparsable(_) => false,
        }
    }
}
