use super::classification::Classification;
use super::sentinel::Sentinel;

/// Result of a completed analysis.
///
/// Classification failures do not fail the request: they produce a `Degraded`
/// outcome whose category is a sentinel label and whose suggested response
/// explains what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Classified(Classification),
    Degraded {
        sentinel: Sentinel,
        explanation: String,
    },
}

impl AnalysisOutcome {
    pub fn degraded(sentinel: Sentinel, explanation: impl Into<String>) -> Self {
        Self::Degraded {
            sentinel,
            explanation: explanation.into(),
        }
    }

    pub fn category_label(&self) -> &str {
        match self {
            Self::Classified(classification) => classification.category.as_str(),
            Self::Degraded { sentinel, .. } => sentinel.as_str(),
        }
    }

    pub fn suggested_response(&self) -> &str {
        match self {
            Self::Classified(classification) => &classification.suggested_response,
            Self::Degraded { explanation, .. } => explanation,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}
