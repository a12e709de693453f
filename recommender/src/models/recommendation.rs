use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::{RecommenderError, Result};

/// Optional background that helps the model interpret the objective.
///
/// Every field is independently nullable. Unset fields are still
/// serialized (as `null`) when the request is forwarded to the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveContext {
    /// Who the objective is written for.
    #[serde(default)]
    pub persona: Option<String>,
    /// Product or business area.
    #[serde(default)]
    pub domain: Option<String>,
    /// Free-form guidance for the rewrite.
    #[serde(default)]
    pub instructions: Option<String>,
    /// Conditions a good defining objective must satisfy.
    #[serde(default)]
    pub satisfaction_criteria: Option<Vec<String>>,
    #[serde(default)]
    pub extra_notes: Option<String>,
}

/// Request body for `POST /{env}/recommendation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct ObjectiveRequest {
    /// The plain-language goal to clarify.
    #[validate(length(min = 1, message = "objective must not be empty"))]
    pub objective: String,
    #[serde(default)]
    pub context: Option<ObjectiveContext>,
}

impl ObjectiveRequest {
    pub fn new(objective: impl Into<String>) -> Self {
        Self {
            objective: objective.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: ObjectiveContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Shape-check an untyped payload and validate it.
    pub fn from_value(value: Value) -> Result<Self> {
        let request: Self = serde_json::from_value(value)
            .map_err(|e| RecommenderError::Validation(format!("Invalid request: {e}")))?;
        request.validate()?;
        Ok(request)
    }
}

/// The model's answer, returned to the caller verbatim.
///
/// Unknown keys are rejected so that the model output must match the
/// three-key contract exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecommendResponse {
    /// Why the suggested rewrite is an improvement.
    pub reason: String,
    pub suggested_defining_objective: String,
    pub alternative_defining_objective: String,
}
