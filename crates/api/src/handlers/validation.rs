//! Handlers for the `/validation` resource.
//!
//! Both endpoints take a record and the rules to apply to it. `validate`
//! runs the rules server side; `client-script` renders the browser mirror
//! of the same checks.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use formrule_core::client::{ClientScript, FormInputIds};
use formrule_core::record::{FormRecord, Record};
use formrule_core::validation::either::EitherRuleConfig;
use formrule_core::validation::evaluator::{bind_all, client_scripts, validate_record, RuleSpec};
use formrule_core::validation::rules::ValidationResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Longest accepted field name.
const MAX_FIELD_NAME_LENGTH: usize = 255;

/// Request body shared by both validation endpoints.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub form_name: String,
    #[validate(length(min = 2, max = 35))]
    pub language: Option<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub values: serde_json::Map<String, Value>,
    #[validate(length(min = 1, message = "At least one rule is required"), nested)]
    pub rules: Vec<RuleInput>,
}

/// One rule declaration as submitted over HTTP.
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RuleInput {
    #[validate(custom(function = "validate_field_names"))]
    pub attributes: Vec<String>,
    #[validate(custom(function = "validate_field_names"))]
    pub other_attributes: Vec<String>,
    #[validate(length(max = 1000))]
    pub message: Option<String>,
}

fn validate_field_names(names: &[String]) -> Result<(), ValidationError> {
    if names
        .iter()
        .any(|n| n.is_empty() || n.len() > MAX_FIELD_NAME_LENGTH)
    {
        return Err(ValidationError::new("field_name").with_message(Cow::from(format!(
            "Field names must be 1 to {MAX_FIELD_NAME_LENGTH} characters"
        ))));
    }
    Ok(())
}

impl From<RuleInput> for RuleSpec {
    fn from(input: RuleInput) -> Self {
        RuleSpec {
            attributes: input.attributes,
            config: EitherRuleConfig {
                other_attributes: input.other_attributes,
                message: input.message,
            },
        }
    }
}

impl ValidateRequest {
    /// Split into rule declarations and the record they apply to.
    fn into_parts(self) -> (Vec<RuleSpec>, FormRecord) {
        let specs = self.rules.into_iter().map(RuleSpec::from).collect();
        let record = FormRecord::new(self.form_name)
            .with_values(self.values)
            .with_labels(self.labels);
        (specs, record)
    }
}

/// POST /api/v1/validation/validate
///
/// Run the submitted rules against the submitted record.
pub async fn validate(
    State(state): State<AppState>,
    Json(input): Json<ValidateRequest>,
) -> AppResult<Json<DataResponse<ValidationResult>>> {
    input.validate()?;
    let i18n = state.i18n_for(input.language.as_deref());
    let (specs, mut record) = input.into_parts();

    let rules = bind_all(specs)?;
    let result = validate_record(&rules, &mut record, &i18n);

    tracing::info!(
        form = record.form_name(),
        language = i18n.language(),
        is_valid = result.is_valid,
        error_count = result.errors.len(),
        "Validated record"
    );

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/validation/client-script
///
/// Render one browser-side check per rule and attribute.
pub async fn client_script(
    State(state): State<AppState>,
    Json(input): Json<ValidateRequest>,
) -> AppResult<Json<DataResponse<Vec<ClientScript>>>> {
    input.validate()?;
    let i18n = state.i18n_for(input.language.as_deref());
    let (specs, record) = input.into_parts();

    let rules = bind_all(specs)?;
    let scripts = client_scripts(&rules, &record, &FormInputIds, &i18n)?;

    tracing::debug!(
        form = record.form_name(),
        language = i18n.language(),
        script_count = scripts.len(),
        "Rendered client scripts"
    );

    Ok(Json(DataResponse { data: scripts }))
}
