//! Service response interpretation

use foamkit_core::ServiceError;
use serde::Deserialize;

/// First token of every ISO 10303-21 document
pub const STEP_MAGIC: &str = "ISO-10303-21";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Wrapper {
    ok: Option<bool>,
    success: Option<bool>,
    step: Option<String>,
    step_text: Option<String>,
    data: Option<String>,
    error: Option<String>,
}

/// Extract STEP text from a response body.
///
/// Accepts either the document itself or a JSON wrapper
/// `{ ok|success, step|stepText|data, error }`. Whatever is returned starts
/// with [`STEP_MAGIC`].
pub fn parse_service_response(body: &str) -> Result<String, ServiceError> {
    let trimmed = body.trim_start_matches('\u{feff}').trim();
    if trimmed.starts_with(STEP_MAGIC) {
        return Ok(trimmed.to_string());
    }

    let wrapper: Wrapper =
        serde_json::from_str(trimmed).map_err(|e| ServiceError::MalformedResponse {
            reason: format!("neither STEP text nor JSON: {}", e),
        })?;

    let succeeded = wrapper.ok.or(wrapper.success);
    if succeeded == Some(false) {
        return Err(ServiceError::Rejected {
            reason: wrapper
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "no error detail".to_string()),
        });
    }

    let text = [wrapper.step, wrapper.step_text, wrapper.data]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .ok_or_else(|| ServiceError::MalformedResponse {
            reason: match wrapper.error {
                Some(error) => format!("no solid-model text ({})", error),
                None => "no solid-model text".to_string(),
            },
        })?;

    if !text.starts_with(STEP_MAGIC) {
        return Err(ServiceError::MalformedResponse {
            reason: format!("payload does not start with {}", STEP_MAGIC),
        });
    }
    Ok(text)
}
