use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::errors::{validation_details, validation_messages};
use validator::Validate;

/// JSON body extractor that also runs `validator` rules, rejecting with
/// `400 {error, message, details}`.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(json_value) =
            axum::Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| {
                    let payload = json!({
                        "error": "Invalid JSON",
                        "message": rejection.body_text(),
                    });
                    // Unprocessable bodies are reported as plain bad requests.
                    (StatusCode::BAD_REQUEST, axum::Json(payload))
                })?;

        json_value.validate().map_err(|validation_errors| {
            let messages = validation_messages(&validation_errors);
            let message = if messages.is_empty() {
                "Validation failed".to_string()
            } else {
                messages.join("; ")
            };

            let payload = json!({
                "error": "Validation failed",
                "message": message,
                "details": validation_details(&validation_errors)
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload))
        })?;

        Ok(Self(json_value))
    }
}
