use axum::{
    body::Body,
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRequest, Request,
    },
    http::header,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// Body extractor accepting either `application/json` or an url-encoded form.
///
/// Anything that does not declare a JSON content type is parsed as a form,
/// which is what HTML `<form>` posts send.
pub struct FormOrJson<T>(pub T);

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FormOrJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.trim_start().to_ascii_lowercase())
            .is_some_and(|ct| ct.starts_with("application/json") || ct.contains("+json"));

        if is_json {
            match Json::<T>::from_request(req, state).await {
                Ok(value) => Ok(Self(value.0)),
                Err(rejection) => Err(FormOrJsonRejection::Json(rejection)),
            }
        } else {
            match Form::<T>::from_request(req, state).await {
                Ok(value) => Ok(Self(value.0)),
                Err(rejection) => Err(FormOrJsonRejection::Form(rejection)),
            }
        }
    }
}

pub enum FormOrJsonRejection {
    Json(JsonRejection),
    Form(FormRejection),
}

impl IntoResponse for FormOrJsonRejection {
    fn into_response(self) -> Response {
        let message = match self {
            FormOrJsonRejection::Json(JsonRejection::JsonDataError(err)) => {
                format!("Invalid JSON data: {}", err)
            }
            FormOrJsonRejection::Json(JsonRejection::JsonSyntaxError(err)) => {
                format!("Invalid JSON syntax: {}", err)
            }
            FormOrJsonRejection::Json(_) => "Failed to parse JSON body".to_string(),
            FormOrJsonRejection::Form(FormRejection::FailedToDeserializeForm(err)) => {
                format!("Invalid form data: {}", err)
            }
            FormOrJsonRejection::Form(FormRejection::FailedToDeserializeFormBody(err)) => {
                format!("Invalid form data: {}", err)
            }
            FormOrJsonRejection::Form(FormRejection::InvalidFormContentType(_)) => {
                "Expected an application/x-www-form-urlencoded or application/json body"
                    .to_string()
            }
            FormOrJsonRejection::Form(_) => "Failed to parse form body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}
