use std::str::FromStr;

use poem::http::StatusCode;
use poem::web::Json;
use poem::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FieldError, ValidationError};
use crate::math::round_to;

/// Validated prediction request.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PredictionRequest {
    pub study_hours: f64,
    pub attendance: f64,
}

impl PredictionRequest {
    pub const STUDY_HOURS: &'static str = "StudyHours";
    pub const ATTENDANCE: &'static str = "Attendance";

    /// Parses and validates the JSON body, reporting every offending field at once.
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body).map_err(|error| {
            FieldError::new("json_invalid", &["body"], format!("JSON decode error: {}", error))
        })?;
        let object = value.as_object().ok_or_else(|| {
            FieldError::new("model_attributes_type", &["body"], "Input should be a valid dictionary")
        })?;
        match (
            parse_number(object, Self::STUDY_HOURS),
            parse_number(object, Self::ATTENDANCE),
        ) {
            (Ok(study_hours), Ok(attendance)) => Ok(Self {
                study_hours,
                attendance,
            }),
            (study_hours, attendance) => Err(ValidationError(
                study_hours.err().into_iter().chain(attendance.err()).collect(),
            )),
        }
    }

    /// Features in the order the predictor expects them.
    #[must_use]
    pub const fn features(&self) -> [f64; 2] {
        [self.study_hours, self.attendance]
    }
}

/// Accepts a JSON number or a string holding a number.
///
/// Strings such as `"inf"` and `"nan"` pass, the predictor rejects their non-finite result.
fn parse_number(object: &Map<String, Value>, field: &str) -> Result<f64, FieldError> {
    let loc = ["body", field];
    match object.get(field) {
        None => Err(FieldError::new("missing", &loc, "Field required")),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| FieldError::new("float_type", &loc, "Input should be a valid number")),
        Some(Value::String(string)) => f64::from_str(string.trim()).map_err(|_| {
            FieldError::new(
                "float_parsing",
                &loc,
                "Input should be a valid number, unable to parse string as a number",
            )
        }),
        Some(_) => Err(FieldError::new("float_type", &loc, "Input should be a valid number")),
    }
}

#[derive(Serialize)]
pub struct PredictionResponse {
    pub predicted_score: f64,
}

impl PredictionResponse {
    /// Rounds the raw prediction to 2 decimal places.
    #[must_use]
    pub fn new(prediction: f64) -> Self {
        Self {
            predicted_score: round_to(prediction, 2),
        }
    }
}

/// Error response body.
#[derive(Serialize)]
pub struct ErrorDetail<T> {
    pub detail: T,
}

impl<T: Serialize + Send> ErrorDetail<T> {
    pub fn new(detail: T) -> Self {
        Self { detail }
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        Json(self).with_status(status).into_response()
    }
}
