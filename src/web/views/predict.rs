use poem::http::StatusCode;
use poem::web::{Data, Json};
use poem::{handler, IntoResponse, Response};

use crate::prelude::*;
use crate::trainer::regression::Predictor;
use crate::web::models::{ErrorDetail, PredictionRequest, PredictionResponse};

/// `POST /predict`: validates the body, then predicts the score with the shared predictor.
#[handler]
#[instrument(level = "info", skip_all)]
pub async fn post(body: Vec<u8>, Data(predictor): Data<&Arc<Predictor>>) -> Response {
    let request = match PredictionRequest::from_slice(&body) {
        Ok(request) => request,
        Err(error) => {
            info!("rejected: {:#}", error);
            return ErrorDetail::new(error).into_response_with(StatusCode::UNPROCESSABLE_ENTITY);
        }
    };

    info!(request.study_hours, request.attendance);
    match predictor.predict(&request.features()) {
        Ok(prediction) => Json(PredictionResponse::new(prediction)).into_response(),
        Err(error) => {
            error!(request.study_hours, request.attendance, "failed to predict: {:#}", error);
            ErrorDetail::new(error.to_string()).into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use serde_json::json;

    use crate::math::round_to;
    use crate::prelude::*;
    use crate::testing::{fit_csv, COLLINEAR_CSV, LINEAR_CSV};
    use crate::trainer::regression::Predictor;
    use crate::web::test::create_test_client;

    #[tokio::test]
    async fn predict_ok() -> Result {
        let client = create_test_client(fit_csv(COLLINEAR_CSV)?);
        let response = client
            .post("/predict")
            .body_json(&json!({"StudyHours": 2, "Attendance": 60}))
            .send()
            .await;
        response.assert_status_is_ok();
        response.assert_json(json!({"predicted_score": 55.0})).await;
        Ok(())
    }

    #[tokio::test]
    async fn predict_intercept_ok() -> Result {
        let predictor = fit_csv(LINEAR_CSV)?;
        let expected = round_to(predictor.intercept, 2);
        let client = create_test_client(predictor);
        let response = client
            .post("/predict")
            .body_json(&json!({"StudyHours": 0.0, "Attendance": 0.0}))
            .send()
            .await;
        response.assert_status_is_ok();
        response.assert_json(json!({ "predicted_score": expected })).await;
        Ok(())
    }

    #[tokio::test]
    async fn predict_out_of_range_inputs_ok() -> Result {
        let predictor = fit_csv(LINEAR_CSV)?;
        let expected = round_to(predictor.predict(&[-3.0, 250.0])?, 2);
        let client = create_test_client(predictor);
        let response = client
            .post("/predict")
            .body_json(&json!({"StudyHours": -3, "Attendance": 250}))
            .send()
            .await;
        response.assert_status_is_ok();
        response.assert_json(json!({ "predicted_score": expected })).await;
        Ok(())
    }

    #[tokio::test]
    async fn predict_concurrently_ok() -> Result {
        let predictor = fit_csv(LINEAR_CSV)?;
        let client = create_test_client(predictor);
        let (response_1, response_2) = tokio::join!(
            client
                .post("/predict")
                .body_json(&json!({"StudyHours": 2, "Attendance": 60}))
                .send(),
            client
                .post("/predict")
                .body_json(&json!({"StudyHours": 10, "Attendance": 100}))
                .send(),
        );
        response_1.assert_status_is_ok();
        response_1.assert_json(json!({"predicted_score": 41.0})).await;
        response_2.assert_status_is_ok();
        response_2.assert_json(json!({"predicted_score": 85.0})).await;
        Ok(())
    }

    #[tokio::test]
    async fn predict_missing_field_fails() -> Result {
        let client = create_test_client(fit_csv(LINEAR_CSV)?);
        let response = client
            .post("/predict")
            .body_json(&json!({"StudyHours": 2}))
            .send()
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        response
            .assert_json(json!({
                "detail": [{"type": "missing", "loc": ["body", "Attendance"], "msg": "Field required"}],
            }))
            .await;
        Ok(())
    }

    #[tokio::test]
    async fn predict_malformed_body_fails() -> Result {
        let client = create_test_client(fit_csv(LINEAR_CSV)?);
        let response = client
            .post("/predict")
            .content_type("application/json")
            .body("{\"StudyHours\": 2,")
            .send()
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        Ok(())
    }

    #[tokio::test]
    async fn predict_overflow_fails() -> Result {
        let client = create_test_client(fit_csv(LINEAR_CSV)?);
        let response = client
            .post("/predict")
            .body_json(&json!({"StudyHours": 1e308, "Attendance": 1e308}))
            .send()
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response
            .assert_json(json!({"detail": "the prediction is not a finite number: inf"}))
            .await;
        Ok(())
    }

    #[tokio::test]
    async fn predict_not_a_number_string_fails() -> Result {
        let client = create_test_client(fit_csv(LINEAR_CSV)?);
        let response = client
            .post("/predict")
            .body_json(&json!({"StudyHours": "nan", "Attendance": 1}))
            .send()
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response
            .assert_json(json!({"detail": "the prediction is not a finite number: NaN"}))
            .await;
        Ok(())
    }

    #[tokio::test]
    async fn predict_broken_predictor_fails() -> Result {
        let predictor = Predictor {
            coefficients: vec![1.0, 2.0, 3.0],
            ..fit_csv(LINEAR_CSV)?
        };
        let client = create_test_client(predictor);
        let response = client
            .post("/predict")
            .body_json(&json!({"StudyHours": 1, "Attendance": 2}))
            .send()
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response
            .assert_json(json!({"detail": "expected 3 features, got 2"}))
            .await;
        Ok(())
    }

    #[tokio::test]
    async fn get_not_allowed() -> Result {
        let client = create_test_client(fit_csv(LINEAR_CSV)?);
        let response = client.get("/predict").send().await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        response
            .assert_json(json!({"detail": "Method Not Allowed"}))
            .await;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_not_found() -> Result {
        let client = create_test_client(fit_csv(LINEAR_CSV)?);
        let response = client.post("/students").send().await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(json!({"detail": "Not Found"})).await;
        Ok(())
    }
}
