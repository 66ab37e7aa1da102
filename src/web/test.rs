use poem::test::TestClient;
use poem::Endpoint;

use crate::prelude::*;
use crate::trainer::regression::Predictor;
use crate::web::create_app;

pub fn create_test_client(predictor: Predictor) -> TestClient<impl Endpoint> {
    TestClient::new(create_app(Arc::new(predictor)))
}
