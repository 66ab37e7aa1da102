use poem::error::{MethodNotAllowedError, NotFoundError};
use poem::http::StatusCode;
use poem::{Endpoint, Middleware, Request, Response, Result};

use crate::prelude::*;
use crate::web::models::ErrorDetail;

/// Converts the framework errors into JSON `detail` responses,
/// so that no error escapes the route as a plain-text body.
pub struct ErrorMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for ErrorMiddleware {
    type Output = ErrorMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorMiddlewareImpl { ep }
    }
}

pub struct ErrorMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for ErrorMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        match self.ep.call(request).await {
            Err(error) if error.is::<NotFoundError>() => {
                info!(?method, ?uri, "{:#}", error);
                Ok(ErrorDetail::new("Not Found").into_response_with(StatusCode::NOT_FOUND))
            }
            Err(error) if error.is::<MethodNotAllowedError>() => {
                info!(?method, ?uri, "{:#}", error);
                Ok(ErrorDetail::new("Method Not Allowed")
                    .into_response_with(StatusCode::METHOD_NOT_ALLOWED))
            }
            Err(error) => {
                error!(?method, ?uri, "{:#}", error);
                Ok(ErrorDetail::new(error.to_string())
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR))
            }
            result => result,
        }
    }
}
