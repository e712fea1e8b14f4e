//! Per-client throttling for credential endpoints.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use futures::future::LocalBoxFuture;

use inkwell_core::ports::RateLimiter;
use inkwell_shared::ErrorResponse;

/// Rate limiting middleware factory. Safe methods pass through untouched.
pub struct RateLimitMiddleware {
    limiter: Arc<dyn RateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<dyn RateLimiter>,
}

/// Throttle key for a request: the socket peer's IP. Forwarding headers
/// are client-controlled and never consulted.
fn client_key(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Whole seconds to wait, rounded up and never zero.
fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = self.limiter.clone();

        Box::pin(async move {
            if req.method().is_safe() {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let key = client_key(&req);

            match limiter.check(&key).await {
                Ok(result) if !result.allowed => {
                    let wait = retry_after_secs(result.retry_after);
                    tracing::warn!(client = %key, path = %req.path(), "Rate limit exceeded");

                    let response = HttpResponse::TooManyRequests()
                        .insert_header((header::RETRY_AFTER, wait.to_string()))
                        .json(ErrorResponse::too_many_requests(wait));

                    let (http_req, _payload) = req.into_parts();
                    return Ok(ServiceResponse::new(http_req, response).map_into_right_body());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Rate limiter error, failing open"),
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}
