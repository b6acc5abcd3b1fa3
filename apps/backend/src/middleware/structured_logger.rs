use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::UPGRADE;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error, info, warn};

/// Emits one `request_completed` event per HTTP request, tagged with a
/// `request.kind`. A socket upgrade is logged once the handshake response is
/// ready; the socket's own lifetime is logged by its actor. `/status` checks
/// drop to debug unless they fail.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let kind = RequestKind::of(&req);
        let method = req.method().to_string();
        let path = req.path().to_string();
        let peer = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let status_code = status.as_u16();
            let duration_us = start.elapsed().as_micros() as u64;
            let kind = kind.as_str();

            if status.is_server_error() {
                error!(http.method=%method, url.path=%path, http.status_code=status_code, duration_us, request.kind=kind, client.address=%peer, message="request_completed");
            } else if status.is_client_error() {
                warn!(http.method=%method, url.path=%path, http.status_code=status_code, duration_us, request.kind=kind, client.address=%peer, message="request_completed");
            } else if kind == "health" {
                debug!(url.path=%path, http.status_code=status_code, duration_us, message="request_completed");
            } else {
                info!(http.method=%method, url.path=%path, http.status_code=status_code, duration_us, request.kind=kind, client.address=%peer, message="request_completed");
            }

            result
        })
    }
}

/// Rough classification so socket handshakes and health checks are easy to
/// filter out of the request log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Health,
    Upgrade,
    Page,
}

impl RequestKind {
    fn of(req: &ServiceRequest) -> Self {
        let upgrade = req
            .headers()
            .get(UPGRADE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.eq_ignore_ascii_case("websocket"));
        if upgrade {
            RequestKind::Upgrade
        } else if req.path() == "/status" {
            RequestKind::Health
        } else {
            RequestKind::Page
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            RequestKind::Health => "health",
            RequestKind::Upgrade => "ws_upgrade",
            RequestKind::Page => "page",
        }
    }
}
