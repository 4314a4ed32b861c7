use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use rand::Rng;

use crate::config::Config;
use crate::error::Error;

/// Source of simulated network trouble for exercising client retry and
/// rollback paths.
#[cfg_attr(test, mockall::automock)]
pub trait FaultInjector: Send + Sync {
    /// Delay to apply before handling a request.
    fn latency(&self) -> Duration;
    /// Whether the current write request should be rejected.
    fn should_fail(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct RandomFaults {
    failure_rate: f64,
    latency_min_ms: u64,
    latency_max_ms: u64,
}

impl RandomFaults {
    pub fn new(failure_rate: f64, latency_min_ms: u64, latency_max_ms: u64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
            latency_min_ms,
            latency_max_ms: latency_max_ms.max(latency_min_ms),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.simulated_failure_rate,
            config.simulated_latency_min_ms,
            config.simulated_latency_max_ms,
        )
    }

    pub fn is_active(&self) -> bool {
        self.failure_rate > 0.0 || self.latency_max_ms > 0
    }
}

impl FaultInjector for RandomFaults {
    fn latency(&self) -> Duration {
        if self.latency_max_ms == 0 {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(self.latency_min_ms..=self.latency_max_ms);
        Duration::from_millis(ms)
    }

    fn should_fail(&self) -> bool {
        self.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.failure_rate)
    }
}

pub type SharedFaults = Arc<dyn FaultInjector>;

fn is_write(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

pub async fn inject_faults(
    State(faults): State<SharedFaults>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let delay = faults.latency();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    if is_write(req.method()) && faults.should_fail() {
        tracing::warn!(method = %req.method(), path = %req.uri().path(), "injected simulated failure");
        return Error::SimulatedFailure.into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    fn app(faults: MockFaultInjector) -> Router {
        let shared: SharedFaults = Arc::new(faults);
        Router::new()
            .route("/thing", get(|| async { "read" }).post(|| async { "written" }))
            .layer(axum::middleware::from_fn_with_state(shared, inject_faults))
    }

    fn request(method: Method) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/thing")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn failing_writes_are_rejected() {
        let mut faults = MockFaultInjector::new();
        faults.expect_latency().return_const(Duration::ZERO);
        faults.expect_should_fail().times(1).return_const(true);

        let resp = app(faults).oneshot(request(Method::POST)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn reads_never_consult_the_failure_switch() {
        let mut faults = MockFaultInjector::new();
        faults.expect_latency().return_const(Duration::ZERO);
        faults.expect_should_fail().never();

        let resp = app(faults).oneshot(request(Method::GET)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn healthy_writes_pass_through() {
        let mut faults = MockFaultInjector::new();
        faults.expect_latency().return_const(Duration::ZERO);
        faults.expect_should_fail().return_const(false);

        let resp = app(faults).oneshot(request(Method::POST)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[test]
    fn zero_rate_never_fails() {
        let faults = RandomFaults::new(0.0, 0, 0);
        assert!(!faults.is_active());
        assert!((0..100).all(|_| !faults.should_fail()));
        assert_eq!(faults.latency(), Duration::ZERO);
    }

    #[test]
    fn full_rate_always_fails() {
        let faults = RandomFaults::new(1.0, 5, 10);
        assert!(faults.is_active());
        assert!(faults.should_fail());
        let delay = faults.latency();
        assert!(delay >= Duration::from_millis(5) && delay <= Duration::from_millis(10));
    }
}
