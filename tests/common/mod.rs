#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use sqlx::SqlitePool;
use talentflow::{
    config::Config,
    database::pool::{create_pool, run_migrations},
    routes, AppState,
};
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        seed_demo_data: false,
        seed_job_count: 0,
        seed_candidate_count: 0,
        simulated_failure_rate: 0.0,
        simulated_latency_min_ms: 0,
        simulated_latency_max_ms: 0,
        default_actor_id: "current-user".into(),
        default_actor_name: "HR Manager".into(),
        log_json: false,
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub async fn spawn_app() -> TestApp {
    let config = test_config();
    let pool = create_pool(&config).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");
    let state = AppState::new(pool.clone(), &config);
    TestApp {
        router: routes::router(state),
        pool,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<JsonValue>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 4 * 1024 * 1024).await.unwrap();
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, JsonValue) {
        self.request("GET", uri, None, &[]).await
    }

    pub async fn post(&self, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.request("POST", uri, Some(body), &[]).await
    }

    pub async fn patch(&self, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.request("PATCH", uri, Some(body), &[]).await
    }

    pub async fn put(&self, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
        self.request("PUT", uri, Some(body), &[]).await
    }

    pub async fn create_job(&self, title: &str) -> JsonValue {
        let (status, body) = self
            .post("/api/jobs", json!({ "title": title, "tags": ["Remote"] }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create job: {}", body);
        body
    }

    pub async fn create_candidate(&self, job_id: &str, name: &str) -> JsonValue {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        let (status, body) = self
            .post(
                "/api/candidates",
                json!({ "name": name, "email": email, "jobId": job_id }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create candidate: {}", body);
        body
    }

    /// Orders of all jobs as `(title, order)`, sorted by order.
    pub async fn job_orders(&self) -> Vec<(String, i64)> {
        let (_, body) = self.get("/api/jobs?pageSize=100&sort=order").await;
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|job| {
                (
                    job["title"].as_str().unwrap().to_string(),
                    job["order"].as_i64().unwrap(),
                )
            })
            .collect()
    }
}
