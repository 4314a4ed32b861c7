mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::spawn_app;

#[tokio::test]
async fn create_assigns_next_order_and_derives_slug() {
    let app = spawn_app().await;

    let first = app.create_job("Senior Rust Engineer").await;
    assert_eq!(first["order"], 0);
    assert_eq!(first["slug"], "senior-rust-engineer");
    assert_eq!(first["status"], "active");
    assert_eq!(first["tags"], json!(["Remote"]));

    let second = app.create_job("Data Analyst").await;
    assert_eq!(second["order"], 1);

    let (status, body) = app.get(&format!("/api/jobs/{}", first["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Senior Rust Engineer");
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn duplicate_slug_is_rejected_without_mutation() {
    let app = spawn_app().await;
    let original = app.create_job("Platform Engineer").await;
    let other = app.create_job("Designer").await;

    let (status, body) = app
        .post("/api/jobs", json!({ "title": "Another", "slug": "platform-engineer" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Slug must be unique");

    let other_id = other["id"].as_str().unwrap();
    let (status, body) = app
        .patch(
            &format!("/api/jobs/{}", other_id),
            json!({ "title": "Renamed", "slug": "platform-engineer" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Slug must be unique");

    let (_, body) = app.get(&format!("/api/jobs/{}", other_id)).await;
    assert_eq!(body["title"], "Designer");
    assert_eq!(body["slug"], "designer");

    let (_, list) = app.get("/api/jobs").await;
    assert_eq!(list["pagination"]["total"], 2);
    assert_eq!(original["slug"], "platform-engineer");
}

#[tokio::test]
async fn update_keeps_own_slug_and_changes_fields() {
    let app = spawn_app().await;
    let job = app.create_job("QA Engineer").await;
    let id = job["id"].as_str().unwrap();

    let (status, body) = app
        .patch(
            &format!("/api/jobs/{}", id),
            json!({ "slug": "qa-engineer", "status": "archived", "tags": ["Onsite", "onsite"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["status"], "archived");
    assert_eq!(body["tags"], json!(["Onsite"]));
    assert_eq!(body["order"], 0);
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = spawn_app().await;

    let (status, _) = app.post("/api/jobs", json!({ "title": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/api/jobs", json!({ "title": "Ok", "slug": "Not A Slug" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .get("/api/jobs/00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reorder_moves_job_and_shifts_the_range() {
    let app = spawn_app().await;
    let mut ids = Vec::new();
    for title in ["A", "B", "C", "D", "E", "F"] {
        let job = app.create_job(title).await;
        ids.push(job["id"].as_str().unwrap().to_string());
    }

    let (status, body) = app
        .patch(
            &format!("/api/jobs/{}/reorder", ids[2]),
            json!({ "fromOrder": 2, "toOrder": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body, json!({ "success": true }));

    let orders = app.job_orders().await;
    let titles: Vec<&str> = orders.iter().map(|(title, _)| title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "D", "E", "F", "C"]);
    let values: Vec<i64> = orders.iter().map(|(_, order)| *order).collect();
    assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);

    let (status, _) = app
        .patch(
            &format!("/api/jobs/{}/reorder", ids[2]),
            json!({ "fromOrder": 5, "toOrder": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<String> = app.job_orders().await.into_iter().map(|(t, _)| t).collect();
    assert_eq!(titles, vec!["C", "A", "B", "D", "E", "F"]);
}

#[tokio::test]
async fn every_move_keeps_orders_dense() {
    let app = spawn_app().await;
    for title in ["J0", "J1", "J2", "J3"] {
        app.create_job(title).await;
    }

    for from in 0..4i64 {
        for to in 0..4i64 {
            let (_, list) = app.get("/api/jobs?pageSize=100").await;
            let id = list["data"]
                .as_array()
                .unwrap()
                .iter()
                .find(|job| job["order"] == from)
                .map(|job| job["id"].as_str().unwrap().to_string())
                .unwrap();

            let (status, _) = app
                .patch(
                    &format!("/api/jobs/{}/reorder", id),
                    json!({ "fromOrder": from, "toOrder": to }),
                )
                .await;
            assert_eq!(status, StatusCode::OK);

            let mut orders: Vec<i64> = app.job_orders().await.into_iter().map(|(_, o)| o).collect();
            orders.sort();
            assert_eq!(orders, vec![0, 1, 2, 3]);
        }
    }
}

#[tokio::test]
async fn reorder_failures_leave_orders_untouched() {
    let app = spawn_app().await;
    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let job = app.create_job(title).await;
        ids.push(job["id"].as_str().unwrap().to_string());
    }
    let before = app.job_orders().await;

    let (status, _) = app
        .patch(
            "/api/jobs/00000000-0000-0000-0000-000000000000/reorder",
            json!({ "fromOrder": 0, "toOrder": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .patch(
            &format!("/api/jobs/{}/reorder", ids[0]),
            json!({ "fromOrder": 9, "toOrder": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .patch(
            &format!("/api/jobs/{}/reorder", ids[0]),
            json!({ "fromOrder": 0, "toOrder": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .patch(
            &format!("/api/jobs/{}/reorder", ids[0]),
            json!({ "fromOrder": 1, "toOrder": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(app.job_orders().await, before);
}

#[tokio::test]
async fn list_filters_sorts_and_paginates() {
    let app = spawn_app().await;
    for title in ["Backend Engineer", "frontend engineer", "Accountant", "Data Engineer"] {
        app.create_job(title).await;
    }
    let (_, list) = app.get("/api/jobs?search=accountant").await;
    let id = list["data"][0]["id"].as_str().unwrap().to_string();
    app.patch(&format!("/api/jobs/{}", id), json!({ "status": "archived" }))
        .await;

    let (status, body) = app.get("/api/jobs?search=ENGINEER&status=active").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 3);

    let (_, body) = app.get("/api/jobs?status=archived").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Accountant");

    let (_, body) = app.get("/api/jobs?sort=title").await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Accountant", "Backend Engineer", "Data Engineer", "frontend engineer"]
    );

    let (_, body) = app.get("/api/jobs?page=2&pageSize=3").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["pageSize"], 3);
    assert_eq!(body["pagination"]["total"], 4);
    assert_eq!(body["pagination"]["totalPages"], 2);

    let (_, body) = app.get("/api/jobs?search=50%25_off").await;
    assert_eq!(body["pagination"]["total"], 0);
}

#[tokio::test]
async fn huge_page_number_returns_an_empty_page() {
    let app = spawn_app().await;
    app.create_job("Only Job").await;

    for uri in [
        "/api/jobs?page=9223372036854775807",
        "/api/candidates?page=9223372036854775807",
    ] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{}: {}", uri, body);
        assert_eq!(body["data"], json!([]));
        assert!(body["pagination"]["page"].as_i64().unwrap() > 1);
    }
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let app = spawn_app().await;

    let (status, body) = app.post("/api/jobs", json!({ "title": 5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app.get("/api/jobs?status=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = app.get("/api/jobs/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn blank_titles_are_rejected() {
    let app = spawn_app().await;
    let job = app.create_job("Designer").await;
    let id = job["id"].as_str().unwrap();

    let (status, body) = app
        .post("/api/jobs", json!({ "title": "   ", "slug": "x" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = app
        .patch(&format!("/api/jobs/{}", id), json!({ "title": " \t " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get("/api/jobs").await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["title"], "Designer");
}
