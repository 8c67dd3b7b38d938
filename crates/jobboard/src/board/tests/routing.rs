use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::board::router::{board_router, ACTOR_HEADER};
use crate::board::service::JobBoardService;
use crate::matching::MatchScorer;

fn json_request(method: &str, uri: &str, actor: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get_request(uri: &str, actor: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    builder.body(Body::empty()).expect("request builds")
}

fn job_body(code: &str) -> Value {
    json!({
        "title": "Data Engineer",
        "department": "Analytics",
        "code": code,
        "work_model": "hybrid",
        "location": "Recife",
        "contract_type": "contractor",
        "weekly_hours": "30h",
        "summary": "Own the warehouse",
        "responsibilities": "Pipelines",
        "required_qualifications": "SQL",
        "salary_max": "9000.00"
    })
}

#[tokio::test]
async fn score_endpoint_returns_breakdown() {
    let (service, _) = build_service();
    let app = board_router(Arc::new(service));

    let request = json_request(
        "POST",
        "/api/v1/match/score",
        None,
        json!({
            "job": { "work_model": "remote", "salary_ceiling": 8000 },
            "candidate": {
                "work_model_preference": "remote",
                "salary_expectation": 7000,
                "experience_count": 5,
                "has_completed_education": true,
                "has_any_education": true
            }
        }),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["score"], 75);
    assert_eq!(body["components"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn score_endpoint_tolerates_unknown_work_models() {
    let (service, _) = build_service();
    let app = board_router(Arc::new(service));

    let request = json_request(
        "POST",
        "/api/v1/match/score",
        None,
        json!({
            "job": { "work_model": "nomad", "salary_ceiling": null },
            "candidate": { "work_model_preference": "nomad", "salary_expectation": "3000" }
        }),
    );

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await["score"], 0);
}

#[tokio::test]
async fn create_job_requires_actor_header() {
    let (service, _) = build_service();
    let app = board_router(Arc::new(service));

    let response = app
        .oneshot(json_request("POST", "/api/v1/jobs", None, job_body("DE-1")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_job_maps_role_and_validation_failures() {
    let (service, _) = build_service();
    let company = register_company(&service, "talent@acme.io");
    let candidate = register_candidate(&service, "ana@example.com");
    let app = board_router(Arc::new(service));

    let forbidden = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/jobs",
            Some(&candidate.id.0),
            job_body("DE-1"),
        ))
        .await
        .expect("response");
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let mut invalid = job_body("DE-1");
    invalid["salary_min"] = json!("9500");
    let unprocessable = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/jobs",
            Some(&company.id.0),
            invalid,
        ))
        .await
        .expect("response");
    assert_eq!(unprocessable.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(unprocessable).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("salary_min")));

    let created = app
        .oneshot(json_request(
            "POST",
            "/api/v1/jobs",
            Some(&company.id.0),
            job_body("DE-1"),
        ))
        .await
        .expect("response");
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = read_json_body(created).await;
    assert_eq!(body["code"], "DE-1");
    assert_eq!(body["salary_max"], "9000.00");
}

#[tokio::test]
async fn apply_route_scores_and_rejects_duplicates() {
    let (service, _) = build_service();
    let company = register_company(&service, "talent@acme.io");
    let job = service
        .create_job(&company.id, job_draft("BE-001"))
        .expect("job created");
    let candidate = seasoned_candidate(&service, "ana@example.com", 5);
    let app = board_router(Arc::new(service));
    let uri = format!("/api/v1/jobs/{}/applications", job.id);

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            Some(&candidate.id.0),
            json!({ "message": "Hi" }),
        ))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::CREATED);
    let body = read_json_body(first).await;
    assert_eq!(body["score"], 75);
    assert_eq!(body["status"], "submitted");

    let second = app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            Some(&candidate.id.0),
            json!({}),
        ))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let applicants = app
        .oneshot(get_request(&uri, Some(&company.id.0)))
        .await
        .expect("response");
    assert_eq!(applicants.status(), StatusCode::OK);
    let body = read_json_body(applicants).await;
    assert_eq!(body[0]["candidate_email"], "ana@example.com");
    assert_eq!(body[0]["score"], 75);
}

#[tokio::test]
async fn status_route_rejects_unknown_status() {
    let (service, _) = build_service();
    let company = register_company(&service, "talent@acme.io");
    let job = service
        .create_job(&company.id, job_draft("BE-001"))
        .expect("job created");
    let candidate = seasoned_candidate(&service, "ana@example.com", 1);
    let application = service
        .apply(&candidate.id, &job.id, String::new())
        .expect("applied");
    let app = board_router(Arc::new(service));
    let uri = format!("/api/v1/applications/{}/status", application.id);

    let rejected = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(&company.id.0),
            json!({ "status": "hired" }),
        ))
        .await
        .expect("response");
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let approved = app
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(&company.id.0),
            json!({ "status": "approved" }),
        ))
        .await
        .expect("response");
    assert_eq!(approved.status(), StatusCode::OK);
    assert_eq!(read_json_body(approved).await["status"], "approved");
}

#[tokio::test]
async fn unknown_job_returns_not_found() {
    let (service, _) = build_service();
    let candidate = register_candidate(&service, "ana@example.com");
    let app = board_router(Arc::new(service));

    let response = app
        .oneshot(get_request("/api/v1/jobs/job-404404", Some(&candidate.id.0)))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn remove_experience_returns_no_content() {
    let (service, _) = build_service();
    let candidate = seasoned_candidate(&service, "ana@example.com", 1);
    let experience_id = service.profile(&candidate.id).expect("overview").experiences[0]
        .id
        .clone();
    let app = board_router(Arc::new(service));

    let request = axum::http::Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/me/experiences/{experience_id}"))
        .header(ACTOR_HEADER, candidate.id.0.as_str())
        .body(Body::empty())
        .expect("request builds");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let profile = app
        .oneshot(get_request("/api/v1/me/profile", Some(&candidate.id.0)))
        .await
        .expect("response");
    let body = read_json_body(profile).await;
    assert_eq!(body["experiences"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["education"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn repository_outage_maps_to_internal_error() {
    let service = JobBoardService::new(Arc::new(UnavailableRepository), MatchScorer::default());
    let app = board_router(Arc::new(service));

    let response = app
        .oneshot(get_request("/api/v1/jobs", None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "repository unavailable: database offline");
}

fn empty_request(method: &str, uri: &str, actor: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(ACTOR_HEADER, actor)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn rejected_bodies_use_the_json_error_format() {
    let (service, _) = build_service();
    let app = board_router(Arc::new(service));

    let negative = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/match/score",
            None,
            json!({
                "job": { "work_model": "remote", "salary_ceiling": "-5" },
                "candidate": { "work_model_preference": "remote" }
            }),
        ))
        .await
        .expect("response");
    assert_eq!(negative.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(negative
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json")));
    let body = read_json_body(negative).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("must not be negative")));

    let malformed = Request::builder()
        .method("POST")
        .uri("/api/v1/accounts")
        .header("content-type", "application/json")
        .body(Body::from("{\"email\": "))
        .expect("request builds");
    let response = app.oneshot(malformed).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn match_route_previews_score_for_candidate() {
    let (service, _) = build_service();
    let company = register_company(&service, "talent@acme.io");
    let job = service
        .create_job(&company.id, job_draft("BE-001"))
        .expect("job created");
    let candidate = seasoned_candidate(&service, "ana@example.com", 4);
    let app = board_router(Arc::new(service));
    let uri = format!("/api/v1/jobs/{}/match", job.id);

    let preview = app
        .clone()
        .oneshot(get_request(&uri, Some(&candidate.id.0)))
        .await
        .expect("response");
    assert_eq!(preview.status(), StatusCode::OK);
    let body = read_json_body(preview).await;
    assert_eq!(body["score"], 75);
    assert_eq!(body["raw_total"], 75);

    let company_preview = app
        .oneshot(get_request(&uri, Some(&company.id.0)))
        .await
        .expect("response");
    assert_eq!(company_preview.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn profile_routes_save_and_read_back_records() {
    let (service, _) = build_service();
    let candidate = register_candidate(&service, "ana@example.com");
    let actor = candidate.id.0.clone();
    let app = board_router(Arc::new(service));

    let saved = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/me/profile",
            Some(&actor),
            json!({
                "headline": "Data Analyst",
                "city": "Recife",
                "state": "PE",
                "whatsapp": "+55 81 90000-0000",
                "summary": "SQL and dashboards",
                "salary_expectation": "4500.00",
                "availability": "thirty_days",
                "work_model": "hybrid"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(saved.status(), StatusCode::OK);
    assert_eq!(read_json_body(saved).await["salary_expectation"], "4500.00");

    let experience = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/me/experiences",
            Some(&actor),
            json!({
                "role_title": "Analyst",
                "company": "Acme",
                "started_on": "2020-01-01",
                "description": "Reports"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(experience.status(), StatusCode::CREATED);
    let experience_id = read_json_body(experience).await["id"]
        .as_str()
        .expect("experience id")
        .to_string();

    let edited = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/me/experiences/{experience_id}"),
            Some(&actor),
            json!({
                "role_title": "Senior Analyst",
                "company": "Acme",
                "started_on": "2020-01-01",
                "current": true,
                "description": "Reports and forecasting"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(edited.status(), StatusCode::OK);
    let body = read_json_body(edited).await;
    assert_eq!(body["id"], experience_id.as_str());
    assert_eq!(body["role_title"], "Senior Analyst");

    let education = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/me/education",
            Some(&actor),
            json!({
                "degree": "Bachelor",
                "course": "Statistics",
                "institution": "UFPE",
                "status": "in_progress"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(education.status(), StatusCode::CREATED);
    let education_id = read_json_body(education).await["id"]
        .as_str()
        .expect("education id")
        .to_string();
    let education_uri = format!("/api/v1/me/education/{education_id}");

    let completed = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &education_uri,
            Some(&actor),
            json!({
                "degree": "Bachelor",
                "course": "Statistics",
                "institution": "UFPE",
                "status": "completed"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(completed.status(), StatusCode::OK);
    assert_eq!(read_json_body(completed).await["status"], "completed");

    let overview = app
        .clone()
        .oneshot(get_request("/api/v1/me/profile", Some(&actor)))
        .await
        .expect("response");
    assert_eq!(overview.status(), StatusCode::OK);
    let body = read_json_body(overview).await;
    assert_eq!(body["profile"]["headline"], "Data Analyst");
    assert_eq!(body["experiences"][0]["role_title"], "Senior Analyst");
    assert_eq!(body["education"][0]["status"], "completed");

    let removed = app
        .clone()
        .oneshot(empty_request("DELETE", &education_uri, &actor))
        .await
        .expect("response");
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let overview = app
        .oneshot(get_request("/api/v1/me/profile", Some(&actor)))
        .await
        .expect("response");
    let body = read_json_body(overview).await;
    assert_eq!(body["education"].as_array().map(Vec::len), Some(0));
}
