//! 전체 라우터 테스트 (메모리 저장소).
//!
//! `tower::ServiceExt::oneshot`으로 레이어를 포함한 라우터 전체를 구동합니다.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use jobboard_core::ServerConfig;

use crate::error::{FORBIDDEN_MESSAGE, MALFORMED_MESSAGE, ROUTE_NOT_FOUND_MESSAGE, UNAUTHORIZED_MESSAGE};
use crate::state::{create_test_state, AppState};
use crate::create_router;

struct TestApp {
    router: Router,
    state: Arc<AppState>,
}

impl TestApp {
    async fn new() -> Self {
        let state = Arc::new(create_test_state().await);
        let router = create_router(state.clone(), &ServerConfig::default(), None);
        Self { router, state }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    /// 가입 후 로그인해서 토큰을 받습니다.
    async fn login_as(&self, email: &str, role: &str) -> String {
        let (status, _) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "firstName": "Test",
                    "lastName": "User",
                    "email": email,
                    "password": "password1",
                    "role": role
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"username": email, "password": "password1"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["data"].as_str().unwrap().to_string()
    }

    async fn admin(&self) -> String {
        self.login_as("admin@jobboard.io", "ADMIN").await
    }

    async fn create_company(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/company/addcompany",
                Some(token),
                Some(json!({
                    "name": name,
                    "email": format!("hr@{}.com", name.to_lowercase()),
                    "websiteUrl": "https://example.com",
                    "phoneNumber": "+919876543210"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_i64().unwrap()
    }

    async fn create_job(&self, token: &str, job: Value) -> i64 {
        let (status, body) = self
            .send(Method::POST, "/api/jobs/addjob", Some(token), Some(job))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["data"]["id"].as_i64().unwrap()
    }
}

// ============================================================================
// 인증/인가
// ============================================================================

#[tokio::test]
async fn test_register_then_login_token_names_user() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Priya",
                "lastName": "Shah",
                "email": "priya@example.com",
                "password": "secret6"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["roles"], json!(["USER"]));
    assert!(body["data"].get("passwordHash").is_none());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "priya@example.com", "password": "secret6"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    let token = body["data"].as_str().unwrap();
    assert!(app.state.tokens.validate(token));
    assert_eq!(app.state.tokens.subject(token).unwrap(), "priya@example.com");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.login_as("ravi@example.com", "USER").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"username": "ravi@example.com", "password": "wrong-pass"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password");
    assert_eq!(body["path"], "/api/auth/login");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/jobs/getAlljobs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusCode"], 401);
    assert_eq!(body["message"], UNAUTHORIZED_MESSAGE);
    assert_eq!(body["path"], "/api/jobs/getAlljobs");
}

#[tokio::test]
async fn test_invalid_token_leaves_request_unauthenticated() {
    let app = TestApp::new().await;

    let (status, _) = app
        .send(Method::GET, "/api/jobs/getAlljobs", Some("not.a.token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_unauthorized() {
    let app = TestApp::new().await;
    let token = app.state.tokens.issue("ghost@example.com").unwrap();

    let (status, _) = app
        .send(Method::GET, "/api/jobs/getAlljobs", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_cannot_write_companies() {
    let app = TestApp::new().await;
    let token = app.login_as("user@example.com", "USER").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/company/addcompany",
            Some(&token),
            Some(json!({"name": "Acme", "email": "hr@acme.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], FORBIDDEN_MESSAGE);
}

#[tokio::test]
async fn test_roles_have_no_hierarchy() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    // ADMIN만 가진 사용자는 MANAGER/USER 조회를 통과하지 못함
    let (status, _) = app
        .send(Method::GET, "/api/company/getallCompany", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::GET, "/api/jobs/getAlljobs", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let manager = app.login_as("manager@example.com", "MANAGER").await;
    let (status, body) = app
        .send(Method::GET, "/api/company/getallCompany", Some(&manager), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

// ============================================================================
// 회사
// ============================================================================

#[tokio::test]
async fn test_missing_company_is_not_found() {
    let app = TestApp::new().await;
    let manager = app.login_as("manager@example.com", "MANAGER").await;

    let (status, body) = app
        .send(Method::GET, "/api/company/getCompany/404", Some(&manager), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Company not found with ID: 404");
    assert_eq!(body["path"], "/api/company/getCompany/404");
}

#[tokio::test]
async fn test_company_validation_aggregates_fields() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/company/addcompany",
            Some(&admin),
            Some(json!({"name": "", "email": "nope", "employeeCount": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Validation failed for the following fields: "));
    assert!(message.contains("Company name is required"));
    assert!(message.contains("Invalid email format"));
    assert!(message.contains("Employee count must be at least 1"));
}

#[tokio::test]
async fn test_over_long_fields_are_validation_errors() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/company/addcompany",
            Some(&admin),
            Some(json!({
                "name": "n".repeat(256),
                "email": "hr@acme.com",
                "industry": "i".repeat(101)
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("Company name must be at most 255 characters"));
    assert!(message.contains("Industry must be at most 100 characters"));

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "f".repeat(101),
                "lastName": "Shah",
                "email": "long@example.com",
                "password": "secret6"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("First name must be at most 100 characters"));
}

#[tokio::test]
async fn test_company_delete_cascades_to_jobs_and_reviews() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.login_as("user@example.com", "USER").await;

    let company_id = app.create_company(&admin, "Acme").await;
    let job_id = app
        .create_job(&admin, json!({"title": "Engineer", "companyId": company_id}))
        .await;
    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/reviews/company/{}/addreview", company_id),
            Some(&admin),
            Some(json!({"reviewerName": "Asha", "rating": 5})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let review_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/company/delete/{}", company_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Company deleted successfully");

    let (status, _) = app
        .send(Method::GET, &format!("/api/jobs/getJob/{}", job_id), Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/reviews/company/{}/review/{}", company_id, review_id),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_company_patch() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let id = app.create_company(&admin, "Acme").await;

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/company/updateCompanySomefileds/{}", id),
            Some(&admin),
            Some(json!({"industry": "Software", "isActive": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["industry"], "Software");
    assert_eq!(body["data"]["isActive"], false);
    assert_eq!(body["data"]["name"], "Acme");
}

// ============================================================================
// 채용공고
// ============================================================================

#[tokio::test]
async fn test_add_job_echoes_fields() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/jobs/addjob",
            Some(&admin),
            Some(json!({
                "title": "Engineer",
                "employmentType": "FULL_TIME",
                "experienceRequired": 2,
                "location": "Remote",
                "postedDate": "2025-01-01"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "Job created successfully");
    let job = &body["data"];
    assert!(job["id"].as_i64().unwrap() >= 1);
    assert_eq!(job["title"], "Engineer");
    assert_eq!(job["employmentType"], "FULL_TIME");
    assert_eq!(job["experienceRequired"], 2);
    assert_eq!(job["location"], "Remote");
    assert_eq!(job["postedDate"], "2025-01-01");
    assert_eq!(job["isActive"], true);
}

#[tokio::test]
async fn test_job_with_unknown_company_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/jobs/addjob",
            Some(&admin),
            Some(json!({"title": "Engineer", "companyId": 77})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Company not found with ID: 77");
}

#[tokio::test]
async fn test_job_filter_is_conjunctive() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.login_as("user@example.com", "USER").await;

    for (title, location, experience) in [
        ("Backend", "Pune", 5),
        ("Frontend", "Pune", 1),
        ("Data", "Mumbai", 4),
        ("Platform", "Pune", 3),
    ] {
        app.create_job(
            &admin,
            json!({"title": title, "location": location, "experienceRequired": experience}),
        )
        .await;
    }

    let (status, body) = app
        .send(
            Method::GET,
            "/api/jobs/filter?location=Pune&experienceRequiredGte=3",
            Some(&user),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Backend", "Platform"]);

    // 조건 없음 → 전체
    let (_, body) = app
        .send(Method::GET, "/api/jobs/filter?title=", Some(&user), None)
        .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_job_pagination() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.login_as("user@example.com", "USER").await;

    for i in 0..3 {
        app.create_job(&admin, json!({"title": format!("Job {}", i)})).await;
    }

    let (status, body) = app
        .send(Method::GET, "/api/jobs?pageNo=1&pageSize=2", Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let page = &body["data"];
    assert_eq!(page["content"].as_array().unwrap().len(), 1);
    assert_eq!(page["pageNo"], 1);
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["last"], true);

    let (status, _) = app
        .send(Method::GET, "/api/jobs?pageSize=0", Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(Method::GET, "/api/jobs?pageNo=abc", Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MALFORMED_MESSAGE);
}

#[tokio::test]
async fn test_huge_page_number_is_validation_error() {
    let app = TestApp::new().await;
    let user = app.login_as("user@example.com", "USER").await;

    let uri = format!("/api/jobs?pageNo={}&pageSize=10", i64::MAX);
    let (status, body) = app.send(Method::GET, &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Page number is too large"));

    // 오프셋이 i64에 들어가는 가장 큰 페이지는 빈 마지막 페이지
    let uri = format!("/api/jobs?pageNo={}&pageSize=1", i64::MAX);
    let (status, body) = app.send(Method::GET, &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["content"], json!([]));
    assert_eq!(body["data"]["last"], true);
}

#[tokio::test]
async fn test_patch_with_unknown_key_leaves_job_unchanged() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let user = app.login_as("user@example.com", "USER").await;
    let id = app
        .create_job(&admin, json!({"title": "Engineer", "location": "Remote"}))
        .await;

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/jobs/updatejobsomefilds/{}", id),
            Some(&admin),
            Some(json!({"location": "Pune", "salary": 100})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("salary"));

    let (_, body) = app
        .send(Method::GET, &format!("/api/jobs/getJob/{}", id), Some(&user), None)
        .await;
    assert_eq!(body["data"]["location"], "Remote");
}

#[tokio::test]
async fn test_job_delete_is_synchronous() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let id = app.create_job(&admin, json!({"title": "Engineer"})).await;

    let uri = format!("/api/jobs/deletejobById/{}", id);
    let (status, body) = app.send(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Job deleted successfully");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// 리뷰
// ============================================================================

#[tokio::test]
async fn test_review_under_wrong_company_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let acme = app.create_company(&admin, "Acme").await;
    let globex = app.create_company(&admin, "Globex").await;

    let (_, body) = app
        .send(
            Method::POST,
            &format!("/api/reviews/company/{}/addreview", acme),
            Some(&admin),
            Some(json!({"reviewerName": "Asha", "rating": 4, "comment": "Good"})),
        )
        .await;
    let review_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .send(
            Method::GET,
            &format!("/api/reviews/company/{}/review/{}", acme, review_id),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let wrong = format!("/api/reviews/company/{}/review/{}", globex, review_id);
    let (status, body) = app.send(Method::GET, &wrong, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Review not found with ID: {}", review_id));

    let (status, _) = app
        .send(
            Method::PUT,
            &wrong,
            Some(&admin),
            Some(json!({"reviewerName": "Mallory", "rating": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_reads_are_open_and_writes_need_admin() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let acme = app.create_company(&admin, "Acme").await;

    let (status, body) = app
        .send(Method::GET, &format!("/api/reviews/company/{}/review", acme), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/api/reviews/company/{}/addreview", acme),
            None,
            Some(json!({"reviewerName": "Asha", "rating": 4})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// 에러 변환
// ============================================================================

#[tokio::test]
async fn test_unsupported_method_lists_allowed_methods() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let (status, body) = app
        .send(Method::DELETE, "/api/jobs/addjob", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Request method DELETE is not supported on this endpoint. Supported methods: [POST]"
    );
    assert_eq!(body["path"], "/api/jobs/addjob");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;
    let admin = app.admin().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/jobs/addjob")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let (status, body) = app.dispatch(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MALFORMED_MESSAGE);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_non_positive_and_non_numeric_ids() {
    let app = TestApp::new().await;
    let user = app.login_as("user@example.com", "USER").await;

    let (status, body) = app
        .send(Method::GET, "/api/jobs/getJob/0", Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Job ID must be a positive number"));

    let (status, body) = app
        .send(Method::GET, "/api/jobs/getJob/abc", Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MALFORMED_MESSAGE);
}

#[tokio::test]
async fn test_unknown_route_is_structured_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/nothing/here", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], ROUTE_NOT_FOUND_MESSAGE);
    assert_eq!(body["path"], "/api/nothing/here");
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn test_metrics_route_only_when_handle_given() {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let state = Arc::new(create_test_state().await);
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let router = create_router(state.clone(), &ServerConfig::default(), Some(handle));
    let app = TestApp { router, state };

    let (status, _) = app.send(Method::GET, "/metrics", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let without = TestApp::new().await;
    let (status, body) = without.send(Method::GET, "/metrics", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], ROUTE_NOT_FOUND_MESSAGE);
}
