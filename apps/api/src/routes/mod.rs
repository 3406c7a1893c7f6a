pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::cover_letters::handlers as cover_letters;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// JSON request bodies above this size are rejected.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Identity
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        // Résumés
        .route("/api/resumes", get(resumes::handle_list_resumes))
        .route("/api/resumes/templates", get(resumes::handle_list_templates))
        .route("/api/resumes/save", post(resumes::handle_save_resume))
        .route(
            "/api/resumes/download/:id",
            get(resumes::handle_download_resume),
        )
        .route("/api/resumes/:id", delete(resumes::handle_delete_resume))
        // Cover letters
        .route(
            "/api/cover-letters",
            get(cover_letters::handle_list_cover_letters),
        )
        .route(
            "/api/cover-letters/save",
            post(cover_letters::handle_save_cover_letter),
        )
        .route(
            "/api/cover-letters/download/:id",
            get(cover_letters::handle_download_cover_letter),
        )
        .route(
            "/api/cover-letters/:id",
            delete(cover_letters::handle_delete_cover_letter),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body, Bytes},
        http::{header, HeaderMap, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(AppState::for_tests())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body)
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn json_body(body: &Bytes) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    async fn register(app: &Router, email: &str) -> String {
        let (status, _, body) = send(
            app,
            request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({"fullName": "Ada Lovelace", "email": email, "password": "analytical"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body:?}");
        json_body(&body)["token"].as_str().unwrap().to_string()
    }

    fn resume_body(template: &str) -> Value {
        json!({
            "template": template,
            "content": {
                "professionalInfo": {"name": "Ada Lovelace", "email": "ada@example.com"},
                "workExperience": [{
                    "position": "Engineer",
                    "company": "Analytical Engines",
                    "startDate": "2023-01-15",
                    "endDate": "Present",
                    "achievements": ["Wrote the first program"]
                }],
                "skills": ["Mathematics", "Rust"]
            }
        })
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let (status, _, body) = send(&app(), request(Method::GET, "/api/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn test_templates_are_public() {
        let (status, _, body) =
            send(&app(), request(Method::GET, "/api/resumes/templates", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        let body = json_body(&body);
        assert_eq!(body["success"], true);
        let keys: Vec<&str> = body["templates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["modern", "corporate", "creative"]);
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = app();
        for uri in ["/api/resumes", "/api/cover-letters"] {
            let (status, _, body) = send(&app, request(Method::GET, uri, None, None)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} should be protected");
            assert_eq!(json_body(&body)["error"]["code"], "UNAUTHORIZED");
        }
        let (status, _, _) = send(
            &app,
            request(Method::GET, "/api/resumes", Some("forged.token.value"), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_duplicate_register_is_conflict() {
        let app = app();
        register(&app, "ada@example.com").await;
        let (status, _, body) = send(
            &app,
            request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({"fullName": "Ada", "email": "ada@example.com", "password": "x"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json_body(&body)["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = app();
        register(&app, "ada@example.com").await;
        let (status, _, body) = send(
            &app,
            request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "ada@example.com", "password": "wrong"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(&body)["error"]["code"], "INVALID_CREDENTIALS");

        let (status, _, body) = send(
            &app,
            request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({"email": "ada@example.com", "password": "analytical"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json_body(&body)["token"].is_string());
    }

    #[tokio::test]
    async fn test_resume_lifecycle() {
        let app = app();
        let token = register(&app, "ada@example.com").await;

        let (status, _, body) = send(
            &app,
            request(Method::POST, "/api/resumes/save", Some(token.as_str()), Some(resume_body("modern"))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = json_body(&body);
        assert_eq!(body["message"], "Resume saved successfully");
        let id = body["resumeId"].as_str().unwrap().to_string();

        let (status, _, body) =
            send(&app, request(Method::GET, "/api/resumes", Some(token.as_str()), None)).await;
        assert_eq!(status, StatusCode::OK);
        let listed = json_body(&body);
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["id"], id.as_str());
        assert_eq!(listed[0]["template"], "modern");

        let download = format!("/api/resumes/download/{id}");
        let (status, headers, body) =
            send(&app, request(Method::GET, &download, Some(token.as_str()), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            format!("attachment; filename=\"resume-{id}.pdf\"").as_str()
        );
        assert!(body.starts_with(b"%PDF-"));

        let (status, _, _) = send(
            &app,
            request(Method::DELETE, &format!("/api/resumes/{id}"), Some(token.as_str()), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(&app, request(Method::GET, &download, Some(token.as_str()), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_other_users_documents_are_not_found() {
        let app = app();
        let owner = register(&app, "ada@example.com").await;
        let stranger = register(&app, "babbage@example.com").await;

        let (_, _, body) = send(
            &app,
            request(Method::POST, "/api/resumes/save", Some(owner.as_str()), Some(resume_body("corporate"))),
        )
        .await;
        let id = json_body(&body)["resumeId"].as_str().unwrap().to_string();

        let (status, _, body) = send(
            &app,
            request(Method::GET, &format!("/api/resumes/download/{id}"), Some(stranger.as_str()), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_body(&body)["error"]["code"], "NOT_FOUND");

        let (status, _, _) = send(
            &app,
            request(Method::DELETE, &format!("/api/resumes/{id}"), Some(stranger.as_str()), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, _, body) = send(&app, request(Method::GET, "/api/resumes", Some(stranger.as_str()), None)).await;
        assert!(json_body(&body).as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_resume_validation() {
        let app = app();
        let token = register(&app, "ada@example.com").await;

        let (status, _, body) = send(
            &app,
            request(Method::POST, "/api/resumes/save", Some(token.as_str()), Some(resume_body("baroque"))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&body)["error"]["code"], "VALIDATION_ERROR");

        let mut bad_date = resume_body("modern");
        bad_date["content"]["workExperience"][0]["startDate"] = json!("sometime");
        let (status, _, body) = send(
            &app,
            request(Method::POST, "/api/resumes/save", Some(token.as_str()), Some(bad_date)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json_body(&body)["error"]["message"]
            .as_str()
            .unwrap()
            .contains("workExperience[0].startDate"));

        let (_, _, body) = send(&app, request(Method::GET, "/api/resumes", Some(token.as_str()), None)).await;
        assert!(json_body(&body).as_array().unwrap().is_empty(), "no partial writes");
    }

    #[tokio::test]
    async fn test_cover_letter_lifecycle() {
        let app = app();
        let token = register(&app, "grace@example.com").await;

        let letter = json!({
            "content": {
                "userInfo": {"name": "Grace Hopper", "email": "grace@example.com"},
                "company": "Compiler Co",
                "body": "I would like to join your team."
            }
        });
        let (status, _, body) = send(
            &app,
            request(Method::POST, "/api/cover-letters/save", Some(token.as_str()), Some(letter)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = json_body(&body)["letterId"].as_str().unwrap().to_string();

        let (status, headers, body) = send(
            &app,
            request(
                Method::GET,
                &format!("/api/cover-letters/download/{id}"),
                Some(token.as_str()),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            format!("attachment; filename=\"cover-letter-{id}.pdf\"").as_str()
        );
        assert!(body.starts_with(b"%PDF-"));

        let (_, _, body) =
            send(&app, request(Method::GET, "/api/cover-letters", Some(token.as_str()), None)).await;
        let listed = json_body(&body);
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert!(listed[0].get("template").is_none());

        let (status, _, body) = send(
            &app,
            request(Method::DELETE, &format!("/api/cover-letters/{id}"), Some(token.as_str()), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["message"], "Cover letter deleted successfully");
    }

    #[tokio::test]
    async fn test_cover_letter_requires_body() {
        let app = app();
        let token = register(&app, "grace@example.com").await;
        let (status, _, _) = send(
            &app,
            request(
                Method::POST,
                "/api/cover-letters/save",
                Some(token.as_str()),
                Some(json!({"content": {"userInfo": {"name": "Grace"}}})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
