pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth::{self, require_auth};
use crate::content;
use crate::export;
use crate::projects;
use crate::sections;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_handler))
        .route("/auth/register", post(auth::handlers::handle_register))
        .route("/auth/login", post(auth::handlers::handle_login));

    let protected = Router::new()
        .route(
            "/projects",
            get(projects::handlers::handle_list_projects)
                .post(projects::handlers::handle_create_project),
        )
        .route(
            "/projects/",
            get(projects::handlers::handle_list_projects)
                .post(projects::handlers::handle_create_project),
        )
        .route("/projects/:id", get(projects::handlers::handle_get_project))
        .route(
            "/projects/:id/generate",
            post(projects::handlers::handle_generate),
        )
        .route("/sections/:id/refine", post(sections::handlers::handle_refine))
        .route(
            "/sections/:id/feedback",
            post(sections::handlers::handle_feedback),
        )
        .route(
            "/sections/:id/comment",
            post(sections::handlers::handle_comment),
        )
        .route(
            "/sections/:id/revisions",
            get(sections::handlers::handle_revisions),
        )
        .route("/templates/outline", post(content::handlers::handle_outline))
        .route("/export/:project_id", get(export::handlers::handle_export))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(protected).with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use chrono::Duration;
    use jsonwebtoken::Algorithm;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::TokenKeys;
    use crate::content::ContentService;
    use crate::store::memory::MemoryStore;

    fn app() -> Router {
        build_router(AppState {
            store: Arc::new(MemoryStore::new()),
            content: ContentService::fallback_only(),
            tokens: TokenKeys::new("router-test-secret", Algorithm::HS256, Duration::minutes(30)),
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn register(app: &Router, email: &str, password: &str) -> Response {
        send(
            app,
            json_request(
                Method::POST,
                "/auth/register",
                None,
                json!({"email": email, "full_name": "Test User", "password": password}),
            ),
        )
        .await
    }

    async fn login(app: &Router, email: &str, password: &str) -> Response {
        send(
            app,
            Request::builder()
                .method(Method::POST)
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!("username={email}&password={password}")))
                .unwrap(),
        )
        .await
    }

    async fn token_for(app: &Router, email: &str) -> String {
        assert_eq!(register(app, email, "s3cret").await.status(), StatusCode::OK);
        let response = login(app, email, "s3cret").await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    async fn create_project(app: &Router, token: &str, sections: Value) -> Value {
        let response = send(
            app,
            json_request(
                Method::POST,
                "/projects",
                Some(token),
                json!({
                    "title": "Market Study",
                    "topic": "Vertical Farming",
                    "doc_type": "docx",
                    "sections": sections,
                }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = send(&app(), get_request("/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts_case_insensitively() {
        let app = app();
        let first = register(&app, "Dana@Example.com", "pw").await;
        assert_eq!(first.status(), StatusCode::OK);
        let body = json_body(first).await;
        assert_eq!(body["email"], "dana@example.com");
        assert!(body.get("hashed_password").is_none());

        let second = register(&app, "dana@EXAMPLE.com", "other").await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(second).await["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_is_unauthorized() {
        let app = app();
        register(&app, "lee@example.com", "right").await;
        assert_eq!(
            login(&app, "lee@example.com", "wrong").await.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            login(&app, "nobody@example.com", "right").await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_token_gates_protected_routes() {
        let app = app();
        let token = token_for(&app, "kim@example.com").await;

        let ok = send(&app, get_request("/projects", Some(&token))).await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(json_body(ok).await, json!([]));

        let missing = send(&app, get_request("/projects", None)).await;
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let forged = send(&app, get_request("/projects", Some("not-a-token"))).await;
        assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_generate_then_edit_section_flow() {
        let app = app();
        let token = token_for(&app, "ivy@example.com").await;
        let project = create_project(
            &app,
            &token,
            json!([{"title": "Next Steps", "position": 2}, {"title": "Overview", "position": 1}]),
        )
        .await;
        assert_eq!(project["status"], "draft");
        assert_eq!(project["sections"][0]["title"], "Overview");
        assert!(project.get("owner_id").is_none());
        let project_id = project["id"].as_i64().unwrap();

        let generated = send(
            &app,
            json_request(
                Method::POST,
                &format!("/projects/{project_id}/generate"),
                Some(&token),
                json!({}),
            ),
        )
        .await;
        assert_eq!(generated.status(), StatusCode::OK);
        let generated = json_body(generated).await;
        assert_eq!(generated["status"], "ready");
        let section_id = generated["sections"][0]["id"].as_i64().unwrap();
        assert!(!generated["sections"][0]["content"]
            .as_str()
            .unwrap()
            .is_empty());

        let bad_feedback = send(
            &app,
            json_request(
                Method::POST,
                &format!("/sections/{section_id}/feedback"),
                Some(&token),
                json!({"value": "meh"}),
            ),
        )
        .await;
        assert_eq!(bad_feedback.status(), StatusCode::BAD_REQUEST);

        let liked = send(
            &app,
            json_request(
                Method::POST,
                &format!("/sections/{section_id}/feedback"),
                Some(&token),
                json!({"value": "like"}),
            ),
        )
        .await;
        assert_eq!(liked.status(), StatusCode::OK);
        assert_eq!(json_body(liked).await["feedback"], "like");

        let commented = send(
            &app,
            json_request(
                Method::POST,
                &format!("/sections/{section_id}/comment"),
                Some(&token),
                json!({"comment": "add a chart"}),
            ),
        )
        .await;
        assert_eq!(json_body(commented).await["last_comment"], "add a chart");

        let refined = send(
            &app,
            json_request(
                Method::POST,
                &format!("/sections/{section_id}/refine"),
                Some(&token),
                json!({"prompt": "make it shorter"}),
            ),
        )
        .await;
        assert_eq!(refined.status(), StatusCode::OK);

        let history = send(
            &app,
            get_request(&format!("/sections/{section_id}/revisions"), Some(&token)),
        )
        .await;
        let history = json_body(history).await;
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0]["prompt"], "initial generation");
        assert_eq!(history[1]["feedback"], "like");
        assert_eq!(history[2]["comment"], "add a chart");
        assert_eq!(history[3]["prompt"], "make it shorter");
    }

    #[tokio::test]
    async fn test_projects_are_private_to_their_owner() {
        let app = app();
        let owner = token_for(&app, "owner@example.com").await;
        let other = token_for(&app, "other@example.com").await;
        let project = create_project(&app, &owner, json!([{"title": "Intro", "position": 1}])).await;
        let project_id = project["id"].as_i64().unwrap();
        let section_id = project["sections"][0]["id"].as_i64().unwrap();

        let peek = send(&app, get_request(&format!("/projects/{project_id}"), Some(&other))).await;
        assert_eq!(peek.status(), StatusCode::NOT_FOUND);

        let comment = send(
            &app,
            json_request(
                Method::POST,
                &format!("/sections/{section_id}/comment"),
                Some(&other),
                json!({"comment": "sneaky"}),
            ),
        )
        .await;
        assert_eq!(comment.status(), StatusCode::NOT_FOUND);

        let listed = send(&app, get_request("/projects", Some(&other))).await;
        assert_eq!(json_body(listed).await, json!([]));
    }

    #[tokio::test]
    async fn test_generate_on_empty_project_is_bad_request() {
        let app = app();
        let token = token_for(&app, "empty@example.com").await;
        let project = create_project(&app, &token, json!([])).await;
        let response = send(
            &app,
            json_request(
                Method::POST,
                &format!("/projects/{}/generate", project["id"]),
                Some(&token),
                json!({"regenerate": true}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_statuses_and_headers() {
        let app = app();
        let owner = token_for(&app, "exp@example.com").await;
        let other = token_for(&app, "nosy@example.com").await;

        let empty = create_project(&app, &owner, json!([])).await;
        let response = send(
            &app,
            get_request(&format!("/export/{}?format=docx", empty["id"]), Some(&owner)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let full = create_project(&app, &owner, json!([{"title": "Intro", "position": 1}])).await;
        let uri = format!("/export/{}?format=docx", full["id"]);

        let foreign = send(&app, get_request(&uri, Some(&other))).await;
        assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

        let ok = send(&app, get_request(&uri, Some(&owner))).await;
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(
            ok.headers()[header::CONTENT_TYPE],
            crate::export::docx::MEDIA_TYPE
        );
        assert_eq!(
            ok.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Market Study.docx\"; filename*=UTF-8''Market%20Study.docx"
        );

        let bad_format = send(
            &app,
            get_request(&format!("/export/{}?format=pdf", full["id"]), Some(&owner)),
        )
        .await;
        assert_eq!(bad_format.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_outline_defaults_and_bounds() {
        let app = app();
        let token = token_for(&app, "outline@example.com").await;

        let response = send(
            &app,
            json_request(
                Method::POST,
                "/templates/outline",
                Some(&token),
                json!({"topic": "Cyber Security", "doc_type": "pptx"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let titles = json_body(response).await["titles"].clone();
        assert_eq!(
            titles,
            json!([
                "Overview: Cyber Security",
                "Key Insights: Cyber Security",
                "Analysis: Cyber Security",
                "Recommendations: Cyber Security",
                "Next Steps: Cyber Security"
            ])
        );

        let too_few = send(
            &app,
            json_request(
                Method::POST,
                "/templates/outline",
                Some(&token),
                json!({"topic": "x", "doc_type": "docx", "item_count": 2}),
            ),
        )
        .await;
        assert_eq!(too_few.status(), StatusCode::BAD_REQUEST);
    }
}
