//! Article and category endpoints: bilingual fields, slugs, publish state,
//! and the public read surface.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use lingora::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("lingora-content-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.database.url = format!("sqlite:{}", db_path.display());
    config.storage.public_dir = std::env::temp_dir()
        .join(format!("lingora-content-test-public-{}", uuid::Uuid::new_v4()))
        .display()
        .to_string();

    let state = lingora::api::create_app_state_from_config(config)
        .await
        .expect("failed to create app state");
    lingora::api::router(state).await
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", mime::APPLICATION_JSON.as_ref());
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn login_admin(app: &Router) -> String {
    let response = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "email": "admin@lingora.local", "password": "admin123" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn article_payload(slug: &str) -> serde_json::Value {
    serde_json::json!({
        "titleZh": "测试文章",
        "titleEn": "Test Article",
        "contentZh": "中文正文",
        "contentEn": "English body",
        "slug": slug
    })
}

async fn create_article(app: &Router, cookie: &str, slug: &str) -> String {
    let response = request(
        app,
        "POST",
        "/api/articles",
        Some(cookie),
        Some(article_payload(slug)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn create_category(app: &Router, cookie: &str, slug: &str) -> String {
    let response = request(
        app,
        "POST",
        "/api/categories",
        Some(cookie),
        Some(serde_json::json!({ "nameZh": "技术", "nameEn": "Tech", "slug": slug })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_article_validation() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let mut payload = article_payload("valid-slug");
    payload["titleZh"] = serde_json::json!("");
    let response = request(&app, "POST", "/api/articles", Some(&cookie), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Title, content, and slug are required"
    );

    let response = request(
        &app,
        "POST",
        "/api/articles",
        Some(&cookie),
        Some(article_payload("My Slug!")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Slug must contain only lowercase letters, numbers, and hyphens"
    );

    let response = request(
        &app,
        "POST",
        "/api/articles",
        Some(&cookie),
        Some(article_payload("my-slug-2")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_fetch_article() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let me = request(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    let admin_id = body_json(me).await["data"]["id"].as_str().unwrap().to_string();

    let mut payload = article_payload("hello-world");
    payload["metaTitleZh"] = serde_json::json!("元标题");
    payload["metaDescriptionEn"] = serde_json::json!("A test article");
    payload["ogImage"] = serde_json::json!("upload/cover.png");

    let response = request(&app, "POST", "/api/articles", Some(&cookie), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let id = json["data"]["id"].as_str().unwrap().to_string();
    // Authorship comes from the session, not the payload.
    assert_eq!(json["data"]["authorId"], admin_id.as_str());
    assert_eq!(json["data"]["isPublished"], false);
    assert!(json["data"]["publishedAt"].is_null());

    let response = request(&app, "GET", &format!("/api/articles/{id}"), Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["titleZh"], "测试文章");
    assert_eq!(json["data"]["titleEn"], "Test Article");
    assert_eq!(json["data"]["contentZh"], "中文正文");
    assert_eq!(json["data"]["slug"], "hello-world");
    assert_eq!(json["data"]["metaTitleZh"], "元标题");
    assert_eq!(json["data"]["metaDescriptionEn"], "A test article");
    assert_eq!(json["data"]["ogImage"], "upload/cover.png");
    assert!(json["data"]["categoryId"].is_null());

    let response = request(&app, "GET", "/api/articles", Some(&cookie), None).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["slug"], "hello-world");

    let response = request(&app, "GET", "/api/articles/unknown-id", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Article not found");
}

#[tokio::test]
async fn test_article_slug_conflicts() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    create_article(&app, &cookie, "first-post").await;

    let response = request(
        &app,
        "POST",
        "/api/articles",
        Some(&cookie),
        Some(article_payload("first-post")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "An article with this slug already exists"
    );

    let second = create_article(&app, &cookie, "second-post").await;

    let response = request(
        &app,
        "PUT",
        &format!("/api/articles/{second}"),
        Some(&cookie),
        Some(serde_json::json!({ "slug": "first-post" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Re-submitting your own slug is not a conflict.
    let response = request(
        &app,
        "PUT",
        &format!("/api/articles/{second}"),
        Some(&cookie),
        Some(serde_json::json!({ "slug": "second-post", "titleEn": "Second, Edited" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["titleEn"], "Second, Edited");
}

#[tokio::test]
async fn test_toggle_publish() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let id = create_article(&app, &cookie, "toggle-me").await;

    let response = request(
        &app,
        "POST",
        &format!("/api/articles/{id}/toggle-publish"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["isPublished"], true);
    assert!(json["data"]["publishedAt"].is_string());

    let response = request(&app, "GET", &format!("/api/articles/{id}"), Some(&cookie), None).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["isPublished"], true);
    assert!(json["data"]["publishedAt"].is_string());

    // Toggling back clears the timestamp.
    let response = request(
        &app,
        "POST",
        &format!("/api/articles/{id}/toggle-publish"),
        Some(&cookie),
        None,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["isPublished"], false);
    assert!(json["data"]["publishedAt"].is_null());
}

#[tokio::test]
async fn test_publish_timestamp_only_set_by_toggle() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let mut payload = article_payload("born-published");
    payload["isPublished"] = serde_json::json!(true);

    let response = request(&app, "POST", "/api/articles", Some(&cookie), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["isPublished"], true);
    // The timestamp records the toggle action, which never ran here.
    assert!(json["data"]["publishedAt"].is_null());
}

#[tokio::test]
async fn test_article_category_join() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let category_id = create_category(&app, &cookie, "tech").await;

    let mut payload = article_payload("categorized");
    payload["categoryId"] = serde_json::json!(category_id.clone());

    let response = request(&app, "POST", "/api/articles", Some(&cookie), Some(payload)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = request(&app, "GET", &format!("/api/articles/{id}"), Some(&cookie), None).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["categoryId"], category_id.as_str());
    assert_eq!(json["data"]["categoryNameZh"], "技术");
    assert_eq!(json["data"]["categoryNameEn"], "Tech");

    create_article(&app, &cookie, "uncategorized").await;

    let response = request(
        &app,
        "GET",
        &format!("/api/articles?categoryId={category_id}"),
        Some(&cookie),
        None,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["slug"], "categorized");
}

#[tokio::test]
async fn test_published_listing_is_public() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let published = create_article(&app, &cookie, "live-post").await;
    create_article(&app, &cookie, "draft-post").await;

    let response = request(
        &app,
        "POST",
        &format!("/api/articles/{published}/toggle-publish"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // No session cookie on the public surface.
    let response = request(&app, "GET", "/api/articles/published", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["slug"], "live-post");

    // Asking for drafts on the public route is overridden.
    let response = request(
        &app,
        "GET",
        "/api/articles/published?isPublished=false",
        None,
        None,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["total"], 1);

    // Slug lookup is public and serves drafts, for previews.
    let response = request(&app, "GET", "/api/articles/slug/draft-post", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["isPublished"], false);

    // The admin listing is not public.
    let response = request(&app, "GET", "/api/articles", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Not authenticated");

    let response = request(
        &app,
        "GET",
        "/api/articles?isPublished=false",
        Some(&cookie),
        None,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["slug"], "draft-post");
}

#[tokio::test]
async fn test_delete_article() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let id = create_article(&app, &cookie, "short-lived").await;

    let response = request(&app, "DELETE", &format!("/api/articles/{id}"), Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = request(&app, "GET", &format!("/api/articles/{id}"), Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_validation() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let response = request(
        &app,
        "POST",
        "/api/categories",
        Some(&cookie),
        Some(serde_json::json!({ "nameZh": "", "nameEn": "Tech", "slug": "tech" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Name and slug are required");

    let response = request(
        &app,
        "POST",
        "/api/categories",
        Some(&cookie),
        Some(serde_json::json!({ "nameZh": "技术", "nameEn": "Tech", "slug": "Bad Slug" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Slug must contain only lowercase letters, numbers, and hyphens"
    );

    create_category(&app, &cookie, "tech").await;

    let response = request(
        &app,
        "POST",
        "/api/categories",
        Some(&cookie),
        Some(serde_json::json!({ "nameZh": "技术二", "nameEn": "Tech 2", "slug": "tech" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "A category with this slug already exists"
    );
}

#[tokio::test]
async fn test_category_crud() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let response = request(
        &app,
        "POST",
        "/api/categories",
        Some(&cookie),
        Some(serde_json::json!({
            "nameZh": "新闻",
            "nameEn": "News",
            "slug": "news",
            "descriptionEn": "Site news",
            "sortOrder": "5"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let id = json["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(json["data"]["nameZh"], "新闻");
    assert_eq!(json["data"]["descriptionEn"], "Site news");
    assert_eq!(json["data"]["sortOrder"], "5");

    let response = request(
        &app,
        "PUT",
        &format!("/api/categories/{id}"),
        Some(&cookie),
        Some(serde_json::json!({ "nameEn": "Site News" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["nameEn"], "Site News");

    let response = request(&app, "GET", "/api/categories?search=news", Some(&cookie), None).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["slug"], "news");
}

#[tokio::test]
async fn test_delete_category_detaches_articles() {
    let app = spawn_app().await;
    let cookie = login_admin(&app).await;

    let category_id = create_category(&app, &cookie, "doomed").await;

    let mut payload = article_payload("survivor");
    payload["categoryId"] = serde_json::json!(category_id.clone());
    let response = request(&app, "POST", "/api/articles", Some(&cookie), Some(payload)).await;
    let article_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = request(
        &app,
        "DELETE",
        &format!("/api/categories/{category_id}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = request(
        &app,
        "GET",
        &format!("/api/categories/{category_id}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Category not found");

    // The article survives with its category detached.
    let response = request(
        &app,
        "GET",
        &format!("/api/articles/{article_id}"),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["categoryId"].is_null());
    assert!(json["data"]["categoryNameZh"].is_null());
}
