//! Preview server rendering blog pages from the API

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::BlogClient;
use crate::contact::{self, ContactSubmission};
use crate::content::{category_search_terms, Category, PageEnvelope, RenderContext};
use crate::error::ApiError;
use crate::helpers::{
    blog_stats, encode_component, html_escape, list_categories, list_recent_posts,
};
use crate::pages::{
    error_block, layout, related_posts, render_post, render_related, Listing, ViewState,
};
use crate::Folio;

/// Server state
struct ServerState {
    folio: Folio,
    client: BlogClient,
}

impl ServerState {
    fn base(&self) -> &str {
        self.folio.config.detail_path.trim_end_matches('/')
    }

    fn context(&self) -> Result<RenderContext> {
        self.folio.render_context(Utc::now())
    }

    /// Run a blocking API call off the async runtime
    async fn fetch<T, F>(&self, what: &str, f: F) -> ViewState<T>
    where
        T: Send + 'static,
        F: FnOnce(&BlogClient) -> Result<T, ApiError> + Send + 'static,
    {
        let client = self.client.clone();
        let state = match tokio::task::spawn_blocking(move || f(&client)).await {
            Ok(result) => ViewState::from_result(result),
            Err(e) => ViewState::Error(e.to_string()),
        };
        if let ViewState::Error(e) = &state {
            tracing::warn!("Failed to load {}: {}", what, e);
        }
        state
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    #[serde(default)]
    page: usize,
    q: Option<String>,
}

/// Contact form as posted by a browser; the checkbox arrives as `on` or is absent
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ContactInput {
    first_name: String,
    last_name: String,
    email: String,
    subject: String,
    message: String,
    newsletter: Option<String>,
}

impl From<ContactInput> for ContactSubmission {
    fn from(input: ContactInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            subject: input.subject,
            message: input.message,
            newsletter: matches!(input.newsletter.as_deref(), Some("on" | "1" | "true")),
        }
    }
}

/// Build the application router
pub fn router(folio: Folio) -> Router {
    let client = folio.client();
    let static_dir = folio.static_dir();
    let state = Arc::new(ServerState { folio, client });

    let base = state.base().to_string();
    let mut app = Router::new().route("/contact", post(contact_handler));

    if base.is_empty() {
        app = app.route("/", get(listing_handler));
    } else {
        let target = base.clone();
        app = app
            .route("/", get(move || async move { Redirect::to(&target) }))
            .route(&base, get(listing_handler));
    }

    app = app
        .route(&format!("{}/category/:name", base), get(category_handler))
        .route(&format!("{}/:slug", base), get(detail_handler));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.with_state(state).layer(TraceLayer::new_for_http())
}

/// Start the preview server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Reading posts from {}", folio.config.api_base_url);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(folio.clone())).await?;

    Ok(())
}

fn internal_error(e: anyhow::Error) -> Response {
    tracing::error!("Render failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, Html(error_block(&e.to_string()))).into_response()
}

async fn listing_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    let ctx = match state.context() {
        Ok(ctx) => ctx,
        Err(e) => return internal_error(e),
    };
    let size = state.folio.config.page_size;
    let page = query.page;
    let term = query.q.filter(|q| !q.trim().is_empty());

    let (heading, envelope, href_query) = match term {
        Some(term) => {
            let encoded = encode_component(&term);
            let heading = format!("Search results for \"{}\"", html_escape(&term));
            let envelope = state
                .fetch("search results", move |c| c.search(&term, page, size))
                .await;
            (heading, envelope, format!("q={}&", encoded))
        }
        None => {
            let envelope = state
                .fetch("posts", move |c| c.page(page, size))
                .await;
            ("Latest Posts".to_string(), envelope, String::new())
        }
    };

    let base = state.base().to_string();
    let main = render_listing(&state, &ctx, &heading, envelope, |i| {
        format!("{}?{}page={}", base, href_query, i)
    });
    let sidebar = render_sidebar(&state, &ctx, None).await;
    Html(layout(&state.folio.config.site_title, &main, &sidebar)).into_response()
}

async fn category_handler(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let ctx = match state.context() {
        Ok(ctx) => ctx,
        Err(e) => return internal_error(e),
    };
    let size = state.folio.config.page_size;
    let page = query.page;
    let active = Category::from_label(&name);
    let terms = category_search_terms(&name);

    let envelope = state
        .fetch("category posts", move |c| c.search(&terms, page, size))
        .await;

    let base = format!("{}/category/{}", state.base(), encode_component(&name));
    let heading = format!("{} Posts", html_escape(&name));
    let main = render_listing(&state, &ctx, &heading, envelope, |i| {
        format!("{}?page={}", base, i)
    });
    let sidebar = render_sidebar(&state, &ctx, active).await;
    Html(layout(&state.folio.config.site_title, &main, &sidebar)).into_response()
}

async fn detail_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let ctx = match state.context() {
        Ok(ctx) => ctx,
        Err(e) => return internal_error(e),
    };

    let lookup = slug.clone();
    let client = state.client.clone();
    let post = match tokio::task::spawn_blocking(move || client.get_by_slug(&lookup)).await {
        Ok(Ok(post)) => post,
        Ok(Err(e)) if e.is_not_found() => {
            let main = error_block("Post not found.");
            return (
                StatusCode::NOT_FOUND,
                Html(layout(&state.folio.config.site_title, &main, "")),
            )
                .into_response();
        }
        Ok(Err(e)) => {
            tracing::warn!("Failed to load post {}: {}", slug, e);
            let main = error_block(&e.to_string());
            return (
                StatusCode::BAD_GATEWAY,
                Html(layout(&state.folio.config.site_title, &main, "")),
            )
                .into_response();
        }
        Err(e) => return internal_error(e.into()),
    };

    let limit = state.folio.config.related_limit;
    let related = state
        .fetch("related posts", move |c| c.recent(limit + 1))
        .await
        .map(|recent| {
            let mut related = related_posts(recent, Some(&slug));
            related.truncate(limit);
            related
        });

    let main = render_post(&ctx, &post);
    let related_html = match &related {
        ViewState::Content(posts) => render_related(&state.folio.config, &ctx, posts),
        ViewState::Error(e) => error_block(e),
        ViewState::Loading => String::new(),
    };
    let sidebar = format!(
        r#"<div class="card mb-4"><div class="card-header"><h5 class="mb-0">Related Posts</h5></div><div class="card-body">{}</div></div>"#,
        related_html
    );
    Html(layout(post.title_or_default(), &main, &sidebar)).into_response()
}

async fn contact_handler(
    State(state): State<Arc<ServerState>>,
    Form(input): Form<ContactInput>,
) -> Response {
    let submission = ContactSubmission::from(input);
    let client = state.client.clone();
    let result = match tokio::task::spawn_blocking(move || contact::submit(&client, &submission))
        .await
    {
        Ok(result) => result,
        Err(e) => return internal_error(e.into()),
    };

    let (success, message) = contact::status_message(&result);
    let status = if success {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    let main = contact::render_status(success, &message);
    (
        status,
        Html(layout(&state.folio.config.site_title, &main, "")),
    )
        .into_response()
}

/// Heading plus the listing sections, or an error block if the page failed
fn render_listing<F>(
    state: &ServerState,
    ctx: &RenderContext,
    heading: &str,
    envelope: ViewState<PageEnvelope>,
    page_href: F,
) -> String
where
    F: Fn(usize) -> String,
{
    let body = match envelope {
        ViewState::Content(envelope) => {
            let html = Listing::from_envelope(envelope).render(&state.folio.config, ctx, page_href);
            format!(
                r#"{}<div class="row">{}</div><nav aria-label="Blog pagination">{}</nav>"#,
                html.featured, html.grid, html.pagination
            )
        }
        ViewState::Error(e) => error_block(&e),
        ViewState::Loading => String::new(),
    };
    format!(r#"<h2 class="mb-4">{}</h2>{}"#, heading, body)
}

/// Categories, recent posts and stats; each section fails on its own
async fn render_sidebar(
    state: &ServerState,
    ctx: &RenderContext,
    active: Option<Category>,
) -> String {
    let recent_limit = state.folio.config.recent_limit;
    let (all, recent, stats) = tokio::join!(
        state.fetch("categories", |c| c.list_all()),
        state.fetch("recent posts", move |c| c.recent(recent_limit)),
        state.fetch("stats", |c| c.stats()),
    );

    let categories = match all {
        ViewState::Content(posts) => list_categories(&state.folio.config, &posts, active),
        ViewState::Error(e) => error_block(&e),
        ViewState::Loading => String::new(),
    };
    let recent = match recent {
        ViewState::Content(posts) => list_recent_posts(&state.folio.config, ctx, &posts),
        ViewState::Error(e) => error_block(&e),
        ViewState::Loading => String::new(),
    };
    let stats = blog_stats(stats.content());

    [
        ("Categories", categories),
        ("Recent Posts", recent),
        ("Blog Stats", stats),
    ]
    .iter()
    .map(|(title, body)| {
        format!(
            r#"<div class="card mb-4"><div class="card-header"><h5 class="mb-0">{}</h5></div><div class="card-body">{}</div></div>"#,
            title, body
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::test_support::spawn_server;
    use axum::http::StatusCode as Code;
    use axum::Json;
    use serde_json::json;

    fn mock_api() -> Router {
        Router::new()
            .route(
                "/api/blogs",
                get(|| async {
                    Json(json!([
                        {"title": "Java Streams", "slug": "java-streams"},
                        {"title": "AWS Lambda", "slug": "aws-lambda"}
                    ]))
                }),
            )
            .route(
                "/api/blogs/page",
                get(|| async {
                    Json(json!({
                        "content": [
                            {"title": "Featured Design", "slug": "featured-design", "isFeatured": true},
                            {"title": "Java Streams", "slug": "java-streams"}
                        ],
                        "number": 0,
                        "totalPages": 2
                    }))
                }),
            )
            .route(
                "/api/blogs/search",
                get(|| async { Json(json!({"content": [], "number": 0, "totalPages": 0})) }),
            )
            .route(
                "/api/blogs/recent",
                get(|| async {
                    Json(json!([
                        {"title": "Java Streams", "slug": "java-streams"},
                        {"title": "AWS Lambda", "slug": "aws-lambda"}
                    ]))
                }),
            )
            .route("/api/blogs/stats", get(|| async { Code::SERVICE_UNAVAILABLE }))
            .route(
                "/api/blogs/slug/:slug",
                get(|Path(slug): Path<String>| async move {
                    if slug == "java-streams" {
                        Ok(Json(json!({
                            "title": "Java Streams",
                            "slug": "java-streams",
                            "content": "## Intro\n\nUse **streams**.",
                            "viewCount": 1200
                        })))
                    } else {
                        Err(Code::NOT_FOUND)
                    }
                }),
            )
    }

    async fn app() -> String {
        let api = spawn_server(mock_api()).await;
        let config = SiteConfig {
            api_base_url: format!("{}/api", api),
            contact_url: format!("{}/contact", api),
            ..Default::default()
        };
        spawn_server(router(Folio::with_config(config, "."))).await
    }

    fn get_page(url: String) -> (u16, String) {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        let response = agent.get(&url).call().unwrap();
        let status = response.status().as_u16();
        (status, response.into_body().read_to_string().unwrap())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_listing_page() {
        let base = app().await;
        let (status, html) = tokio::task::spawn_blocking(move || get_page(format!("{}/blog", base)))
            .await
            .unwrap();

        assert_eq!(status, 200);
        assert!(html.contains("Featured Design"));
        assert!(html.contains(r#"href="/blog/java-streams""#));
        assert!(html.contains("/blog?page=1"));
        // categories and recent posts render while stats fall back
        assert!(html.contains("data-category=\"Java\""));
        assert!(html.contains("Statistics not available."));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_root_redirects_to_listing() {
        let base = app().await;
        let (status, html) = tokio::task::spawn_blocking(move || get_page(format!("{}/", base)))
            .await
            .unwrap();
        assert_eq!(status, 200);
        assert!(html.contains("Latest Posts"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_search() {
        let base = app().await;
        let (status, html) =
            tokio::task::spawn_blocking(move || get_page(format!("{}/blog?q=nothing", base)))
                .await
                .unwrap();
        assert_eq!(status, 200);
        assert!(html.contains("No blog posts found"));
        assert!(html.contains("Search results for"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_detail_page() {
        let base = app().await;
        let (status, html) =
            tokio::task::spawn_blocking(move || get_page(format!("{}/blog/java-streams", base)))
                .await
                .unwrap();
        assert_eq!(status, 200);
        assert!(html.contains(r#"<h2 class="mt-5 mb-3">Intro</h2>"#));
        assert!(html.contains("<strong>streams</strong>"));
        assert!(html.contains("1200 views"));
        // the current post is excluded from related posts
        assert!(html.contains("AWS Lambda"));
        assert!(!html.contains(r#"href="/blog/java-streams""#));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_detail_not_found() {
        let base = app().await;
        let (status, html) =
            tokio::task::spawn_blocking(move || get_page(format!("{}/blog/nope", base)))
                .await
                .unwrap();
        assert_eq!(status, 404);
        assert!(html.contains("Post not found."));
    }

    #[test]
    fn test_contact_input_checkbox() {
        let input = ContactInput {
            first_name: "A".to_string(),
            newsletter: Some("on".to_string()),
            ..Default::default()
        };
        let submission = ContactSubmission::from(input);
        assert_eq!(submission.first_name, "A");
        assert!(submission.newsletter);
        assert!(!ContactSubmission::from(ContactInput::default()).newsletter);
    }
}
