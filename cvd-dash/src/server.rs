//! HTTP surface: the dashboard page and its JSON endpoints.
//!
//! | Route                  | Purpose                                        |
//! |------------------------|------------------------------------------------|
//! | `GET /`                | dashboard page                                 |
//! | `GET /assets/dashboard.js` | page script (Plotly rendering, selection events) |
//! | `GET /api/options`     | dropdown options, restored selection, initial charts |
//! | `POST /api/by-country` | `{"countries": [..]}` -> chart                 |
//! | `POST /api/general`    | `{"metrics": [..], "countries": [..]}` -> chart |

use crate::context::AppContext;
use crate::series::ChartPayload;
use crate::state::SelectionState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use cvd_jhu::metric::Metric;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;

// Page assets are embedded at compile time.
static INDEX_HTML: &str = include_str!("../assets/index.html");
static DASHBOARD_JS: &str = include_str!("../assets/dashboard.js");

#[derive(Debug, Default, Deserialize)]
pub struct ByCountryRequest {
    #[serde(default)]
    pub countries: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneralRequest {
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
    #[serde(default)]
    pub countries: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub metrics: Vec<&'static str>,
    pub countries: Vec<String>,
    pub general_countries: Vec<String>,
    pub selection: SelectionState,
    pub by_country_chart: ChartPayload,
    pub general_chart: ChartPayload,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/assets/dashboard.js", get(serve_script))
        .route("/api/options", get(get_options))
        .route("/api/by-country", post(update_by_country))
        .route("/api/general", post(update_general))
        .with_state(ctx)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(ctx: Arc<AppContext>, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Dashboard listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}

async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn serve_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}

async fn get_options(State(ctx): State<Arc<AppContext>>) -> Json<OptionsResponse> {
    let dashboard = ctx.dashboard();
    Json(OptionsResponse {
        metrics: Metric::ALL.iter().map(Metric::name).collect(),
        countries: dashboard.countries(),
        general_countries: dashboard.general_countries(),
        selection: ctx.selection(),
        by_country_chart: ctx.current_by_country(),
        general_chart: ctx.current_general(),
    })
}

// Selection changes write the state file while holding the session lock,
// so they run on the blocking pool.
async fn update_by_country(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<ByCountryRequest>,
) -> Result<Json<ChartPayload>, StatusCode> {
    let countries = request.countries.unwrap_or_default();
    let chart = tokio::task::spawn_blocking(move || ctx.select_by_country(countries))
        .await
        .map_err(selection_task_failed)?;
    Ok(Json(chart))
}

async fn update_general(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<GeneralRequest>,
) -> Result<Json<ChartPayload>, StatusCode> {
    let metrics = request.metrics.unwrap_or_default();
    let countries = request.countries.unwrap_or_default();
    let chart = tokio::task::spawn_blocking(move || ctx.select_general(metrics, countries))
        .await
        .map_err(selection_task_failed)?;
    Ok(Json(chart))
}

fn selection_task_failed(e: tokio::task::JoinError) -> StatusCode {
    log::error!("Selection update failed: {}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::tests::sample_dashboard;
    use crate::state::StateStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_context(dir: &tempfile::TempDir) -> Arc<AppContext> {
        let store = StateStore::new(dir.path().join("state.json"));
        Arc::new(AppContext::new(sample_dashboard(), store))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn serves_page_and_script() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_context(&dir));

        let page = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(page.status(), StatusCode::OK);

        let script = app
            .oneshot(
                Request::builder()
                    .uri("/assets/dashboard.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(script.status(), StatusCode::OK);
        assert!(script.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/javascript"));
    }

    #[tokio::test]
    async fn options_list_metrics_and_countries() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_context(&dir));
        let response = app
            .oneshot(Request::builder().uri("/api/options").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["metrics"].as_array().unwrap().len(), 5);
        assert_eq!(json["metrics"][4], "Death/Outcome");
        assert_eq!(json["countries"][0], "Italy");
        assert_eq!(json["general_countries"][3], "Total");
        assert_eq!(
            json["general_chart"]["layout"]["title"],
            "Select type to display its graph"
        );
    }

    #[tokio::test]
    async fn general_selection_returns_chart_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let app = router(ctx.clone());

        let response = app
            .oneshot(post_json(
                "/api/general",
                r#"{"metrics": ["Confirmed"], "countries": ["Total", "Italy", "Spain"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let chart: ChartPayload = serde_json::from_value(body_json(response).await).unwrap();
        let names: Vec<&str> = chart.data.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Confirmed (Total)", "Confirmed (Italy)", "Confirmed (Spain)"]
        );

        let saved = StateStore::new(dir.path().join("state.json")).load();
        assert_eq!(saved.general.metrics, vec!["Confirmed"]);
        assert_eq!(ctx.selection(), saved);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_selection_updates_all_complete() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(&dir);
        let app = router(ctx.clone());

        let mut handles = Vec::new();
        for country in ["Italy", "Spain", "Italy", "Spain"] {
            let app = app.clone();
            let body = format!(r#"{{"countries": ["{}"]}}"#, country);
            handles.push(tokio::spawn(async move {
                app.oneshot(post_json("/api/by-country", &body)).await.unwrap()
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().status(), StatusCode::OK);
        }

        let saved = StateStore::new(dir.path().join("state.json")).load();
        assert_eq!(saved.by_country.len(), 1);
        assert_eq!(ctx.selection(), saved);
    }

    #[tokio::test]
    async fn cleared_by_country_selection_accepts_null() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(test_context(&dir));
        let response = app
            .oneshot(post_json("/api/by-country", r#"{"countries": null}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let chart: ChartPayload = serde_json::from_value(body_json(response).await).unwrap();
        assert!(chart.data.is_empty());
        assert_eq!(
            chart.layout.title,
            "Developing COVID-19 cases day-by-day in countries: []"
        );
    }
}
