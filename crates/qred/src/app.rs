use axum::{
    error_handling::HandleErrorLayer,
    http::{header, Method},
    routing::get,
    BoxError, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        dashboard::{get_dashboard, get_dashboard_without_id},
        health::livez,
        AppError,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    // The dashboard is read-only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/dashboard", get(get_dashboard_without_id))
        .route("/dashboard/{id}", get(get_dashboard))
        .layer(cors)
        .route("/livez", get(livez))
        .layer(TraceLayer::new_for_http())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(config.request_timeout()),
        )
        .with_state(state)
}

/// A request that outlives the timeout fails like any other request.
async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError(anyhow::anyhow!("request timed out"))
    } else {
        AppError(anyhow::anyhow!("unhandled middleware error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use qred_core::storage::{keys, Item, ItemStore, Result};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::storage::InMemoryStore;

    const COMPANY_ID: &str = "019bffec-3afb-7b63-8461-a89366547b11";

    fn item(value: Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    /// A company with 6 transactions in the last 30 days, 2 older ones, and
    /// one unpaid invoice that fell due a week ago.
    async fn seeded_app() -> Router {
        let pk = keys::company_pk(COMPANY_ID);
        let now = Utc::now();

        let mut items = vec![item(json!({
            "PK": pk,
            "SK": keys::metadata_sk(),
            "companyName": "Test Corp",
            "creditLimit": 50000
        }))];

        for (i, days_ago) in [1, 2, 3, 5, 8, 13, 45, 60].into_iter().enumerate() {
            let at = now - Duration::days(days_ago);
            let ts = keys::iso_timestamp(at);
            items.push(item(json!({
                "PK": pk,
                "SK": format!("{}#0193a{}", keys::transaction_prefix(&ts), 100 + i),
                "merchantName": "Starbucks",
                "amount": 100 + i,
                "currency": "SEK",
                "transactionDate": ts
            })));
        }

        for (suffix, days, paid) in [("a", -60, true), ("b", -7, false), ("c", 20, false)] {
            let due = (now + Duration::days(days)).format("%Y-%m-%d").to_string();
            items.push(item(json!({
                "PK": pk,
                "SK": format!("{}#{}", keys::invoice_prefix(&due), suffix),
                "amountDue": 1000,
                "dueDate": due,
                "isPaid": paid,
                "currency": "SEK"
            })));
        }

        let store = InMemoryStore::with_items(items).await.unwrap();
        create_app(AppState::from_store(Arc::new(store)), &Config::default())
    }

    /// Store whose reads never finish within the request timeout.
    struct StalledStore;

    #[async_trait]
    impl ItemStore for StalledStore {
        async fn get_item(&self, _pk: &str, _sk: &str) -> Result<Option<Item>> {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            Ok(None)
        }

        async fn query_by_prefix(
            &self,
            _pk: &str,
            _sk_prefix: &str,
            _limit: usize,
        ) -> Result<Vec<Item>> {
            Ok(Vec::new())
        }

        async fn count_after(&self, _pk: &str, _sk_prefix: &str) -> Result<u64> {
            Ok(0)
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(
            AppState::from_store(Arc::new(InMemoryStore::new())),
            &Config::default(),
        );

        let response = app
            .oneshot(Request::builder().uri("/livez").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_from_store() {
        let (status, body) = get_json(seeded_app().await, &format!("/dashboard/{COMPANY_ID}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["company"]["companyName"], "Test Corp");
        assert_eq!(body["company"]["SK"], "METADATA");

        let items = body["recentTransactions"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        let amounts: Vec<i64> = items.iter().map(|t| t["amount"].as_i64().unwrap()).collect();
        assert_eq!(amounts, vec![100, 101, 102]);

        assert_eq!(body["recentTransactions"]["totalCount"], 6);
        assert_eq!(body["recentTransactions"]["additionalItemsCount"], 3);
        assert_eq!(body["invoiceSummary"]["hasOverdueInvoice"], true);
    }

    #[tokio::test]
    async fn test_dashboard_unknown_company() {
        let (status, body) = get_json(seeded_app().await, "/dashboard/unknown").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Not Found" }));
    }

    #[tokio::test]
    async fn test_dashboard_rejects_other_methods() {
        let response = seeded_app()
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/dashboard/{COMPANY_ID}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_timed_out_request_is_internal_error() {
        let config = Config {
            request_timeout_seconds: 1,
            ..Config::default()
        };
        let app = create_app(AppState::from_store(Arc::new(StalledStore)), &config);

        let (status, body) = get_json(app, &format!("/dashboard/{COMPANY_ID}")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "INTERNAL_SERVER_ERROR" }));
    }
}
