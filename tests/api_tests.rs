mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;
use tower::ServiceExt;

use opsdash::api::router::create_router;
use opsdash::AppState;

fn build_test_app(pool: sqlx::PgPool) -> axum::Router {
    // Not installed globally; tests only need something to render.
    let metrics_handle = PrometheusBuilder::new().build_recorder().handle();

    let state = AppState {
        db: pool,
        config: common::test_config(),
        metrics_handle,
    };
    create_router(state)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    send_json(app, "GET", uri).await
}

async fn send_json(app: axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let (pool, _guard) = common::setup_test_db().await;
    let (status, json) = get_json(build_test_app(pool), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (pool, _guard) = common::setup_test_db().await;
    let app = build_test_app(pool);

    let resp = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_summary_empty_database() {
    let (pool, _guard) = common::setup_test_db().await;
    let (status, json) = get_json(build_test_app(pool), "/api/dashboard/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let data = &json["data"];
    assert_eq!(data["totalCustomers"], 0);
    assert_eq!(data["activeCustomers"], 0);
    assert_eq!(data["totalAccounts"], 0);
    assert_eq!(data["totalTrades"], 0);
    assert_eq!(data["tradingVolume"], 0.0);
    assert_eq!(data["pendingTrades"], 0);
    assert_eq!(data["openEvents"], 0);
    assert_eq!(data["corporateActions"]["total"], 0);
    assert_eq!(data["dealProcessing"]["completed"], 0);
    assert_eq!(data["assetsUnderCustody"]["total"], 0.0);
    assert_eq!(data["assetsUnderCustody"]["history"], serde_json::json!([]));
}

#[tokio::test]
async fn test_dashboard_summary_counts() {
    let (pool, _guard) = common::setup_test_db().await;
    common::seed_customer(&pool, "Active Client", "C-1", "active").await;
    common::seed_customer(&pool, "Dormant Client", "C-2", "inactive").await;

    let now = common::test_now();
    common::seed_trade(&pool, "T-1", now, "Equities", "Completed", 1_000.0).await;
    common::seed_trade(&pool, "T-2", now, "Equities", "Pending", 500.0).await;
    common::seed_trade(&pool, "T-3", now, "FX", "Completed", 250.0).await;

    let day = now.date();
    common::seed_corporate_action(&pool, "CA-1", "Dividend", "Announced", day).await;
    common::seed_corporate_action(&pool, "CA-2", "Dividend", "Completed", day).await;
    common::seed_corporate_action(&pool, "CA-3", "Merger", "Canceled", day).await;

    let (status, json) = get_json(build_test_app(pool), "/api/dashboard/summary").await;
    assert_eq!(status, StatusCode::OK);

    let data = &json["data"];
    assert_eq!(data["totalCustomers"], 2);
    assert_eq!(data["activeCustomers"], 1);
    assert_eq!(data["totalTrades"], 3);
    assert_eq!(data["pendingTrades"], 1);
    assert_eq!(data["tradingVolume"], 1_750.0);
    assert_eq!(data["openEvents"], 1);
    assert_eq!(data["corporateActions"]["total"], 3);
    assert_eq!(data["dealProcessing"]["completed"], 1);
    assert_eq!(data["dealProcessing"]["failed"], 1);
}

#[tokio::test]
async fn test_trades_filter_by_asset_class_ordered_desc() {
    let (pool, _guard) = common::setup_test_db().await;
    let now = common::test_now();

    common::seed_trade(&pool, "T-1", now - Duration::days(3), "Equities", "Completed", 100.0).await;
    common::seed_trade(&pool, "T-2", now - Duration::days(1), "Equities", "Completed", 100.0).await;
    common::seed_trade(&pool, "T-3", now, "Fixed Income", "Completed", 100.0).await;
    common::seed_trade(&pool, "T-4", now - Duration::days(2), "Equities", "Failed", 100.0).await;

    let (status, json) = get_json(build_test_app(pool), "/api/trades?assetClass=Equities").await;
    assert_eq!(status, StatusCode::OK);

    let trades = json["data"].as_array().unwrap();
    let ids: Vec<&str> = trades.iter().map(|t| t["tradeId"].as_str().unwrap()).collect();
    assert_eq!(ids, ["T-2", "T-4", "T-1"]);
    assert!(trades.iter().all(|t| t["assetClass"] == "Equities"));
}

#[tokio::test]
async fn test_trades_date_range_and_limit() {
    let (pool, _guard) = common::setup_test_db().await;
    let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

    for (i, offset) in [0, 1, 2, 5].into_iter().enumerate() {
        let ts = (day + Duration::days(offset)).and_hms_opt(15, 0, 0).unwrap();
        common::seed_trade(&pool, &format!("T-{i}"), ts, "Funds", "Completed", 10.0).await;
    }

    let app = build_test_app(pool);
    let (_, json) = get_json(
        app.clone(),
        "/api/trades?startDate=2025-03-10&endDate=2025-03-12",
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 3);

    let (_, json) = get_json(app, "/api/trades?limit=2").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_filters_rejected() {
    let (pool, _guard) = common::setup_test_db().await;
    let app = build_test_app(pool);

    for uri in [
        "/api/trades?assetClass=Crypto",
        "/api/trades?limit=0",
        "/api/trades?startDate=2025-03-10&endDate=2025-03-01",
        "/api/trades?startDate=not-a-date",
        "/api/corporate-actions?status=Frozen",
        "/api/customers?status=dormant",
        "/api/trades-by-asset?assetClass=Crypto",
    ] {
        let (status, json) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["success"], false, "{uri}");
        assert!(json["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_customers_and_accounts() {
    let (pool, _guard) = common::setup_test_db().await;
    let active = common::seed_customer(&pool, "Active Client", "C-1", "active").await;
    common::seed_customer(&pool, "Dormant Client", "C-2", "inactive").await;
    opsdash::db::customer_repo::insert_account(&pool, active, "A-1", "Custody")
        .await
        .unwrap();

    let app = build_test_app(pool);

    let (_, json) = get_json(app.clone(), "/api/customers?status=active").await;
    let customers = json["data"].as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["name"], "Active Client");
    assert_eq!(customers[0]["type"], "Institutional");

    let (_, json) = get_json(app.clone(), "/api/customers").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let (_, json) = get_json(app, &format!("/api/accounts?customerId={active}")).await;
    let accounts = json["data"].as_array().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0]["type"], "Custody");
}

#[tokio::test]
async fn test_corporate_actions_filtered_by_type() {
    let (pool, _guard) = common::setup_test_db().await;
    let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    common::seed_corporate_action(&pool, "CA-1", "Dividend", "Announced", day).await;
    common::seed_corporate_action(&pool, "CA-2", "Stock Split", "Pending", day).await;
    common::seed_corporate_action(&pool, "CA-3", "Dividend", "Completed", day - Duration::days(30)).await;

    let app = build_test_app(pool);
    let (status, json) = get_json(app.clone(), "/api/corporate-actions?type=Dividend").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["actionId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["CA-1", "CA-3"]);

    let (_, json) = get_json(app, "/api/corporate-actions?startDate=2025-02-15").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_blank_query_params_ignored() {
    let (pool, _guard) = common::setup_test_db().await;
    let now = common::test_now();
    common::seed_trade(&pool, "T-1", now, "Equities", "Completed", 100.0).await;
    common::seed_trade(&pool, "T-2", now, "FX", "Completed", 100.0).await;
    let day = now.date();
    common::seed_corporate_action(&pool, "CA-1", "Dividend", "Announced", day).await;

    let app = build_test_app(pool);
    let (status, json) = get_json(
        app.clone(),
        "/api/trades?startDate=&endDate=&customerId=&limit=&assetClass=Equities",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let trades = json["data"].as_array().unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0]["assetClass"], "Equities");

    for uri in [
        "/api/corporate-actions?startDate=&endDate=&mandatory=",
        "/api/accounts?customerId=",
        "/api/assets-under-custody?startDate=&endDate=",
        "/api/trades-by-asset?startDate=&assetClass=",
    ] {
        let (status, json) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json["success"], true, "{uri}");
    }
}

#[tokio::test]
async fn test_dashboard_and_corporate_action_aliases() {
    let (pool, _guard) = common::setup_test_db().await;
    let day = common::test_now().date();
    common::seed_corporate_action(&pool, "CA-1", "Dividend", "Announced", day).await;

    let app = build_test_app(pool);
    let (status, json) = get_json(app.clone(), "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    let stats = &json["data"]["corporateActions"];
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["high_priority"], 0);
    assert_eq!(stats["pending_elections"], 0);

    let (status, json) = get_json(app, "/api/corporate_actions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_trades_by_asset_singular_label() {
    let (pool, _guard) = common::setup_test_db().await;
    let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    sqlx::query(
        "INSERT INTO trades_by_asset (date, asset_class, trade_count) \
         VALUES ($1, 'Equities', 12), ($1, 'Funds', 3)",
    )
    .bind(day)
    .execute(&pool)
    .await
    .unwrap();

    let (status, json) = get_json(build_test_app(pool), "/api/trades-by-asset?assetClass=Equity").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["assetClass"], "Equities");
}

#[tokio::test]
async fn test_notifications_mark_read() {
    let (pool, _guard) = common::setup_test_db().await;
    let first = common::seed_notification(&pool, "Trade settled", false).await;
    common::seed_notification(&pool, "Statement generated", false).await;
    common::seed_notification(&pool, "Backup completed", true).await;

    let app = build_test_app(pool.clone());
    let (status, json) = get_json(app.clone(), "/api/notifications").await;
    assert_eq!(status, StatusCode::OK);
    let notifications = json["data"].as_array().unwrap();
    assert_eq!(notifications.len(), 3);
    assert_eq!(notifications[0]["type"], "info");
    assert!(notifications[0]["createdAt"].is_string());

    let (status, json) =
        send_json(app.clone(), "PUT", &format!("/api/notifications/{}/read", first.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], first.id);
    assert_eq!(json["data"]["read"], true);
    assert_eq!(opsdash::db::notification_repo::count_unread(&pool).await.unwrap(), 1);

    let (status, json) = send_json(app.clone(), "PUT", "/api/notifications/9999/read").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);

    let (status, json) = send_json(app.clone(), "PUT", "/api/notifications/read/all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["updated"], 1);
    assert_eq!(opsdash::db::notification_repo::count_unread(&pool).await.unwrap(), 0);

    let (status, json) = send_json(app, "PUT", "/api/notifications/read-all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["updated"], 0);
}
