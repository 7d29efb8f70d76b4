use std::collections::HashSet;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use civic_db::Database;
use civic_db::seed::{DEMO_USER_ID, seed_demo};
use civic_types::api::VIEWER_HEADER;

use crate::router;
use crate::state::AppStateInner;

const ADMIN: Uuid = Uuid::from_u128(0x4);

fn app() -> Router {
    let db = Database::open_in_memory().unwrap();
    seed_demo(&db).unwrap();
    router(AppStateInner::new(db, HashSet::from([ADMIN])))
}

async fn send(app: &Router, method: Method, uri: &str, viewer: Option<Uuid>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(viewer) = viewer {
        req = req.header(VIEWER_HEADER, viewer.to_string());
    }
    let req = match body {
        Some(body) => req
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(DEMO_USER_ID), None).await
}

fn titles(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

async fn community_id(app: &Router, title: &str) -> String {
    let (_, feed) = get(app, "/community?limit=200").await;
    feed["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["title"] == title)
        .map(|r| r["id"].as_str().unwrap().to_string())
        .unwrap()
}

fn valid_submission() -> Value {
    json!({
        "title": "Broken bench in Riverside Park",
        "description": "Two slats are missing from the bench by the fountain.",
        "category": "Parks & Recreation",
        "priority": "medium",
        "location": "Riverside Park fountain",
        "images": ["uploads/bench.jpg"]
    })
}

#[tokio::test]
async fn protected_routes_need_a_known_viewer() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/reports", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["type"], "unauthorized");

    let (status, _) = send(&app, Method::GET, "/reports", Some(Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn my_reports_search_filter_and_sort() {
    let app = app();

    let (status, page) = get(&app, "/reports").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(
        titles(&page),
        [
            "Streetlight out on Oak Avenue",
            "Large pothole on Main Street",
            "Overflowing bins at Lincoln Park"
        ]
    );
    assert_eq!(page["tabs"]["all"], 3);
    assert_eq!(page["tabs"]["inProgress"], 1);

    let (_, page) = get(&app, "/reports?sort=priority").await;
    assert_eq!(titles(&page)[0], "Large pothole on Main Street");

    let (_, page) = get(&app, "/reports?sort=upvotes").await;
    assert_eq!(titles(&page)[0], "Large pothole on Main Street");

    let (_, page) = get(&app, "/reports?q=STREETLIGHT").await;
    assert_eq!(titles(&page), ["Streetlight out on Oak Avenue"]);

    let (_, page) = get(&app, "/reports?status=resolved").await;
    assert_eq!(titles(&page), ["Overflowing bins at Lincoln Park"]);

    let (_, page) = get(&app, "/reports?tab=pending").await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["tabs"]["all"], 3);

    let (status, body) = get(&app, "/reports?status=lost").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "bad-request");
}

#[tokio::test]
async fn dashboard_summarizes_own_reports() {
    let app = app();
    let (status, summary) = get(&app, "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["counts"]["total"], 3);
    assert_eq!(summary["counts"]["pending"], 1);
    assert_eq!(summary["counts"]["resolved"], 1);
    assert_eq!(summary["totalUpvotes"], 24 + 6 + 15);
    assert_eq!(summary["recentReports"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn submission_is_validated_then_stored() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/reports", Some(DEMO_USER_ID), Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["type"], "validation");
    for field in ["title", "description", "category", "priority", "location"] {
        assert!(body["fields"][field].is_string(), "no error for {field}");
    }

    let (status, report) =
        send(&app, Method::POST, "/reports", Some(DEMO_USER_ID), Some(valid_submission())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(report["status"], "pending");
    assert_eq!(report["upvotes"], 0);
    assert_eq!(report["location"]["lat"], 0.0);

    let id = report["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/reports/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["images"], json!(["uploads/bench.jpg"]));

    let (_, page) = get(&app, "/reports").await;
    assert_eq!(titles(&page)[0], "Broken bench in Riverside Park");
}

#[tokio::test]
async fn too_many_images_are_rejected() {
    let app = app();
    let mut body = valid_submission();
    body["images"] = json!(["1", "2", "3", "4", "5", "6"]);
    let (status, body) = send(&app, Method::POST, "/reports", Some(DEMO_USER_ID), Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["images"].is_string());
}

#[tokio::test]
async fn upvote_toggles_back_and_forth() {
    let app = app();
    let id = community_id(&app, "Blocked storm drain on Pine Street").await;
    let uri = format!("/community/{id}/upvote");

    let (status, vote) = send(&app, Method::POST, &uri, Some(DEMO_USER_ID), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vote["upvoted"], true);
    assert_eq!(vote["upvotes"], 12);
    assert_eq!(vote["notice"]["title"], "Vote recorded");

    let (_, fetched) = get(&app, &format!("/reports/{id}")).await;
    assert_eq!(fetched["isUpvoted"], true);

    let (_, vote) = send(&app, Method::POST, &uri, Some(DEMO_USER_ID), None).await;
    assert_eq!(vote["upvoted"], false);
    assert_eq!(vote["upvotes"], 11);
    assert_eq!(vote["notice"]["title"], "Vote removed");

    let missing = format!("/community/{}/upvote", Uuid::new_v4());
    let (status, _) = send(&app, Method::POST, &missing, Some(DEMO_USER_ID), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn community_feed_tabs_and_stats() {
    let app = app();

    let (status, feed) = get(&app, "/community?tab=trending").await;
    assert_eq!(status, StatusCode::OK);
    assert!(feed["items"].as_array().unwrap().iter().all(|r| r["upvotes"].as_u64().unwrap() >= 10));
    assert_eq!(feed["stats"]["totalReports"], 6);
    assert_eq!(feed["stats"]["totalUpvotes"], 24 + 6 + 15 + 11 + 2 + 31);

    let (_, feed) = get(&app, "/community?category=Noise").await;
    assert_eq!(feed["total"], 0);
    assert_eq!(feed["stats"]["totalReports"], 6);

    let (_, feed) = get(&app, "/community?sort=most-commented&limit=1").await;
    assert_eq!(titles(&feed), ["Traffic signal timing at 9th and Elm"]);
    assert_eq!(feed["items"][0]["author"]["name"], "Priya Nair");
    assert_eq!(feed["total"], 6);
}

#[tokio::test]
async fn status_changes_are_admin_only_and_follow_the_workflow() {
    let app = app();
    let id = community_id(&app, "Streetlight out on Oak Avenue").await;
    let uri = format!("/reports/{id}/status");

    let (status, _) = send(&app, Method::PATCH, &uri, Some(DEMO_USER_ID), Some(json!({"status": "in-progress"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(ADMIN), Some(json!({"status": "resolved"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["type"], "conflict");

    let (status, report) = send(&app, Method::PATCH, &uri, Some(ADMIN), Some(json!({"status": "in-progress"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["status"], "in-progress");
}

#[tokio::test]
async fn profile_update_and_email_conflict() {
    let app = app();

    let (status, profile) = get(&app, "/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["user"]["name"], "Alex Johnson");
    assert_eq!(profile["stats"]["totalReports"], 3);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/profile",
        Some(DEMO_USER_ID),
        Some(json!({"name": "Alex J.", "email": "Maria.Garcia@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["type"], "conflict");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/profile",
        Some(DEMO_USER_ID),
        Some(json!({"name": "Alex J.", "email": "alex@example.org", "phone": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "Alex J.");
    assert!(body["user"]["phone"].is_null());
    assert_eq!(body["notice"]["title"], "Profile updated");

    let (status, body) = send(&app, Method::PUT, "/profile", Some(DEMO_USER_ID), Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["email"].is_string());
}

#[tokio::test]
async fn navigation_marks_the_current_route() {
    let app = app();
    let (status, nav) = send(&app, Method::GET, "/navigation?path=/community", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(nav["mode"], "expanded");
    assert_eq!(nav["logoutPath"], "/login");
    let active: Vec<&Value> = nav["sections"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|s| s["items"].as_array().unwrap())
        .filter(|i| i["active"] == true)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["path"], "/community");

    let (_, nav) = send(&app, Method::GET, "/navigation?mode=collapsed", None, None).await;
    assert!(nav["sections"][0]["label"].is_null());

    let (_, categories) = send(&app, Method::GET, "/categories", None, None).await;
    assert_eq!(categories.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn malformed_submission_names_the_field() {
    let app = app();
    let mut body = valid_submission();
    body["priority"] = json!("urgent");

    let (status, body) = send(&app, Method::POST, "/reports", Some(DEMO_USER_ID), Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["type"], "validation");
    assert!(body["fields"]["priority"].as_str().unwrap().contains("urgent"));
}

#[tokio::test]
async fn bad_query_and_path_values_get_json_errors() {
    let app = app();

    let (status, body) = get(&app, "/reports?sort=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "bad-request");
    assert!(body["message"].is_string());

    let (status, body) = get(&app, "/reports/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "bad-request");

    let (status, body) = send(&app, Method::GET, "/navigation?mode=sideways", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "bad-request");
}
