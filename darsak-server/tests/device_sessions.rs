//! Device registration, refusal at the cap, and sign-out over HTTP.

use anyhow::Result;
use axum::http::StatusCode;
use darsak_core::api::routes::{utils as route_utils, v1};
use darsak_core::devices::{DeviceLimitPolicy, Locale, device_limit_message};
use darsak_model::UserId;
use serde_json::{Value, json};

#[path = "support/mod.rs"]
mod support;
use support::{TestApp, bearer_for};

fn device_path(device_id: &str) -> String {
    route_utils::replace_param(v1::devices::ITEM, "{device_id}", device_id)
}

#[tokio::test]
async fn third_device_is_refused_until_one_signs_out() -> Result<()> {
    let app = TestApp::new()?;
    let (user, token) = app.student();

    for device_id in ["phone", "laptop"] {
        let response = app
            .server
            .post(v1::devices::COLLECTION)
            .add_header("Authorization", token.clone())
            .json(&json!({ "device_id": device_id, "device_name": "Browser" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "success": true,
            "outcome": "registered",
        }));
    }

    let refused = app
        .server
        .post(v1::devices::COLLECTION)
        .add_header("Authorization", token.clone())
        .json(&json!({ "device_id": "tablet" }))
        .await;
    refused.assert_status(StatusCode::FORBIDDEN);
    refused.assert_json(&json!({
        "success": false,
        "error": device_limit_message(Locale::Arabic, 2),
    }));
    assert_eq!(app.store.device_count(user), 2);

    app.server
        .delete(&device_path("phone"))
        .add_header("Authorization", token.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .post(v1::devices::COLLECTION)
        .add_header("Authorization", token)
        .json(&json!({ "device_id": "tablet" }))
        .await
        .assert_status_ok();
    Ok(())
}

#[tokio::test]
async fn known_device_is_refreshed_at_the_cap() -> Result<()> {
    let app = TestApp::new()?;
    let (_, token) = app.student();

    for device_id in ["a", "b"] {
        app.server
            .post(v1::devices::COLLECTION)
            .add_header("Authorization", token.clone())
            .json(&json!({ "device_id": device_id }))
            .await
            .assert_status_ok();
    }

    let again = app
        .server
        .post(v1::devices::COLLECTION)
        .add_header("Authorization", token)
        .json(&json!({ "device_id": "a" }))
        .await;
    again.assert_status_ok();
    again.assert_json(&json!({ "success": true, "outcome": "refreshed" }));
    Ok(())
}

#[tokio::test]
async fn device_name_falls_back_to_user_agent() -> Result<()> {
    let app = TestApp::new()?;
    let (_, token) = app.student();

    app.server
        .post(v1::devices::COLLECTION)
        .add_header("Authorization", token.clone())
        .add_header("User-Agent", "Mozilla/5.0 (X11; Linux x86_64)")
        .json(&json!({ "device_id": "desktop" }))
        .await
        .assert_status_ok();

    let listed = app
        .server
        .get(v1::devices::COLLECTION)
        .add_header("Authorization", token)
        .await;
    listed.assert_status_ok();
    let devices: Vec<Value> = listed.json();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0]["device_id"], "desktop");
    assert_eq!(devices[0]["device_name"], "Mozilla/5.0 (X11; Linux x86_64)");
    Ok(())
}

#[tokio::test]
async fn signing_out_an_unknown_device_still_succeeds() -> Result<()> {
    let app = TestApp::new()?;
    let (_, token) = app.student();

    app.server
        .delete(&device_path("never-registered"))
        .add_header("Authorization", token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn signing_out_an_overlong_device_id_still_succeeds() -> Result<()> {
    let app = TestApp::new()?;
    let (_, token) = app.student();

    app.server
        .delete(&device_path(&"x".repeat(129)))
        .add_header("Authorization", token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn caller_without_profile_is_not_found() -> Result<()> {
    let app = TestApp::new()?;
    let stranger = UserId::new();

    let response = app
        .server
        .post(v1::devices::COLLECTION)
        .add_header("Authorization", bearer_for(stranger))
        .json(&json!({ "device_id": "phone" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 404);
    assert_eq!(app.store.device_count(stranger), 0);
    Ok(())
}

#[tokio::test]
async fn blank_device_id_is_rejected() -> Result<()> {
    let app = TestApp::new()?;
    let (user, token) = app.student();

    let response = app
        .server
        .post(v1::devices::COLLECTION)
        .add_header("Authorization", token)
        .json(&json!({ "device_id": "   " }))
        .await;
    assert!(response.status_code().is_client_error());
    assert_eq!(app.store.device_count(user), 0);
    Ok(())
}

#[tokio::test]
async fn configured_cap_and_locale_apply() -> Result<()> {
    let app = TestApp::with_policy(DeviceLimitPolicy {
        max_devices: 1,
        locale: Locale::English,
    })?;
    let (_, token) = app.student();

    app.server
        .post(v1::devices::COLLECTION)
        .add_header("Authorization", token.clone())
        .json(&json!({ "device_id": "only" }))
        .await
        .assert_status_ok();

    let refused = app
        .server
        .post(v1::devices::COLLECTION)
        .add_header("Authorization", token)
        .json(&json!({ "device_id": "second" }))
        .await;
    refused.assert_status(StatusCode::FORBIDDEN);
    let body: Value = refused.json();
    assert_eq!(body["error"], device_limit_message(Locale::English, 1));
    Ok(())
}

#[tokio::test]
async fn devices_require_authentication() -> Result<()> {
    let app = TestApp::new()?;
    app.server
        .post(v1::devices::COLLECTION)
        .json(&json!({ "device_id": "phone" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}
