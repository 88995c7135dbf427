//! Every executor path against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port inside the test runtime, then
//! drives `SafeClient<ReqwestTransport>` over real HTTP. Covers all five
//! methods, application-level failures, an undecodable body and an
//! unreachable address.

use std::collections::HashMap;

use mock_server::{Echo, Message};
use safe_fetch::{FetchError, FetchResult, RequestSpec, ReqwestTransport, SafeClient};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize, PartialEq, Eq)]
struct ApiMessage {
    message: String,
}

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { mock_server::run(listener).await });
    format!("http://{addr}")
}

async fn client() -> SafeClient<ReqwestTransport> {
    SafeClient::new(ReqwestTransport::default()).with_base_url(&start_server().await)
}

#[tokio::test]
async fn message_lifecycle() {
    let client = client().await;

    // Step 1: list — should be empty.
    let listed: FetchResult<Vec<Message>, ApiMessage> = client.get("/messages").await;
    assert_eq!(listed.data().map(Vec::len), Some(0));

    // Step 2: create.
    let created: FetchResult<Message, ApiMessage> = client
        .post(RequestSpec::new("/messages").json(&json!({"text": "hello"})))
        .await;
    let created = created.into_result().unwrap().unwrap();
    assert_eq!(created.text, "hello");
    assert!(!created.read);
    let path = format!("/messages/{}", created.id);

    // Step 3: get.
    let fetched: FetchResult<Message, ApiMessage> = client.get(path.as_str()).await;
    assert_eq!(fetched.data(), Some(&created));

    // Step 4: replace.
    let replaced: FetchResult<Message, ApiMessage> = client
        .put(RequestSpec::new(path.as_str()).json(&json!({"text": "replaced", "read": false})))
        .await;
    assert_eq!(replaced.data().map(|m| m.text.as_str()), Some("replaced"));

    // Step 5: patch.
    let patched: FetchResult<Message, ApiMessage> = client
        .patch(RequestSpec::new(path.as_str()).json(&json!({"read": true})))
        .await;
    let patched = patched.into_result().unwrap().unwrap();
    assert_eq!(patched.text, "replaced");
    assert!(patched.read);

    // Step 6: delete.
    let deleted: FetchResult<Message, ApiMessage> = client.del(path.as_str()).await;
    assert_eq!(deleted.data(), Some(&patched));

    // Step 7: get after delete — Failure with the decoded body.
    let gone: FetchResult<Message, ApiMessage> = client.get(path.as_str()).await;
    assert_eq!(
        gone.error(),
        Some(&ApiMessage {
            message: "not found".to_string()
        })
    );
    assert!(gone.data().is_none());
    assert!(gone.exception().is_none());
}

#[tokio::test]
async fn echo_sees_default_and_caller_headers() {
    let client = client().await.with_default_header("x-client", "safe-fetch");
    let spec = RequestSpec::new("/echo")
        .header("x-trace", "abc")
        .json(&json!({"n": 1}));
    let echoed: FetchResult<Echo, Value> = client.post(spec).await;
    let echoed = echoed.into_result().unwrap().unwrap();

    assert_eq!(echoed.method, "POST");
    assert_eq!(echoed.headers["content-type"], "application/json");
    assert_eq!(echoed.headers["x-client"], "safe-fetch");
    assert_eq!(echoed.headers["x-trace"], "abc");
    assert_eq!(echoed.body, r#"{"n":1}"#);
}

#[tokio::test]
async fn raw_text_body_is_sent_as_is() {
    let client = client().await;
    let spec = RequestSpec::new("/echo")
        .header("Content-Type", "text/plain")
        .text("plain words");
    let echoed: FetchResult<Echo, Value> = client.put(spec).await;
    let echoed = echoed.data().unwrap();

    assert_eq!(echoed.headers["content-type"], "text/plain");
    assert_eq!(echoed.body, "plain words");
}

#[tokio::test]
async fn error_statuses_are_failures() {
    let client = client().await;
    for code in [400_u16, 404, 418, 500, 503] {
        let result: FetchResult<Value, ApiMessage> =
            client.get(format!("/status/{code}")).await;
        assert!(result.is_failure(), "{code}: {result:?}");
    }
}

#[tokio::test]
async fn non_json_body_is_exception() {
    let client = client().await;
    let result: FetchResult<Value, Value> = client.get("/malformed").await;
    assert!(matches!(result.exception(), Some(FetchError::Decode(_))));
}

#[tokio::test]
async fn unreachable_host_is_exception() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result: FetchResult<Value, Value> = safe_fetch::get(format!("http://{addr}/")).await;
    let exception = result.exception().unwrap();
    assert!(matches!(exception, FetchError::Transport(_)));
    assert!(!exception.message().is_empty());
}

#[tokio::test]
async fn free_functions_match_client_methods() {
    let base = start_server().await;
    let via_free: FetchResult<Value, Value> = safe_fetch::get(format!("{base}/status/404")).await;
    let via_client: FetchResult<Value, Value> = SafeClient::new(ReqwestTransport::default())
        .get(format!("{base}/status/404"))
        .await;
    assert_eq!(
        serde_json::to_value(&via_free).unwrap(),
        serde_json::to_value(&via_client).unwrap()
    );
    assert_eq!(
        serde_json::to_value(&via_free).unwrap(),
        json!({"data": null, "error": {"message": "Not Found"}, "exception": null})
    );
}

#[tokio::test]
async fn delete_helper_reports_missing_id() {
    let base = start_server().await;
    let result: FetchResult<Value, HashMap<String, String>> = safe_fetch::del(format!(
        "{base}/messages/00000000-0000-0000-0000-000000000000"
    ))
    .await;
    assert_eq!(
        result.error().and_then(|e| e.get("message")).map(String::as_str),
        Some("not found")
    );
}
