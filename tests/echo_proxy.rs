mod common;

use common::{get, RecordingUpstream, KEY};
use epa_proxy::clients::upstream::HttpUpstream;
use epa_proxy::config::ProxyConfig;
use epa_proxy::http::cors::add_cors;
use epa_proxy::http::response::ReplyBody;
use epa_proxy::models::request::RequestDescriptor;
use epa_proxy::services::echo_proxy::handle;
use serde_json::json;
use vercel_runtime::StatusCode;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn keyed() -> ProxyConfig {
    ProxyConfig::new(Some(KEY.into()))
}

#[tokio::test]
async fn options_is_empty_200_with_cors() {
    let upstream = RecordingUpstream::json("{}");
    let req = RequestDescriptor::new("OPTIONS", Some("endpoint=x&ping=1"));
    let reply = handle(&req, &ProxyConfig::new(None), &upstream).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, ReplyBody::Empty);

    let resp = add_cors(reply.into_response().unwrap());
    assert!(resp.body().is_empty());
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    assert_eq!(resp.headers()["access-control-allow-methods"], "GET, OPTIONS");
    assert_eq!(resp.headers()["access-control-allow-headers"], "Content-Type");
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn ping_answers_without_key_or_upstream() {
    let upstream = RecordingUpstream::json("{}");
    for query in ["ping=1", "ping=yes&endpoint=foo&x=1"] {
        let reply = handle(&get(query), &ProxyConfig::new(None), &upstream).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.json_body(), Some(&json!({"ok": true, "message": "echo proxy alive"})));
    }
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn ping_with_empty_value_still_answers() {
    let upstream = RecordingUpstream::json("{}");
    let reply = handle(&get("ping=&p_st=CA"), &keyed(), &upstream).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json_body(), Some(&json!({"ok": true, "message": "echo proxy alive"})));
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn missing_key_is_500() {
    let upstream = RecordingUpstream::json("{}");
    let reply = handle(&get("p_st=CA"), &ProxyConfig::new(None), &upstream).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.json_body(), Some(&json!({"ok": false, "error": "Missing env API_DATA_GOV_KEY"})));
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn repeated_params_survive_and_reserved_are_dropped() {
    let upstream = RecordingUpstream::json(r#"{"Results":{}}"#);
    handle(&get("endpoint=foo&bar=1&bar=2&ping_me=x"), &keyed(), &upstream).await;

    let calls = upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].as_str(),
        "https://echodata.epa.gov/echo/foo?bar=1&bar=2&ping_me=x&api_key=test-key&output=JSON"
    );
}

#[tokio::test]
async fn key_and_output_are_injected_once() {
    let upstream = RecordingUpstream::json("{}");
    handle(&get("p_st=CA"), &keyed(), &upstream).await;
    let url = &upstream.calls()[0];
    let keys: Vec<_> = url.query_pairs().filter(|(k, _)| k == "api_key").collect();
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].1, KEY);
    assert_eq!(url.query_pairs().filter(|(k, v)| k == "output" && v == "JSON").count(), 1);
    assert_eq!(url.path(), "/echo/rest_services.get_facility_info");
}

#[tokio::test]
async fn caller_key_and_output_are_kept() {
    let upstream = RecordingUpstream::json("{}");
    handle(&get("api_key=mine&output=CSV"), &keyed(), &upstream).await;
    assert_eq!(upstream.calls()[0].query(), Some("api_key=mine&output=CSV"));
}

#[tokio::test]
async fn success_json_is_unwrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest_services.get_facility_info"))
        .and(query_param("api_key", KEY))
        .and(query_param("output", "JSON"))
        .and(query_param("p_st", "CA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Results": {"Message": "Success"}})))
        .expect(1)
        .mount(&server)
        .await;

    let config = keyed().with_echo_base(server.uri());
    let upstream = HttpUpstream::new().unwrap();
    let reply = handle(&get("p_st=CA"), &config, &upstream).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json_body(), Some(&json!({"Results": {"Message": "Success"}})));
}

#[tokio::test]
async fn failure_is_wrapped_with_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such service"))
        .mount(&server)
        .await;

    let config = keyed().with_echo_base(server.uri());
    let upstream = HttpUpstream::new().unwrap();
    let reply = handle(&get("endpoint=nope"), &config, &upstream).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(
        reply.json_body(),
        Some(&json!({"ok": false, "status": 404, "body": "no such service"}))
    );
}

#[tokio::test]
async fn non_json_success_is_relayed_as_text() {
    let upstream = RecordingUpstream::new(200, "text/html; charset=utf-8", "<html>maintenance</html>");
    let reply = handle(&get("p_st=CA"), &keyed(), &upstream).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.body,
        ReplyBody::Text {
            content_type: "text/html; charset=utf-8".into(),
            text: "<html>maintenance</html>".into(),
        }
    );
}

#[tokio::test]
async fn broken_json_is_500() {
    let upstream = RecordingUpstream::json("{not json");
    let reply = handle(&get("p_st=CA"), &keyed(), &upstream).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.json_body().unwrap()["ok"], false);
}

#[tokio::test]
async fn network_failure_is_500() {
    let config = keyed().with_echo_base("http://127.0.0.1:1");
    let upstream = HttpUpstream::new().unwrap();
    let reply = handle(&get("p_st=CA"), &config, &upstream).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = reply.json_body().unwrap();
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn identical_requests_get_identical_replies() {
    let upstream = RecordingUpstream::json(r#"{"n":1}"#);
    let req = get("endpoint=foo&a=1");
    let first = handle(&req, &keyed(), &upstream).await;
    let second = handle(&req, &keyed(), &upstream).await;
    assert_eq!(first, second);
    let calls = upstream.calls();
    assert_eq!(calls[0], calls[1]);
}
