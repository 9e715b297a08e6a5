use anyhow::Result;
use serde_json::json;
#[cfg(feature = "blocking")]
use soracom_sdk::BlockingClient;
use soracom_sdk::{Credentials, Imsi, SubscriberFilter, SubscriberStatus};
#[cfg(feature = "async")]
use soracom_sdk::{
    ApiResponse, Client, Error, Period, RegisterSubscriber, SpeedClass, UsageQuery,
};
#[cfg(feature = "blocking")]
use tokio::task;
use wiremock::matchers::query_param;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

const API_KEY: &str = "api-key-0001";
const TOKEN: &str = "token-0001";

async fn mock_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(header("Content-Type", "application/json"))
        .and(body_string_contains("dev@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "apiKey": API_KEY,
            "token": TOKEN,
            "operatorId": "OP0012345678"
        })))
        .expect(1)
        .up_to_n_times(1)
        .mount(server)
        .await;
}

async fn mock_get(server: &MockServer, endpoint: &str, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .and(header("X-Soracom-Api-Key", API_KEY))
        .and(header("X-Soracom-Token", TOKEN))
        .respond_with(response)
        .expect(expected)
        .up_to_n_times(expected)
        .mount(server)
        .await;
}

async fn mock_post(server: &MockServer, endpoint: &str, response: ResponseTemplate, expected: u64) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .and(header("X-Soracom-Api-Key", API_KEY))
        .and(header("X-Soracom-Token", TOKEN))
        .respond_with(response)
        .expect(expected)
        .up_to_n_times(expected)
        .mount(server)
        .await;
}

fn credentials() -> Credentials {
    Credentials::new("dev@example.com", "passw0rd")
}

#[cfg(feature = "async")]
async fn connect(server: &MockServer) -> Result<Client> {
    Ok(Client::connect(server.uri(), credentials()).await?)
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_connect_exposes_session_accessors() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    let client = connect(&server).await?;
    assert_eq!(client.api_key(), API_KEY);
    assert_eq!(client.token(), TOKEN);
    assert_eq!(client.operator_id(), Some("OP0012345678"));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_connect_fails_on_missing_token_field() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "apiKey": "k" })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let err = connect(&server).await.expect_err("expected auth error");
    let err = err.downcast::<Error>()?;
    assert!(err.is_auth_error());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_requests_carry_session_headers_and_limit() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    Mock::given(method("GET"))
        .and(path("/subscribers"))
        .and(header("X-Soracom-Api-Key", API_KEY))
        .and(header("X-Soracom-Token", TOKEN))
        .and(header("Accept", "application/json"))
        .and(query_param("limit", "1024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = connect(&server).await?;
    let resp = client
        .subscribers()
        .list(
            soracom_sdk::api::DEFAULT_LIST_LIMIT,
            &SubscriberFilter::default(),
        )
        .await?;
    assert_eq!(resp, ApiResponse::Json(json!([])));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_list_filter_prefers_imsi_over_other_selectors() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    mock_get(
        &server,
        "/subscribers/001010000000001",
        ResponseTemplate::new(200).set_body_json(json!({ "imsi": "001010000000001" })),
        1,
    )
    .await;

    let client = connect(&server).await?;
    let filter = SubscriberFilter {
        imsi: Some("001010000000001".into()),
        status: Some(SubscriberStatus::Active),
        speed_class: Some(SpeedClass::S1Fast),
    };
    let resp = client.subscribers().list(10, &filter).await?;
    assert_eq!(resp.json().unwrap()["imsi"], "001010000000001");

    // One auth call plus the single-IMSI lookup; no list query was issued.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].url.query().is_none());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_list_with_status_filter_builds_query() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    Mock::given(method("GET"))
        .and(path("/subscribers"))
        .and(query_param("limit", "10"))
        .and(query_param("status_filter", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = connect(&server).await?;
    client
        .subscribers()
        .list(10, &SubscriberFilter::by_status(SubscriberStatus::Active))
        .await?;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_list_with_speed_class_filter_builds_query() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    Mock::given(method("GET"))
        .and(path("/subscribers"))
        .and(query_param("limit", "50"))
        .and(query_param("speed_class_filter", "s1.standard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = connect(&server).await?;
    client
        .subscribers()
        .list(50, &SubscriberFilter::by_speed_class(SpeedClass::S1Standard))
        .await?;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_register_posts_secret_and_optional_group() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    Mock::given(method("POST"))
        .and(path("/subscribers/001010000000001/register"))
        .and(header("Content-Type", "application/json"))
        .and(body_string_contains("\"registrationSecret\":\"sec\""))
        .and(body_string_contains("\"groupId\":\"g1\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ready" })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = connect(&server).await?;
    let params = RegisterSubscriber::new("sec").group("g1").tag("env", "prod");
    let resp = client
        .subscribers()
        .register("001010000000001", &params)
        .await?;
    assert_eq!(resp.json().unwrap()["status"], "ready");

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_register_with_empty_imsi_skips_network() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    let client = connect(&server).await?;
    let resp = client
        .subscribers()
        .register("", &RegisterSubscriber::new("sec"))
        .await?;
    assert_eq!(resp, ApiResponse::Json(json!({})));

    // Only the auth exchange reached the wire.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_batch_activate_issues_one_request_per_imsi() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    mock_post(
        &server,
        "/subscribers/001/activate",
        ResponseTemplate::new(200).set_body_json(json!({ "imsi": "001" })),
        1,
    )
    .await;
    mock_post(
        &server,
        "/subscribers/002/activate",
        ResponseTemplate::new(200).set_body_json(json!({ "imsi": "002" })),
        1,
    )
    .await;

    let client = connect(&server).await?;
    let results = client.subscribers().activate(["001", "002"]).await?;

    assert_eq!(results.len(), 2);
    assert_eq!(
        results[&Imsi::new("001")].json().unwrap()["imsi"],
        "001"
    );
    assert_eq!(
        results[&Imsi::new("002")].json().unwrap()["imsi"],
        "002"
    );

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_batch_aborts_on_first_failure() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    mock_post(
        &server,
        "/subscribers/001/activate",
        ResponseTemplate::new(200).set_body_json(json!({})),
        1,
    )
    .await;
    // Second IMSI replies with a body that is not JSON; the batch must stop
    // there and never reach the third.
    mock_post(
        &server,
        "/subscribers/002/activate",
        ResponseTemplate::new(200).set_body_string("not json"),
        1,
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/subscribers/003/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = connect(&server).await?;
    let err = client
        .subscribers()
        .activate(["001", "002", "003"])
        .await
        .expect_err("expected decode error");
    match err {
        Error::Decode { status, .. } => assert_eq!(status.as_u16(), 200),
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_empty_body_yields_no_content_sentinel() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    mock_post(
        &server,
        "/subscribers/001/deactivate",
        ResponseTemplate::new(200),
        1,
    )
    .await;

    let client = connect(&server).await?;
    let results = client.subscribers().deactivate("001").await?;
    assert!(results[&Imsi::new("001")].is_no_content());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_update_tags_uses_put_with_tag_body() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    Mock::given(method("PUT"))
        .and(path("/subscribers/001/tags"))
        .and(header("Content-Type", "application/json"))
        .and(body_string_contains("\"env\":\"prod\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = connect(&server).await?;
    let mut tags = soracom_sdk::Tags::new();
    tags.insert("env".to_owned(), "prod".to_owned());
    client.subscribers().update_tags("001", &tags).await?;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_delete_tag_encodes_tag_segment() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/subscribers/001/tags/env%20name"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = connect(&server).await?;
    let results = client.subscribers().delete_tag("001", "env name").await?;
    assert!(results[&Imsi::new("001")].is_no_content());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_update_speed_class_posts_tier() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    Mock::given(method("POST"))
        .and(path("/subscribers/001/update_speed_class"))
        .and(body_string_contains("\"speedClass\":\"s1.fast\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = connect(&server).await?;
    client
        .subscribers()
        .update_speed_class("001", SpeedClass::S1Fast)
        .await?;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_groups_paths_cover_list_and_get() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    mock_get(
        &server,
        "/groups",
        ResponseTemplate::new(200).set_body_json(json!([{ "groupId": "g1" }])),
        1,
    )
    .await;
    mock_get(
        &server,
        "/groups/g1",
        ResponseTemplate::new(200).set_body_json(json!({ "groupId": "g1" })),
        1,
    )
    .await;

    let client = connect(&server).await?;
    let all = client.groups().list().await?;
    assert!(all.json().unwrap().is_array());
    let one = client.groups().get("g1").await?;
    assert_eq!(one.json().unwrap()["groupId"], "g1");

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_usage_sends_explicit_range_and_period() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    Mock::given(method("GET"))
        .and(path("/stats/air/subscribers/001"))
        .and(query_param("from", "100"))
        .and(query_param("to", "200"))
        .and(query_param("period", "day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "upload": 1 }])))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = connect(&server).await?;
    let entries = client
        .stats()
        .air("001", &UsageQuery::range(100, 200).period(Period::Day))
        .await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["upload"], 1);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_usage_with_empty_imsi_skips_network() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    let client = connect(&server).await?;
    let entries = client.stats().beam("", &UsageQuery::last_day()).await?;
    assert!(entries.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_non_2xx_json_body_decodes_as_payload() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    mock_get(
        &server,
        "/groups",
        ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })),
        1,
    )
    .await;

    let client = connect(&server).await?;
    // Status is not inspected: a JSON error body comes back as a payload.
    let resp = client.groups().list().await?;
    assert_eq!(resp.json().unwrap()["message"], "boom");

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_non_json_body_is_a_decode_error() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    mock_get(
        &server,
        "/groups",
        ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
        1,
    )
    .await;

    let client = connect(&server).await?;
    let err = client
        .groups()
        .list()
        .await
        .expect_err("expected decode error");
    match err {
        Error::Decode {
            status,
            body_snippet,
            ..
        } => {
            assert_eq!(status.as_u16(), 200);
            assert!(body_snippet.unwrap_or_default().contains("oops"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_client_authenticates_and_lists_groups() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    mock_get(
        &server,
        "/groups",
        ResponseTemplate::new(200).set_body_json(json!([])),
        1,
    )
    .await;

    let base_url = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::connect(base_url, credentials())?;
        assert_eq!(client.api_key(), API_KEY);

        let resp = client.groups().list()?;
        assert!(resp.json().unwrap().is_array());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_batch_returns_mapping_per_imsi() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    mock_post(
        &server,
        "/subscribers/001/terminate",
        ResponseTemplate::new(200).set_body_json(json!({ "imsi": "001" })),
        1,
    )
    .await;
    mock_post(
        &server,
        "/subscribers/002/terminate",
        ResponseTemplate::new(200),
        1,
    )
    .await;

    let base_url = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::connect(base_url, credentials())?;
        let results = client.subscribers().terminate(["001", "002"])?;
        assert_eq!(results.len(), 2);
        assert_eq!(results[&Imsi::new("001")].json().unwrap()["imsi"], "001");
        assert!(results[&Imsi::new("002")].is_no_content());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_list_honors_filter_priority() -> Result<()> {
    let server = MockServer::start().await;
    mock_auth(&server).await;

    Mock::given(method("GET"))
        .and(path("/subscribers"))
        .and(query_param("limit", "10"))
        .and(query_param("status_filter", "inactive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::connect(base_url, credentials())?;
        let filter = SubscriberFilter::by_status(SubscriberStatus::Inactive);
        client.subscribers().list(10, &filter)?;
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}
