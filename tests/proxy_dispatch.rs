//! End-to-end forwarding through a real listener and a mock upstream.

use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn test_static_route_relays_body() {
    let upstream = common::start_json_upstream(r#"{"foo":1}"#).await;
    let proxy = common::start_proxy(common::proxy_config(&upstream.base_url())).await;

    let res = common::client()
        .get(common::url(&proxy, "/api/f1/get_circuits"))
        .send()
        .await
        .expect("Proxy unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"foo":1}"#);
    assert_eq!(upstream.targets(), vec!["/api/f1/get_circuits"]);

    proxy.stop().await.unwrap();
}

#[tokio::test]
async fn test_body_is_not_reserialized() {
    let body = "{ \"results\" : [ {\"position\": 1, \"points\": 25.0} ],\n  \"year\":2021 }";
    let upstream = common::start_json_upstream(body).await;
    let proxy = common::start_proxy(common::proxy_config(&upstream.base_url())).await;

    let res = common::client()
        .get(common::url(&proxy, "/api/f1/get_race_results/2021/5"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), body);

    proxy.stop().await.unwrap();
}

#[tokio::test]
async fn test_every_default_route_hits_its_upstream_path() {
    let upstream = common::start_json_upstream("[]").await;
    let proxy = common::start_proxy(common::proxy_config(&upstream.base_url())).await;
    let client = common::client();

    let cases = [
        ("/api/f1/get_race_calendar", "/api/f1/get_race_calendar"),
        ("/api/f1/get_race_calendar/2023", "/api/f1/get_race_calendar/2023"),
        ("/api/f1/get_driver_standings", "/api/f1/get_driver_standings"),
        ("/api/f1/get_driver_stats", "/api/f1/get_driver_stats"),
        ("/api/f1/get_constructor_standings", "/api/f1/get_constructor_standings"),
        ("/api/f1/get_constructor_stats", "/api/f1/get_constructor_stats"),
        ("/api/f1/get_champions", "/api/f1/get_champions"),
        ("/api/f1/get_previous_champions", "/api/f1/get_previous_champions"),
        ("/api/f1/get_next_event", "/api/f1/get_next_event"),
        ("/api/f1/get_next_event_countdown", "/api/f1/get_next_event_countdown"),
        ("/api/f1/get_drivers", "/api/f1/get_drivers"),
        ("/api/f1/get_circuits", "/api/f1/get_circuits"),
        ("/api/f1/get_seasons", "/api/f1/get_seasons"),
        ("/api/f1/get_recent_rWinners", "/api/f1/get_recent_rWinners"),
        ("/api/f1/get_driver_points/2021", "/api/f1/get_driver_points/2021"),
        ("/api/f1/get_constructor_points/2021", "/api/f1/get_constructor_points/2021"),
        ("/api/f1/get_race_results/2021/5", "/api/f1/get_race_results/2021/5"),
        ("/api/f1/get_qualifying_results/2022/3", "/api/f1/get_qualifying_results/2022/3"),
        ("/api/f1/get_sprint_results/2023/6", "/api/f1/get_sprint_results/2023/6"),
        ("/api/f1/get_event/2023/Monaco", "/api/f1/get_drivers/2023/Monaco"),
    ];

    for (local, _) in cases {
        let res = client.get(common::url(&proxy, local)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{local}");
    }

    // One outbound call per inbound request, in order, to the substituted path.
    let expected: Vec<String> = cases.iter().map(|(_, up)| up.to_string()).collect();
    assert_eq!(upstream.targets(), expected);

    proxy.stop().await.unwrap();
}

#[tokio::test]
async fn test_params_keep_their_percent_encoding() {
    let upstream = common::start_json_upstream("{}").await;
    let proxy = common::start_proxy(common::proxy_config(&upstream.base_url())).await;
    let client = common::client();

    let cases = [
        ("S%C3%A3o%20Paulo", "S%C3%A3o%20Paulo"),
        ("Emilia%2FRomagna", "Emilia%2FRomagna"),
        ("100%25", "100%25"),
        ("q%3Fx%23y", "q%3Fx%23y"),
    ];

    for (inbound, _) in cases {
        let res = client
            .get(common::url(&proxy, &format!("/api/f1/get_event/2024/{inbound}")))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{inbound}");
    }

    let expected: Vec<String> = cases
        .iter()
        .map(|(_, out)| format!("/api/f1/get_drivers/2024/{out}"))
        .collect();
    assert_eq!(upstream.targets(), expected);

    proxy.stop().await.unwrap();
}

#[tokio::test]
async fn test_dot_segment_params_never_reach_upstream() {
    let upstream = common::start_json_upstream("{}").await;
    let proxy = common::start_proxy(common::proxy_config(&upstream.base_url())).await;

    for target in [
        "/api/f1/get_event/2024/%2E%2E",
        "/api/f1/get_event/2024/%2e",
        "/api/f1/get_driver_points/%2E%2E",
    ] {
        let response = common::raw_get(proxy.local_addr(), target).await;
        assert!(
            response.starts_with("HTTP/1.1 500"),
            "{target}: {response}"
        );
        assert!(response.contains("Failed to fetch information from API"));
    }

    // A value that is merely made of dots is an ordinary segment.
    let response = common::raw_get(proxy.local_addr(), "/api/f1/get_event/2024/...").await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");

    assert_eq!(upstream.targets(), vec!["/api/f1/get_drivers/2024/..."]);

    proxy.stop().await.unwrap();
}

#[tokio::test]
async fn test_outbound_request_is_bare_get() {
    let upstream = common::start_json_upstream("{}").await;
    let proxy = common::start_proxy(common::proxy_config(&upstream.base_url())).await;

    let res = common::client()
        .get(common::url(&proxy, "/api/f1/get_driver_points/2021?season=1999"))
        .header("x-request-id", "req-42")
        .header("authorization", "Bearer secret")
        .header("x-custom", "value")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-request-id"], "req-42");

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    let seen = &requests[0];
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.target, "/api/f1/get_driver_points/2021");
    assert!(seen.header("x-request-id").is_none());
    assert!(seen.header("authorization").is_none());
    assert!(seen.header("x-custom").is_none());
    assert_eq!(seen.header("host"), Some(upstream.addr.to_string().as_str()));

    proxy.stop().await.unwrap();
}

#[tokio::test]
async fn test_unknown_path_does_not_reach_upstream() {
    let upstream = common::start_json_upstream("{}").await;
    let proxy = common::start_proxy(common::proxy_config(&upstream.base_url())).await;
    let client = common::client();

    let res = client
        .get(common::url(&proxy, "/api/f1/get_weather"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Missing parameter: the pattern does not match.
    let res = client
        .get(common::url(&proxy, "/api/f1/get_race_results/2021"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(common::url(&proxy, "/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert!(upstream.requests().is_empty());

    proxy.stop().await.unwrap();
}

#[tokio::test]
async fn test_custom_route_table() {
    let upstream = common::start_json_upstream(r#"{"ok":true}"#).await;
    let mut config = common::proxy_config(&format!("{}/v2", upstream.base_url()));
    config.routes = vec![f1_proxy::config::RouteConfig::new(
        "lap_times",
        "/laps/:year/:round/:driver",
        "/api/f1/laps/{driver}/{year}/{round}",
    )];
    let proxy = common::start_proxy(config).await;

    let res = common::client()
        .get(common::url(&proxy, "/laps/2021/5/HAM"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(upstream.targets(), vec!["/v2/api/f1/laps/HAM/2021/5"]);

    let res = common::client()
        .get(common::url(&proxy, "/api/f1/get_circuits"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    proxy.stop().await.unwrap();
}
