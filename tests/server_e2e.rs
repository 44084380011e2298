//! End-to-end session: configuration, client and tool server over a byte
//! stream, against a mock Motion API.

use motion_config::{Config, RateLimitConfig, RetryConfig};
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(api: &MockServer) -> Config {
    Config {
        base_url: api.uri(),
        rate_limit: RateLimitConfig::per_minute(600),
        retry: RetryConfig {
            max_attempts: 3,
            base_delay_ms: 1,
        },
        ..Default::default()
    }
}

async fn run_session(config: &Config, lines: &[Value]) -> Vec<Value> {
    let server = motion::build_server(config, SecretString::from("e2e_key".to_string())).unwrap();

    let mut input = String::new();
    for line in lines {
        input.push_str(&line.to_string());
        input.push('\n');
    }
    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    // Requests run concurrently; order replies by id for the assertions.
    let mut responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    responses.sort_by_key(|response| response["id"].as_i64());
    responses
}

fn tool_call(id: i64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

fn text_body(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn full_session() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workspaces"))
        .and(header("x-api-key", "e2e_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workspaces": [{"id": "ws_1", "name": "Acme"}]
        })))
        .expect(1)
        .mount(&api)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("workspaceId", "ws_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"pageSize": 50},
            "tasks": [
                {"id": "t_1", "name": "Plan sprint", "priority": "HIGH"},
                {"id": "t_2", "name": "Ship it", "completed": true}
            ]
        })))
        .expect(1)
        .mount(&api)
        .await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "t_3", "name": "Retro"
        })))
        .expect(1)
        .mount(&api)
        .await;

    let responses = run_session(
        &config(&api),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05", "capabilities": {},
                "clientInfo": {"name": "e2e", "version": "0"}
            }}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            tool_call(3, "motion_list_workspaces", json!({})),
            tool_call(4, "motion_list_tasks", json!({"workspaceId": "ws_1"})),
            tool_call(5, "motion_create_task", json!({
                "name": "Retro", "workspaceId": "ws_1", "duration": 30, "autoScheduled": null
            })),
            tool_call(6, "motion_teleport", json!({})),
        ],
    )
    .await;

    // The notification gets no response.
    assert_eq!(responses.len(), 6);
    let ids: Vec<i64> = responses.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "motion-mcp-server");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 35);
    assert!(tools.iter().any(|t| t["name"] == "motion_get_schedule"));

    let workspaces = text_body(&responses[2]);
    assert_eq!(workspaces["count"], 1);
    assert_eq!(workspaces["workspaces"][0]["name"], "Acme");

    let tasks = text_body(&responses[3]);
    assert_eq!(tasks["count"], 2);
    assert_eq!(tasks["meta"]["pageSize"], 50);
    assert_eq!(tasks["tasks"][0]["priority"], "HIGH");

    assert_eq!(text_body(&responses[4])["id"], "t_3");

    assert_eq!(responses[5]["error"]["code"], -32601);

    let requests = api.received_requests().await.unwrap();
    let created = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: Value = serde_json::from_slice(&created.body).unwrap();
    assert_eq!(
        body,
        json!({"name": "Retro", "workspaceId": "ws_1", "duration": 30, "autoScheduled": null})
    );
}

#[tokio::test]
async fn auth_failure_surfaces_as_tool_error() {
    let api = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid API key"})))
        .expect(1)
        .mount(&api)
        .await;

    let responses = run_session(
        &config(&api),
        &[tool_call(1, "motion_get_current_user", json!({}))],
    )
    .await;

    assert_eq!(responses[0]["result"]["isError"], true);
    assert_eq!(
        text_body(&responses[0]),
        json!({
            "error": "Authentication failed. Check your API key. Invalid API key",
            "kind": "auth",
            "retryable": false
        })
    );
}
