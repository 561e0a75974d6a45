use fitness_planner::app::{router, server};
use fitness_planner::{MockCompletion, OllamaClient, SchemaVariant, WorkoutPlanner};
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::time::Duration;

fn valid_plan() -> Value {
    json!({
        "title": "Dumbbell Strength in 20",
        "description": "A short full-body strength session.",
        "warmup": [
            {"exercise": "Arm Circles", "reps_or_time": "10 forward, 10 backward"},
            {"exercise": "Leg Swings", "reps_or_time": "10 each leg"}
        ],
        "main_workout": [
            {
                "day": "Day 1",
                "focus": "Full body strength",
                "exercises": [
                    {"exercise": "Goblet Squat", "reps_or_time": "10 reps", "sets": 3},
                    {"exercise": "Dumbbell Row", "reps_or_time": "10 reps", "sets": 3},
                    {"exercise": "Plank", "reps_or_time": "45 seconds", "sets": 2}
                ]
            }
        ],
        "cooldown": [{"exercise": "Static Stretches", "reps_or_time": "5 minutes"}],
        "notes": "Rest 60 seconds between sets."
    })
}

fn example_request() -> Value {
    json!({
        "age": 30,
        "time": 20,
        "equipment": {"dumbbells": true},
        "goal": "strength",
        "workoutType": "fullBody",
        "adhdMode": false
    })
}

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_service(planner_endpoint: &str) -> String {
    let client = OllamaClient::new(planner_endpoint, Duration::from_secs(5)).unwrap();
    let planner = WorkoutPlanner::new(client, "llama3", SchemaVariant::Days);

    let listener = server::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(server::serve_with_shutdown(
        listener,
        router(planner),
        std::future::pending(),
    ));

    format!("http://{}", address)
}

fn mock_completion<'a>(server: &'a MockServer, completion: &str) -> httpmock::Mock<'a> {
    let completion = completion.to_string();
    server.mock(move |when, then| {
        when.method(POST)
            .path("/api/generate")
            .json_body_partial(r#"{"model": "llama3", "stream": false}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"model": "llama3", "response": completion, "done": true}));
    })
}

#[tokio::test]
async fn test_generate_workout_end_to_end() {
    let ollama = MockServer::start();
    let completion = format!(
        "Sure! Here's a plan tailored to you:\n\n```json\n{}\n```\n\nHave a great workout!",
        serde_json::to_string_pretty(&valid_plan()).unwrap()
    );
    let api_mock = mock_completion(&ollama, &completion);

    let base_url = spawn_service(&ollama.base_url()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/generate-workout", base_url))
        .json(&example_request())
        .send()
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["workout"], valid_plan());
}

#[tokio::test]
async fn test_prompt_carries_preferences() {
    let ollama = MockServer::start();
    let completion = format!("```json\n{}\n```", valid_plan());
    let api_mock = ollama.mock(|when, then| {
        when.method(POST)
            .path("/api/generate")
            .body_contains("dumbbells")
            .body_contains("Time available: 20 minutes")
            .body_contains("```json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"response": completion}));
    });

    let base_url = spawn_service(&ollama.base_url()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/generate-workout", base_url))
        .json(&example_request())
        .send()
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_invalid_input_returns_422_without_calling_model() {
    let ollama = MockServer::start();
    let api_mock = mock_completion(&ollama, "unused");

    let base_url = spawn_service(&ollama.base_url()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/generate-workout", base_url))
        .json(&json!({"age": -3, "time": 20, "adhdMode": "yes"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    api_mock.assert_hits(0);

    let body: Value = response.json().await.unwrap();
    let paths: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["age", "adhdMode"]);
}

#[tokio::test]
async fn test_non_json_body_returns_422() {
    let ollama = MockServer::start();
    let base_url = spawn_service(&ollama.base_url()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/generate-workout", base_url))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["path"], "body");
}

#[tokio::test]
async fn test_completion_without_json_returns_500() {
    let ollama = MockServer::start();
    let api_mock = mock_completion(&ollama, "Sorry, I can only talk about the weather.");

    let base_url = spawn_service(&ollama.base_url()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/generate-workout", base_url))
        .json(&example_request())
        .send()
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("did not contain a workout plan"));
    assert!(body.get("workout").is_none());
}

#[tokio::test]
async fn test_schema_violation_does_not_leak_details() {
    let ollama = MockServer::start();
    let mut plan = valid_plan();
    plan.as_object_mut().unwrap().remove("title");
    let api_mock = mock_completion(&ollama, &format!("```json\n{}\n```", plan));

    let base_url = spawn_service(&ollama.base_url()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/generate-workout", base_url))
        .json(&example_request())
        .send()
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("workout schema"));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_completion_service_failure_returns_500_once() {
    let ollama = MockServer::start();
    let api_mock = ollama.mock(|when, then| {
        when.method(POST).path("/api/generate");
        then.status(500).body("out of memory");
    });

    let base_url = spawn_service(&ollama.base_url()).await;
    let response = reqwest::Client::new()
        .post(format!("{}/generate-workout", base_url))
        .json(&example_request())
        .send()
        .await
        .unwrap();

    api_mock.assert_hits(1);
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["detail"],
        "An unexpected error occurred while generating the workout"
    );
}

#[tokio::test]
async fn test_unreachable_completion_service_returns_500() {
    // Nothing listens on port 9 (discard) in the test environment.
    let base_url = spawn_service("http://127.0.0.1:9").await;

    let response = reqwest::Client::new()
        .post(format!("{}/generate-workout", base_url))
        .json(&example_request())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn test_health_endpoint() {
    let ollama = MockServer::start();
    let base_url = spawn_service(&ollama.base_url()).await;

    let body: Value = reqwest::get(format!("{}/", base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({"message": "Fitness Backend API is running!"}));
}

#[tokio::test]
async fn test_mock_provider_serves_sample_plan() {
    let planner = WorkoutPlanner::new(
        MockCompletion::new(SchemaVariant::Flat),
        "unused",
        SchemaVariant::Flat,
    );
    let listener = server::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(server::serve_with_shutdown(
        listener,
        router(planner),
        std::future::pending(),
    ));

    let response = reqwest::Client::new()
        .post(format!("http://{}/generate-workout", address))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["workout"], MockCompletion::sample_plan(SchemaVariant::Flat));
}
