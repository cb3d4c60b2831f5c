use std::{
	future::IntoFuture,
	sync::{Arc, Mutex},
};

use axum::{
	Json, Router,
	extract::State,
	http::{HeaderMap, StatusCode},
	response::IntoResponse,
	routing,
};
use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};
use tokio::{
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
};

use gleaner_config::Engine;
use gleaner_transport::EngineClient;

#[derive(Clone, Default)]
struct Captured {
	bodies: Arc<Mutex<Vec<Value>>>,
	auth: Arc<Mutex<Vec<String>>>,
}

async fn start_engine(captured: Captured) -> (String, Sender<()>) {
	let app = Router::new()
		.route("/items/_search", routing::post(search_handler))
		.route("/broken/_search", routing::post(broken_handler))
		.with_state(captured);
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind engine stub.");
	let addr = listener.local_addr().expect("Failed to read engine stub address.");
	let (tx, rx) = oneshot::channel();
	let server = axum::serve(listener, app).with_graceful_shutdown(async move {
		let _ = rx.await;
	});

	tokio::spawn(async move {
		let _ = server.into_future().await;
	});

	(format!("http://{addr}"), tx)
}

async fn search_handler(
	State(captured): State<Captured>,
	headers: HeaderMap,
	Json(payload): Json<Value>,
) -> impl IntoResponse {
	if let Some(value) = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok()) {
		captured.auth.lock().unwrap_or_else(|err| err.into_inner()).push(value.to_string());
	}

	captured.bodies.lock().unwrap_or_else(|err| err.into_inner()).push(payload);

	(
		StatusCode::OK,
		Json(serde_json::json!({ "hits": { "total": { "value": 1 }, "hits": [] } })),
	)
		.into_response()
}

async fn broken_handler() -> impl IntoResponse {
	(
		StatusCode::BAD_REQUEST,
		Json(serde_json::json!({
			"error": { "type": "parsing_exception", "reason": "unknown query [bogus]" },
			"status": 400
		})),
	)
		.into_response()
}

fn engine(url: String, index: &str, api_key: Option<&str>) -> Engine {
	Engine {
		url,
		index: index.to_string(),
		dialect: "modern".to_string(),
		timeout_ms: 2_000,
		api_key: api_key.map(str::to_string),
		default_headers: Map::new(),
	}
}

#[tokio::test]
async fn posts_query_document_to_index_search_endpoint() {
	let captured = Captured::default();
	let (url, shutdown) = start_engine(captured.clone()).await;
	let client = EngineClient::new(&engine(url, "items", Some("secret"))).expect("client");
	let body = serde_json::json!({ "query": { "match_all": {} }, "size": 5 });
	let response = client.search(&body).await.expect("search should succeed");

	let _ = shutdown.send(());

	assert_eq!(response["hits"]["total"]["value"], 1);
	assert_eq!(captured.bodies.lock().expect("lock").as_slice(), &[body]);
	assert_eq!(captured.auth.lock().expect("lock").as_slice(), &["ApiKey secret".to_string()]);
}

#[tokio::test]
async fn engine_error_payload_is_returned_for_caller_inspection() {
	let (url, shutdown) = start_engine(Captured::default()).await;
	let client = EngineClient::new(&engine(url, "broken", None)).expect("client");
	let response = client.search(&serde_json::json!({})).await.expect("payload expected");

	let _ = shutdown.send(());

	assert_eq!(response["error"]["type"], "parsing_exception");
}

#[tokio::test]
async fn unknown_route_surfaces_as_status_error() {
	let (url, shutdown) = start_engine(Captured::default()).await;
	let client = EngineClient::new(&engine(url, "missing", None)).expect("client");
	let err = client.search(&serde_json::json!({})).await.expect_err("expected status error");

	let _ = shutdown.send(());

	assert!(matches!(err, gleaner_transport::Error::Status { status: 404, .. }));
}
