use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use client::{
    ApiRequest, ClientConfig, CookieName, EnvelopeClient, MemoryCookieStore, Method, MultipartForm,
    ProgressIndicator, ProgressTracker, RequestBody, TrackedTransport, Transport, TransportError,
    TransportResponse,
};
use serde_json::{json, Map, Value};
use tokio::sync::oneshot;

type Outcome = Result<TransportResponse, TransportError>;

// ---------------------------------------------------------------------------
// Test transports
// ---------------------------------------------------------------------------

/// Answers requests with queued outcomes and records what it was sent.
#[derive(Default)]
struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Outcome>>,
    seen: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    fn answering(outcomes: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            seen: Mutex::default(),
        })
    }

    fn seen(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Outcome {
        self.seen.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::Timeout))
    }
}

/// Holds each request until the test releases the gate registered for its path.
#[derive(Default)]
struct GatedTransport {
    gates: Mutex<HashMap<String, oneshot::Receiver<Outcome>>>,
}

impl GatedTransport {
    fn gate(&self, path: &str) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(path.to_string(), rx);
        tx
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn execute(&self, request: &ApiRequest) -> Outcome {
        let gate = self.gates.lock().unwrap().remove(&request.path);
        match gate {
            Some(rx) => rx.await.unwrap_or(Err(TransportError::Timeout)),
            None => Err(TransportError::Timeout),
        }
    }
}

#[derive(Default)]
struct CountingIndicator {
    shown: AtomicUsize,
    hidden: AtomicUsize,
}

impl ProgressIndicator for CountingIndicator {
    fn show(&self) {
        self.shown.fetch_add(1, Ordering::SeqCst);
    }
    fn hide(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }
}

fn ok(body: Value) -> Outcome {
    Ok(TransportResponse::new(200, Some(body)))
}

fn standard<T: Transport>(
    transport: T,
) -> (EnvelopeClient<T>, Arc<MemoryCookieStore>, Arc<ProgressTracker>) {
    let config = ClientConfig::default();
    let cookies = Arc::new(MemoryCookieStore::new());
    let tracker = Arc::new(ProgressTracker::silent());
    let client = EnvelopeClient::standard(transport, &config, cookies.clone(), tracker.clone());
    (client, cookies, tracker)
}

async fn wait_for_pending(tracker: &ProgressTracker, expected: usize) {
    for _ in 0..1000 {
        if tracker.pending() == expected {
            return;
        }
        tokio::task::yield_now().await;
    }
    let pending = tracker.pending();
    panic!("pending count never reached {expected}, is {pending}");
}

// ---------------------------------------------------------------------------
// Response normalization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_payload_is_camel_cased() {
    let transport = ScriptedTransport::answering(vec![ok(json!({
        "success": true,
        "message": "OK",
        "error_code": 0,
        "data": {"user_id": 1},
        "meta": {"total_count": 5}
    }))]);
    let (client, _, _) = standard(transport);

    let envelope = client.get("/users").await;

    assert!(envelope.success);
    assert_eq!(envelope.data, json!({"userId": 1}));
    assert_eq!(envelope.meta, json!({"totalCount": 5}));
}

#[tokio::test]
async fn not_found_without_body_resolves_to_failure_envelope() {
    let transport = ScriptedTransport::answering(vec![Ok(TransportResponse::new(404, None))]);
    let (client, _, _) = standard(transport);

    let envelope = client.get("/missing").await;

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "success": false,
            "message": "Request failed",
            "error_code": 404,
            "data": {},
            "meta": {}
        })
    );
}

#[tokio::test]
async fn network_failure_resolves_to_network_error_envelope() {
    let transport = ScriptedTransport::answering(vec![Err(TransportError::Connect {
        message: "connection refused".to_string(),
    })]);
    let (client, _, tracker) = standard(transport);

    let envelope = client.get("/users/profile").await;

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "success": false,
            "message": "Network error",
            "error_code": -1,
            "data": {},
            "meta": {}
        })
    );
    assert_eq!(tracker.pending(), 0);
}

#[tokio::test]
async fn validation_errors_survive_normalization() {
    let transport = ScriptedTransport::answering(vec![Ok(TransportResponse::new(
        400,
        Some(json!({
            "success": false,
            "message": "Invalid data",
            "error_code": 400,
            "errors": {"password": ["This field is required."]},
            "meta": {}
        })),
    ))]);
    let (client, _, _) = standard(transport);

    let envelope = client.login(json!({"username": "ada"})).await;

    assert!(!envelope.success);
    assert_eq!(envelope.message, "Invalid data");
    assert_eq!(
        envelope.extra.get("errors"),
        Some(&json!({"password": ["This field is required."]}))
    );
}

// ---------------------------------------------------------------------------
// Request pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn named_operations_hit_fixed_endpoints() {
    let profile_body = json!({"data": {"is_authenticated": false, "new_user": true}});
    let login_body = json!({
        "message": "Login successful",
        "data": {"logged_in_user": {"user_name": "ada"}}
    });
    let transport = ScriptedTransport::answering(vec![ok(profile_body), ok(login_body)]);
    let (client, cookies, _) = standard(transport.clone());
    cookies.set(&CookieName::new("csrftoken").unwrap(), "token-1");

    let profile = client.user_profile().await;
    let login = client
        .login(json!({"userName": "ada", "password": "secret"}))
        .await;

    assert_eq!(
        profile.data,
        json!({"isAuthenticated": false, "newUser": true})
    );
    assert_eq!(login.message, "Login successful");
    assert_eq!(login.data, json!({"loggedInUser": {"userName": "ada"}}));

    let seen = transport.seen();
    assert_eq!(seen[0].method, Method::Get);
    assert_eq!(seen[0].path, "/users/profile");
    assert_eq!(seen[1].method, Method::Post);
    assert_eq!(seen[1].path, "/users/login");
    assert_eq!(
        seen[1].body,
        RequestBody::Json(json!({"user_name": "ada", "password": "secret"}))
    );
    for request in &seen {
        assert_eq!(request.header("X-CSRFToken"), Some("token-1"));
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }
}

#[tokio::test]
async fn csrf_token_is_reread_for_every_request() {
    let transport = ScriptedTransport::answering(vec![ok(json!({})), ok(json!({}))]);
    let (client, cookies, _) = standard(transport.clone());
    let name = CookieName::new("csrftoken").unwrap();

    cookies.set(&name, "before-login");
    client.get("/a").await;
    cookies.set(&name, "after-login");
    client.get("/b").await;

    let seen = transport.seen();
    assert_eq!(seen[0].header("X-CSRFToken"), Some("before-login"));
    assert_eq!(seen[1].header("X-CSRFToken"), Some("after-login"));
}

#[tokio::test]
async fn query_keys_convert_and_multipart_fields_do_not() {
    let transport = ScriptedTransport::answering(vec![ok(json!({})), ok(json!({}))]);
    let (client, _, _) = standard(transport.clone());

    let mut query = Map::new();
    query.insert("pageSize".to_string(), json!(10));
    client.get_with_query("/projects", query).await;

    let logo = vec![1, 2, 3];
    let form = MultipartForm::new()
        .text("displayName", "Logo")
        .file("upload", "logo.png", Some("image/png".to_string()), logo);
    client.upload("/attachments", form.clone()).await;

    let seen = transport.seen();
    assert!(seen[0].query.contains_key("page_size"));
    assert_eq!(seen[1].body, RequestBody::Multipart(form));
    assert!(seen[1].header("Content-Type").is_none());
}

#[tokio::test]
async fn builder_without_interceptors_sends_request_untouched() {
    let transport = ScriptedTransport::answering(vec![ok(json!({}))]);
    let client = EnvelopeClient::builder(transport).build();
    assert!(client.interceptor_names().is_empty());

    client.post("/echo", json!({"keepMe": 1})).await;

    let seen = client.transport().seen();
    assert_eq!(seen[0].body, RequestBody::Json(json!({"keepMe": 1})));
    assert!(seen[0].header("X-CSRFToken").is_none());
}

// ---------------------------------------------------------------------------
// Pending-request tracking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_requests_settle_to_zero_in_any_order() {
    let transport = Arc::new(GatedTransport::default());
    let gates: Vec<_> = ["/one", "/two", "/three"]
        .iter()
        .map(|path| transport.gate(path))
        .collect();

    let indicator = Arc::new(CountingIndicator::default());
    let tracker = Arc::new(ProgressTracker::new(indicator.clone()));
    let client = Arc::new(EnvelopeClient::standard(
        transport,
        &ClientConfig::default(),
        Arc::new(MemoryCookieStore::new()),
        tracker.clone(),
    ));

    let mut handles: Vec<_> = ["/one", "/two", "/three"]
        .into_iter()
        .map(|path| {
            let client = client.clone();
            Some(tokio::spawn(async move { client.get(path).await }))
        })
        .collect();
    wait_for_pending(&tracker, 3).await;

    let mut gates: Vec<_> = gates.into_iter().map(Some).collect();
    let mut remaining = 3;
    for index in [2, 0, 1] {
        let gate = gates[index].take().unwrap();
        let _ = gate.send(ok(json!({"data": {"index_value": index}})));
        let handle = handles[index].take().unwrap();
        let envelope = handle.await.unwrap();
        assert_eq!(envelope.data, json!({"indexValue": index}));

        remaining -= 1;
        assert_eq!(tracker.pending(), remaining);
    }

    assert_eq!(tracker.pending(), 0);
    assert_eq!(indicator.shown.load(Ordering::SeqCst), 1);
    assert_eq!(indicator.hidden.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dropped_send_still_settles() {
    let transport = Arc::new(GatedTransport::default());
    let _gate = transport.gate("/slow");
    let (client, _, tracker) = standard(transport);

    let outcome = tokio::time::timeout(Duration::from_millis(20), client.get("/slow")).await;

    assert!(outcome.is_err());
    assert_eq!(tracker.pending(), 0);
}

#[tokio::test]
async fn tracked_transport_counts_direct_calls() {
    let tracker = Arc::new(ProgressTracker::silent());
    let gated = Arc::new(GatedTransport::default());
    let gate = gated.gate("/raw");
    let transport = Arc::new(TrackedTransport::new(gated, tracker.clone()));

    let call = {
        let transport = transport.clone();
        tokio::spawn(async move { transport.execute(&ApiRequest::get("/raw")).await })
    };
    wait_for_pending(&tracker, 1).await;

    let _ = gate.send(Ok(TransportResponse::new(204, None)));
    let response = call.await.unwrap().unwrap();

    assert_eq!(response.status, 204);
    assert_eq!(tracker.pending(), 0);

    let gated = Arc::try_unwrap(transport).ok().unwrap().into_inner();
    assert!(gated.gates.lock().unwrap().is_empty());
}
