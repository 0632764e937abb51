//! Shared test utilities: a canned-response mock of the management and
//! directory APIs.

use std::sync::Mutex;
use std::thread;

use tiny_http::{Header, Response, Server};

/// One canned HTTP response
#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    /// Extra headers, e.g. a `Location` polling URL
    pub headers: Vec<(String, String)>,
}

impl Canned {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A route: method + exact path (query string ignored). Responses are
/// served in order; the last one repeats.
pub struct Route {
    pub method: &'static str,
    pub path: String,
    responses: Mutex<(usize, Vec<Canned>)>,
}

impl Route {
    pub fn new(method: &'static str, path: impl Into<String>, responses: Vec<Canned>) -> Self {
        assert!(!responses.is_empty(), "route needs at least one response");
        Self {
            method,
            path: path.into(),
            responses: Mutex::new((0, responses)),
        }
    }

    /// Shorthand for a single always-on JSON response.
    pub fn json(
        method: &'static str,
        path: impl Into<String>,
        status: u16,
        body: serde_json::Value,
    ) -> Self {
        Self::new(method, path, vec![Canned::json(status, body)])
    }

    fn next_response(&self) -> Canned {
        let mut guard = self.responses.lock().expect("route lock");
        let (ref mut index, ref responses) = *guard;
        let response = responses[(*index).min(responses.len() - 1)].clone();
        *index += 1;
        response
    }
}

/// Mock API server bound to an ephemeral localhost port
pub struct MockApi {
    pub base_url: String,
}

/// Start the mock in a background thread. The thread runs until the test
/// process exits; tests just drop the handle.
pub fn spawn_mock_api(routes: Vec<Route>) -> MockApi {
    let server = Server::http("127.0.0.1:0").expect("Failed to bind mock server");
    let addr = server
        .server_addr()
        .to_ip()
        .expect("mock server has an IP address");
    let base_url = format!("http://{addr}");

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let method = request.method().to_string();
            let path = request
                .url()
                .split('?')
                .next()
                .unwrap_or_default()
                .to_string();

            let matched = routes
                .iter()
                .find(|r| r.method.eq_ignore_ascii_case(&method) && r.path == path);

            let canned = match matched {
                Some(route) => route.next_response(),
                None => Canned::json(
                    404,
                    serde_json::json!({
                        "error": {
                            "code": "NotFound",
                            "message": format!("no mock route for {method} {path}"),
                        }
                    }),
                ),
            };

            let mut response = Response::from_string(canned.body)
                .with_status_code(canned.status)
                .with_header(
                    Header::from_bytes(b"Content-Type", b"application/json")
                        .expect("valid header"),
                );
            for (name, value) in &canned.headers {
                response = response.with_header(
                    Header::from_bytes(name.as_bytes(), value.as_bytes())
                        .expect("valid header"),
                );
            }
            let _ = request.respond(response);
        }
    });

    MockApi { base_url }
}
