#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use outline_loader::transport::{HttpRequest, HttpResponse, Transport};
use serde_json::{json, Value};

pub const BASE_URL: &str = "http://outline.test";
pub const COLLECTION_ID: &str = "1899bf4d-98be-403a-baa2-ecc1e3361380";

// ═══════════════════════════════════════════════════════════════════════
// Scripted transport
// ═══════════════════════════════════════════════════════════════════════

/// In-memory transport keyed by URL path (query string ignored).
///
/// Each route replays its responses in order; the last one repeats once
/// the queue is down to a single entry. Unrouted paths answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: RefCell<HashMap<String, VecDeque<HttpResponse>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, path: &str, body: Value) -> Self {
        self.respond(path, 200, body.to_string())
    }

    pub fn status(self, path: &str, status: u16) -> Self {
        self.respond(path, status, json!({"ok": false, "error": "scripted"}).to_string())
    }

    pub fn respond(self, path: &str, status: u16, body: String) -> Self {
        self.routes
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(HttpResponse { status, body });
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Requests whose path matches, in call order.
    pub fn calls_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| path_of(&r.url) == path)
            .cloned()
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn post(&self, request: &HttpRequest) -> outline_loader::Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());

        let path = path_of(&request.url);
        let mut routes = self.routes.borrow_mut();
        let response = match routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        Ok(response.unwrap_or(HttpResponse {
            status: 404,
            body: String::new(),
        }))
    }
}

fn path_of(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    match without_query.find("://") {
        Some(scheme_end) => {
            let rest = &without_query[scheme_end + 3..];
            match rest.find('/') {
                Some(slash) => rest[slash..].to_string(),
                None => "/".to_string(),
            }
        }
        None => without_query.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Fixtures
// ═══════════════════════════════════════════════════════════════════════

pub fn document(id: &str, collection_id: &str) -> Value {
    json!({
        "id": id,
        "text": format!("Test document {}", id),
        "title": format!("Test {}", id),
        "createdAt": "2024-03-26T20:00:01.781Z",
        "updatedAt": "2024-03-26T20:00:01.781Z",
        "url": format!("/doc/test-{}", id),
        "archivedAt": null,
        "deletedAt": null,
        "collectionId": collection_id,
        "parentDocumentId": null,
        "isCollectionDeleted": false
    })
}

pub fn collection(id: &str, name: &str, permission: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} description", name),
        "permission": permission,
        "url": format!("/collection/{}", id),
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

pub fn default_collection() -> Value {
    json!({
        "id": COLLECTION_ID,
        "name": "Default Test Collection",
        "description": "A default collection for testing.",
        "permission": "read",
        "url": "/collection/default-test-collection",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

pub fn page(data: Value, next_path: Option<&str>, total: Option<u64>) -> Value {
    let mut pagination = serde_json::Map::new();
    pagination.insert("nextPath".to_string(), json!(next_path));
    if let Some(total) = total {
        pagination.insert("total".to_string(), json!(total));
    }
    json!({ "data": data, "pagination": pagination })
}

pub fn memberships(document_id: &str, group_id: &str, group_name: &str) -> Value {
    page(
        json!({
            "groupMemberships": [
                {"id": format!("gm-{}", group_id), "groupId": group_id, "documentId": document_id, "permission": "read"}
            ],
            "groups": [{"id": group_id, "name": group_name}]
        }),
        Some("/api/documents.group_memberships?limit=25&offset=25"),
        Some(1),
    )
}

pub fn no_memberships() -> Value {
    page(
        json!({"groupMemberships": [], "groups": []}),
        None,
        Some(0),
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Local HTTP server (for exercising the reqwest transport)
// ═══════════════════════════════════════════════════════════════════════

/// A request as seen by [`serve`].
#[derive(Debug, Clone)]
pub struct Received {
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Serve `routes` (path → (status, json body)) on an ephemeral port.
///
/// Returns the base URL and the log of received requests. Every response
/// closes the connection. The server thread lives until the test exits.
pub fn serve(routes: Vec<(&str, u16, Value)>) -> (String, Arc<Mutex<Vec<Received>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: HashMap<String, (u16, String)> = routes
        .into_iter()
        .map(|(p, s, b)| (p.to_string(), (s, b.to_string())))
        .collect();
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_thread = Arc::clone(&log);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            let target = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
            let path = target.split('?').next().unwrap_or("/").to_string();

            let mut headers = Vec::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 {
                    break;
                }
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((k, v)) = line.split_once(':') {
                    let (k, v) = (k.trim().to_string(), v.trim().to_string());
                    if k.eq_ignore_ascii_case("content-length") {
                        content_length = v.parse().unwrap_or(0);
                    }
                    headers.push((k, v));
                }
            }

            let mut body = vec![0u8; content_length];
            let _ = reader.read_exact(&mut body);

            log_thread.lock().unwrap().push(Received {
                path: path.clone(),
                headers,
                body: String::from_utf8_lossy(&body).to_string(),
            });

            let (status, payload) = routes
                .get(&path)
                .cloned()
                .unwrap_or((404, "{}".to_string()));
            let response = format!(
                "HTTP/1.1 {} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                payload.len(),
                payload
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    (format!("http://{}", addr), log)
}
