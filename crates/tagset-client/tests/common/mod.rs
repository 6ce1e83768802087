//! In-process tag server for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Read;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

use tagset_core::SetRequest;
use tiny_http::{Method, Response, Server};

#[derive(Debug, Clone)]
pub struct Captured {
    pub body: String,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
}

#[derive(Clone)]
pub struct TagServer {
    pub base: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl TagServer {
    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().expect("captured lock").clone()
    }
}

fn reserve_loopback_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
    let port = listener.local_addr().expect("read local addr").port();
    drop(listener);
    port
}

fn header(request: &tiny_http::Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|header| header.field.equiv(name))
        .map(|header| header.value.as_str().to_string())
}

/// Serve `/.tagSet` and `/<tag>?json` the way a PLC tag server does.
///
/// Writes to `Missing*` answer `fail`, writes to `Broken*` answer HTTP 500.
pub fn start_tag_server(snapshots: HashMap<String, String>) -> TagServer {
    let listen = format!("127.0.0.1:{}", reserve_loopback_port());
    let server = Server::http(&listen).expect("start tag server");
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let url = request.url().to_string();
            if *request.method() == Method::Post && url == "/.tagSet" {
                let mut body = String::new();
                if request.as_reader().read_to_string(&mut body).is_err() {
                    let _ = request.respond(Response::from_string("tagSet error").with_status_code(400));
                    continue;
                }
                sink.lock().expect("captured lock").push(Captured {
                    body: body.clone(),
                    content_type: header(&request, "Content-Type"),
                    cache_control: header(&request, "Cache-Control"),
                });
                let response = match SetRequest::parse(&body) {
                    Ok(parsed) if parsed.tag.root().starts_with("Broken") => {
                        Response::from_string("boom").with_status_code(500)
                    }
                    Ok(parsed) if parsed.tag.root().starts_with("Missing") => {
                        Response::from_string("fail")
                    }
                    Ok(_) => Response::from_string("ok"),
                    Err(_) => Response::from_string("fail"),
                };
                let _ = request.respond(response);
                continue;
            }
            let name = url
                .trim_start_matches('/')
                .split('?')
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            let response = match snapshots.get(&name) {
                Some(json) if url.ends_with("?json") => Response::from_string(json.clone()),
                _ => Response::from_string("not found").with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });
    TagServer {
        base: format!("http://{listen}"),
        captured,
    }
}
