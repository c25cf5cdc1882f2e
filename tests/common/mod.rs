//! Helpers for integration tests.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

/// Canned-response HTTP listener speaking just enough JSON-RPC for the
/// extractor's client.
///
/// Binds an ephemeral local port and answers each POST according to the
/// request's `method` (and `params.id` for detail calls). The accept loop
/// runs on a detached thread and dies with the test process.
pub struct RpcStubServer {
    endpoint: String,
}

enum Mode {
    /// Route by JSON-RPC method: index body plus per-category detail bodies.
    Routed {
        index_body: String,
        detail_bodies: HashMap<i64, String>,
    },
    /// Reply with one fixed status and body to every request.
    Fixed { status: u16, body: String },
}

impl RpcStubServer {
    /// Start a server that answers `category.index` and `category.get`.
    pub fn start(index_body: String, detail_bodies: HashMap<i64, String>) -> Self {
        Self::start_mode(Mode::Routed {
            index_body,
            detail_bodies,
        })
    }

    /// Start a server that gives the same response to every request.
    pub fn start_fixed(status: u16, body: impl Into<String>) -> Self {
        Self::start_mode(Mode::Fixed {
            status,
            body: body.into(),
        })
    }

    fn start_mode(mode: Mode) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let endpoint = format!("http://{}", listener.local_addr().expect("stub local addr"));
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                serve_one(&mut stream, &mode);
            }
        });
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn serve_one(stream: &mut TcpStream, mode: &Mode) {
    let request = read_request_body(stream);
    match mode {
        Mode::Fixed { status, body } => write_response(stream, *status, body),
        Mode::Routed {
            index_body,
            detail_bodies,
        } => {
            let Some(request) = request else {
                write_response(stream, 400, "");
                return;
            };
            match request["method"].as_str() {
                Some("category.index") => write_response(stream, 200, index_body),
                Some("category.get") => {
                    let detail = request["params"]["id"]
                        .as_i64()
                        .and_then(|id| detail_bodies.get(&id));
                    match detail {
                        Some(body) => write_response(stream, 200, body),
                        None => write_response(stream, 404, ""),
                    }
                }
                _ => write_response(stream, 404, ""),
            }
        }
    }
}

fn read_request_body(stream: &mut TcpStream) -> Option<serde_json::Value> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_blank_line(&buf) {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    serde_json::from_slice(buf.get(header_end..header_end + content_length)?).ok()
}

fn find_blank_line(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}

fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
