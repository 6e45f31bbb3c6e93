//! Minimal HTTP/1.1 server for the curl backend tests.
//!
//! Serves a fixed set of paths. HEAD answers with Content-Length only; GET
//! sends the body. Unknown paths get 404. With `truncate` set, GET
//! advertises the full length but closes after half the body.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy, Default)]
pub struct ServerOptions {
    pub truncate: bool,
}

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub fn start(files: HashMap<String, Vec<u8>>) -> String {
    start_with_options(files, ServerOptions::default())
}

pub fn start_with_options(files: HashMap<String, Vec<u8>>, opts: ServerOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files = Arc::new(files);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            thread::spawn(move || handle(stream, &files, opts));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, files: &HashMap<String, Vec<u8>>, opts: ServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/").trim_start_matches('/');

    let Some(body) = files.get(path) else {
        let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
        return;
    };
    let header = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/pdf\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    if method.eq_ignore_ascii_case("GET") {
        let sent = if opts.truncate { &body[..body.len() / 2] } else { &body[..] };
        let _ = stream.write_all(sent);
    }
}
