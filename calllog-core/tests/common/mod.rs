//! Shared helpers for calllog-core integration tests
//!
//! - [`MockCollector`]: a one-shot HTTP server on loopback that records the
//!   request it receives and answers with a fixed status
//! - [`read_csv`]: decodes a payload with the `csv` crate's reader

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Request as seen by the mock collector
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Accepts exactly one connection and replies with `status`.
pub struct MockCollector {
    addr: SocketAddr,
    handle: JoinHandle<CapturedRequest>,
}

impl MockCollector {
    pub fn respond_with(status: u16) -> Self {
        Self::respond_after(status, Duration::ZERO)
    }

    /// Reply only after `delay` has passed since the request was read
    pub fn respond_after(status: u16, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock collector");
        let addr = listener.local_addr().expect("mock collector address");

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept upload connection");
            let mut reader = BufReader::new(stream);
            let request = read_request(&mut reader);

            thread::sleep(delay);

            let mut stream = reader.into_inner();
            // 204 and 304 must not carry a body length
            let length = if matches!(status, 204 | 304) {
                ""
            } else {
                "Content-Length: 0\r\n"
            };
            // Peer may already have given up (timeouts); ignore write errors
            let _ = write!(
                stream,
                "HTTP/1.1 {} Mock\r\n{}Connection: close\r\n\r\n",
                status, length
            );
            let _ = stream.flush();
            request
        });

        Self { addr, handle }
    }

    pub fn url(&self) -> String {
        format!("http://{}/upload", self.addr)
    }

    /// Wait for the mock to finish and return what it received
    pub fn request(self) -> CapturedRequest {
        self.handle.join().expect("mock collector panicked")
    }
}

/// URL of a loopback port with nothing listening on it
pub fn unused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind spare port");
    let addr = listener.local_addr().expect("spare port address");
    drop(listener);
    format!("http://{}/upload", addr)
}

fn read_request(reader: &mut BufReader<std::net::TcpStream>) -> CapturedRequest {
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).expect("read request body");

    CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8(body).expect("body is UTF-8"),
    }
}

/// Decode CSV text into its header and data rows.
pub fn read_csv(text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let header = reader
        .headers()
        .expect("CSV header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("CSV record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();

    (header, rows)
}
