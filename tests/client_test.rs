use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use serde_json::json;
use video_console::auth;
use video_console::client::VideoApi;
use video_console::domain::Category;
use video_console::error::ConsoleError;

/// Serves the given responses on a loopback listener, one connection each,
/// and captures every raw request for inspection. Returns the base URL to
/// point the client at.
fn serve(responses: Vec<(u16, String)>) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            tx.send(request).unwrap();

            let reason = match status {
                200 => "OK",
                403 => "Forbidden",
                404 => "Not Found",
                500 => "Internal Server Error",
                _ => "Status",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        }
    });

    (format!("http://{addr}/api/v1"), rx)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            let mut body = buf[pos + 4..].to_vec();
            while body.len() < content_length {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                body.extend_from_slice(&chunk[..n]);
            }
            return format!("{head}\r\n\r\n{}", String::from_utf8_lossy(&body));
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn record(id: u64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "a description",
        "author_name": "alice",
        "category": "DOC",
        "views": 10
    })
}

#[test]
fn fetch_videos_maps_records_in_order() {
    let body = json!([record(1, "first"), record(2, "second")]).to_string();
    let (base_url, requests) = serve(vec![(200, body)]);

    let videos = VideoApi::new(&base_url).fetch_videos().unwrap().unwrap();

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].id(), 1);
    assert_eq!(videos[0].title().as_str(), "first");
    assert_eq!(videos[1].id(), 2);
    assert_eq!(videos[1].title().as_str(), "second");

    let request = requests.recv().unwrap();
    assert!(
        request.starts_with("GET /api/v1/videos/ HTTP/1.1"),
        "unexpected request: {request}"
    );
}

#[test]
fn fetch_videos_returns_none_on_404() {
    let (base_url, _requests) = serve(vec![(404, String::new())]);

    let result = VideoApi::new(&base_url).fetch_videos().unwrap();

    // Absence, not an error and not an empty listing
    assert!(result.is_none());
}

#[test]
fn fetch_videos_returns_none_on_500() {
    let (base_url, _requests) = serve(vec![(500, String::new())]);

    assert!(VideoApi::new(&base_url).fetch_videos().unwrap().is_none());
}

#[test]
fn fetch_videos_returns_none_when_unreachable() {
    // Bind then drop, so the port is very likely closed
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let api = VideoApi::new(format!("http://{addr}/api/v1"));
    assert!(api.fetch_videos().unwrap().is_none());
}

#[test]
fn fetch_videos_propagates_contract_violations() {
    let mut bad = record(1, "ok");
    bad["title"] = json!("x".repeat(33));
    let body = json!([bad]).to_string();
    let (base_url, _requests) = serve(vec![(200, body)]);

    let result = VideoApi::new(&base_url).fetch_videos();

    assert!(matches!(
        result,
        Err(ConsoleError::Validation { field: "title", .. })
    ));
}

#[test]
fn fetch_video_maps_a_single_record() {
    let (base_url, requests) = serve(vec![(200, record(7, "the one").to_string())]);

    let video = VideoApi::new(&base_url).fetch_video(7).unwrap().unwrap();

    assert_eq!(video.id(), 7);
    assert_eq!(video.title().as_str(), "the one");
    assert_eq!(video.category(), Category::Documentary);
    assert_eq!(video.views().count(), 10);

    let request = requests.recv().unwrap();
    assert!(
        request.starts_with("GET /api/v1/videos/7 HTTP/1.1"),
        "unexpected request: {request}"
    );
}

#[test]
fn fetch_video_returns_none_on_404() {
    let (base_url, _requests) = serve(vec![(404, String::new())]);

    assert!(VideoApi::new(&base_url).fetch_video(99).unwrap().is_none());
}

#[test]
fn fetch_own_videos_sends_the_token_header() {
    let (base_url, requests) = serve(vec![(200, "[]".to_string())]);

    let videos = VideoApi::new(&base_url)
        .fetch_own_videos("sekret")
        .unwrap()
        .unwrap();
    assert!(videos.is_empty());

    let request = requests.recv().unwrap().to_ascii_lowercase();
    assert!(
        request.contains("authorization: token sekret"),
        "missing token header in: {request}"
    );
    assert!(request.starts_with("get /api/v1/videos/own http/1.1"));
}

#[test]
fn login_extracts_the_key() {
    let body = json!({"key": "abc123"}).to_string();
    let (base_url, requests) = serve(vec![(200, body)]);

    let http = reqwest::blocking::Client::new();
    let key = auth::login(&http, &base_url, "alice", "hunter2").unwrap();
    assert_eq!(key.as_deref(), Some("abc123"));

    let request = requests.recv().unwrap();
    assert!(request.starts_with("POST /api/v1/auth/login/ HTTP/1.1"));
    assert!(request.ends_with("username=alice&password=hunter2"));
}

#[test]
fn login_returns_none_on_wrong_credentials() {
    let (base_url, _requests) = serve(vec![(403, String::new())]);

    let http = reqwest::blocking::Client::new();
    assert!(auth::login(&http, &base_url, "alice", "wrong")
        .unwrap()
        .is_none());
}

#[test]
fn login_fails_loudly_when_the_key_is_missing() {
    let (base_url, _requests) = serve(vec![(200, "{}".to_string())]);

    let http = reqwest::blocking::Client::new();
    let result = auth::login(&http, &base_url, "alice", "hunter2");
    assert!(matches!(result, Err(ConsoleError::MissingField(f)) if f == "key"));
}
