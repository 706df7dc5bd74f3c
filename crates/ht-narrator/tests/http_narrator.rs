//! Exercises `HttpNarrator` against a throwaway local HTTP server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ht_narrator::{ApiFlavor, HttpNarrator, Narrator, NarratorConfig, NarratorError, Prompt};

/// A canned reply: status line and body.
struct Reply {
    status: &'static str,
    content_type: &'static str,
    body: String,
}

impl Reply {
    fn json(body: &str) -> Self {
        Self {
            status: "200 OK",
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    fn status(status: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

/// A request as seen by the server.
struct Seen {
    headers: Vec<String>,
    body: String,
}

/// Serve `replies` one connection each, then return the requests seen.
fn serve(replies: Vec<Reply>) -> (String, JoinHandle<Vec<Seen>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/generate", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for reply in replies {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut content_length = 0;
            let mut headers = Vec::new();
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(len) = lower.strip_prefix("content-length:") {
                    content_length = len.trim().parse().unwrap();
                }
                headers.push(line.to_string());
            }
            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();
            seen.push(Seen {
                headers,
                body: String::from_utf8(body).unwrap(),
            });

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                reply.status,
                reply.content_type,
                reply.body.len(),
                reply.body
            )
            .unwrap();
            stream.flush().unwrap();
        }
        seen
    });
    (url, handle)
}

fn config(url: &str) -> NarratorConfig {
    NarratorConfig::new()
        .with_endpoint(url)
        .with_initial_backoff(Duration::ZERO)
        .with_timeout(Duration::from_secs(10))
}

fn prompt() -> Prompt {
    Prompt::new("You are a Dungeon Master.", "Player: I look around.\nDM:")
}

#[test]
fn single_response() {
    let (url, server) = serve(vec![Reply::json(
        r#"{"response":"Moss covers the walls.","done":true}"#,
    )]);
    let mut narrator = HttpNarrator::new(config(&url).with_stream(false)).unwrap();

    let mut seen = String::new();
    let text = narrator
        .narrate(&prompt(), &mut |t| seen.push_str(t))
        .unwrap();
    assert_eq!(text, "Moss covers the walls.");
    assert_eq!(seen, text);

    let requests = server.join().unwrap();
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent["model"], "llama3.2:3b");
    assert_eq!(sent["system"], "You are a Dungeon Master.");
    assert_eq!(sent["stream"], false);
}

#[test]
fn streamed_ndjson() {
    let body = [
        r#"{"response":"A ","done":false}"#,
        r#"{"response":"goblin ","done":false}"#,
        "not json",
        r#"{"response":"snarls.","done":false}"#,
        r#"{"response":"","done":true,"done_reason":"stop"}"#,
        r#"{"response":"ignored","done":false}"#,
    ]
    .join("\n");
    let (url, server) = serve(vec![Reply::json(&body)]);
    let mut narrator = HttpNarrator::new(config(&url)).unwrap();

    let mut fragments = Vec::new();
    let text = narrator
        .narrate(&prompt(), &mut |t| fragments.push(t.to_string()))
        .unwrap();
    assert_eq!(text, "A goblin snarls.");
    assert_eq!(fragments, ["A ", "goblin ", "snarls."]);
    server.join().unwrap();
}

#[test]
fn retries_after_server_error() {
    let (url, server) = serve(vec![
        Reply::status("500 Internal Server Error", "boom"),
        Reply::json(r#"{"response":"Second time lucky.","done":true}"#),
    ]);
    let mut narrator = HttpNarrator::new(config(&url).with_stream(false)).unwrap();

    let text = narrator.narrate(&prompt(), &mut |_| {}).unwrap();
    assert_eq!(text, "Second time lucky.");
    assert_eq!(server.join().unwrap().len(), 2);
}

#[test]
fn retries_while_model_loads() {
    let (url, server) = serve(vec![
        Reply::json(r#"{"response":"","done":true,"done_reason":"load"}"#),
        Reply::json(r#"{"response":"Ready.","done":true}"#),
    ]);
    let mut narrator = HttpNarrator::new(config(&url).with_stream(false)).unwrap();
    assert_eq!(narrator.narrate(&prompt(), &mut |_| {}).unwrap(), "Ready.");
    server.join().unwrap();
}

#[test]
fn no_retry_on_client_error() {
    let (url, server) = serve(vec![Reply::status("400 Bad Request", "model not found")]);
    let mut narrator = HttpNarrator::new(config(&url)).unwrap();

    let err = narrator.narrate(&prompt(), &mut |_| {}).unwrap_err();
    match err {
        NarratorError::Status { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, "model not found");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(server.join().unwrap().len(), 1);
}

#[test]
fn gives_up_after_max_attempts() {
    let (url, server) = serve(vec![
        Reply::status("503 Service Unavailable", ""),
        Reply::status("503 Service Unavailable", ""),
    ]);
    let mut narrator = HttpNarrator::new(config(&url).with_max_attempts(2)).unwrap();

    let err = narrator.narrate(&prompt(), &mut |_| {}).unwrap_err();
    assert!(matches!(
        err,
        NarratorError::RetriesExhausted { attempts: 2, .. }
    ));
    server.join().unwrap();
}

#[test]
fn chat_completions_with_bearer_key() {
    let body = [
        r#"data: {"choices":[{"delta":{"content":"Roll "}}]}"#,
        "",
        r#"data: {"choices":[{"delta":{"content":"a d20."},"finish_reason":"stop"}]}"#,
        "",
        "data: [DONE]",
    ]
    .join("\n");
    let (url, server) = serve(vec![Reply::json(&body)]);
    let mut narrator = HttpNarrator::new(
        config(&url)
            .with_flavor(ApiFlavor::ChatCompletions)
            .with_api_key("sk-test"),
    )
    .unwrap();

    let text = narrator.narrate(&prompt(), &mut |_| {}).unwrap();
    assert_eq!(text, "Roll a d20.");

    let requests = server.join().unwrap();
    assert!(
        requests[0]
            .headers
            .iter()
            .any(|h| h.eq_ignore_ascii_case("authorization: Bearer sk-test"))
    );
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent["stream"], true);
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(sent["messages"][1]["content"], "Player: I look around.\nDM:");
}

#[test]
fn unreachable_endpoint_is_exhausted() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/generate", listener.local_addr().unwrap());
    drop(listener);

    let mut narrator = HttpNarrator::new(config(&url).with_max_attempts(2)).unwrap();
    let err = narrator.narrate(&prompt(), &mut |_| {}).unwrap_err();
    assert!(matches!(
        err,
        NarratorError::RetriesExhausted { attempts: 2, .. }
    ));
}
