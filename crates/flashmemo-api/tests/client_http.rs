//! Runs `ApiClient` against a local HTTP responder.

use flashmemo_api::{ApiClient, ApiError, DeckAnswer, NewFlashcard};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// A request as seen on the wire.
struct Captured {
    head: String,
    body: String,
}

impl Captured {
    fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().to_string())
        })
    }

    fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }
}

/// Serve each canned `(status, body)` response to one connection, in order.
async fn serve(responses: Vec<(u16, &'static str)>) -> (Url, JoinHandle<Vec<Captured>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut captured = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            captured.push(read_request(&mut stream).await);

            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }
        captured
    });

    (Url::parse(&format!("http://{addr}")).unwrap(), handle)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let head = text[..end].to_string();
            let length = head
                .lines()
                .find_map(|line| {
                    let (key, value) = line.split_once(':')?;
                    key.trim()
                        .eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                let body = String::from_utf8_lossy(&buf[end + 4..end + 4 + length]).to_string();
                return Captured { head, body };
            }
        }
    }
    Captured {
        head: String::from_utf8_lossy(&buf).to_string(),
        body: String::new(),
    }
}

fn client(base: Url) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn sign_in_posts_credentials_without_authorization() {
    let (base, server) = serve(vec![(
        200,
        r#"{"user":{"id":"u1","name":"Ann"},"access_token":"tok1"}"#,
    )])
    .await;
    let api = client(base);

    let session = api.sign_in("ann@example.com", "pw").await.unwrap();
    assert_eq!(session.user.id, "u1");
    assert_eq!(session.access_token, "tok1");

    let requests = server.await.unwrap();
    assert!(requests[0].request_line().starts_with("POST /sign-in "));
    assert_eq!(requests[0].header("authorization"), None);
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"email": "ann@example.com", "password": "pw"})
    );
}

#[tokio::test]
async fn attached_token_is_sent_and_detached_token_is_not() {
    let (base, server) = serve(vec![
        (200, r#"{"collections":[{"id":"c1","name":"Spanish"}]}"#),
        (200, r#"{"collections":[]}"#),
    ])
    .await;
    let api = client(base);

    api.attach_token("tok1");
    let collections = api.list_collections().await.unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].name, "Spanish");

    api.detach_token();
    assert!(api.list_collections().await.unwrap().is_empty());

    let requests = server.await.unwrap();
    assert_eq!(
        requests[0].header("authorization").as_deref(),
        Some("Bearer tok1")
    );
    assert_eq!(requests[1].header("authorization"), None);
}

#[tokio::test]
async fn non_success_status_carries_backend_message() {
    let (base, server) = serve(vec![(401, r#"{"message":"Invalid credentials"}"#)]).await;
    let api = client(base);

    let err = api.sign_in("ann@example.com", "wrong").await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_reason() {
    let (base, server) = serve(vec![(500, "oops")]).await;
    let api = client(base);

    let err = api.list_decks().await.unwrap_err();
    assert!(err.is_transient());
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn sign_in_without_token_is_missing_field() {
    let (base, server) = serve(vec![(200, r#"{"user":{"id":"u1","name":"Ann"}}"#)]).await;
    let api = client(base);

    let err = api.sign_in("ann@example.com", "pw").await.unwrap_err();
    assert!(matches!(err, ApiError::MissingField("access_token")));
    server.await.unwrap();
}

#[tokio::test]
async fn find_deck_sends_deck_id_header() {
    let (base, server) = serve(vec![(
        200,
        r#"{"deck":{"id":"d1","collection":{"id":"c1"},"flashcards":[{"id":"f1","front":"hola","responses":[{"id":"r1","text":"hello"},{"id":"r2","text":"bye"}]}]}}"#,
    )])
    .await;
    let api = client(base);
    api.attach_token("tok1");

    let deck = api.find_deck("d1").await.unwrap();
    assert_eq!(deck.flashcards.len(), 1);
    assert_eq!(deck.flashcards[0].responses.len(), 2);

    let requests = server.await.unwrap();
    assert!(requests[0].request_line().starts_with("GET /decks/find "));
    assert_eq!(requests[0].header("deck_id").as_deref(), Some("d1"));
}

#[tokio::test]
async fn answer_deck_submits_every_answer_and_tallies() {
    let (base, server) = serve(vec![(
        200,
        r#"{"deck":{"flashcards":[{"isWinner":true},{"isWinner":false},{"isWinner":true}]}}"#,
    )])
    .await;
    let api = client(base);
    api.attach_token("tok1");

    let answers = vec![
        DeckAnswer::new("f1", "r1"),
        DeckAnswer::new("f2", "r4"),
        DeckAnswer::new("f3", "r7"),
    ];
    let summary = api.answer_deck("d1", &answers).await.unwrap();
    assert_eq!(summary.winners, 2);
    assert_eq!(summary.losers, 1);

    let requests = server.await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["deck"]["id"], "d1");
    assert_eq!(body["deck"]["flashcards"].as_array().unwrap().len(), 3);
    assert_eq!(body["deck"]["flashcards"][2]["responseId"], "r7");
}

#[tokio::test]
async fn create_flashcard_marks_first_response_correct() {
    let (base, server) = serve(vec![(201, "{}")]).await;
    let api = client(base);
    api.attach_token("tok1");

    let card = NewFlashcard::new("2 + 2", "4", vec!["5".into()]);
    api.create_flashcard("c1", &card).await.unwrap();

    let requests = server.await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["collection"]["id"], "c1");
    assert_eq!(
        body["flashcard"]["responses"],
        serde_json::json!([
            {"text": "4", "isCorrect": true},
            {"text": "5", "isCorrect": false}
        ])
    );
}
