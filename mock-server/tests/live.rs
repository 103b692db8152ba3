//! End-to-end tests against a server listening on a real socket.
//!
//! Each test starts its own server on an ephemeral port in a background
//! thread, then talks to it with ureq, or with a raw `TcpStream` where the
//! exact bytes on the wire matter.

use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;

use script_core::{HttpMethod, Responder, Script, ScriptError};

fn start(method: HttpMethod, script: &str) -> SocketAddr {
    let responder = Arc::new(Responder::new(method, script.parse().unwrap()));
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = mock_server::bind("127.0.0.1:0".parse().unwrap()).unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            mock_server::run(listener, responder).await
        });
    });

    rx.recv_timeout(Duration::from_secs(5)).unwrap()
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Send a raw request with `Connection: close` and return every byte the
/// server wrote before closing.
fn raw_exchange(addr: SocketAddr, method: &str, path: &str) -> std::io::Result<Vec<u8>> {
    let mut stream = TcpStream::connect(addr)?;
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    write!(
        stream,
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"
    )?;
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf)?;
    Ok(buf)
}

#[test]
fn delete_retry_scenario() {
    let addr = start(HttpMethod::Delete, "429,429,200");
    let agent = agent();
    let url = format!("http://{addr}/devices/abc");

    let statuses: Vec<u16> = (0..4)
        .map(|_| agent.delete(&url).call().unwrap().status().as_u16())
        .collect();
    assert_eq!(statuses, vec![429, 429, 200, 200]);
}

#[test]
fn post_register_flow() {
    let addr = start(HttpMethod::Post, "503,201");
    let agent = agent();
    let url = format!("http://{addr}/api/v1/register");

    let resp = agent.post(&url).send_empty().unwrap();
    assert_eq!(resp.status().as_u16(), 503);

    let mut resp = agent.post(&url).send_empty().unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );
    let body: serde_json::Value =
        serde_json::from_str(&resp.body_mut().read_to_string().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"claim_code": "TEST123"}));
}

#[test]
fn health_and_wrong_method_do_not_consume_script() {
    let addr = start(HttpMethod::Delete, "500,204");
    let agent = agent();

    let resp = agent.get(&format!("http://{addr}/health")).call().unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let resp = agent.get(&format!("http://{addr}/devices")).call().unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    let resp = agent.post(&format!("http://{addr}/devices")).send_empty().unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let url = format!("http://{addr}/devices");
    assert_eq!(agent.delete(&url).call().unwrap().status().as_u16(), 500);
    assert_eq!(agent.delete(&url).call().unwrap().status().as_u16(), 204);
}

#[test]
fn status_line_uses_catalog_reason() {
    let addr = start(HttpMethod::Get, "429,299");

    let first = String::from_utf8(raw_exchange(addr, "GET", "/poll").unwrap()).unwrap();
    assert!(first.starts_with("HTTP/1.1 429 Too Many Requests\r\n"), "{first}");

    let second = String::from_utf8(raw_exchange(addr, "GET", "/poll").unwrap()).unwrap();
    assert!(second.starts_with("HTTP/1.1 299 Unknown\r\n"), "{second}");
}

#[test]
fn informational_codes_cannot_be_scripted() {
    // hyper sends a 1xx final response as 500, so 1xx entries fail to parse.
    for entry in ["100", "150", "199"] {
        let err = entry.parse::<Script>().unwrap_err();
        assert!(matches!(err, ScriptError::OutOfRange(_)), "{entry}: {err}");
    }

    let addr = start(HttpMethod::Get, "200,299");
    let first = String::from_utf8(raw_exchange(addr, "GET", "/poll").unwrap()).unwrap();
    assert!(first.starts_with("HTTP/1.1 200 OK\r\n"), "{first}");
    let second = String::from_utf8(raw_exchange(addr, "GET", "/poll").unwrap()).unwrap();
    assert!(second.starts_with("HTTP/1.1 299 Unknown\r\n"), "{second}");
}

#[test]
fn terminate_writes_no_bytes() {
    let addr = start(HttpMethod::Get, "0,200");

    match raw_exchange(addr, "GET", "/poll") {
        Ok(bytes) => assert!(bytes.is_empty(), "got {:?}", String::from_utf8_lossy(&bytes)),
        Err(err) => assert!(
            matches!(
                err.kind(),
                ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted
            ),
            "unexpected error: {err}"
        ),
    }

    let resp = agent().get(&format!("http://{addr}/poll")).call().unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[test]
fn sticky_terminate_keeps_dropping() {
    let addr = start(HttpMethod::Post, "0");

    for _ in 0..3 {
        if let Ok(bytes) = raw_exchange(addr, "POST", "/register") {
            assert!(bytes.is_empty());
        }
    }
    let health = String::from_utf8(raw_exchange(addr, "GET", "/health").unwrap()).unwrap();
    assert!(health.starts_with("HTTP/1.1 200 OK\r\n"), "{health}");
}

#[test]
fn concurrent_requests_draw_each_entry_once() {
    let mut script = vec![500, 502, 503, 429, 401, 403, 400, 201];
    let addr = start(
        HttpMethod::Post,
        &script.iter().map(u16::to_string).collect::<Vec<_>>().join(","),
    );
    let barrier = Arc::new(Barrier::new(script.len()));

    let handles: Vec<_> = (0..script.len())
        .map(|_| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                let agent = agent();
                barrier.wait();
                agent
                    .post(&format!("http://{addr}/jobs"))
                    .send_empty()
                    .unwrap()
                    .status()
                    .as_u16()
            })
        })
        .collect();

    let mut observed: Vec<u16> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    observed.sort_unstable();
    script.sort_unstable();
    assert_eq!(observed, script);
}
