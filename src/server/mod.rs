// Server module entry point
// Listener setup, connection handling, accept loop and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is renamed
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use http_body_util::{BodyExt, Full};
    use hyper::body::Bytes;
    use hyper::{Method, Request, StatusCode};
    use hyper_util::rt::TokioIo;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn roundtrip(
        addr: SocketAddr,
        method: Method,
        path: &str,
        form_body: &str,
    ) -> (StatusCode, hyper::HeaderMap, String) {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        tokio::spawn(conn);

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("host", addr.to_string())
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Full::new(Bytes::from(form_body.to_owned())))
            .unwrap();
        let resp = sender.send_request(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_submit_and_download_over_tcp() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = Config::load_from("definitely-missing-config-file").unwrap();
        cfg.storage.output_dir = tmp.path().join("generated").to_string_lossy().into_owned();
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::new(&cfg));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(start_server_loop(listener, state, async move {
            let _ = stop_rx.await;
        }));

        let (status, _, _) = roundtrip(addr, Method::GET, "/download", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, headers, _) = roundtrip(
            addr,
            Method::POST,
            "/",
            "prompt=hello&template_type=story",
        )
        .await;
        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(headers["location"], "/download");

        let (status, headers, body) = roundtrip(addr, Method::GET, "/download", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers["content-disposition"],
            "attachment; filename=\"prompt.txt\""
        );
        assert_eq!(body, "Prompt: hello\nType: story");

        stop_tx.send(()).unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_idle_keep_alive_connection_is_closed() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cfg = Config::load_from("definitely-missing-config-file").unwrap();
        cfg.storage.output_dir = tmp.path().join("generated").to_string_lossy().into_owned();
        cfg.logging.access_log = false;
        cfg.performance.keep_alive_timeout = 1;
        let state = Arc::new(AppState::new(&cfg));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(start_server_loop(listener, state, async move {
            let _ = stop_rx.await;
        }));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .unwrap();
        let conn = tokio::spawn(conn);

        let req = Request::builder()
            .uri("/healthz")
            .header("host", addr.to_string())
            .body(Full::new(Bytes::new()))
            .unwrap();
        let resp = sender.send_request(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        resp.into_body().collect().await.unwrap();

        // The client keeps its side open; the server hangs up after ~1s idle
        let closed = tokio::time::timeout(Duration::from_secs(10), conn).await;
        assert!(closed.is_ok());
        drop(sender);

        stop_tx.send(()).unwrap();
        server.await.unwrap();
    }
}
