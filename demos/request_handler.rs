//! Request-handler demo.
//!
//! A responder registered at startup answers every `"ping"` in namespace
//! `"Test"` with a deferred `"pong"`. Each simulated request builds its own
//! listener, collects `"pong"` payloads, dispatches `"ping"` and checks the
//! collected list after 100ms, the way a script would with `setTimeout`.
//!
//! Run with:
//! ```text
//! RUST_LOG=trace cargo run --example request_handler --features logging
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use globalbus::{BusError, Event, GlobalEventListener, HandlerError, LogHandler};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Stand-in for the connection a request handler writes to.
struct Client {
    id: usize,
    mime_type: &'static str,
}

impl Client {
    fn send(&self, payload: &str) {
        info!(client = self.id, mime = self.mime_type, "send: {payload}");
    }

    fn disconnect(&self) {
        info!(client = self.id, "disconnect");
    }
}

/// Answers `"ping"` with a `"pong"` dispatched shortly afterwards.
fn install_responder() -> Result<(), BusError> {
    let responder = GlobalEventListener::new("Test", "Responder")?;
    let replier = responder.clone();
    responder.on("ping", move |e: &Event| {
        let replier = replier.clone();
        let data = e.data.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            if let Err(err) = replier.global_dispatch("pong", data) {
                warn!(error = %err, "pong dispatch failed");
            }
        });
        Ok::<_, HandlerError>(())
    })?;
    responder.add_event_listener("pong", Arc::new(LogHandler))?;
    Ok(())
}

fn on_request(mut client: Client) {
    let result = (|| -> Result<Arc<Mutex<Vec<String>>>, BusError> {
        let g = GlobalEventListener::new("Test", "GlobalEventListenerTest")?;
        let list = Arc::new(Mutex::new(Vec::new()));
        client.mime_type = "text/plain";

        let sink = Arc::clone(&list);
        g.on("pong", move |e: &Event| {
            if let Ok(mut list) = sink.lock() {
                list.push(e.data.to_string());
            }
            Ok::<_, HandlerError>(())
        })?;

        info!("Dispatching");
        g.global_dispatch("ping", format!("test-{}", client.id))?;
        info!("Done");
        Ok(list)
    })();

    match result {
        Ok(list) => {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                let body = match list.lock() {
                    Ok(list) if list.is_empty() => "FAIL: no responses".to_string(),
                    Ok(list) => list.join("\n"),
                    Err(_) => "FAIL: poisoned".to_string(),
                };
                client.send(&body);
                client.disconnect();
            });
        }
        Err(err) => {
            client.send(&format!("FAIL: {err}"));
            client.disconnect();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BusError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    install_responder()?;

    // Two independent requests; the second still sees the first one's listener.
    for id in 1..=2 {
        on_request(Client {
            id,
            mime_type: "text/html",
        });
        tokio::time::sleep(Duration::from_millis(150)).await;
    }
    Ok(())
}
