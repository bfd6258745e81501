use crate::envelope::decode_frame;
use futures::StreamExt;
use mindflex_core::SocketEvent;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tracing::{debug, error, info, warn};

/// WebSocket client for the telemetry server.
///
/// One call to [`run_session`](Self::run_session) is one connection attempt:
/// it reports `Opened`, then the decoded frames, and always finishes with
/// `Closed`.  Reconnecting is the caller's decision.  Dropping the receiver
/// ends the session and closes the socket.
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    url: String,
}

impl TelemetryClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connect, stream events in delivery order, and return once the socket
    /// is closed or the receiver is gone.
    pub async fn run_session(&self, tx: mpsc::Sender<SocketEvent>) {
        // Receiver gone means nobody cares about the rest of the session.
        macro_rules! emit {
            ($event:expr) => {
                if tx.send($event).await.is_err() {
                    debug!("telemetry receiver dropped; ending session");
                    return;
                }
            };
        }

        let connected = tokio::select! {
            res = connect_async(self.url.as_str()) => res,
            () = tx.closed() => return,
        };

        let mut stream = match connected {
            Ok((stream, _response)) => stream,
            Err(e) => {
                error!(url = %self.url, error = %e, "cannot connect to telemetry server");
                emit!(SocketEvent::Error(e.to_string()));
                emit!(SocketEvent::Closed);
                return;
            }
        };

        info!(url = %self.url, "connected to telemetry server");
        emit!(SocketEvent::Opened);

        loop {
            let msg = tokio::select! {
                msg = stream.next() => msg,
                () = tx.closed() => {
                    debug!(url = %self.url, "telemetry receiver dropped; closing socket");
                    if let Err(e) = stream.close(None).await {
                        debug!(error = %e, "close handshake failed");
                    }
                    return;
                }
            };
            let Some(msg) = msg else { break };

            match msg {
                Ok(WsMessage::Text(text)) => match decode_frame(&text) {
                    Ok(frame) => {
                        if let Some(event) = frame.into_event() {
                            emit!(event);
                        }
                    }
                    Err(e) => warn!(error = %e, "discarding malformed telemetry frame"),
                },
                Ok(WsMessage::Binary(bytes)) => {
                    warn!(len = bytes.len(), "discarding binary telemetry frame");
                }
                Ok(WsMessage::Close(frame)) => {
                    let reason = frame
                        .map(|f| f.reason.to_string())
                        .unwrap_or_else(|| "none given".to_string());
                    info!(reason = %reason, "telemetry server closed the connection");
                    break;
                }
                Ok(_) => {} // ping / pong / raw frames
                Err(e) => {
                    error!(error = %e, "telemetry socket error");
                    emit!(SocketEvent::Error(e.to_string()));
                    break;
                }
            }
        }

        emit!(SocketEvent::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::SinkExt;
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn start(url: String) -> mpsc::Receiver<SocketEvent> {
        let (tx, rx) = mpsc::channel(32);
        let client = TelemetryClient::new(url);
        tokio::spawn(async move { client.run_session(tx).await });
        rx
    }

    async fn collect(mut rx: mpsc::Receiver<SocketEvent>) -> Vec<SocketEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn session_reports_frames_in_order() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
            for frame in [
                r#"{"event":"connect","data":"Connected"}"#,
                r#"{"event":"heartbeat"}"#,
                "{oops",
                r#"{"event":"data","data":{"attention":80,"meditation":20,"quality":0,"eeg":[5]}}"#,
            ] {
                ws.send(WsMessage::Text(frame.to_string())).await.unwrap();
            }
            ws.close(None).await.unwrap();
        });

        let rx = start(format!("ws://{addr}"));
        let events = collect(rx).await;
        server.await.unwrap();

        assert_eq!(events.len(), 4, "{events:?}");
        assert_eq!(events[0], SocketEvent::Opened);
        assert_eq!(events[1], SocketEvent::Greeting);
        let SocketEvent::Sample(sample) = &events[2] else {
            panic!("expected a sample, got {:?}", events[2]);
        };
        assert_eq!(sample.attention, Some(80.0));
        assert_eq!(sample.eeg, Some(vec![5.0]));
        assert_eq!(events[3], SocketEvent::Closed);
    }

    #[tokio::test]
    async fn refused_connection_reports_error_then_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let events = collect(start(format!("ws://{addr}"))).await;

        assert_eq!(events.len(), 2, "{events:?}");
        assert!(matches!(events[0], SocketEvent::Error(_)));
        assert_eq!(events[1], SocketEvent::Closed);
    }

    #[tokio::test]
    async fn dropping_the_receiver_closes_the_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Silent server: only reports how the client left.
        let server = tokio::spawn(async move {
            let (tcp, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();
            tokio::time::timeout(Duration::from_secs(3), ws.next()).await
        });

        let (tx, mut rx) = mpsc::channel(4);
        let client = TelemetryClient::new(format!("ws://{addr}"));
        let session = tokio::spawn(async move { client.run_session(tx).await });

        assert_eq!(rx.recv().await, Some(SocketEvent::Opened));
        drop(rx);

        let seen = server.await.unwrap().expect("client left the socket open");
        assert!(
            matches!(seen, None | Some(Ok(WsMessage::Close(_))) | Some(Err(_))),
            "unexpected frame {seen:?}"
        );
        tokio::time::timeout(Duration::from_secs(3), session)
            .await
            .expect("session did not finish")
            .unwrap();
    }
}
