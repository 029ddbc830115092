//! TCP line bridge: one task per connection, turning socket lines into
//! [`EngineEvent`]s and [`Delivery`]s back into socket writes.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::runtime::{Delivery, EngineEvent};

/// Accepts connections forever, handing each to its own task.
///
/// # Errors
///
/// Returns `AppError::Server` if accepting fails.
pub async fn serve_lines(
    listener: TcpListener,
    events: mpsc::Sender<EngineEvent>,
) -> Result<(), AppError> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let events = events.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer, events).await {
                warn!(peer = %peer, err = %e, "connection ended with error");
            }
        });
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    events: mpsc::Sender<EngineEvent>,
) -> Result<(), AppError> {
    let _ = stream.set_nodelay(true);
    let (rd, mut wr) = stream.into_split();

    let (writer_tx, mut writer_rx) = mpsc::unbounded_channel::<Delivery>();
    let (reply_tx, reply_rx) = oneshot::channel();
    events
        .send(EngineEvent::Opened {
            writer: writer_tx,
            reply: reply_tx,
        })
        .await
        .map_err(|_| AppError::EngineStopped)?;
    let session = reply_rx.await.map_err(|_| AppError::EngineStopped)?;
    info!(peer = %peer, session = %session, "connection opened");

    // Flips to true once the writer is done, so the reader stops too.
    let (closed_tx, mut closed_rx) = watch::channel(false);
    let writer = tokio::spawn(async move {
        while let Some(delivery) = writer_rx.recv().await {
            match delivery {
                Delivery::Line(text) => {
                    let mut bytes = text.into_bytes();
                    bytes.extend_from_slice(b"\r\n");
                    if wr.write_all(&bytes).await.is_err() {
                        break;
                    }
                }
                Delivery::Close => break,
            }
        }
        let _ = wr.shutdown().await;
        let _ = closed_tx.send(true);
    });

    let mut lines = BufReader::new(rd).lines();
    let outcome = loop {
        let next = tokio::select! {
            line = lines.next_line() => line,
            _ = closed_rx.changed() => Ok(None),
        };
        match next {
            Ok(Some(text)) => {
                let text = text.trim_end_matches('\r').to_string();
                if events
                    .send(EngineEvent::Line { session, text })
                    .await
                    .is_err()
                {
                    break Err(AppError::EngineStopped);
                }
            }
            Ok(None) => break Ok(()),
            Err(e) => break Err(AppError::Server(e)),
        }
    };

    let _ = events.send(EngineEvent::Closed { session }).await;
    writer.abort();
    debug!(peer = %peer, session = %session, "connection closed");
    outcome
}
