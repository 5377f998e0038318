//! Page-side endpoint of the cross-context message channel. Frames are
//! JSON text in both directions; replies are matched to pending requests
//! by correlation id, so independent calls may overlap without ordering
//! assumptions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};

use crate::core::error::CaptureError;
use crate::core::models::SurfaceId;
use crate::global_constants::LOG_TAG_BUS;
use crate::messaging::protocol::{
    FetchReply, FetchRequest, ProxyReply, ProxyRequest, RequestFrame, ResponseFrame,
};

pub struct PageSideChannel {
    pub outgoing: mpsc::Sender<String>,
    pub incoming: mpsc::Receiver<String>,
}

pub struct BackgroundSideChannel {
    pub incoming: mpsc::Receiver<String>,
    pub outgoing: mpsc::Sender<String>,
}

/// One logical channel per capturing surface.
pub fn create_channel_pair(capacity: usize) -> (PageSideChannel, BackgroundSideChannel) {
    let (request_tx, request_rx) = mpsc::channel(capacity);
    let (response_tx, response_rx) = mpsc::channel(capacity);

    (
        PageSideChannel {
            outgoing: request_tx,
            incoming: response_rx,
        },
        BackgroundSideChannel {
            incoming: request_rx,
            outgoing: response_tx,
        },
    )
}

type PendingReplies = Arc<Mutex<HashMap<u64, oneshot::Sender<ProxyReply>>>>;

/// Client handle the unprivileged context uses to reach the privileged
/// one. Every call sends one request frame and awaits exactly one reply.
/// There is deliberately no timeout on the wait; a hung privileged
/// operation holds the session open.
pub struct BackgroundProxy {
    surface: SurfaceId,
    outgoing: mpsc::Sender<String>,
    pending: PendingReplies,
    next_id: AtomicU64,
}

impl BackgroundProxy {
    pub fn connect(surface: SurfaceId, channel: PageSideChannel) -> Arc<Self> {
        let pending: PendingReplies = Arc::new(Mutex::new(HashMap::new()));

        let proxy = Arc::new(Self {
            surface,
            outgoing: channel.outgoing,
            pending: Arc::clone(&pending),
            next_id: AtomicU64::new(1),
        });

        tokio::spawn(dispatch_replies(channel.incoming, pending));

        proxy
    }

    pub async fn notify_started(&self) -> Result<(), CaptureError> {
        self.expect_ack(ProxyRequest::Started).await
    }

    pub async fn notify_finished(&self) -> Result<(), CaptureError> {
        self.expect_ack(ProxyRequest::Finished).await
    }

    pub async fn fetch(&self, request: FetchRequest) -> Result<FetchReply, CaptureError> {
        match self.request(ProxyRequest::Fetch(request)).await? {
            ProxyReply::Fetch(reply) => Ok(reply),
            ProxyReply::Error { error } => Err(CaptureError::Proxy(error)),
            other => Err(unexpected_reply(other)),
        }
    }

    pub async fn post_process(&self, markup: String) -> Result<String, CaptureError> {
        match self.request(ProxyRequest::PostProcess { markup }).await? {
            ProxyReply::PostProcess { markup } => Ok(markup),
            ProxyReply::Error { error } => Err(CaptureError::Proxy(error)),
            other => Err(unexpected_reply(other)),
        }
    }

    async fn expect_ack(&self, request: ProxyRequest) -> Result<(), CaptureError> {
        match self.request(request).await? {
            ProxyReply::Ack { .. } => Ok(()),
            ProxyReply::Error { error } => Err(CaptureError::Proxy(error)),
            other => Err(unexpected_reply(other)),
        }
    }

    async fn request(&self, request: ProxyRequest) -> Result<ProxyReply, CaptureError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let frame = RequestFrame {
            id,
            surface: self.surface,
            request,
        };

        let encoded = serde_json::to_string(&frame)
            .map_err(|error| CaptureError::Proxy(format!("failed to encode frame: {}", error)))?;

        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending
            .lock()
            .expect("pending reply table poisoned")
            .insert(id, reply_tx);

        log::debug!("{} -> frame {}: {}", LOG_TAG_BUS, id, encoded);

        if self.outgoing.send(encoded).await.is_err() {
            self.pending
                .lock()
                .expect("pending reply table poisoned")
                .remove(&id);
            return Err(CaptureError::Proxy(
                "background context is not reachable".to_string(),
            ));
        }

        reply_rx.await.map_err(|_| {
            CaptureError::Proxy("background context disconnected before replying".to_string())
        })
    }
}

async fn dispatch_replies(mut incoming: mpsc::Receiver<String>, pending: PendingReplies) {
    while let Some(encoded) = incoming.recv().await {
        let frame: ResponseFrame = match serde_json::from_str(&encoded) {
            Ok(frame) => frame,
            Err(error) => {
                log::error!("{} dropping unparseable reply: {}", LOG_TAG_BUS, error);
                continue;
            }
        };

        let waiter = pending
            .lock()
            .expect("pending reply table poisoned")
            .remove(&frame.id);

        match waiter {
            Some(reply_tx) => {
                let _ = reply_tx.send(frame.reply);
            }
            None => {
                log::warn!(
                    "{} reply {} has no pending request, dropping",
                    LOG_TAG_BUS,
                    frame.id
                );
            }
        }
    }

    log::debug!("{} response channel closed", LOG_TAG_BUS);
}

fn unexpected_reply(reply: ProxyReply) -> CaptureError {
    CaptureError::Proxy(format!("unexpected reply kind: {:?}", reply))
}
