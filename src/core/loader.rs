//! Single-flight loader.
//!
//! Each key has at most one live request. Issuing `load` for a key that is
//! already requesting cancels the predecessor and mints a new token; when the
//! predecessor's result eventually arrives its token no longer matches and it
//! is dropped without reaching any consumer.
//!
//! Fetches run on tokio worker tasks. Their results come back through an
//! mpsc channel and are only compared and applied when the owner calls
//! [`SingleFlightLoader::pump`] on the primary context.

use crate::core::transport::{CancelHandle, FetchOutcome, TransportClient};
use crate::domain::model::RawPayload;
use crate::domain::ports::{Target, Transport};
use crate::utils::error::{DecodeError, LoadError};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RequestToken(u64);

/// `load()` 呼叫者最終收到的狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Published,
    Superseded,
    Abandoned,
}

type TicketResult = Result<LoadStatus, LoadError>;

/// 單次 `load()` 的完成訊號
#[derive(Debug)]
pub struct LoadTicket {
    receiver: oneshot::Receiver<TicketResult>,
}

impl LoadTicket {
    /// 等待結果。只有在擁有者持續呼叫 `pump` 時才會完成。
    pub async fn wait(self) -> TicketResult {
        self.receiver.await.unwrap_or(Ok(LoadStatus::Abandoned))
    }

    /// 不阻塞地查看結果；尚未完成時回傳 `None`
    pub fn try_status(&mut self) -> Option<TicketResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Ok(LoadStatus::Abandoned)),
        }
    }
}

/// `pump` 處理一筆完成事件後的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<K> {
    Published(K),
    Failed(K),
    Discarded(K),
}

struct InFlight {
    token: RequestToken,
    cancel: CancelHandle,
    ticket: oneshot::Sender<TicketResult>,
}

struct Completion<K> {
    key: K,
    token: RequestToken,
    outcome: FetchOutcome,
}

pub struct SingleFlightLoader<K> {
    client: TransportClient,
    generation: u64,
    in_flight: HashMap<K, InFlight>,
    completions_tx: mpsc::UnboundedSender<Completion<K>>,
    completions_rx: mpsc::UnboundedReceiver<Completion<K>>,
}

impl<K> SingleFlightLoader<K>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
{
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            client: TransportClient::new(transport),
            generation: 0,
            in_flight: HashMap::new(),
            completions_tx,
            completions_rx,
        }
    }

    pub fn is_loading(&self, key: &K) -> bool {
        self.in_flight.contains_key(key)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// 發出新的請求；同一個 key 上仍在進行的請求會被取消並作廢
    pub fn load(&mut self, key: K, target: Target) -> LoadTicket {
        self.generation += 1;
        let token = RequestToken(self.generation);

        if let Some(previous) = self.in_flight.remove(&key) {
            tracing::debug!(
                "⏭️ {:?}: superseding request #{} with #{}",
                key,
                previous.token.0,
                token.0
            );
            previous.cancel.cancel();
            let _ = previous.ticket.send(Ok(LoadStatus::Superseded));
        } else {
            tracing::debug!("🚀 {:?}: starting request #{}", key, token.0);
        }

        let (pending, cancel) = self.client.fetch(target);
        let completions = self.completions_tx.clone();
        let task_key = key.clone();
        tokio::spawn(async move {
            let outcome = pending.await;
            let _ = completions.send(Completion {
                key: task_key,
                token,
                outcome,
            });
        });

        let (ticket, receiver) = oneshot::channel();
        self.in_flight.insert(
            key,
            InFlight {
                token,
                cancel,
                ticket,
            },
        );

        LoadTicket { receiver }
    }

    /// 放棄某個 key 的請求，不通知任何消費者
    pub fn abandon(&mut self, key: &K) -> bool {
        match self.in_flight.remove(key) {
            Some(flight) => {
                tracing::debug!("🛑 {:?}: abandoning request #{}", key, flight.token.0);
                flight.cancel.cancel();
                let _ = flight.ticket.send(Ok(LoadStatus::Abandoned));
                true
            }
            None => false,
        }
    }

    /// 等待下一筆完成事件並在呼叫端的執行環境中處理它。
    ///
    /// `deliver` 只會在 token 仍有效且取得 payload 時被呼叫，負責解碼、轉換與發佈。
    pub async fn pump<F>(&mut self, deliver: F) -> Option<Settled<K>>
    where
        F: FnOnce(&K, RawPayload) -> Result<(), DecodeError>,
    {
        let completion = self.completions_rx.recv().await?;
        Some(self.resolve(completion, deliver))
    }

    fn resolve<F>(&mut self, completion: Completion<K>, deliver: F) -> Settled<K>
    where
        F: FnOnce(&K, RawPayload) -> Result<(), DecodeError>,
    {
        let Completion {
            key,
            token,
            outcome,
        } = completion;

        let flight = match self.in_flight.entry(key.clone()) {
            Entry::Occupied(entry) if entry.get().token == token => entry.remove(),
            _ => {
                tracing::debug!("🗑️ {:?}: discarding stale result of #{}", key, token.0);
                return Settled::Discarded(key);
            }
        };

        match outcome {
            FetchOutcome::Payload(payload) => {
                tracing::debug!("📦 {:?}: #{} returned {} bytes", key, token.0, payload.len());
                match deliver(&key, payload) {
                    Ok(()) => {
                        let _ = flight.ticket.send(Ok(LoadStatus::Published));
                        Settled::Published(key)
                    }
                    Err(e) => {
                        tracing::warn!("⚠️ {:?}: decode failed: {}", key, e);
                        let _ = flight.ticket.send(Err(LoadError::Decode(e)));
                        Settled::Failed(key)
                    }
                }
            }
            FetchOutcome::Failed(e) => {
                tracing::warn!("⚠️ {:?}: transport failed: {}", key, e);
                let _ = flight.ticket.send(Err(LoadError::Transport(e)));
                Settled::Failed(key)
            }
            FetchOutcome::Cancelled => {
                let _ = flight.ticket.send(Ok(LoadStatus::Abandoned));
                Settled::Discarded(key)
            }
        }
    }

    /// 持續處理完成事件，直到沒有進行中的請求
    pub async fn settle<F>(&mut self, mut deliver: F) -> Vec<Settled<K>>
    where
        F: FnMut(&K, RawPayload) -> Result<(), DecodeError>,
    {
        let mut settled = Vec::new();
        while !self.in_flight.is_empty() {
            match self.pump(&mut deliver).await {
                Some(outcome) => settled.push(outcome),
                None => break,
            }
        }
        settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::TransportError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Hanging;

    #[async_trait]
    impl Transport for Hanging {
        async fn fetch(&self, _target: &Target) -> Result<RawPayload, TransportError> {
            std::future::pending().await
        }
    }

    struct Fails;

    #[async_trait]
    impl Transport for Fails {
        async fn fetch(&self, target: &Target) -> Result<RawPayload, TransportError> {
            Err(TransportError::Status {
                status: 404,
                url: target.url(),
            })
        }
    }

    struct Echo;

    #[async_trait]
    impl Transport for Echo {
        async fn fetch(&self, target: &Target) -> Result<RawPayload, TransportError> {
            Ok(RawPayload::new(target.path.clone()))
        }
    }

    fn target(path: &str) -> Target {
        Target {
            base_url: "http://localhost".to_string(),
            path: path.to_string(),
            headers: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_stale_payload_is_discarded() {
        let mut loader = SingleFlightLoader::new(Arc::new(Hanging));
        let _first = loader.load("users", target("/users"));
        let mut second = loader.load("users", target("/users"));

        // 模擬第一個請求在被取代之後才成功回來
        let delivered = Mutex::new(Vec::new());
        let outcome = loader.resolve(
            Completion {
                key: "users",
                token: RequestToken(1),
                outcome: FetchOutcome::Payload(RawPayload::new("P1")),
            },
            |_, payload| {
                delivered.lock().unwrap().push(payload);
                Ok(())
            },
        );

        assert_eq!(outcome, Settled::Discarded("users"));
        assert!(delivered.lock().unwrap().is_empty());
        assert!(loader.is_loading(&"users"));
        assert!(second.try_status().is_none());

        let outcome = loader.resolve(
            Completion {
                key: "users",
                token: RequestToken(2),
                outcome: FetchOutcome::Payload(RawPayload::new("P2")),
            },
            |_, payload| {
                delivered.lock().unwrap().push(payload);
                Ok(())
            },
        );

        assert_eq!(outcome, Settled::Published("users"));
        assert_eq!(*delivered.lock().unwrap(), vec![RawPayload::new("P2")]);
        assert!(!loader.is_loading(&"users"));
        assert!(matches!(second.try_status(), Some(Ok(LoadStatus::Published))));
    }

    #[tokio::test]
    async fn test_superseded_ticket_resolves_immediately() {
        let mut loader = SingleFlightLoader::new(Arc::new(Hanging));
        let first = loader.load("users", target("/users"));
        let _second = loader.load("users", target("/users"));

        assert!(matches!(first.wait().await, Ok(LoadStatus::Superseded)));
        assert_eq!(loader.in_flight(), 1);
    }

    #[tokio::test]
    async fn test_ticket_wait_pending_until_resolved() {
        let mut loader = SingleFlightLoader::new(Arc::new(Hanging));
        let ticket = loader.load("users", target("/users"));
        let mut wait = tokio_test::task::spawn(ticket.wait());

        tokio_test::assert_pending!(wait.poll());

        loader.abandon(&"users");
        assert!(wait.is_woken());
        let result = tokio_test::assert_ready!(wait.poll());
        assert!(matches!(result, Ok(LoadStatus::Abandoned)));
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_cancelled_and_discarded() {
        let mut loader = SingleFlightLoader::new(Arc::new(Hanging));
        let _first = loader.load("users", target("/users"));
        let _second = loader.load("users", target("/users"));

        // 被取消的第一個請求仍會回報，但 token 已失效
        let outcome = loader.pump(|_, _| Ok(())).await;
        assert_eq!(outcome, Some(Settled::Discarded("users")));
        assert!(loader.is_loading(&"users"));
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_supersede() {
        let mut loader = SingleFlightLoader::new(Arc::new(Echo));
        let users = loader.load("users", target("/users"));
        let posts = loader.load("posts", target("/posts"));
        assert_eq!(loader.in_flight(), 2);

        let mut seen = Vec::new();
        let settled = loader
            .settle(|key, payload| {
                seen.push((*key, payload));
                Ok(())
            })
            .await;

        assert_eq!(settled.len(), 2);
        seen.sort_by_key(|(key, _)| *key);
        assert_eq!(
            seen,
            vec![
                ("posts", RawPayload::new("/posts")),
                ("users", RawPayload::new("/users"))
            ]
        );
        assert!(matches!(users.wait().await, Ok(LoadStatus::Published)));
        assert!(matches!(posts.wait().await, Ok(LoadStatus::Published)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported_and_loader_recovers() {
        let mut loader = SingleFlightLoader::new(Arc::new(Fails));
        let ticket = loader.load("users", target("/users"));

        let outcome = loader.pump(|_, _| Ok(())).await;
        assert_eq!(outcome, Some(Settled::Failed("users")));
        assert!(matches!(
            ticket.wait().await,
            Err(LoadError::Transport(TransportError::Status { status: 404, .. }))
        ));
        assert!(!loader.is_loading(&"users"));

        let _again = loader.load("users", target("/users"));
        assert!(loader.is_loading(&"users"));
    }

    #[tokio::test]
    async fn test_decode_failure_is_reported() {
        let mut loader = SingleFlightLoader::new(Arc::new(Echo));
        let ticket = loader.load("users", target("/users"));

        let outcome = loader.pump(|_, _| Err(DecodeError::Empty)).await;
        assert_eq!(outcome, Some(Settled::Failed("users")));
        assert!(matches!(
            ticket.wait().await,
            Err(LoadError::Decode(DecodeError::Empty))
        ));
    }

    #[tokio::test]
    async fn test_abandon_cancels_without_delivery() {
        let mut loader = SingleFlightLoader::new(Arc::new(Hanging));
        let ticket = loader.load("users", target("/users"));

        assert!(loader.abandon(&"users"));
        assert!(!loader.abandon(&"users"));
        assert!(matches!(ticket.wait().await, Ok(LoadStatus::Abandoned)));

        let outcome = loader.pump(|_, _| panic!("abandoned load delivered")).await;
        assert_eq!(outcome, Some(Settled::Discarded("users")));
    }
}
