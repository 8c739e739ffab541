use crate::domain::model::RawPayload;
use crate::domain::ports::{Target, Transport};
use crate::utils::error::TransportError;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;

/// 一次 fetch 的最終結果。取消也是一種結果：傳輸層一定會回應。
#[derive(Debug)]
pub enum FetchOutcome {
    Payload(RawPayload),
    Failed(TransportError),
    Cancelled,
}

/// 取消只是建議性的；已完成的 fetch 不受影響
#[derive(Debug)]
pub struct CancelHandle {
    signal: Option<oneshot::Sender<()>>,
}

impl CancelHandle {
    pub fn cancel(mut self) {
        if let Some(signal) = self.signal.take() {
            let _ = signal.send(());
        }
    }
}

/// 將 [`Transport`] 包裝成可取消的 fetch
#[derive(Clone)]
pub struct TransportClient {
    transport: Arc<dyn Transport>,
}

impl TransportClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// 回傳尚未啟動的 future 與其取消憑證。
    ///
    /// 取消訊號與 fetch 競速；憑證被丟棄也視為取消。
    pub fn fetch(
        &self,
        target: Target,
    ) -> (impl Future<Output = FetchOutcome> + Send + 'static, CancelHandle) {
        let transport = Arc::clone(&self.transport);
        let (signal, cancelled) = oneshot::channel::<()>();

        let pending = async move {
            tokio::select! {
                biased;
                _ = cancelled => {
                    tracing::debug!("Fetch of {} cancelled", target.url());
                    FetchOutcome::Cancelled
                }
                result = transport.fetch(&target) => match result {
                    Ok(payload) => FetchOutcome::Payload(payload),
                    Err(e) => FetchOutcome::Failed(e),
                },
            }
        };

        (
            pending,
            CancelHandle {
                signal: Some(signal),
            },
        )
    }
}
