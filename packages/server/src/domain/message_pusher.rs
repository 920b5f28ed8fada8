//! MessagePusher trait 定義
//!
//! 接続中のクライアントへメッセージを届けるためのインターフェースです。
//! 送信はすべて fire-and-forget で、キューイングや再送は行いません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// Outbound channel of one connection
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録する
    async fn register_client(&self, handle: ConnectionId, sender: PusherChannel);

    /// 接続の登録を解除する
    async fn unregister_client(&self, handle: &ConnectionId);

    /// 特定の接続にメッセージを送る
    async fn push_to(&self, handle: &ConnectionId, content: &str) -> Result<(), MessagePushError>;

    /// 複数の接続にメッセージを送る（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
