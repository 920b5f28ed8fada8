//! UseCase: 接続受付処理
//!
//! WebSocket 接続ごとにハンドルを払い出し、MessagePusher に送信チャンネルを登録します。
//! Room への参加はこの時点では行いません（join-room を待つ）。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel};

/// 接続受付のユースケース
pub struct ConnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を受け付け、新しいハンドルを返す
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let handle = ConnectionIdFactory::generate();
        self.message_pusher
            .register_client(handle.clone(), sender)
            .await;
        tracing::info!("Connection '{}' accepted", handle);
        handle
    }
}
