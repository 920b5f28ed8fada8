//! UseCase: offer / answer / ice-candidate の中継
//!
//! Room を参照せず、宛先の接続ハンドルだけで 1 対 1 に転送します。
//! 宛先が既に切断済みなら何も返さずに破棄します（fire-and-forget）。

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Signal},
    infrastructure::dto::websocket::ServerEvent,
};

use super::error::RelayError;

/// シグナル中継のユースケース
pub struct RelaySignalUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// `from` から `to` へシグナルを転送する
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 宛先の送信キューに積んだ
    /// * `Err(RelayError)` - 宛先が不正または未接続（送信元には何も通知しない）
    pub async fn execute(
        &self,
        from: &ConnectionId,
        to: String,
        signal: Signal,
    ) -> Result<(), RelayError> {
        let kind = signal.kind();
        let target = ConnectionId::new(to).map_err(|e| RelayError::InvalidTarget(e.to_string()))?;

        let json = ServerEvent::relayed(from, signal).to_json()?;
        self.message_pusher
            .push_to(&target, &json)
            .await
            .map_err(|e| match e {
                MessagePushError::ClientNotFound(handle) => RelayError::TargetNotConnected(handle),
                MessagePushError::PushFailed(_) => {
                    RelayError::TargetNotConnected(target.as_str().to_string())
                }
            })?;

        tracing::debug!("Relayed {} from '{}' to '{}'", kind, from, target);
        Ok(())
    }
}
