//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断したハンドルの Room / Directory / MessagePusher からの削除
//!
//! ### なぜこのテストが必要か
//! - ホストの切断でのみ猶予期間が始まることを保証する
//! - 切断後のハンドル宛ての中継が破棄されることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホストの切断、ゲストの切断
//! - エッジケース：join していない接続の切断

use std::sync::Arc;

use duet_shared::time::Clock;

use crate::domain::{ConnectionId, Departure, MessagePusher, SessionRepository, Timestamp};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 現在時刻の取得元
    clock: Arc<dyn Clock>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// ハンドルが取り除かれた Room の一覧（join していなければ空）
    pub async fn execute(&self, handle: &ConnectionId) -> Vec<Departure> {
        // 1. 以降の中継がこのハンドルに届かないよう登録を解除
        self.message_pusher.unregister_client(handle).await;

        // 2. Room のメンバーと Directory から削除
        let now = Timestamp::new(self.clock.now_millis());
        let departures = self.repository.disconnect(handle, now).await;

        for departure in &departures {
            if departure.host_left {
                tracing::info!(
                    "Host connection '{}' left room '{}', grace period started",
                    handle,
                    departure.room_id
                );
            } else {
                tracing::info!("Connection '{}' left room '{}'", handle, departure.room_id);
            }
        }
        tracing::info!("Connection '{}' disconnected", handle);

        departures
    }
}
