//! UseCase: Room 参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加成功時の joined-room / user-joined 通知、拒否時の join-error 通知
//!
//! ### なぜこのテストが必要か
//! - 2 人を超える参加を確実に拒否する
//! - 不正なペイロードでは状態も通知も一切変えない
//!
//! ### どのような状況を想定しているか
//! - 正常系：Room 作成、2 人目の参加
//! - 異常系：満員、終了済み、不正ペイロード
//! - エッジケース：同じ接続からの重複 join

use std::sync::Arc;

use duet_shared::time::Clock;

use crate::{
    domain::{
        ConnectionId, JoinOutcome, MessagePusher, ParticipantId, RoomId, SessionRepository,
        Timestamp,
    },
    infrastructure::dto::websocket::ServerEvent,
};

use super::error::JoinRoomError;

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 現在時刻の取得元
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
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

    /// join-room を実行
    ///
    /// # Arguments
    ///
    /// * `handle` - 送信元の接続ハンドル
    /// * `room_id` - ペイロードの roomId（欠落していれば None）
    /// * `email_id` - ペイロードの emailId（欠落していれば None）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加成功（joined-room と user-joined を送信済み）
    /// * `Err(JoinRoomError::Rejected)` - 参加拒否（join-error を送信済み）
    /// * `Err(JoinRoomError::InvalidPayload)` - 不正なペイロード（何も送信しない）
    pub async fn execute(
        &self,
        handle: &ConnectionId,
        room_id: Option<String>,
        email_id: Option<String>,
    ) -> Result<JoinOutcome, JoinRoomError> {
        let (room_id, participant) = parse_payload(room_id, email_id)?;

        // 返信と user-joined を送り終えるまで sweep の room-closed を割り込ませない
        let _delivery = self.repository.lock_delivery().await;
        let now = Timestamp::new(self.clock.now_millis());

        let outcome = match self
            .repository
            .join_room(room_id.clone(), participant.clone(), handle.clone(), now)
            .await
        {
            Ok(outcome) => outcome,
            Err(rejection) => {
                tracing::warn!(
                    "Participant '{}' ({}) refused from room '{}': {}",
                    participant,
                    handle,
                    room_id,
                    rejection
                );
                let error_json = ServerEvent::from(rejection).to_json()?;
                if let Err(e) = self.message_pusher.push_to(handle, &error_json).await {
                    tracing::debug!("Could not deliver join-error to '{}': {}", handle, e);
                }
                return Err(JoinRoomError::Rejected(rejection));
            }
        };

        tracing::info!(
            "Participant '{}' ({}) joined room '{}' ({:?})",
            participant,
            handle,
            room_id,
            outcome.admission
        );

        // 1. 参加者本人に joined-room を通知
        let joined_json = ServerEvent::JoinedRoom {
            room_id: room_id.into_string(),
        }
        .to_json()?;
        if let Err(e) = self.message_pusher.push_to(handle, &joined_json).await {
            tracing::debug!("Could not deliver joined-room to '{}': {}", handle, e);
        }

        // 2. 既存のメンバーに user-joined を通知
        if !outcome.peers.is_empty() {
            let arrived_json = ServerEvent::UserJoined {
                email_id: participant.into_string(),
                socket_id: handle.as_str().to_string(),
            }
            .to_json()?;
            if let Err(e) = self
                .message_pusher
                .broadcast(outcome.peers.clone(), &arrived_json)
                .await
            {
                tracing::warn!("Failed to broadcast user-joined: {}", e);
            }
        }

        Ok(outcome)
    }
}

fn parse_payload(
    room_id: Option<String>,
    email_id: Option<String>,
) -> Result<(RoomId, ParticipantId), JoinRoomError> {
    let room_id = room_id
        .ok_or_else(|| JoinRoomError::InvalidPayload("missing roomId".to_string()))
        .and_then(|value| {
            RoomId::new(value).map_err(|e| JoinRoomError::InvalidPayload(e.to_string()))
        })?;
    let participant = email_id
        .ok_or_else(|| JoinRoomError::InvalidPayload("missing emailId".to_string()))
        .and_then(|value| {
            ParticipantId::new(value).map_err(|e| JoinRoomError::InvalidPayload(e.to_string()))
        })?;
    Ok((room_id, participant))
}
