//! UseCase: 期限切れ Room の終了処理
//!
//! sweeper タスクから定期的に呼ばれます。Repository の sweep は join / disconnect と
//! 同じ排他区間で実行され、終了した時点のメンバーにだけ room-closed を送ります。
//! 送信が終わるまで通知順序のロックを保持するため、join の joined-room より先に
//! room-closed が届くことはありません。

use std::sync::Arc;

use duet_shared::time::Clock;

use crate::{
    domain::{ClosedRoom, MessagePusher, SessionRepository, Timestamp},
    infrastructure::dto::websocket::ServerEvent,
};

/// Room 終了判定のユースケース
pub struct SweepRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 現在時刻の取得元
    clock: Arc<dyn Clock>,
}

impl SweepRoomsUseCase {
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

    /// 1 回分の sweep を実行し、終了させた Room を返す
    pub async fn execute(&self) -> Vec<ClosedRoom> {
        let _delivery = self.repository.lock_delivery().await;
        let now = Timestamp::new(self.clock.now_millis());
        let closed = self.repository.sweep(now).await;

        for room in &closed {
            tracing::info!(
                "Room '{}' closed: {} ({} member(s) notified)",
                room.room_id,
                room.reason.message(),
                room.members.len()
            );

            if room.members.is_empty() {
                continue;
            }

            let json = match ServerEvent::from(room.reason).to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode room-closed for '{}': {}", room.room_id, e);
                    continue;
                }
            };
            if let Err(e) = self
                .message_pusher
                .broadcast(room.members.clone(), &json)
                .await
            {
                tracing::warn!("Failed to broadcast room-closed for '{}': {}", room.room_id, e);
            }
        }

        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{CloseReason, MockMessagePusher, RoomId, RoomStatus},
        infrastructure::repository::InMemorySessionRepository,
        usecase::{
            DisconnectParticipantUseCase, JoinRoomUseCase, RelaySignalUseCase,
            test_support::{Fixture, T0, drain},
        },
    };
    use duet_shared::time::FixedClock;
    use serde_json::json;

    struct UseCases {
        join: JoinRoomUseCase,
        relay: RelaySignalUseCase,
        disconnect: DisconnectParticipantUseCase,
        sweep: SweepRoomsUseCase,
    }

    fn create_usecases(fixture: &Fixture) -> UseCases {
        UseCases {
            join: JoinRoomUseCase::new(
                fixture.repository.clone(),
                fixture.message_pusher.clone(),
                fixture.clock.clone(),
            ),
            relay: RelaySignalUseCase::new(fixture.message_pusher.clone()),
            disconnect: DisconnectParticipantUseCase::new(
                fixture.repository.clone(),
                fixture.message_pusher.clone(),
                fixture.clock.clone(),
            ),
            sweep: SweepRoomsUseCase::new(
                fixture.repository.clone(),
                fixture.message_pusher.clone(),
                fixture.clock.clone(),
            ),
        }
    }

    fn room_closed(reason: CloseReason) -> ServerEvent {
        ServerEvent::RoomClosed {
            reason: reason.message().to_string(),
        }
    }

    #[tokio::test]
    async fn test_host_leaves_scenario() {
        // テスト項目: alice 作成 → bob 参加 → offer 中継 → alice 切断 → 31 秒後に bob へ room-closed
        // given (前提条件):
        let fixture = Fixture::new();
        let usecases = create_usecases(&fixture);
        let (h1, mut rx1) = fixture.connect("h1").await;
        let (h2, mut rx2) = fixture.connect("h2").await;
        usecases
            .join
            .execute(&h1, Some("R1".into()), Some("alice".into()))
            .await
            .unwrap();
        usecases
            .join
            .execute(&h2, Some("R1".into()), Some("bob".into()))
            .await
            .unwrap();
        let offer = json!({"sdp": "v=0"});
        usecases
            .relay
            .execute(&h2, h1.as_str().to_string(), crate::domain::Signal::Offer(offer.clone()))
            .await
            .unwrap();
        let alice_events = drain(&mut rx1);
        drain(&mut rx2);
        usecases.disconnect.execute(&h1).await;

        // when (操作):
        fixture.clock.advance_secs(31);
        let closed = usecases.sweep.execute().await;

        // then (期待する結果):
        assert_eq!(
            alice_events,
            vec![
                ServerEvent::JoinedRoom {
                    room_id: "R1".to_string()
                },
                ServerEvent::UserJoined {
                    email_id: "bob".to_string(),
                    socket_id: "h2".to_string()
                },
                ServerEvent::Offer {
                    from: "h2".to_string(),
                    offer
                },
            ]
        );
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].reason, CloseReason::HostLeft);
        assert_eq!(drain(&mut rx2), vec![room_closed(CloseReason::HostLeft)]);
        let snapshot = fixture
            .repository
            .get_room(&RoomId::new("R1".to_string()).unwrap())
            .await
            .unwrap();
        assert_eq!(snapshot.room.status, RoomStatus::Expired);
    }

    #[tokio::test]
    async fn test_hard_limit_notifies_every_member_once() {
        // テスト項目: 1 時間経過で全メンバーに 1 回だけ room-closed（1 時間制限）が届く
        // given (前提条件):
        let fixture = Fixture::new();
        let usecases = create_usecases(&fixture);
        let (h1, mut rx1) = fixture.connect("h1").await;
        let (h2, mut rx2) = fixture.connect("h2").await;
        usecases
            .join
            .execute(&h1, Some("R1".into()), Some("alice".into()))
            .await
            .unwrap();
        usecases
            .join
            .execute(&h2, Some("R1".into()), Some("bob".into()))
            .await
            .unwrap();
        drain(&mut rx1);
        drain(&mut rx2);

        // when (操作):
        fixture.clock.advance_secs(3600);
        usecases.sweep.execute().await;
        fixture.clock.advance_secs(10);
        let second = usecases.sweep.execute().await;

        // then (期待する結果):
        assert!(second.is_empty());
        assert_eq!(drain(&mut rx1), vec![room_closed(CloseReason::TimeLimit)]);
        assert_eq!(drain(&mut rx2), vec![room_closed(CloseReason::TimeLimit)]);
    }

    #[tokio::test]
    async fn test_guest_kept_through_reactivation_is_notified_at_next_expiry() {
        // テスト項目: ホストの再開後も残ったゲストに、次の 1 時間制限で room-closed が 1 回だけ届く
        // given (前提条件):
        let fixture = Fixture::new();
        let usecases = create_usecases(&fixture);
        let (h1, mut rx1) = fixture.connect("h1").await;
        let (h2, mut rx2) = fixture.connect("h2").await;
        usecases
            .join
            .execute(&h1, Some("R1".into()), Some("alice".into()))
            .await
            .unwrap();
        usecases
            .join
            .execute(&h2, Some("R1".into()), Some("bob".into()))
            .await
            .unwrap();
        fixture.clock.advance_secs(3600);
        usecases.sweep.execute().await;
        fixture.clock.advance_secs(60);
        usecases
            .join
            .execute(&h1, Some("R1".into()), Some("alice".into()))
            .await
            .unwrap();
        drain(&mut rx1);
        drain(&mut rx2);

        // when (操作):
        fixture.clock.advance_secs(3599);
        let early = usecases.sweep.execute().await;
        fixture.clock.advance_secs(1);
        usecases.sweep.execute().await;
        fixture.clock.advance_secs(10);
        usecases.sweep.execute().await;

        // then (期待する結果):
        assert!(early.is_empty());
        assert_eq!(drain(&mut rx2), vec![room_closed(CloseReason::TimeLimit)]);
        assert_eq!(drain(&mut rx1), vec![room_closed(CloseReason::TimeLimit)]);
    }

    #[tokio::test]
    async fn test_departed_member_is_not_notified() {
        // テスト項目: 終了前に抜けたメンバーには room-closed は届かない
        // given (前提条件):
        let fixture = Fixture::new();
        let usecases = create_usecases(&fixture);
        let (h1, mut rx1) = fixture.connect("h1").await;
        let (h2, mut rx2) = fixture.connect("h2").await;
        usecases
            .join
            .execute(&h1, Some("R1".into()), Some("alice".into()))
            .await
            .unwrap();
        usecases
            .join
            .execute(&h2, Some("R1".into()), Some("bob".into()))
            .await
            .unwrap();
        usecases.disconnect.execute(&h2).await;
        drain(&mut rx1);
        drain(&mut rx2);

        // when (操作):
        fixture.clock.advance_secs(3600);
        usecases.sweep.execute().await;

        // then (期待する結果):
        assert_eq!(drain(&mut rx1), vec![room_closed(CloseReason::TimeLimit)]);
        assert!(drain(&mut rx2).is_empty());
    }

    #[tokio::test]
    async fn test_host_rejoin_within_grace_prevents_closure() {
        // テスト項目: 猶予期間内にホストが戻れば sweep しても Room は終了しない
        // given (前提条件):
        let fixture = Fixture::new();
        let usecases = create_usecases(&fixture);
        let (h1, _rx1) = fixture.connect("h1").await;
        let (h2, mut rx2) = fixture.connect("h2").await;
        let (h3, _rx3) = fixture.connect("h3").await;
        usecases
            .join
            .execute(&h1, Some("R1".into()), Some("alice".into()))
            .await
            .unwrap();
        usecases
            .join
            .execute(&h2, Some("R1".into()), Some("bob".into()))
            .await
            .unwrap();
        usecases.disconnect.execute(&h1).await;
        fixture.clock.advance_secs(20);
        usecases
            .join
            .execute(&h3, Some("R1".into()), Some("alice".into()))
            .await
            .unwrap();
        drain(&mut rx2);

        // when (操作):
        fixture.clock.advance_secs(30);
        let closed = usecases.sweep.execute().await;

        // then (期待する結果):
        assert!(closed.is_empty());
        assert!(drain(&mut rx2).is_empty());
    }

    #[tokio::test]
    async fn test_empty_room_expires_without_broadcast() {
        // テスト項目: メンバーがいない Room も終了するが、送信は行われない
        // given (前提条件):
        let repository = Arc::new(InMemorySessionRepository::default());
        let h1 = crate::domain::ConnectionId::new("h1".to_string()).unwrap();
        repository
            .join_room(
                RoomId::new("R1".to_string()).unwrap(),
                crate::domain::ParticipantId::new("alice".to_string()).unwrap(),
                h1.clone(),
                Timestamp::new(T0),
            )
            .await
            .unwrap();
        repository.disconnect(&h1, Timestamp::new(T0)).await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().never();
        let usecase = SweepRoomsUseCase::new(
            repository.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(T0 + 3_600_000)),
        );

        // when (操作):
        let closed = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(closed.len(), 1);
        assert!(closed[0].members.is_empty());
        let rooms = repository.get_rooms().await;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].status, RoomStatus::Expired);
    }
}
