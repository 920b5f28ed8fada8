//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! `SessionState`（Room Registry + Identity Directory）を 1 つの Mutex で保護します。
//!
//! 各メソッドはロックを取ってから戻るまでの間に await を挟まないため、
//! sweep と join / disconnect が互いの途中状態を観測することはありません。
//!
//! 通知順序のロック（`delivery`）は状態のロックとは別に持ち、UseCase が
//! 状態変更から通知送信までを 1 区間として保持します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{
    ClosedRoom, ConnectionId, Departure, JoinOutcome, ParticipantId, RepositoryError, Room,
    RoomError, RoomId, RoomSnapshot, SessionRepository, SessionState, Timestamp,
};

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    state: Arc<Mutex<SessionState>>,
    /// 状態変更と通知送信の組を直列化する
    delivery: Arc<Mutex<()>>,
}

impl InMemorySessionRepository {
    pub fn new(state: Arc<Mutex<SessionState>>) -> Self {
        Self {
            state,
            delivery: Arc::new(Mutex::new(())),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(SessionState::new())))
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn join_room(
        &self,
        room_id: RoomId,
        participant: ParticipantId,
        handle: ConnectionId,
        now: Timestamp,
    ) -> Result<JoinOutcome, RoomError> {
        let mut state = self.state.lock().await;
        state.join(room_id, participant, handle, now)
    }

    async fn disconnect(&self, handle: &ConnectionId, now: Timestamp) -> Vec<Departure> {
        let mut state = self.state.lock().await;
        state.disconnect(handle, now)
    }

    async fn sweep(&self, now: Timestamp) -> Vec<ClosedRoom> {
        let mut state = self.state.lock().await;
        state.sweep(now)
    }

    async fn lock_delivery(&self) -> OwnedMutexGuard<()> {
        self.delivery.clone().lock_owned().await
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<RoomSnapshot, RepositoryError> {
        let state = self.state.lock().await;
        state
            .snapshot(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.as_str().to_string()))
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let state = self.state.lock().await;
        state.rooms().list().into_iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionIdFactory, ROOM_CAPACITY};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemorySessionRepository がドメインの状態遷移をロック越しに正しく反映すること
    // - 同時に届いた join が容量制限を同時に突破しないこと
    //
    // 【なぜこのテストが必要か】
    // - Repository は UseCase と sweeper が共有する唯一の排他境界
    // - 直列化が崩れると 3 人目が Room に入れてしまう
    // ========================================

    const T0: i64 = 1_700_000_000_000;

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn participant(value: &str) -> ParticipantId {
        ParticipantId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_binds_participant_to_handle() {
        // テスト項目: join 後の Room 詳細でハンドルと参加者 ID が対応付けられている
        // given (前提条件):
        let repo = InMemorySessionRepository::default();
        let handle = ConnectionIdFactory::generate();

        // when (操作):
        repo.join_room(room_id("R1"), participant("alice"), handle.clone(), Timestamp::new(T0))
            .await
            .unwrap();

        // then (期待する結果):
        let snapshot = repo.get_room(&room_id("R1")).await.unwrap();
        assert_eq!(snapshot.members.len(), 1);
        assert_eq!(snapshot.members[0].handle, handle);
        assert_eq!(snapshot.members[0].participant, Some(participant("alice")));
    }

    #[tokio::test]
    async fn test_lock_delivery_is_exclusive() {
        // テスト項目: 通知順序のロックは同時に 1 つしか保持できず、解放後に次の保持者が進める
        // given (前提条件):
        let repo = Arc::new(InMemorySessionRepository::default());
        let guard = repo.lock_delivery().await;

        // when (操作):
        let waiter = {
            let repo = repo.clone();
            tokio::spawn(async move {
                let _guard = repo.lock_delivery().await;
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let finished_while_held = waiter.is_finished();
        drop(guard);

        // then (期待する結果):
        assert!(!finished_while_held);
        tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_room_not_found() {
        // テスト項目: 存在しない Room の取得は RoomNotFound を返す
        // given (前提条件):
        let repo = InMemorySessionRepository::default();

        // when (操作):
        let result = repo.get_room(&room_id("missing")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RepositoryError::RoomNotFound("missing".to_string())));
    }

    #[tokio::test]
    async fn test_expired_room_remains_listed() {
        // テスト項目: 終了した Room も一覧と詳細から参照できる
        // given (前提条件):
        let repo = InMemorySessionRepository::default();
        repo.join_room(
            room_id("R1"),
            participant("alice"),
            ConnectionIdFactory::generate(),
            Timestamp::new(T0),
        )
        .await
        .unwrap();

        // when (操作):
        let closed = repo.sweep(Timestamp::new(T0).plus_secs(3600)).await;
        let rooms = repo.get_rooms().await;

        // then (期待する結果):
        assert_eq!(closed.len(), 1);
        assert_eq!(rooms.len(), 1);
        assert!(!rooms[0].is_active());
        assert!(repo.get_room(&room_id("R1")).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_never_exceed_capacity() {
        // テスト項目: 同時に多数の join が来ても Room のメンバー数は容量を超えない
        // given (前提条件):
        let repo = Arc::new(InMemorySessionRepository::default());

        // when (操作):
        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.join_room(
                        room_id("R1"),
                        participant(&format!("user-{}", i)),
                        ConnectionIdFactory::generate(),
                        Timestamp::new(T0),
                    )
                    .await
                })
            })
            .collect();

        let mut accepted = 0;
        let mut rejected = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(RoomError::RoomFull) => rejected += 1,
                Err(other) => panic!("unexpected rejection: {:?}", other),
            }
        }

        // then (期待する結果):
        assert_eq!(accepted, ROOM_CAPACITY);
        assert_eq!(rejected, 16 - ROOM_CAPACITY);
        let snapshot = repo.get_room(&room_id("R1")).await.unwrap();
        assert_eq!(snapshot.members.len(), ROOM_CAPACITY);
    }
}
