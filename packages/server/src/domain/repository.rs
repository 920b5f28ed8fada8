//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::{
    ClosedRoom, ConnectionId, Departure, JoinOutcome, ParticipantId, RepositoryError, Room,
    RoomError, RoomId, RoomSnapshot, Timestamp,
};

/// Session Repository trait
///
/// Room Registry と Identity Directory へのインターフェース。
/// 各メソッドは 1 つの排他区間として実行され、同じ Room に対する操作が
/// 途中の状態を観測することはありません。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// join-room を適用する
    async fn join_room(
        &self,
        room_id: RoomId,
        participant: ParticipantId,
        handle: ConnectionId,
        now: Timestamp,
    ) -> Result<JoinOutcome, RoomError>;

    /// 切断したハンドルを全ての Room と Directory から取り除く
    async fn disconnect(&self, handle: &ConnectionId, now: Timestamp) -> Vec<Departure>;

    /// 期限切れの Room を終了させる
    async fn sweep(&self, now: Timestamp) -> Vec<ClosedRoom>;

    /// 状態変更とその通知送信を 1 区間にまとめるためのロックを取得する
    ///
    /// 保持している間、他の保持者（join と sweep）の通知が割り込むことはありません。
    async fn lock_delivery(&self) -> OwnedMutexGuard<()>;

    /// Room の詳細を取得
    async fn get_room(&self, room_id: &RoomId) -> Result<RoomSnapshot, RepositoryError>;

    /// 全ての Room を room id 順に取得
    async fn get_rooms(&self) -> Vec<Room>;
}
