//! UseCase: Room 詳細取得

use std::sync::Arc;

use crate::domain::{RepositoryError, RoomId, RoomSnapshot, SessionRepository};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Room の詳細（メンバーと参加者 ID の対応を含む）を取得
    ///
    /// 不正な room id は存在しない Room と同じ扱いにします。
    pub async fn execute(&self, room_id: String) -> Result<RoomSnapshot, GetRoomDetailError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        self.repository
            .get_room(&room_id)
            .await
            .map_err(|e| match e {
                RepositoryError::RoomNotFound(_) => GetRoomDetailError::RoomNotFound,
            })
    }
}
