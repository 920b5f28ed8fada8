//! UseCase: Room 一覧取得

use std::sync::Arc;

use crate::domain::{Room, SessionRepository};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 全ての Room を room id 順に取得（終了済みの Room も含む）
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}
