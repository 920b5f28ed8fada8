//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub host: String,
    pub status: String,
    pub members: Vec<String>,
    pub expires_at: String,
}

/// Member entry of `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetailDto {
    pub socket_id: String,
    pub email_id: Option<String>,
}

/// Body of `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub host: String,
    pub status: String,
    pub members: Vec<MemberDetailDto>,
    pub created_at: String,
    pub expires_at: String,
    pub host_grace_deadline: Option<String>,
}
