//! # チームハンドラ
//!
//! チーム（受講者）の一覧 API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/v1/teams?cursor=&limit=&username=&bank_code=` - ユーザー名順のチーム一覧
//!
//! `username` は大文字小文字を区別しない部分一致（最大 64 文字）、`bank_code` は
//! 所属銀行のコードの完全一致。`bank_code` は大文字化してから検証する。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Query, State},
   response::IntoResponse,
};
use lendlab_domain::{
   team::{Team, TeamQuery},
   value_objects::BankCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pagination::{into_paginated_response, resolve_cursor, resolve_limit};
use crate::{config::PaginationConfig, error::AdminError, usecase::TeamUseCaseImpl};

/// チーム API の共有状態
pub struct TeamState {
   pub usecase:    TeamUseCaseImpl,
   pub pagination: PaginationConfig,
}

// --- リクエスト/レスポンス型 ---

/// チーム一覧のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ListTeamsParams {
   pub cursor:    Option<String>,
   pub limit:     Option<u32>,
   pub username:  Option<String>,
   pub bank_code: Option<String>,
}

impl ListTeamsParams {
   fn has_explicit_query(&self) -> bool {
      self.limit.is_some() || self.username.is_some() || self.bank_code.is_some()
   }
}

/// チーム一覧の要素 DTO
#[derive(Debug, Serialize)]
pub struct TeamDto {
   pub id:           Uuid,
   pub username:     String,
   pub display_name: String,
   pub bank_id:      Option<Uuid>,
   pub created_at:   String,
}

impl From<Team> for TeamDto {
   fn from(team: Team) -> Self {
      Self {
         id:           Uuid::from(*team.id()),
         username:     team.username().to_string(),
         display_name: team.display_name().to_string(),
         bank_id:      team.bank_id().copied().map(Uuid::from),
         created_at:   team.created_at().to_rfc3339(),
      }
   }
}

// --- ハンドラ ---

/// GET /api/v1/teams
///
/// ユーザー名の昇順でチーム一覧を返す。前後のページは `first` / `prev` /
/// `next` / `last` のトークンを `cursor` に渡して取得する。
pub async fn list_teams(
   State(state): State<Arc<TeamState>>,
   Query(params): Query<ListTeamsParams>,
) -> Result<impl IntoResponse, AdminError> {
   let explicit = params.has_explicit_query();
   let limit = resolve_limit(params.limit, &state.pagination)?;
   let bank_code = params
      .bank_code
      .map(|code| BankCode::new(code.to_ascii_uppercase()))
      .transpose()?;
   let query = TeamQuery::try_new(params.username, bank_code, limit)?;

   let cursor = resolve_cursor(params.cursor.as_deref(), query, explicit, &state.pagination)?;
   let page = state.usecase.list_teams(&cursor).await?;

   Ok(Json(into_paginated_response(page, TeamDto::from)?))
}
