//! # TeamRepository
//!
//! チーム一覧のウィンドウを取得するリポジトリ。
//!
//! 並び替えキーは `teams.username`（`COLLATE "C"`）。銀行コードでの絞り込みは
//! `banks` との LEFT JOIN で行う。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lendlab_domain::{
   bank::BankId,
   team::{Team, TeamId, TeamQuery},
   value_objects::Username,
};
use lendlab_pagination::{Cursor, window};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::push_keyset;
use crate::error::InfraError;

/// チームリポジトリトレイト
#[async_trait]
pub trait TeamRepository: Send + Sync {
   /// カーソルに従って最大 `limit + 1` 件のチームをユーザー名の昇順で返す
   async fn fetch_window(&self, cursor: &Cursor<TeamQuery>) -> Result<Vec<Team>, InfraError>;
}

/// PostgreSQL 実装の TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
   pool: PgPool,
}

impl PostgresTeamRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[derive(FromRow)]
struct TeamRow {
   id:           Uuid,
   username:     String,
   display_name: String,
   bank_id:      Option<Uuid>,
   created_at:   DateTime<Utc>,
}

impl TryFrom<TeamRow> for Team {
   type Error = InfraError;

   fn try_from(row: TeamRow) -> Result<Self, Self::Error> {
      let username = Username::new(row.username).map_err(InfraError::invalid_row("teams"))?;
      Ok(Team::new(
         TeamId::from(row.id),
         username,
         row.display_name,
         row.bank_id.map(BankId::from),
         row.created_at,
      ))
   }
}

/// フィルタ条件までを組み立てる
fn select_teams(query: &TeamQuery) -> QueryBuilder<'static, Postgres> {
   let mut builder = QueryBuilder::new(
      "SELECT t.id, t.username, t.display_name, t.bank_id, t.created_at \
       FROM teams t LEFT JOIN banks b ON b.id = t.bank_id WHERE TRUE",
   );
   if let Some(contains) = &query.username_contains {
      builder
         .push(" AND strpos(lower(t.username), lower(")
         .push_bind(contains.clone())
         .push(")) > 0");
   }
   if let Some(code) = &query.bank_code {
      builder
         .push(" AND b.code = ")
         .push_bind(code.as_str().to_string());
   }
   builder
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
   #[tracing::instrument(
      skip_all,
      level = "debug",
      fields(role = %cursor.role(), limit = %cursor.query().limit)
   )]
   async fn fetch_window(&self, cursor: &Cursor<TeamQuery>) -> Result<Vec<Team>, InfraError> {
      let mut builder = select_teams(cursor.query());
      push_keyset(&mut builder, "t.username", cursor);

      let rows: Vec<TeamRow> = builder.build_query_as().fetch_all(&self.pool).await?;
      let teams = rows
         .into_iter()
         .map(Team::try_from)
         .collect::<Result<Vec<_>, _>>()?;

      Ok(window::into_window_order(teams, cursor.direction()))
   }
}
