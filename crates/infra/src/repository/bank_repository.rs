//! # BankRepository
//!
//! 銀行一覧のウィンドウを取得するリポジトリ。並び替えキーは `banks.code`。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lendlab_domain::{
   bank::{Bank, BankId, BankQuery},
   value_objects::BankCode,
};
use lendlab_pagination::{Cursor, window};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::push_keyset;
use crate::error::InfraError;

/// 銀行リポジトリトレイト
#[async_trait]
pub trait BankRepository: Send + Sync {
   /// カーソルに従って最大 `limit + 1` 件の銀行をコードの昇順で返す
   async fn fetch_window(&self, cursor: &Cursor<BankQuery>) -> Result<Vec<Bank>, InfraError>;
}

/// PostgreSQL 実装の BankRepository
#[derive(Debug, Clone)]
pub struct PostgresBankRepository {
   pool: PgPool,
}

impl PostgresBankRepository {
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[derive(FromRow)]
struct BankRow {
   id:         Uuid,
   code:       String,
   name:       String,
   created_at: DateTime<Utc>,
}

impl TryFrom<BankRow> for Bank {
   type Error = InfraError;

   fn try_from(row: BankRow) -> Result<Self, Self::Error> {
      let code = BankCode::new(row.code).map_err(InfraError::invalid_row("banks"))?;
      Ok(Bank::new(BankId::from(row.id), code, row.name, row.created_at))
   }
}

fn select_banks(query: &BankQuery) -> QueryBuilder<'static, Postgres> {
   let mut builder =
      QueryBuilder::new("SELECT b.id, b.code, b.name, b.created_at FROM banks b WHERE TRUE");
   if let Some(contains) = &query.name_contains {
      builder
         .push(" AND strpos(lower(b.name), lower(")
         .push_bind(contains.clone())
         .push(")) > 0");
   }
   builder
}

#[async_trait]
impl BankRepository for PostgresBankRepository {
   #[tracing::instrument(
      skip_all,
      level = "debug",
      fields(role = %cursor.role(), limit = %cursor.query().limit)
   )]
   async fn fetch_window(&self, cursor: &Cursor<BankQuery>) -> Result<Vec<Bank>, InfraError> {
      let mut builder = select_banks(cursor.query());
      push_keyset(&mut builder, "b.code", cursor);

      let rows: Vec<BankRow> = builder.build_query_as().fetch_all(&self.pool).await?;
      let banks = rows
         .into_iter()
         .map(Bank::try_from)
         .collect::<Result<Vec<_>, _>>()?;

      Ok(window::into_window_order(banks, cursor.direction()))
   }
}
