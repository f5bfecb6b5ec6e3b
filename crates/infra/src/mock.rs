//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリリポジトリ。
//! PostgreSQL 実装と同じ取得規約（フィルタ → キーセット述語 → `limit + 1` 行 →
//! キー昇順）に従う。`test-utils` feature を有効にすると他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! lendlab-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lendlab_domain::{
   bank::{Bank, BankQuery},
   team::{Team, TeamQuery},
};
use lendlab_pagination::{
   Cursor,
   Direction,
   PageQuery,
   window::{self, KeysetBound},
};

use crate::{
   error::InfraError,
   repository::{BankRepository, TeamRepository},
};

/// 並び替えキー順に走査し、取得規約どおりのウィンドウを返す
fn scan_window<Q: PageQuery, T>(
   mut rows: Vec<T>,
   cursor: &Cursor<Q>,
   key: impl Fn(&T) -> String,
) -> Vec<T> {
   rows.sort_by_key(|row| key(row));
   let bound = window::keyset_bound(cursor);
   let within = |row: &T| match bound {
      KeysetBound::Unbounded => true,
      KeysetBound::After(position) => key(row).as_str() > position,
      KeysetBound::Before(position) => key(row).as_str() < position,
   };

   let size = window::fetch_size(cursor);
   let scanned: Vec<T> = match cursor.direction() {
      Direction::Ascending => rows.into_iter().filter(within).take(size).collect(),
      Direction::Descending => rows.into_iter().rev().filter(within).take(size).collect(),
   };
   window::into_window_order(scanned, cursor.direction())
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
   needle.is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}

// ===== MockTeamRepository =====

#[derive(Clone, Default)]
pub struct MockTeamRepository {
   teams: Arc<Mutex<Vec<Team>>>,
   banks: Arc<Mutex<Vec<Bank>>>,
}

impl MockTeamRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add_team(&self, team: Team) {
      self.teams.lock().unwrap().push(team);
   }

   /// 銀行コードでの絞り込みに使う銀行を登録する
   pub fn add_bank(&self, bank: Bank) {
      self.banks.lock().unwrap().push(bank);
   }

   fn matches(&self, team: &Team, query: &TeamQuery) -> bool {
      let bank_matches = match &query.bank_code {
         None => true,
         Some(code) => {
            let banks = self.banks.lock().unwrap();
            team.bank_id().is_some_and(|bank_id| {
               banks
                  .iter()
                  .any(|bank| bank.id() == bank_id && bank.code() == code)
            })
         }
      };
      bank_matches
         && contains_ignore_case(team.username().as_str(), query.username_contains.as_deref())
   }
}

#[async_trait]
impl TeamRepository for MockTeamRepository {
   async fn fetch_window(&self, cursor: &Cursor<TeamQuery>) -> Result<Vec<Team>, InfraError> {
      let teams: Vec<Team> = self
         .teams
         .lock()
         .unwrap()
         .iter()
         .filter(|team| self.matches(team, cursor.query()))
         .cloned()
         .collect();
      Ok(scan_window(teams, cursor, Team::position))
   }
}

// ===== MockBankRepository =====

#[derive(Clone, Default)]
pub struct MockBankRepository {
   banks: Arc<Mutex<Vec<Bank>>>,
}

impl MockBankRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add_bank(&self, bank: Bank) {
      self.banks.lock().unwrap().push(bank);
   }
}

#[async_trait]
impl BankRepository for MockBankRepository {
   async fn fetch_window(&self, cursor: &Cursor<BankQuery>) -> Result<Vec<Bank>, InfraError> {
      let banks: Vec<Bank> = self
         .banks
         .lock()
         .unwrap()
         .iter()
         .filter(|bank| contains_ignore_case(bank.name(), cursor.query().name_contains.as_deref()))
         .cloned()
         .collect();
      Ok(scan_window(banks, cursor, Bank::position))
   }
}
