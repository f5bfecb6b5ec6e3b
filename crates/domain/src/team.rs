//! # チーム
//!
//! 貸付シミュレーションに参加する受講者チーム。
//!
//! チーム一覧はユーザー名の昇順でキーセットページネーションされる。
//! [`Team::position`] がカーソルの境界値を返し、[`TeamQuery`] が絞り込み条件と
//! ページサイズを保持する。

use chrono::{DateTime, Utc};
use lendlab_pagination::{FingerprintHasher, PageLimit, PageQuery};
use serde::{Deserialize, Serialize};

pub use crate::id::TeamId;
use crate::{
   DomainError,
   bank::BankId,
   value_objects::{BankCode, Username},
};

/// チームエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
   id:           TeamId,
   username:     Username,
   display_name: String,
   bank_id:      Option<BankId>,
   created_at:   DateTime<Utc>,
}

impl Team {
   /// 新しいチームを作成する
   ///
   /// # 引数
   ///
   /// - `now`: 現在日時（呼び出し元から注入）
   pub fn new(
      id: TeamId,
      username: Username,
      display_name: impl Into<String>,
      bank_id: Option<BankId>,
      now: DateTime<Utc>,
   ) -> Self {
      Self {
         id,
         username,
         display_name: display_name.into(),
         bank_id,
         created_at: now,
      }
   }

   // Getter メソッド

   pub fn id(&self) -> &TeamId {
      &self.id
   }

   pub fn username(&self) -> &Username {
      &self.username
   }

   pub fn display_name(&self) -> &str {
      &self.display_name
   }

   pub fn bank_id(&self) -> Option<&BankId> {
      self.bank_id.as_ref()
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   /// キーセットの境界値（ユーザー名）
   pub fn position(&self) -> String {
      self.username.as_str().to_string()
   }
}

/// チーム一覧のページクエリ
///
/// フィンガープリントにはすべてのフィールドを含める。フィールドを追加する場合は
/// `write_fingerprint` の末尾に追記すること。
///
/// カーソルトークンから復元する場合も [`TeamQuery::try_new`] の検証を通る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TeamQueryFields")]
pub struct TeamQuery {
   /// ユーザー名の部分一致
   pub username_contains: Option<String>,
   /// 所属銀行のコード
   pub bank_code:         Option<BankCode>,
   pub limit:             PageLimit,
}

impl TeamQuery {
   /// `username_contains` の最大文字数。これより長い部分文字列はどのユーザー名にも一致しない
   pub const MAX_USERNAME_CONTAINS: usize = Username::MAX_LENGTH;

   /// リクエストパラメータからクエリを作成する
   ///
   /// # エラー
   ///
   /// `username_contains` が [`Self::MAX_USERNAME_CONTAINS`] 文字を超える場合。
   pub fn try_new(
      username_contains: Option<String>,
      bank_code: Option<BankCode>,
      limit: PageLimit,
   ) -> Result<Self, DomainError> {
      let username_contains =
         bounded_contains(username_contains, Self::MAX_USERNAME_CONTAINS, "username")?;
      Ok(Self {
         username_contains,
         bank_code,
         limit,
      })
   }

   /// 空白のみの部分一致条件は「条件なし」として扱う
   pub fn new(username_contains: Option<String>, bank_code: Option<BankCode>, limit: PageLimit) -> Self {
      Self {
         username_contains: normalize_contains(username_contains),
         bank_code,
         limit,
      }
   }

   /// 絞り込みなしのクエリ
   pub fn all(limit: PageLimit) -> Self {
      Self::new(None, None, limit)
   }
}

#[derive(Deserialize)]
struct TeamQueryFields {
   username_contains: Option<String>,
   bank_code:         Option<BankCode>,
   limit:             PageLimit,
}

impl TryFrom<TeamQueryFields> for TeamQuery {
   type Error = DomainError;

   fn try_from(fields: TeamQueryFields) -> Result<Self, Self::Error> {
      Self::try_new(fields.username_contains, fields.bank_code, fields.limit)
   }
}

impl PageQuery for TeamQuery {
   fn limit(&self) -> PageLimit {
      self.limit
   }

   fn write_fingerprint(&self, hasher: &mut FingerprintHasher) {
      hasher
         .write_tag(b'T')
         .write_opt_str(self.username_contains.as_deref())
         .write_opt_str(self.bank_code.as_ref().map(BankCode::as_str))
         .write_limit(self.limit);
   }
}

pub(crate) fn normalize_contains(value: Option<String>) -> Option<String> {
   value
      .map(|v| v.trim().to_string())
      .filter(|v| !v.is_empty())
}

/// 正規化した上で文字数の上限を検証する
pub(crate) fn bounded_contains(
   value: Option<String>,
   max: usize,
   field: &str,
) -> Result<Option<String>, DomainError> {
   let value = normalize_contains(value);
   match &value {
      Some(v) if v.chars().count() > max => Err(DomainError::Validation(format!(
         "{field} は {max} 文字以内である必要があります"
      ))),
      _ => Ok(value),
   }
}
