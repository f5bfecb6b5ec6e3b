//! # 銀行
//!
//! シミュレーション内の貸し手。銀行一覧は銀行コードの昇順で並ぶ。

use chrono::{DateTime, Utc};
use lendlab_pagination::{FingerprintHasher, PageLimit, PageQuery};
use serde::{Deserialize, Serialize};

pub use crate::id::BankId;
use crate::{
   DomainError,
   team::{bounded_contains, normalize_contains},
   value_objects::BankCode,
};

/// 銀行エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
   id:         BankId,
   code:       BankCode,
   name:       String,
   created_at: DateTime<Utc>,
}

impl Bank {
   pub fn new(id: BankId, code: BankCode, name: impl Into<String>, now: DateTime<Utc>) -> Self {
      Self {
         id,
         code,
         name: name.into(),
         created_at: now,
      }
   }

   pub fn id(&self) -> &BankId {
      &self.id
   }

   pub fn code(&self) -> &BankCode {
      &self.code
   }

   pub fn name(&self) -> &str {
      &self.name
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   /// キーセットの境界値（銀行コード）
   pub fn position(&self) -> String {
      self.code.as_str().to_string()
   }
}

/// 銀行一覧のページクエリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BankQueryFields")]
pub struct BankQuery {
   /// 銀行名の部分一致
   pub name_contains: Option<String>,
   pub limit:         PageLimit,
}

impl BankQuery {
   /// `name_contains` の最大文字数（`banks.name` の列長）
   pub const MAX_NAME_CONTAINS: usize = 255;

   /// リクエストパラメータからクエリを作成する
   ///
   /// # エラー
   ///
   /// `name_contains` が [`Self::MAX_NAME_CONTAINS`] 文字を超える場合。
   pub fn try_new(name_contains: Option<String>, limit: PageLimit) -> Result<Self, DomainError> {
      Ok(Self {
         name_contains: bounded_contains(name_contains, Self::MAX_NAME_CONTAINS, "name")?,
         limit,
      })
   }

   pub fn new(name_contains: Option<String>, limit: PageLimit) -> Self {
      Self {
         name_contains: normalize_contains(name_contains),
         limit,
      }
   }

   pub fn all(limit: PageLimit) -> Self {
      Self::new(None, limit)
   }
}

#[derive(Deserialize)]
struct BankQueryFields {
   name_contains: Option<String>,
   limit:         PageLimit,
}

impl TryFrom<BankQueryFields> for BankQuery {
   type Error = DomainError;

   fn try_from(fields: BankQueryFields) -> Result<Self, Self::Error> {
      Self::try_new(fields.name_contains, fields.limit)
   }
}

impl PageQuery for BankQuery {
   fn limit(&self) -> PageLimit {
      self.limit
   }

   fn write_fingerprint(&self, hasher: &mut FingerprintHasher) {
      hasher
         .write_tag(b'B')
         .write_opt_str(self.name_contains.as_deref())
         .write_limit(self.limit);
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::{assert_eq, assert_ne};

   use super::*;
   use crate::team::TeamQuery;

   #[test]
   fn test_positionは銀行コードを返す() {
      let bank = Bank::new(
         BankId::generate(),
         BankCode::new("SMBC").unwrap(),
         "三井住友銀行",
         Utc::now(),
      );

      assert_eq!(bank.position(), "SMBC");
   }

   #[test]
   fn test_同じ条件のクエリは同じハッシュになる() {
      let limit = PageLimit::new(10).unwrap();

      assert_eq!(
         BankQuery::new(Some("銀行".to_string()), limit).query_hash(),
         BankQuery::new(Some(" 銀行 ".to_string()), limit).query_hash()
      );
   }

   #[test]
   fn test_銀行名の部分一致は文字数で上限を判定する() {
      let limit = PageLimit::new(10).unwrap();
      let at_max = "銀".repeat(BankQuery::MAX_NAME_CONTAINS);

      assert!(BankQuery::try_new(Some(at_max.clone()), limit).is_ok());
      assert!(matches!(
         BankQuery::try_new(Some(format!("{at_max}行")), limit),
         Err(DomainError::Validation(_))
      ));
   }

   #[test]
   fn test_チームクエリとは別のハッシュ空間になる() {
      let limit = PageLimit::new(10).unwrap();

      assert_ne!(
         BankQuery::all(limit).query_hash(),
         TeamQuery::all(limit).query_hash()
      );
   }
}
