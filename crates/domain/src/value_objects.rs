//! # 共通値オブジェクト
//!
//! 一覧 API の並び替えキーとして使う値オブジェクトを定義する。
//!
//! ## 含まれる型
//!
//! | 型 | ラップ対象 | 用途 |
//! |---|-----------|------|
//! | [`Username`] | `String` | チームのログイン名（チーム一覧の並び替えキー） |
//! | [`BankCode`] | `String` | 銀行コード（銀行一覧の並び替えキー） |
//!
//! どちらも ASCII のみを許可する。キーセットの境界値としてバイト順で
//! 比較されるため、照合順序の差異が入り込まない。

use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

use crate::DomainError;

// =========================================================================
// Username（ユーザー名）
// =========================================================================

/// ユーザー名（値オブジェクト）
///
/// # 不変条件
///
/// - 1 〜 64 文字
/// - ASCII 英数字と `_` `-` `.` のみ
///
/// # 使用例
///
/// ```rust
/// use lendlab_domain::value_objects::Username;
///
/// assert!(Username::new("team_01").is_ok());
/// assert!(Username::new("チーム").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
   /// 最大文字数
   pub const MAX_LENGTH: usize = 64;

   /// 前後の空白を除いて検証し、ユーザー名を作成する
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into().trim().to_string();

      if value.is_empty() {
         return Err(DomainError::Validation("ユーザー名は必須です".to_string()));
      }
      if value.len() > Self::MAX_LENGTH {
         return Err(DomainError::Validation(format!(
            "ユーザー名は {} 文字以内である必要があります",
            Self::MAX_LENGTH
         )));
      }
      if !value
         .chars()
         .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
      {
         return Err(DomainError::Validation(
            "ユーザー名には英数字と _ - . のみ使用できます".to_string(),
         ));
      }

      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }
}

impl TryFrom<String> for Username {
   type Error = DomainError;

   fn try_from(value: String) -> Result<Self, Self::Error> {
      Self::new(value)
   }
}

// =========================================================================
// BankCode（銀行コード）
// =========================================================================

/// 銀行コード（値オブジェクト）
///
/// # 不変条件
///
/// - 3 〜 16 文字
/// - ASCII 英大文字と数字のみ
///
/// 小文字の入力は受け付けない。大文字化はクエリパラメータの解釈側で行う。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Into, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BankCode(String);

impl BankCode {
   pub const MIN_LENGTH: usize = 3;
   pub const MAX_LENGTH: usize = 16;

   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into().trim().to_string();

      if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&value.len()) {
         return Err(DomainError::Validation(format!(
            "銀行コードは {} 〜 {} 文字である必要があります",
            Self::MIN_LENGTH,
            Self::MAX_LENGTH
         )));
      }
      if !value
         .chars()
         .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
      {
         return Err(DomainError::Validation(
            "銀行コードには英大文字と数字のみ使用できます".to_string(),
         ));
      }

      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }
}

impl TryFrom<String> for BankCode {
   type Error = DomainError;

   fn try_from(value: String) -> Result<Self, Self::Error> {
      Self::new(value)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case("a")]
   #[case("team-alpha")]
   #[case("team_01.b")]
   #[case(&"x".repeat(64))]
   fn test_ユーザー名の有効な値(#[case] value: &str) {
      assert_eq!(Username::new(value).unwrap().as_str(), value);
   }

   #[rstest]
   #[case("")]
   #[case("   ")]
   #[case(&"x".repeat(65))]
   #[case("team alpha")]
   #[case("チーム")]
   #[case("team/1")]
   fn test_ユーザー名の無効な値(#[case] value: &str) {
      assert!(matches!(Username::new(value), Err(DomainError::Validation(_))));
   }

   #[test]
   fn test_ユーザー名は前後の空白を除去する() {
      assert_eq!(Username::new("  bob  ").unwrap().as_str(), "bob");
   }

   #[test]
   fn test_ユーザー名の順序はバイト順() {
      let mut names = vec![
         Username::new("b").unwrap(),
         Username::new("B").unwrap(),
         Username::new("a").unwrap(),
      ];
      names.sort();

      let names: Vec<&str> = names.iter().map(Username::as_str).collect();
      assert_eq!(names, vec!["B", "a", "b"]);
   }

   #[rstest]
   #[case("MUF")]
   #[case("SMBC")]
   #[case("BANK0001")]
   #[case("ABCDEFGHIJKLMNOP")]
   fn test_銀行コードの有効な値(#[case] value: &str) {
      assert_eq!(BankCode::new(value).unwrap().as_str(), value);
   }

   #[rstest]
   #[case("AB")]
   #[case("ABCDEFGHIJKLMNOPQ")]
   #[case("smbc")]
   #[case("SM-BC")]
   fn test_銀行コードの無効な値(#[case] value: &str) {
      assert!(matches!(BankCode::new(value), Err(DomainError::Validation(_))));
   }

   #[test]
   fn test_デシリアライズ時にも検証される() {
      let ok: Result<BankCode, _> = serde_json::from_str("\"SMBC\"");
      let ng: Result<BankCode, _> = serde_json::from_str("\"smbc\"");

      assert_eq!(ok.unwrap().as_str(), "SMBC");
      assert!(ng.is_err());
   }
}
