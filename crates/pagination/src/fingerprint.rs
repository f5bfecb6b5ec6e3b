//! # クエリフィンガープリント
//!
//! カーソルに焼き込むクエリハッシュ（`queryHash`）を計算する。
//!
//! ## 設計方針
//!
//! - **安定性**: `std::hash` は Rust のバージョンやプロセスごとに値が変わり得るため
//!   使わない。SHA-256 にフレーム付きのバイト列を流し込み、ダイジェスト先頭
//!   8 バイトを `i64` として扱う
//! - **フレーミング**: 文字列は長さプレフィックス付き、`Option` はタグ付きで書き込み、
//!   `("ab", "c")` と `("a", "bc")` のような連結の曖昧さを排除する
//! - **明示的な列挙**: どのフィールドをハッシュに含めるかはクエリ型自身が
//!   [`PageQuery::write_fingerprint`] で決める

use derive_more::Display;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};

use crate::limit::PageLimit;

/// クエリハッシュ（カーソルの整合性フィンガープリント）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{_0}")]
pub struct QueryHash(i64);

impl QueryHash {
   /// 既存の値から作成する
   pub fn from_i64(value: i64) -> Self {
      Self(value)
   }

   /// 内部の i64 値を取得する
   pub fn as_i64(self) -> i64 {
      self.0
   }
}

/// フレーム付き SHA-256 ハッシャ
///
/// 書き込み順序がそのままハッシュに反映される。フィールドを追加する場合は
/// 末尾に追記し、既存のタグ値は変更しないこと（発行済みカーソルが失効する）。
pub struct FingerprintHasher {
   inner: Sha256,
}

impl FingerprintHasher {
   pub fn new() -> Self {
      Self {
         inner: Sha256::new(),
      }
   }

   /// 1 バイトのタグを書き込む
   pub fn write_tag(&mut self, tag: u8) -> &mut Self {
      self.inner.update([tag]);
      self
   }

   /// u32 をビッグエンディアンで書き込む
   pub fn write_u32(&mut self, value: u32) -> &mut Self {
      self.inner.update(value.to_be_bytes());
      self
   }

   /// 長さプレフィックス付きで文字列を書き込む
   pub fn write_str(&mut self, value: &str) -> &mut Self {
      self.inner.update((value.len() as u64).to_be_bytes());
      self.inner.update(value.as_bytes());
      self
   }

   /// `Option<&str>` を存在タグ付きで書き込む
   pub fn write_opt_str(&mut self, value: Option<&str>) -> &mut Self {
      match value {
         Some(value) => self.write_tag(0x01).write_str(value),
         None => self.write_tag(0x00),
      }
   }

   /// ページサイズを書き込む
   pub fn write_limit(&mut self, limit: PageLimit) -> &mut Self {
      self.write_u32(limit.get())
   }

   /// ダイジェスト先頭 8 バイトからハッシュを確定する
   pub fn finish(self) -> QueryHash {
      let digest = self.inner.finalize();
      let mut head = [0u8; 8];
      head.copy_from_slice(&digest[..8]);
      QueryHash(i64::from_be_bytes(head))
   }
}

impl Default for FingerprintHasher {
   fn default() -> Self {
      Self::new()
   }
}

/// ページネーション対象のクエリ（フィルタ条件 + ページサイズ）
///
/// ルート層がリクエストパラメータから構築し、構築後は変更しない。
/// カーソルトークンには JSON としてそのまま埋め込まれる。
///
/// # 使用例
///
/// ```rust
/// use lendlab_pagination::{FingerprintHasher, PageLimit, PageQuery};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct NameQuery {
///    name:  Option<String>,
///    limit: PageLimit,
/// }
///
/// impl PageQuery for NameQuery {
///    fn limit(&self) -> PageLimit {
///       self.limit
///    }
///
///    fn write_fingerprint(&self, hasher: &mut FingerprintHasher) {
///       hasher.write_opt_str(self.name.as_deref()).write_limit(self.limit);
///    }
/// }
///
/// let a = NameQuery { name: Some("x".into()), limit: PageLimit::new(10).unwrap() };
/// let b = NameQuery { name: None, limit: PageLimit::new(10).unwrap() };
/// assert_eq!(a.query_hash(), a.clone().query_hash());
/// assert_ne!(a.query_hash(), b.query_hash());
/// ```
pub trait PageQuery: Clone + PartialEq + Serialize + DeserializeOwned {
   /// 要求されたページサイズ
   fn limit(&self) -> PageLimit;

   /// ハッシュ対象のフィールドを書き込む
   fn write_fingerprint(&self, hasher: &mut FingerprintHasher);

   /// クエリハッシュを計算する
   fn query_hash(&self) -> QueryHash {
      let mut hasher = FingerprintHasher::new();
      self.write_fingerprint(&mut hasher);
      hasher.finish()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::{assert_eq, assert_ne};

   use super::*;

   fn hash_of(f: impl FnOnce(&mut FingerprintHasher)) -> QueryHash {
      let mut hasher = FingerprintHasher::new();
      f(&mut hasher);
      hasher.finish()
   }

   #[test]
   fn test_同じ入力は同じハッシュになる() {
      let a = hash_of(|h| {
         h.write_str("alice").write_u32(3);
      });
      let b = hash_of(|h| {
         h.write_str("alice").write_u32(3);
      });

      assert_eq!(a, b);
   }

   #[test]
   fn test_文字列の区切り位置が違えば別のハッシュになる() {
      let a = hash_of(|h| {
         h.write_str("ab").write_str("c");
      });
      let b = hash_of(|h| {
         h.write_str("a").write_str("bc");
      });

      assert_ne!(a, b);
   }

   #[test]
   fn test_noneと空文字列は区別される() {
      let none = hash_of(|h| {
         h.write_opt_str(None);
      });
      let empty = hash_of(|h| {
         h.write_opt_str(Some(""));
      });

      assert_ne!(none, empty);
   }

   #[test]
   fn test_ハッシュ値はビルドをまたいで固定される() {
      // 発行済みトークンとの互換性を保つため、値そのものを固定する
      let empty = FingerprintHasher::new().finish();

      // SHA-256("") = e3b0c44298fc1c14...
      assert_eq!(empty.as_i64(), i64::from_be_bytes([
         0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14
      ]));
   }
}
