//! # ページサイズ
//!
//! `limit ≥ 1` を型で保証する。0 件のページ要求はエンジンに到達する前に
//! [`PageLimit::new`] で弾かれる。

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::PageLimitError;

/// 1 ページあたりの件数（値オブジェクト）
///
/// # 不変条件
///
/// - 1 以上
///
/// # 使用例
///
/// ```rust
/// use lendlab_pagination::PageLimit;
///
/// let limit = PageLimit::new(20).unwrap();
/// assert_eq!(limit.get(), 20);
/// // 次ページの有無を判定するため 1 件多く取得する
/// assert_eq!(limit.fetch_size(), 21);
///
/// assert!(PageLimit::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display("{_0}")]
#[serde(try_from = "u32", into = "u32")]
pub struct PageLimit(u32);

impl PageLimit {
   /// 最小のページサイズ
   pub const MIN: Self = Self(1);

   /// 指定した値からページサイズを作成する
   ///
   /// # エラー
   ///
   /// 0 の場合は [`PageLimitError`] を返す。
   pub fn new(value: u32) -> Result<Self, PageLimitError> {
      if value == 0 {
         return Err(PageLimitError(value));
      }
      Ok(Self(value))
   }

   /// 内部の u32 値を取得する
   pub fn get(self) -> u32 {
      self.0
   }

   /// `usize` として取得する
   pub fn as_usize(self) -> usize {
      self.0 as usize
   }

   /// データ取得層が取得すべき行数（`limit + 1`）
   ///
   /// 余分な 1 行（オーバーフロー行）の有無で次ページの存在を判定する。
   pub fn fetch_size(self) -> usize {
      self.as_usize() + 1
   }

   /// 上限を超えないよう切り詰める
   pub fn clamp_to(self, max: PageLimit) -> Self {
      Self(self.0.min(max.0))
   }
}

impl TryFrom<u32> for PageLimit {
   type Error = PageLimitError;

   fn try_from(value: u32) -> Result<Self, Self::Error> {
      Self::new(value)
   }
}

impl From<PageLimit> for u32 {
   fn from(limit: PageLimit) -> Self {
      limit.0
   }
}
