//! # エンティティ ID
//!
//! UUID v7 をラップした ID 型。生成順に並ぶため、作成日時の代わりに
//! ソートキーとして使っても挿入順が保たれる。
//!
//! `Uuid` との相互変換は `From` / `Into` で行う。
//!
//! ```rust
//! use lendlab_domain::team::TeamId;
//! use uuid::Uuid;
//!
//! let id = TeamId::generate();
//! let raw: Uuid = id.into();
//! assert_eq!(TeamId::from(raw), id);
//! ```

macro_rules! uuid_ids {
   ($( $(#[$meta:meta])* $Name:ident ),+ $(,)?) => {$(
      $(#[$meta])*
      #[derive(
         Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
         serde::Serialize, serde::Deserialize,
         derive_more::Display, derive_more::From, derive_more::Into,
      )]
      #[serde(transparent)]
      pub struct $Name(uuid::Uuid);

      impl $Name {
         /// 新しい ID を採番する
         pub fn generate() -> Self {
            Self(uuid::Uuid::now_v7())
         }
      }
   )+};
}

uuid_ids! {
   /// チーム ID
   TeamId,
   /// 銀行 ID
   BankId,
}
