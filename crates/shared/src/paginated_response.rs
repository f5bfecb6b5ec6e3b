//! # ページネーション付きレスポンス
//!
//! キーセットページネーションに対応した一覧 API のレスポンス型。

use serde::{Deserialize, Serialize};

/// ページネーション付きレスポンス
///
/// 4 方向のカーソルトークンを返す。トークンはクライアントにとって不透明で、
/// 次のリクエストの `cursor` パラメータにそのまま渡す。
///
/// ## JSON 形式
///
/// ```json
/// {
///   "data": [...],
///   "first": "AQEAAAAA...",
///   "prev": null,
///   "next": "AQEAAAAF...",
///   "last": "AQIAAAAA..."
/// }
/// ```
///
/// `prev` / `next` が `null` の場合、その方向にはページがない。
/// `first` / `last` は常に存在する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
   pub data:  Vec<T>,
   pub first: String,
   pub prev:  Option<String>,
   pub next:  Option<String>,
   pub last:  String,
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_prevとnextがない場合はnullでシリアライズされる() {
      let response = PaginatedResponse {
         data:  vec!["a"],
         first: "F".to_string(),
         prev:  None,
         next:  None,
         last:  "L".to_string(),
      };

      assert_eq!(
         serde_json::to_value(&response).unwrap(),
         serde_json::json!({
            "data": ["a"],
            "first": "F",
            "prev": null,
            "next": null,
            "last": "L"
         })
      );
   }
}
