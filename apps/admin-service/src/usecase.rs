//! # ユースケース層
//!
//! 一覧取得のユースケースを定義する。
//!
//! リポジトリからウィンドウ（`limit + 1` 行）を取得し、
//! [`PaginationBuilder`](lendlab_pagination::PaginationBuilder) でページを組み立てる。
//! カーソルの解決やトークンのエンコードはハンドラ層が担当する。

pub mod bank;
pub mod team;

pub use bank::BankUseCaseImpl;
pub use team::TeamUseCaseImpl;
