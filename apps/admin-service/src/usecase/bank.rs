//! 銀行一覧ユースケース

use std::sync::Arc;

use lendlab_domain::bank::{Bank, BankQuery};
use lendlab_infra::repository::BankRepository;
use lendlab_pagination::{Cursor, Pagination, PaginationBuilder};

use crate::error::AdminError;

/// 銀行一覧ユースケース
pub struct BankUseCaseImpl {
   bank_repository: Arc<dyn BankRepository>,
}

impl BankUseCaseImpl {
   pub fn new(bank_repository: Arc<dyn BankRepository>) -> Self {
      Self { bank_repository }
   }

   /// カーソルが指すページを取得する
   #[tracing::instrument(skip_all, level = "debug", fields(role = %cursor.role()))]
   pub async fn list_banks(
      &self,
      cursor: &Cursor<BankQuery>,
   ) -> Result<Pagination<BankQuery, Bank>, AdminError> {
      let window = self.bank_repository.fetch_window(cursor).await?;

      Ok(PaginationBuilder::new(cursor, Bank::position).build(window, cursor.query().limit))
   }
}
