//! チーム一覧ユースケース

use std::sync::Arc;

use lendlab_domain::team::{Team, TeamQuery};
use lendlab_infra::repository::TeamRepository;
use lendlab_pagination::{Cursor, Pagination, PaginationBuilder};

use crate::error::AdminError;

/// チーム一覧ユースケース
pub struct TeamUseCaseImpl {
   team_repository: Arc<dyn TeamRepository>,
}

impl TeamUseCaseImpl {
   pub fn new(team_repository: Arc<dyn TeamRepository>) -> Self {
      Self { team_repository }
   }

   /// カーソルが指すページを取得する
   #[tracing::instrument(skip_all, level = "debug", fields(role = %cursor.role()))]
   pub async fn list_teams(
      &self,
      cursor: &Cursor<TeamQuery>,
   ) -> Result<Pagination<TeamQuery, Team>, AdminError> {
      let window = self.team_repository.fetch_window(cursor).await?;

      Ok(PaginationBuilder::new(cursor, Team::position).build(window, cursor.query().limit))
   }
}

#[cfg(test)]
mod tests {
   use chrono::DateTime;
   use lendlab_domain::{team::TeamId, value_objects::Username};
   use lendlab_infra::mock::MockTeamRepository;
   use lendlab_pagination::{Direction, PageLimit};
   use pretty_assertions::assert_eq;

   use super::*;

   fn sut(usernames: &[&str]) -> TeamUseCaseImpl {
      let repo = MockTeamRepository::new();
      let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
      for name in usernames {
         repo.add_team(Team::new(
            TeamId::generate(),
            Username::new(*name).unwrap(),
            name.to_uppercase(),
            None,
            now,
         ));
      }
      TeamUseCaseImpl::new(Arc::new(repo))
   }

   fn usernames(page: &Pagination<TeamQuery, Team>) -> Vec<&str> {
      page.items.iter().map(|t| t.username().as_str()).collect()
   }

   #[tokio::test]
   async fn test_先頭ページを取得し次ページカーソルを返す() {
      // Given
      let sut = sut(&["charlie", "alpha", "bravo"]);
      let cursor = Cursor::start(TeamQuery::all(PageLimit::new(2).unwrap()));

      // When
      let page = sut.list_teams(&cursor).await.unwrap();

      // Then
      assert_eq!(usernames(&page), vec!["alpha", "bravo"]);
      assert!(page.prev.is_none());
      assert_eq!(page.next.unwrap().position(), "bravo");
   }

   #[tokio::test]
   async fn test_末尾ページは並びの最後のlimit件() {
      // Given
      let sut = sut(&["alpha", "bravo", "charlie"]);
      let cursor = Cursor::end(TeamQuery::all(PageLimit::new(2).unwrap()));

      // When
      let page = sut.list_teams(&cursor).await.unwrap();

      // Then
      assert_eq!(usernames(&page), vec!["bravo", "charlie"]);
      assert_eq!(page.prev.unwrap().position(), "bravo");
      assert!(page.next.is_none());
   }

   #[tokio::test]
   async fn test_後方カーソルは境界の直前のページを返す() {
      // Given
      let sut = sut(&["alpha", "bravo", "charlie", "delta"]);
      let query = TeamQuery::all(PageLimit::new(2).unwrap());
      let cursor = Cursor::new("delta", Direction::Descending, query);

      // When
      let page = sut.list_teams(&cursor).await.unwrap();

      // Then
      assert_eq!(usernames(&page), vec!["bravo", "charlie"]);
      assert_eq!(page.next.unwrap().position(), "charlie");
   }
}
