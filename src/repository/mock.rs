//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::member::{Member, MemberTeam, MemberUpdate, NewMember};
use crate::domain::search::MemberSearchCondition;
use crate::domain::team::{NewTeam, Team};
use crate::domain::types::{MemberId, TeamName, Username};
use crate::pagination::{Page, PageRequest, PageStrategy};
use crate::repository::errors::RepositoryResult;
use crate::repository::{MemberReader, MemberSearchQuery, MemberWriter, TeamReader, TeamWriter};

mock! {
    pub Repository {}

    impl MemberReader for Repository {
        fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
        fn list_members_by_username(&self, username: &Username) -> RepositoryResult<Vec<Member>>;
        fn search_members(&self, query: MemberSearchQuery) -> RepositoryResult<Vec<MemberTeam>>;
        fn search_members_page(
            &self,
            query: MemberSearchQuery,
            page: PageRequest,
            strategy: PageStrategy,
        ) -> RepositoryResult<Page<MemberTeam>>;
        fn count_members(&self, condition: &MemberSearchCondition) -> RepositoryResult<usize>;
    }

    impl MemberWriter for Repository {
        fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
        fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
        fn update_members(
            &self,
            condition: &MemberSearchCondition,
            update: &MemberUpdate,
        ) -> RepositoryResult<usize>;
        fn delete_members(&self, condition: &MemberSearchCondition) -> RepositoryResult<usize>;
    }

    impl TeamReader for Repository {
        fn get_team_by_name(&self, name: &TeamName) -> RepositoryResult<Option<Team>>;
        fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
    }

    impl TeamWriter for Repository {
        fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
    }
}
