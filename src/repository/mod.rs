use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        member::{Member, MemberTeam, MemberUpdate, NewMember},
        search::{MemberOrder, MemberPredicate, MemberSearchCondition},
        team::{NewTeam, Team},
        types::{MemberId, TeamName, Username},
    },
    pagination::{Page, PageRequest, PageStrategy},
    repository::errors::RepositoryResult,
};

pub mod errors;
mod filters;
pub mod member;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod team;

/// Diesel-backed repository. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Checks out a dedicated connection for the current unit of work.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl From<PageRequest> for Pagination {
    fn from(request: PageRequest) -> Self {
        Self {
            offset: request.offset(),
            limit: request.size,
        }
    }
}

/// Explicit description of a member search: filters, ordering and window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearchQuery {
    pub condition: MemberSearchCondition,
    /// Extra predicate ANDed with `condition`, e.g. an `Any` built by the caller.
    pub filter: Option<MemberPredicate>,
    /// Sort keys in priority order; member id ascending is always the last key.
    pub order: Vec<MemberOrder>,
    pub pagination: Option<Pagination>,
}

impl MemberSearchQuery {
    pub fn new(condition: MemberSearchCondition) -> Self {
        Self {
            condition,
            filter: None,
            order: Vec::new(),
            pagination: None,
        }
    }

    pub fn matching(mut self, predicate: MemberPredicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    /// Full predicate of this query: the condition's filters plus [`Self::filter`].
    pub fn predicate(&self) -> MemberPredicate {
        let predicate = self.condition.to_predicate();
        match &self.filter {
            Some(filter) => predicate.and(filter.clone()),
            None => predicate,
        }
    }

    pub fn order_by(mut self, order: MemberOrder) -> Self {
        self.order.push(order);
        self
    }

    pub fn order_by_all(mut self, order: impl IntoIterator<Item = MemberOrder>) -> Self {
        self.order.extend(order);
        self
    }

    /// Restricts the query to the window of `request`.
    pub fn page(mut self, request: PageRequest) -> Self {
        self.pagination = Some(request.into());
        self
    }

    /// Same query without its window, as used for counting or in-memory paging.
    pub fn unpaginated(&self) -> Self {
        Self {
            pagination: None,
            ..self.clone()
        }
    }
}

pub trait MemberReader {
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

pub trait MemberWriter {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
    fn update_members(
        &self,
        condition: &MemberSearchCondition,
        update: &MemberUpdate,
    ) -> RepositoryResult<usize>;
    fn delete_members(&self, condition: &MemberSearchCondition) -> RepositoryResult<usize>;
}

pub trait TeamReader {
    fn get_team_by_name(&self, name: &TeamName) -> RepositoryResult<Option<Team>>;
    fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
}

pub trait TeamWriter {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
}
