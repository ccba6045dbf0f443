//! Repository implementation for members and the member/team search.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::{
        member::{Member, MemberTeam, MemberUpdate, NewMember},
        search::{MemberPredicate, MemberSearchCondition},
        team::Team,
        types::{MemberId, TypeConstraintError, Username},
    },
    models::{
        member::{Member as DbMember, NewMember as DbNewMember},
        team::Team as DbTeam,
    },
    pagination::{Page, PageRequest, PageStrategy, TotalSource, resolve_total},
    repository::{
        DieselRepository, MemberReader, MemberSearchQuery, MemberWriter, Pagination,
        errors::{RepositoryError, RepositoryResult},
        filters::{apply_order, filtered_query},
    },
};

/// Converts a window bound to SQLite's signed integer.
///
/// Values past `i64::MAX` clamp to it: such an offset lies beyond any table, so
/// the page comes back empty instead of wrapping to a negative offset.
fn sql_bound(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Runs the content query described by `query`.
fn load_member_teams(
    conn: &mut SqliteConnection,
    query: &MemberSearchQuery,
) -> RepositoryResult<Vec<MemberTeam>> {
    let mut items = apply_order(filtered_query(&query.predicate()), &query.order);

    if let Some(Pagination { offset, limit }) = query.pagination {
        items = items.offset(sql_bound(offset)).limit(sql_bound(limit));
    }

    let rows = items.load::<(DbMember, Option<DbTeam>)>(conn)?;

    rows.into_iter()
        .map(|(member, team)| {
            let member = Member::try_from(member)?;
            let team = team.map(Team::try_from).transpose()?;
            Ok(MemberTeam::assemble(member, team))
        })
        .collect::<Result<Vec<_>, TypeConstraintError>>()
        .map_err(RepositoryError::from)
}

/// Runs the count query for `predicate` over the same join as the content query.
fn count_member_teams(
    conn: &mut SqliteConnection,
    predicate: &MemberPredicate,
) -> RepositoryResult<usize> {
    let total = filtered_query(predicate)
        .count()
        .get_result::<i64>(conn)?;

    usize::try_from(total)
        .map_err(|_| RepositoryError::Unexpected(format!("count returned {total} rows")))
}

/// Primary keys of every member matching `condition`.
fn matching_member_ids(
    conn: &mut SqliteConnection,
    condition: &MemberSearchCondition,
) -> RepositoryResult<Vec<i32>> {
    use crate::schema::members;

    let ids = filtered_query(&condition.to_predicate())
        .select(members::id)
        .load::<i32>(conn)?;

    Ok(ids)
}

impl MemberReader for DieselRepository {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let db_member = members::table
            .find(id.get())
            .first::<DbMember>(&mut conn)
            .optional()?;

        match db_member {
            Some(db_member) => Ok(Some(
                Member::try_from(db_member).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_members_by_username(&self, username: &Username) -> RepositoryResult<Vec<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let db_members = members::table
            .filter(members::username.eq(username.as_str()))
            .order(members::id.asc())
            .load::<DbMember>(&mut conn)?;

        db_members
            .into_iter()
            .map(|db_member| Member::try_from(db_member).map_err(RepositoryError::from))
            .collect()
    }

    fn search_members(&self, query: MemberSearchQuery) -> RepositoryResult<Vec<MemberTeam>> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| load_member_teams(conn, &query))
    }

    fn search_members_page(
        &self,
        query: MemberSearchQuery,
        page: PageRequest,
        strategy: PageStrategy,
    ) -> RepositoryResult<Page<MemberTeam>> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| match strategy {
            PageStrategy::Naive => {
                let rows = load_member_teams(conn, &query.unpaginated())?;
                Ok(Page::from_all(rows, page))
            }
            PageStrategy::Split => {
                let content = load_member_teams(conn, &query.unpaginated().page(page))?;
                let total = count_member_teams(conn, &query.predicate())?;
                Ok(Page::new(content, page, total, TotalSource::Counted))
            }
            PageStrategy::Optimized => {
                let content = load_member_teams(conn, &query.unpaginated().page(page))?;
                let (total, source) = resolve_total(&page, content.len(), || {
                    count_member_teams(conn, &query.predicate())
                })?;
                if source == TotalSource::Inferred {
                    log::debug!(
                        "Skipped count query for page {} of size {}",
                        page.page,
                        page.size
                    );
                }
                Ok(Page::new(content, page, total, source))
            }
        })
    }

    fn count_members(&self, condition: &MemberSearchCondition) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        count_member_teams(&mut conn, &condition.to_predicate())
    }
}

impl MemberWriter for DieselRepository {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let db_new_member: DbNewMember = new_member.into();

        let db_member = diesel::insert_into(members::table)
            .values(&db_new_member)
            .get_result::<DbMember>(&mut conn)?;

        Member::try_from(db_member).map_err(RepositoryError::from)
    }

    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewMember> = new_members.iter().map(Into::into).collect();

        let affected = diesel::insert_into(members::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn update_members(
        &self,
        condition: &MemberSearchCondition,
        update: &MemberUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let ids = matching_member_ids(conn, condition)?;
            if ids.is_empty() {
                return Ok(0);
            }

            let target = members::table.filter(members::id.eq_any(ids));
            let affected = match update {
                MemberUpdate::Rename(username) => diesel::update(target)
                    .set(members::username.eq(Some(username.as_str())))
                    .execute(conn)?,
                MemberUpdate::AddAge(delta) => diesel::update(target)
                    .set(members::age.eq(members::age + *delta))
                    .execute(conn)?,
                MemberUpdate::MultiplyAge(factor) => diesel::update(target)
                    .set(members::age.eq(members::age * *factor))
                    .execute(conn)?,
            };

            Ok(affected)
        })
    }

    fn delete_members(&self, condition: &MemberSearchCondition) -> RepositoryResult<usize> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let ids = matching_member_ids(conn, condition)?;
            if ids.is_empty() {
                return Ok(0);
            }

            let affected =
                diesel::delete(members::table.filter(members::id.eq_any(ids))).execute(conn)?;

            Ok(affected)
        })
    }
}
