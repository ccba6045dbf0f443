//! Translation of [`MemberPredicate`] and [`MemberOrder`] into Diesel query fragments.

use diesel::dsl::IntoBoxed;
use diesel::helper_types::{LeftJoin, LeftJoinQuerySource};
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;

use crate::domain::search::{MemberOrder, MemberPredicate, MemberSortField, SortDirection};
use crate::schema::{members, teams};

/// Query source every member search runs against: members left-joined to teams.
pub(crate) type MemberTeamSource = LeftJoinQuerySource<members::table, teams::table>;

/// Boxed `SELECT ... FROM members LEFT JOIN teams` with the default selection.
pub(crate) type BoxedMemberTeamQuery<'a> =
    IntoBoxed<'a, LeftJoin<members::table, teams::table>, Sqlite>;

pub(crate) type BoxedCondition =
    Box<dyn BoxableExpression<MemberTeamSource, Sqlite, SqlType = Bool>>;

/// Converts a predicate into a boxed SQL condition.
///
/// `None` means the predicate cannot exclude any row, so no `WHERE` clause is
/// needed.
pub(crate) fn to_sql_condition(predicate: &MemberPredicate) -> Option<BoxedCondition> {
    match predicate {
        MemberPredicate::UsernameEq(username) => Some(Box::new(
            members::username
                .eq(username.as_str().to_string())
                .assume_not_null(),
        )),
        MemberPredicate::TeamNameEq(team_name) => Some(Box::new(
            teams::name
                .nullable()
                .eq(team_name.as_str().to_string())
                .assume_not_null(),
        )),
        MemberPredicate::AgeGoe(age) => Some(Box::new(members::age.ge(*age))),
        MemberPredicate::AgeLoe(age) => Some(Box::new(members::age.le(*age))),
        MemberPredicate::All(items) => items
            .iter()
            .filter_map(to_sql_condition)
            .reduce(|acc, condition| -> BoxedCondition { Box::new(acc.and(condition)) }),
        MemberPredicate::Any(items) => {
            if predicate.matches_all() {
                return None;
            }
            let disjunction = items
                .iter()
                .filter_map(to_sql_condition)
                .reduce(|acc, condition| -> BoxedCondition { Box::new(acc.or(condition)) });
            // OR over nothing selects nothing.
            Some(disjunction.unwrap_or_else(|| -> BoxedCondition {
                Box::new(false.into_sql::<Bool>())
            }))
        }
    }
}

/// Starts a boxed member/team query restricted by `predicate`.
pub(crate) fn filtered_query<'a>(predicate: &MemberPredicate) -> BoxedMemberTeamQuery<'a> {
    let query: BoxedMemberTeamQuery<'a> = members::table.left_join(teams::table).into_boxed();
    match to_sql_condition(predicate) {
        Some(condition) => query.filter(condition),
        None => query,
    }
}

/// Appends the sort keys, then member id ascending as the tie breaker.
///
/// Nullable keys are preceded by an `IS NULL` key so `NULL` rows sort last in
/// either direction.
pub(crate) fn apply_order<'a>(
    mut query: BoxedMemberTeamQuery<'a>,
    order: &[MemberOrder],
) -> BoxedMemberTeamQuery<'a> {
    for key in order {
        query = match (key.field, key.direction) {
            (MemberSortField::Id, SortDirection::Asc) => query.then_order_by(members::id.asc()),
            (MemberSortField::Id, SortDirection::Desc) => query.then_order_by(members::id.desc()),
            (MemberSortField::Age, SortDirection::Asc) => query.then_order_by(members::age.asc()),
            (MemberSortField::Age, SortDirection::Desc) => {
                query.then_order_by(members::age.desc())
            }
            (MemberSortField::Username, direction) => {
                let query = query.then_order_by(members::username.is_null().asc());
                match direction {
                    SortDirection::Asc => query.then_order_by(members::username.asc()),
                    SortDirection::Desc => query.then_order_by(members::username.desc()),
                }
            }
            (MemberSortField::TeamName, direction) => {
                let query = query.then_order_by(teams::name.nullable().is_null().asc());
                match direction {
                    SortDirection::Asc => query.then_order_by(teams::name.nullable().asc()),
                    SortDirection::Desc => query.then_order_by(teams::name.nullable().desc()),
                }
            }
        };
    }

    query.then_order_by(members::id.asc())
}
