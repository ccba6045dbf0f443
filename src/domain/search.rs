//! Search conditions, composable predicates and sort orders for member queries.
//!
//! A [`MemberSearchCondition`] holds the optional filters a caller supplied.
//! [`MemberSearchCondition::predicates`] turns each present filter into one
//! standalone [`MemberPredicate`]; absent filters produce nothing. Predicates
//! can then be combined with [`MemberPredicate::and`] / [`MemberPredicate::or`]
//! and handed to any query shape (list, count, bulk update).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::domain::types::{TeamName, Username};

/// Optional filters for a member search. `None` leaves the column unconstrained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberSearchCondition {
    pub username: Option<Username>,
    pub team_name: Option<TeamName>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    /// Condition matching every member.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a condition from raw request values; blank strings are dropped.
    pub fn from_raw(
        username: Option<&str>,
        team_name: Option<&str>,
        age_goe: Option<i32>,
        age_loe: Option<i32>,
    ) -> Self {
        Self {
            username: Username::from_optional(username),
            team_name: TeamName::from_optional(team_name),
            age_goe,
            age_loe,
        }
    }

    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    pub fn team_name(mut self, team_name: TeamName) -> Self {
        self.team_name = Some(team_name);
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// One atomic predicate per present filter, in field order.
    pub fn predicates(&self) -> Vec<MemberPredicate> {
        [
            self.username.clone().map(MemberPredicate::UsernameEq),
            self.team_name.clone().map(MemberPredicate::TeamNameEq),
            self.age_goe.map(MemberPredicate::AgeGoe),
            self.age_loe.map(MemberPredicate::AgeLoe),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Conjunction of [`Self::predicates`]. Empty means "match all".
    pub fn to_predicate(&self) -> MemberPredicate {
        MemberPredicate::All(self.predicates())
    }

    /// `true` when no filter is present.
    pub fn is_unconstrained(&self) -> bool {
        self.predicates().is_empty()
    }
}

/// Boolean filter over a member left-joined with its team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberPredicate {
    /// `member.username = value`
    UsernameEq(Username),
    /// `team.name = value`
    TeamNameEq(TeamName),
    /// `member.age >= value`
    AgeGoe(i32),
    /// `member.age <= value`
    AgeLoe(i32),
    /// Conjunction. Empty matches every row.
    All(Vec<MemberPredicate>),
    /// Disjunction. Empty matches no row.
    Any(Vec<MemberPredicate>),
}

impl MemberPredicate {
    /// Combines two predicates with AND, flattening nested conjunctions.
    pub fn and(self, other: MemberPredicate) -> MemberPredicate {
        match self {
            MemberPredicate::All(mut items) => {
                items.push(other);
                MemberPredicate::All(items)
            }
            predicate => MemberPredicate::All(vec![predicate, other]),
        }
    }

    /// Combines two predicates with OR, flattening nested disjunctions.
    pub fn or(self, other: MemberPredicate) -> MemberPredicate {
        match self {
            MemberPredicate::Any(mut items) => {
                items.push(other);
                MemberPredicate::Any(items)
            }
            predicate => MemberPredicate::Any(vec![predicate, other]),
        }
    }

    /// `true` for predicates that cannot exclude any row.
    pub fn matches_all(&self) -> bool {
        match self {
            MemberPredicate::All(items) => items.iter().all(MemberPredicate::matches_all),
            MemberPredicate::Any(items) => items.iter().any(MemberPredicate::matches_all),
            _ => false,
        }
    }
}

/// Sortable member search columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberSortField {
    Id,
    Username,
    Age,
    TeamName,
}

impl MemberSortField {
    /// Nullable columns always place `NULL` rows last.
    pub fn is_nullable(self) -> bool {
        matches!(self, MemberSortField::Username | MemberSortField::TeamName)
    }
}

impl FromStr for MemberSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" | "memberId" => Ok(MemberSortField::Id),
            "username" => Ok(MemberSortField::Username),
            "age" => Ok(MemberSortField::Age),
            "teamName" => Ok(MemberSortField::TeamName),
            other => Err(format!("unknown sort field `{other}`")),
        }
    }
}

impl Display for MemberSortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MemberSortField::Id => "id",
            MemberSortField::Username => "username",
            MemberSortField::Age => "age",
            MemberSortField::TeamName => "teamName",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction `{other}`")),
        }
    }
}

/// One `ORDER BY` key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberOrder {
    pub field: MemberSortField,
    pub direction: SortDirection,
}

impl MemberOrder {
    pub fn asc(field: MemberSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: MemberSortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for MemberOrder {
    type Err = String;

    /// Parses `field` or `field,direction`, e.g. `age,desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, ',');
        let field = parts.next().unwrap_or_default().parse::<MemberSortField>()?;
        let direction = match parts.next() {
            Some(direction) => direction.parse::<SortDirection>()?,
            None => SortDirection::Asc,
        };
        Ok(Self { field, direction })
    }
}
