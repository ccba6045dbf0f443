use serde::{Deserialize, Serialize};

use crate::domain::team::Team;
use crate::domain::types::{MemberId, TeamId, TeamName, TypeConstraintError, Username, ensure_age};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    /// Members created without a login name keep `None` here.
    pub username: Option<Username>,
    pub age: i32,
    pub team_id: Option<TeamId>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewMember {
    pub username: Option<Username>,
    pub age: i32,
    pub team_id: Option<TeamId>,
}

impl NewMember {
    #[must_use]
    pub fn new(username: Option<Username>, age: i32, team_id: Option<TeamId>) -> Self {
        Self {
            username,
            age,
            team_id,
        }
    }

    /// Builds a member payload from raw values, rejecting negative ages.
    pub fn try_new(
        username: Option<&str>,
        age: i32,
        team_id: Option<i32>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            username: Username::from_optional(username),
            age: ensure_age(age)?,
            team_id: team_id.map(TeamId::new).transpose()?,
        })
    }
}

/// Flat read model of a member joined with its (optional) team.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeam {
    pub member_id: MemberId,
    pub username: Option<Username>,
    pub age: i32,
    pub team_id: Option<TeamId>,
    pub team_name: Option<TeamName>,
}

impl MemberTeam {
    /// Flattens a left-joined `(member, team)` pair.
    ///
    /// A missing team leaves the team columns empty rather than failing.
    pub fn assemble(member: Member, team: Option<Team>) -> Self {
        let (team_id, team_name) = match team {
            Some(team) => (Some(team.id), Some(team.name)),
            None => (None, None),
        };

        Self {
            member_id: member.id,
            username: member.username,
            age: member.age,
            team_id,
            team_name,
        }
    }
}

/// Bulk modification applied to every member matching a condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberUpdate {
    /// Replace the username of every matched member.
    Rename(Username),
    /// Add `delta` (possibly negative) to the age.
    AddAge(i32),
    /// Multiply the age by `factor`.
    MultiplyAge(i32),
}
