//! Diesel models for member records.

use diesel::prelude::*;

use crate::domain::member::{Member as DomainMember, NewMember as DomainNewMember};
use crate::domain::types::{MemberId, TeamId, TypeConstraintError, Username};
use crate::models::team::Team;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Team, foreign_key = team_id))]
#[diesel(table_name = crate::schema::members)]
/// Diesel model for [`crate::domain::member::Member`].
pub struct Member {
    pub id: i32,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::members)]
/// Insertable form of [`Member`].
pub struct NewMember<'a> {
    pub username: Option<&'a str>,
    pub age: i32,
    pub team_id: Option<i32>,
}

impl TryFrom<Member> for DomainMember {
    type Error = TypeConstraintError;

    fn try_from(member: Member) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MemberId::try_from(member.id)?,
            // Blank names stored by other writers read back as "no name".
            username: Username::from_optional(member.username),
            age: member.age,
            team_id: member.team_id.map(TeamId::try_from).transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewMember> for NewMember<'a> {
    fn from(member: &'a DomainNewMember) -> Self {
        Self {
            username: member.username.as_deref(),
            age: member.age,
            team_id: member.team_id.map(TeamId::get),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_into_domain() {
        let db = Member {
            id: 1,
            username: Some("member1".into()),
            age: 10,
            team_id: Some(2),
        };

        let domain = DomainMember::try_from(db).expect("valid member");

        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.username.as_deref(), Some("member1"));
        assert_eq!(domain.age, 10);
        assert_eq!(domain.team_id.map(TeamId::get), Some(2));
    }

    #[test]
    fn member_without_name_or_team_into_domain() {
        let db = Member {
            id: 5,
            username: None,
            age: 99,
            team_id: None,
        };

        let domain = DomainMember::try_from(db).expect("valid member");

        assert_eq!(domain.username, None);
        assert_eq!(domain.team_id, None);
    }

    #[test]
    fn member_with_invalid_id_is_rejected() {
        let db = Member {
            id: 0,
            username: None,
            age: 1,
            team_id: None,
        };

        assert_eq!(
            DomainMember::try_from(db),
            Err(TypeConstraintError::NonPositiveId)
        );
    }

    #[test]
    fn from_domain_new_creates_insertable() {
        let domain = DomainNewMember::try_new(Some("member2"), 20, Some(1)).expect("valid member");

        let new: NewMember = (&domain).into();

        assert_eq!(new.username, Some("member2"));
        assert_eq!(new.age, 20);
        assert_eq!(new.team_id, Some(1));
    }
}
