//! Sample data loaded on start-up for local development.

use crate::domain::member::NewMember;
use crate::domain::team::NewTeam;
use crate::domain::types::{TeamName, Username};
use crate::repository::{MemberWriter, TeamReader, TeamWriter};
use crate::services::ServiceResult;

pub const SAMPLE_MEMBER_COUNT: i32 = 100;

/// Creates `teamA`, `teamB` and `member0..member99` on an empty database.
///
/// Member *i* is `i` years old and belongs to `teamA` when *i* is even.
/// Returns the number of members inserted; `0` when teams already exist.
pub fn seed_sample_data<R>(repo: &R) -> ServiceResult<usize>
where
    R: TeamReader + TeamWriter + MemberWriter + ?Sized,
{
    if !repo.list_teams()?.is_empty() {
        log::info!("Database already holds teams, skipping sample data");
        return Ok(0);
    }

    let team_a = repo.create_team(&NewTeam::new(TeamName::new("teamA")?))?;
    let team_b = repo.create_team(&NewTeam::new(TeamName::new("teamB")?))?;

    let members = (0..SAMPLE_MEMBER_COUNT)
        .map(|i| {
            let team = if i % 2 == 0 { team_a.id } else { team_b.id };
            Ok(NewMember::new(
                Some(Username::new(format!("member{i}"))?),
                i,
                Some(team),
            ))
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    let created = repo.create_members(&members).map_err(|err| {
        log::error!("Failed to insert sample members: {err}");
        err
    })?;

    log::info!("Inserted {created} sample members");
    Ok(created)
}
