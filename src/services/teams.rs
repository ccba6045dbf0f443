use crate::domain::team::Team;
use crate::repository::TeamReader;
use crate::services::ServiceResult;

/// Lists every team ordered by id.
pub fn list_teams<R>(repo: &R) -> ServiceResult<Vec<Team>>
where
    R: TeamReader + ?Sized,
{
    let teams = repo.list_teams().map_err(|err| {
        log::error!("Failed to list teams: {err}");
        err
    })?;

    Ok(teams)
}
