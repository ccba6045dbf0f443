//! Repository implementation for teams.

use diesel::prelude::*;

use crate::{
    domain::{
        team::{NewTeam, Team},
        types::TeamName,
    },
    models::team::{NewTeam as DbNewTeam, Team as DbTeam},
    repository::{
        DieselRepository, TeamReader, TeamWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl TeamWriter for DieselRepository {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team> {
        use crate::schema::teams;

        let mut conn = self.conn()?;

        let db_new_team: DbNewTeam = new_team.into();

        let db_team = diesel::insert_into(teams::table)
            .values(&db_new_team)
            .get_result::<DbTeam>(&mut conn)?;

        let team = Team::try_from(db_team).map_err(RepositoryError::from)?;
        Ok(team)
    }
}

impl TeamReader for DieselRepository {
    fn get_team_by_name(&self, name: &TeamName) -> RepositoryResult<Option<Team>> {
        use crate::schema::teams;

        let mut conn = self.conn()?;

        let db_team = teams::table
            .filter(teams::name.eq(name.as_str()))
            .order(teams::id.asc())
            .first::<DbTeam>(&mut conn)
            .optional()?;

        db_team
            .map(Team::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_teams(&self) -> RepositoryResult<Vec<Team>> {
        use crate::schema::teams;

        let mut conn = self.conn()?;

        let db_teams = teams::table
            .order(teams::id.asc())
            .load::<DbTeam>(&mut conn)?;

        db_teams
            .into_iter()
            .map(|db_team| Team::try_from(db_team).map_err(RepositoryError::from))
            .collect()
    }
}
