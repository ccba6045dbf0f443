#![allow(dead_code)]

use member_search::db::{DbPool, establish_connection_pool, run_migrations};
use member_search::domain::member::NewMember;
use member_search::domain::team::{NewTeam, Team};
use member_search::domain::types::TeamName;
use member_search::repository::{DieselRepository, MemberWriter, TeamWriter};
use tempfile::TempDir;

/// SQLite database file in a temporary directory with all migrations applied.
///
/// The directory and the database are removed when the value is dropped.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path");

        let pool = establish_connection_pool(url).expect("create pool");
        run_migrations(&pool).expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn create_team(repo: &DieselRepository, name: &str) -> Team {
    repo.create_team(&NewTeam::new(TeamName::new(name).expect("valid team name")))
        .expect("create team")
}

/// Inserts `teamA`, `teamB` and member1..member4 aged 10, 20, 30, 40 in teams A, A, B, B.
pub fn seed_four_members(repo: &DieselRepository) -> (Team, Team) {
    let team_a = create_team(repo, "teamA");
    let team_b = create_team(repo, "teamB");

    let members = [
        ("member1", 10, &team_a),
        ("member2", 20, &team_a),
        ("member3", 30, &team_b),
        ("member4", 40, &team_b),
    ]
    .into_iter()
    .map(|(name, age, team)| {
        NewMember::try_new(Some(name), age, Some(team.id.get())).expect("valid member")
    })
    .collect::<Vec<_>>();

    assert_eq!(repo.create_members(&members).expect("create members"), 4);

    (team_a, team_b)
}
