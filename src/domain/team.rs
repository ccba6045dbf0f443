use serde::{Deserialize, Serialize};

use crate::domain::types::{TeamId, TeamName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: TeamName,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewTeam {
    pub name: TeamName,
}

impl NewTeam {
    #[must_use]
    pub fn new(name: TeamName) -> Self {
        Self { name }
    }
}
