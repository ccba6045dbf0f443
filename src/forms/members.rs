use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::search::{MemberOrder, MemberSearchCondition};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE, MAX_PAGE_INDEX, PageRequest};

/// Largest age accepted as a search bound.
pub const MAX_AGE_BOUND: i32 = 200;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_age_bounds"))]
/// Query string of the member search endpoints.
pub struct MemberSearchParams {
    pub username: Option<String>,
    pub team_name: Option<String>,
    #[validate(range(min = 0, max = MAX_AGE_BOUND))]
    pub age_goe: Option<i32>,
    #[validate(range(min = 0, max = MAX_AGE_BOUND))]
    pub age_loe: Option<i32>,
    /// Zero-based page index.
    #[validate(range(max = MAX_PAGE_INDEX))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = MAX_ITEMS_PER_PAGE))]
    pub size: Option<usize>,
    /// Repeated `sort=field[,asc|desc]` keys in priority order.
    #[serde(default)]
    pub sort: Vec<String>,
}

fn validate_age_bounds(params: &MemberSearchParams) -> Result<(), ValidationError> {
    match (params.age_goe, params.age_loe) {
        (Some(goe), Some(loe)) if goe > loe => Err(ValidationError::new("age_bounds")
            .with_message(Cow::from("ageGoe must not be greater than ageLoe"))),
        _ => Ok(()),
    }
}

impl MemberSearchParams {
    /// Parses a raw query string such as `teamName=teamB&sort=age,desc`.
    pub fn from_query(query: &str) -> Result<Self, String> {
        serde_html_form::from_str(query).map_err(|err| format!("Invalid query string: {err}"))
    }

    pub fn condition(&self) -> MemberSearchCondition {
        MemberSearchCondition::from_raw(
            self.username.as_deref(),
            self.team_name.as_deref(),
            self.age_goe,
            self.age_loe,
        )
    }

    pub fn orders(&self) -> Result<Vec<MemberOrder>, String> {
        self.sort
            .iter()
            .filter(|key| !key.trim().is_empty())
            .map(|key| key.parse::<MemberOrder>())
            .collect()
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or_default(),
            self.size.unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        )
    }
}
