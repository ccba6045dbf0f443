//! Member search services backing the `/v{1..4}/members` endpoints.

use validator::Validate;

use crate::domain::member::MemberTeam;
use crate::forms::members::MemberSearchParams;
use crate::pagination::{Page, PageRequest, PageStrategy};
use crate::repository::{MemberReader, MemberSearchQuery};
use crate::services::{ServiceError, ServiceResult};

/// Validates the request and turns it into a repository query plus page window.
fn prepare(params: &MemberSearchParams) -> ServiceResult<(MemberSearchQuery, PageRequest)> {
    if let Err(err) = params.validate() {
        log::warn!("Rejected member search parameters: {err}");
        return Err(ServiceError::Form(err.to_string()));
    }

    let orders = params.orders().map_err(ServiceError::Form)?;
    let query = MemberSearchQuery::new(params.condition()).order_by_all(orders);

    Ok((query, params.page_request()))
}

/// Returns every member matching `params`, without paging.
pub fn search_members<R>(repo: &R, params: &MemberSearchParams) -> ServiceResult<Vec<MemberTeam>>
where
    R: MemberReader + ?Sized,
{
    let (query, _) = prepare(params)?;

    let members = repo.search_members(query).map_err(|err| {
        log::error!("Failed to search members: {err}");
        err
    })?;

    Ok(members)
}

/// Returns one page of members matching `params`, totalled with `strategy`.
pub fn search_members_page<R>(
    repo: &R,
    params: &MemberSearchParams,
    strategy: PageStrategy,
) -> ServiceResult<Page<MemberTeam>>
where
    R: MemberReader + ?Sized,
{
    let (query, page) = prepare(params)?;

    let members = repo
        .search_members_page(query, page, strategy)
        .map_err(|err| {
            log::error!("Failed to load member page with {strategy:?} strategy: {err}");
            err
        })?;

    Ok(members)
}
