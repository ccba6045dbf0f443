use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::dto::members::{ErrorResponse, PageResponse};
use crate::forms::members::MemberSearchParams;
use crate::pagination::PageStrategy;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::members as member_service;

fn parse_params(req: &HttpRequest) -> Result<MemberSearchParams, HttpResponse> {
    MemberSearchParams::from_query(req.query_string()).map_err(|message| {
        log::warn!("Rejected query string `{}`: {message}", req.query_string());
        HttpResponse::BadRequest().json(ErrorResponse::new(message))
    })
}

fn page_response(
    req: &HttpRequest,
    repo: &DieselRepository,
    strategy: PageStrategy,
) -> HttpResponse {
    let params = match parse_params(req) {
        Ok(params) => params,
        Err(response) => return response,
    };

    match member_service::search_members_page(repo, &params, strategy) {
        Ok(page) => HttpResponse::Ok().json(PageResponse::from(page)),
        Err(err) => error_response(err),
    }
}

/// Every matching member, unpaged.
#[get("/v1/members")]
pub async fn search_members_v1(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = match parse_params(&req) {
        Ok(params) => params,
        Err(response) => return response,
    };

    match member_service::search_members(repo.get_ref(), &params) {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(err) => error_response(err),
    }
}

/// Paged by loading the full result and slicing it in memory.
#[get("/v2/members")]
pub async fn search_members_v2(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    page_response(&req, repo.get_ref(), PageStrategy::Naive)
}

/// Paged with a content query and an unconditional count query.
#[get("/v3/members")]
pub async fn search_members_v3(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    page_response(&req, repo.get_ref(), PageStrategy::Split)
}

/// Paged with a count query only when the page cannot determine the total.
#[get("/v4/members")]
pub async fn search_members_v4(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    page_response(&req, repo.get_ref(), PageStrategy::Optimized)
}
