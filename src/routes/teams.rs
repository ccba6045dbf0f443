use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::teams as team_service;

#[get("/v1/teams")]
pub async fn list_teams(repo: web::Data<DieselRepository>) -> impl Responder {
    match team_service::list_teams(repo.get_ref()) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(err) => error_response(err),
    }
}
