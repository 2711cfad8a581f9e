use crate::error::RazasResult;
use crate::server::extract::DbConn;
use crate::server::router::RazasState;
use crate::service::RazaService;
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use razas_schema::{
    Page, PageQuery, RazaCreate, RazaListResponse, RazaResponse, RazaUpdate,
    RazaWithAnimalsResponse,
};

pub fn router() -> Router<RazasState> {
    Router::new()
        .route("/razas", post(create_raza).get(list_razas))
        .route("/razas/with-count", get(list_razas_with_count))
        .route(
            "/razas/{cod_raza}",
            get(get_raza).put(update_raza).delete(delete_raza),
        )
        .route("/razas/{cod_raza}/with-count", get(get_raza_with_count))
}

async fn create_raza(
    db: DbConn,
    Json(body): Json<RazaCreate>,
) -> RazasResult<(StatusCode, Json<RazaResponse>)> {
    let raza = RazaService::new(&db.handle).create(body).await?;
    Ok((StatusCode::CREATED, Json(raza)))
}

async fn list_razas(
    db: DbConn,
    Query(query): Query<PageQuery>,
) -> RazasResult<Json<RazaListResponse>> {
    let page = Page::try_from(query)?;
    let (razas, total) = RazaService::new(&db.handle).list(page).await?;
    Ok(Json(RazaListResponse {
        razas,
        total,
        page: page.page,
        size: page.size,
    }))
}

async fn list_razas_with_count(
    db: DbConn,
    Query(query): Query<PageQuery>,
) -> RazasResult<Json<Vec<RazaWithAnimalsResponse>>> {
    let page = Page::try_from(query)?;
    Ok(Json(
        RazaService::new(&db.handle).list_with_count(page).await?,
    ))
}

async fn get_raza(db: DbConn, Path(cod_raza): Path<String>) -> RazasResult<Json<RazaResponse>> {
    Ok(Json(RazaService::new(&db.handle).get(&cod_raza).await?))
}

async fn get_raza_with_count(
    db: DbConn,
    Path(cod_raza): Path<String>,
) -> RazasResult<Json<RazaWithAnimalsResponse>> {
    Ok(Json(
        RazaService::new(&db.handle)
            .get_with_count(&cod_raza)
            .await?,
    ))
}

async fn update_raza(
    db: DbConn,
    Path(cod_raza): Path<String>,
    Json(body): Json<RazaUpdate>,
) -> RazasResult<Json<RazaResponse>> {
    Ok(Json(
        RazaService::new(&db.handle).update(&cod_raza, body).await?,
    ))
}

async fn delete_raza(db: DbConn, Path(cod_raza): Path<String>) -> RazasResult<StatusCode> {
    RazaService::new(&db.handle).delete(&cod_raza).await?;
    Ok(StatusCode::NO_CONTENT)
}
