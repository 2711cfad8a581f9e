use crate::error::RazasResult;
use crate::server::extract::DbConn;
use crate::server::router::RazasState;
use crate::service::AnimalService;
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use razas_schema::{
    AnimalCreate, AnimalListResponse, AnimalResponse, AnimalUpdate, Page, PageQuery,
};

pub fn router() -> Router<RazasState> {
    Router::new()
        .route("/animales", post(create_animal).get(list_animales))
        .route(
            "/animales/{cod_animal}",
            get(get_animal).put(update_animal).delete(delete_animal),
        )
        .route("/animales/raza/{cod_raza}", get(list_animales_by_raza))
}

async fn create_animal(
    db: DbConn,
    Json(body): Json<AnimalCreate>,
) -> RazasResult<(StatusCode, Json<AnimalResponse>)> {
    let animal = AnimalService::new(&db.handle).create(body).await?;
    Ok((StatusCode::CREATED, Json(animal)))
}

async fn list_animales(
    db: DbConn,
    Query(query): Query<PageQuery>,
) -> RazasResult<Json<AnimalListResponse>> {
    let page = Page::try_from(query)?;
    let (animals, total) = AnimalService::new(&db.handle).list(page).await?;
    Ok(Json(AnimalListResponse {
        animals,
        total,
        page: page.page,
        size: page.size,
    }))
}

async fn list_animales_by_raza(
    db: DbConn,
    Path(cod_raza): Path<String>,
    Query(query): Query<PageQuery>,
) -> RazasResult<Json<AnimalListResponse>> {
    let page = Page::try_from(query)?;
    let (animals, total) = AnimalService::new(&db.handle)
        .list_by_raza(&cod_raza, page)
        .await?;
    Ok(Json(AnimalListResponse {
        animals,
        total,
        page: page.page,
        size: page.size,
    }))
}

async fn get_animal(
    db: DbConn,
    Path(cod_animal): Path<String>,
) -> RazasResult<Json<AnimalResponse>> {
    Ok(Json(AnimalService::new(&db.handle).get(&cod_animal).await?))
}

async fn update_animal(
    db: DbConn,
    Path(cod_animal): Path<String>,
    Json(body): Json<AnimalUpdate>,
) -> RazasResult<Json<AnimalResponse>> {
    Ok(Json(
        AnimalService::new(&db.handle)
            .update(&cod_animal, body)
            .await?,
    ))
}

async fn delete_animal(db: DbConn, Path(cod_animal): Path<String>) -> RazasResult<StatusCode> {
    AnimalService::new(&db.handle).delete(&cod_animal).await?;
    Ok(StatusCode::NO_CONTENT)
}
