//! HTTP handler functions for the memorial map API.

use actix_web::{HttpResponse, web};
use memorial_map_filter::FilterSpec;
use memorial_map_record::Category;
use memorial_map_server_models::{
    ApiCategoryCount, ApiConfig, ApiError, ApiFilterDefaults, ApiHealth, LocationQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/config`
///
/// Returns the map settings and the default filter.
pub async fn config(state: web::Data<AppState>) -> HttpResponse {
    let map = &state.config.map;
    let filter = &state.default_filter;

    HttpResponse::Ok().json(ApiConfig {
        center: map.center,
        zoom: map.zoom,
        initial_view: map.initial_view.clone(),
        views: map.views.clone(),
        default_filter: ApiFilterDefaults {
            categories: filter.categories.iter().copied().collect(),
            areas: filter.areas.iter().cloned().collect(),
            date_start: filter.date_start.clone(),
            date_end: filter.date_end.clone(),
        },
    })
}

/// `GET /api/categories`
///
/// Returns every category with its per-record count.
pub async fn categories(state: web::Data<AppState>) -> HttpResponse {
    let stats = state.engine.statistics();
    let counts: Vec<ApiCategoryCount> = Category::all()
        .iter()
        .map(|&category| ApiCategoryCount {
            name: category,
            label: category.label().to_string(),
            count: stats.category_count(category),
        })
        .collect();

    HttpResponse::Ok().json(counts)
}

/// `GET /api/areas`
///
/// Returns the commune filter options, alphabetically, with counts.
pub async fn areas(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.engine.area_options())
}

/// `GET /api/locations`
///
/// Returns the visible, coordinate-resolved groups as a GeoJSON
/// `FeatureCollection`.
pub async fn locations(
    state: web::Data<AppState>,
    params: web::Query<LocationQueryParams>,
) -> HttpResponse {
    match filter_spec(&state, &params) {
        Ok(spec) => HttpResponse::Ok().json(state.engine.geojson(&spec)),
        Err(response) => response,
    }
}

/// `GET /api/stats`
///
/// Returns statistics over the whole register.
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.engine.statistics())
}

/// `GET /api/stats/filtered`
///
/// Returns statistics over the members of the visible groups.
pub async fn filtered_stats(
    state: web::Data<AppState>,
    params: web::Query<LocationQueryParams>,
) -> HttpResponse {
    match filter_spec(&state, &params) {
        Ok(spec) => HttpResponse::Ok().json(state.engine.filtered_statistics(&spec)),
        Err(response) => response,
    }
}

/// Builds the request's filter on top of the default one, or a 400
/// response describing the bad parameter.
fn filter_spec(state: &AppState, params: &LocationQueryParams) -> Result<FilterSpec, HttpResponse> {
    FilterSpec::from_parts(
        params.categories.as_deref(),
        params.areas.as_deref(),
        params.from.as_deref(),
        params.to.as_deref(),
        &state.default_filter,
    )
    .map_err(|e| {
        log::debug!("Rejected filter parameters: {e}");
        HttpResponse::BadRequest().json(ApiError {
            error: e.to_string(),
        })
    })
}
