//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::booking::{BookingDraft, BookingError};
use crate::catalog::CatalogError;
use crate::domain::{FieldError, SeatClass, Train, search_bookings};
use crate::fare::{self, FareError};
use crate::filter::ResultsView;
use crate::search::{SearchQuery, search};
use crate::simulate::{Cancelled, simulate};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(search_stations))
        .route("/api/trains/search", get(search_trains))
        .route("/api/trains/filter", post(filter_trains))
        .route("/api/trains/:id", get(train_detail))
        .route("/api/trains/:id/quote", get(quote_fare))
        .route("/api/bookings", post(create_booking))
        .route("/api/profile", get(profile))
        .route("/api/profile/bookings", get(search_profile_bookings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stations by name, city or code.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let stations = state
        .catalog
        .find_stations(req.q.trim())
        .into_iter()
        .cloned()
        .collect();

    Json(StationSearchResponse { stations })
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| AppError::BadRequest {
        message: format!("Invalid date (expected YYYY-MM-DD): {raw}"),
    })
}

fn parse_class(raw: &str) -> Result<SeatClass, AppError> {
    SeatClass::parse(raw.trim()).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Search for trains between two stations on a date.
async fn search_trains(
    State(state): State<AppState>,
    Query(req): Query<TrainSearchRequest>,
) -> Result<Json<TrainListResponse>, AppError> {
    let from = req.from.trim();
    let to = req.to.trim();
    if from.is_empty() || to.is_empty() {
        return Err(AppError::BadRequest {
            message: "Origin and destination are required".into(),
        });
    }
    let date = parse_date(&req.date)?;
    let query = SearchQuery::new(from, to, date);

    let catalog = Arc::clone(&state.catalog);
    let (task, _guard) = simulate(state.config.search_delay(), move || {
        search(&catalog, &query)
    });
    let view = ResultsView::new(task.await?);

    Ok(Json(TrainListResponse::from_view(&view, Some(date))))
}

/// Apply filters to a list of search results.
async fn filter_trains(
    State(state): State<AppState>,
    Json(req): Json<FilterTrainsRequest>,
) -> Result<Json<TrainListResponse>, AppError> {
    let date = req.date.as_deref().map(parse_date).transpose()?;
    let results = req
        .train_ids
        .iter()
        .map(|id| state.catalog.train_by_id(id))
        .collect::<Result<Vec<_>, _>>()?;

    let mut view = ResultsView::new(results);
    *view.filters_mut() = req.filters;
    view.apply();

    Ok(Json(TrainListResponse::from_view(&view, date)))
}

/// Train details and bookable classes.
async fn train_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrainDetailResponse>, AppError> {
    let catalog = Arc::clone(&state.catalog);
    let (task, _guard) = simulate(state.config.lookup_delay(), move || catalog.train_by_id(&id));
    let train = task.await??;

    Ok(Json(TrainDetailResponse {
        offered_classes: train.offered_classes(),
        train: Train::clone(&train),
    }))
}

/// Quote a fare for a class and passenger count.
async fn quote_fare(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(req): Query<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let train = state.catalog.train_by_id(&id)?;
    let class = parse_class(&req.class)?;
    let passengers = req.passengers.unwrap_or(1);

    let fare = fare::quote(&train, class, passengers)?;

    Ok(Json(QuoteResponse {
        train_id: train.id.to_string(),
        class: class.to_string(),
        class_label: class.label(),
        passengers,
        fare,
    }))
}

/// Validate passengers and confirm a booking.
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let train = state.catalog.train_by_id(&req.train_id)?;
    let date = parse_date(&req.date)?;
    let class = parse_class(&req.class)?;

    let mut draft = BookingDraft::new(train, date)?;
    draft.select_class(class)?;
    draft.set_passenger_count(req.passengers.len() as u32)?;
    draft.submit_passengers(req.passengers)?;

    // Reject bad input before the simulated wait
    draft.validate()?;

    let (task, _guard) = simulate(state.config.booking_delay(), move || {
        draft.finalize(&mut rand::thread_rng())
    });
    let booking = task.await??;

    Ok((StatusCode::CREATED, Json(BookingResponse { booking })))
}

/// The signed-in traveller.
async fn profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    let user = state.catalog.profile().clone();
    Json(ProfileResponse {
        initials: user.initials(),
        user,
    })
}

/// Search the traveller's bookings by train name, number or PNR.
async fn search_profile_bookings(
    State(state): State<AppState>,
    Query(req): Query<BookingSearchRequest>,
) -> Json<BookingSearchResponse> {
    let bookings = search_bookings(&state.catalog.profile().bookings, req.q.trim())
        .into_iter()
        .cloned()
        .collect();

    Json(BookingSearchResponse { bookings })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Unprocessable { message: String, fields: Vec<FieldError> },
    Internal { message: String },
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::TrainNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<FareError> for AppError {
    fn from(e: FareError) -> Self {
        match e {
            FareError::ClassUnavailable { .. } => AppError::Conflict {
                message: e.to_string(),
            },
            FareError::InvalidPassengerCount(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            FareError::FareTooLarge { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::Fare(e) => e.into(),
            BookingError::Validation(fields) => AppError::Unprocessable {
                message: format!("{} passenger field(s) invalid", fields.len()),
                fields,
            },
            BookingError::NotRunning { .. }
            | BookingError::NoClassSelected
            | BookingError::PassengerCountMismatch { .. } => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<Cancelled> for AppError {
    fn from(e: Cancelled) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, Vec::new()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, Vec::new()),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message, Vec::new()),
            AppError::Unprocessable { message, fields } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, fields)
            }
            AppError::Internal { message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, Vec::new())
            }
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            debug!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            fields,
        });
        (status, body).into_response()
    }
}
