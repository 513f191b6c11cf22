//! HTTP surface for stockinsight.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /api/stock[?symbol=TEXT]` | Fetch and store a symbol's recent daily prices |
//! | `GET /api/something` | Liveness probe |
//! | `GET /constants/<file>` | Raw CSV datasets |

pub mod error;
pub mod handlers;
pub mod response;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, StartupError};
pub use response::StockResponse;
pub use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let constants = ServeDir::new(&state.config.constants_dir);

    Router::new()
        .route("/api/stock", get(handlers::fetch_stock_data))
        .route("/api/something", get(handlers::liveness))
        .nest_service("/constants", constants)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
