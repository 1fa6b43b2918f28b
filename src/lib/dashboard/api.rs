use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;

use super::types::{DashboardServer, DashboardState, StopRequest};
use crate::lib::control::gate::start_gate;
use crate::lib::dispatcher::types::{Command, LaunchParameter};

impl DashboardServer {
    pub fn new(state: DashboardState, address: &str, port: &str) -> Self {
        Self {
            state,
            address: address.to_string(),
            port: port.to_string(),
        }
    }

    async fn get_tasks(State(state): State<DashboardState>) -> impl IntoResponse {
        Json(state.poller.snapshot().as_ref().clone())
    }

    async fn get_table(State(state): State<DashboardState>) -> impl IntoResponse {
        let model = state.poller.snapshot();
        Json(state.layout.render(&model))
    }

    async fn get_health(State(state): State<DashboardState>) -> impl IntoResponse {
        Json(state.poller.health())
    }

    async fn check_start(Json(form): Json<Vec<LaunchParameter>>) -> impl IntoResponse {
        Json(start_gate(&form))
    }

    async fn start_server_task(
        State(state): State<DashboardState>,
        Json(form): Json<Vec<LaunchParameter>>,
    ) -> impl IntoResponse {
        let gate = start_gate(&form);
        if !gate.enabled {
            info!(event = "start_gated");
            return (StatusCode::CONFLICT, Json(json!({ "enabled": false })));
        }

        state.dispatcher.spawn(Command::Start(form));
        (StatusCode::ACCEPTED, Json(json!({ "command": "start" })))
    }

    async fn update_server_image(State(state): State<DashboardState>) -> impl IntoResponse {
        state.dispatcher.spawn(Command::Update);
        (StatusCode::ACCEPTED, Json(json!({ "command": "update" })))
    }

    async fn stop_server_task(
        State(state): State<DashboardState>,
        Json(request): Json<StopRequest>,
    ) -> impl IntoResponse {
        if request.task_arn.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "task_arn is required" })),
            );
        }

        state.dispatcher.spawn(Command::Stop {
            task_arn: request.task_arn,
        });
        (StatusCode::ACCEPTED, Json(json!({ "command": "stop" })))
    }

    pub fn router(state: DashboardState) -> Router {
        Router::new()
            .route("/tasks", get(DashboardServer::get_tasks))
            .route("/table", get(DashboardServer::get_table))
            .route("/health", get(DashboardServer::get_health))
            .route("/start/check", post(DashboardServer::check_start))
            .route("/start", post(DashboardServer::start_server_task))
            .route("/update", post(DashboardServer::update_server_image))
            .route("/stop", post(DashboardServer::stop_server_task))
            .with_state(state)
    }

    pub async fn start_server(self) -> std::io::Result<()> {
        let bind = format!("{}:{}", self.address, self.port);
        let app = DashboardServer::router(self.state);

        let listener = TcpListener::bind(&bind).await?;
        info!(event = "dashboard_listening", addr = %bind);

        axum::serve(listener, app).await
    }
}
