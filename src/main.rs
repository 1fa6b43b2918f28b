use clap::Parser;
use std::{error::Error, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::lib::{
    backend::types::{Backend, HttpBackend},
    config::config::Config,
    dashboard::types::{DashboardServer, DashboardState},
    dispatcher::types::CommandDispatcher,
    poller::types::StatusPoller,
    view::{
        render::pump,
        types::{LogSink, TableLayout},
    },
};

mod lib {
    pub mod backend;
    pub mod config;
    pub mod control;
    pub mod dashboard;
    pub mod dispatcher;
    pub mod poller;
    pub mod tasks;
    pub mod view;
}

fn init_logging(config: &Config) {
    let directive = config.log_directive(
        std::env::var("CSGO_DASH_LOG").ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    init_logging(&config);

    let base_url = config.api_base_url()?;
    let interval = config.poll_interval()?;
    info!(
        event = "startup",
        backend = %base_url,
        poll_secs = interval.as_secs(),
        update_route = ?config.update_route
    );

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&base_url));
    let poller = Arc::new(StatusPoller::new(backend.clone(), interval));
    let dispatcher = Arc::new(CommandDispatcher::new(
        backend,
        poller.clone(),
        config.update_route,
    ));
    let layout = Arc::new(TableLayout::new(&config.server_password));

    tokio::spawn(pump(poller.subscribe(), layout.clone(), LogSink::default()));
    tokio::spawn(poller.clone().run());

    let server = DashboardServer::new(
        DashboardState {
            poller,
            dispatcher,
            layout,
        },
        &config.address,
        &config.port,
    );

    tokio::select! {
        result = server.start_server() => result?,
        _ = tokio::signal::ctrl_c() => info!(event = "shutdown"),
    }

    Ok(())
}
