use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::RuntimeConfig;
use crate::data::library::{self, Library, SharedLibrary};
use crate::data::loader::{load_library, DatasetLoader};
use crate::data::source::{AnySource, DocumentSource};
use crate::scoreboard::Scoreboard;

pub mod api;
pub mod routes;

/// Shared handler state. The library starts empty and fills as datasets arrive.
#[derive(Clone)]
pub struct AppState {
    pub library: SharedLibrary,
    pub loader: Arc<DatasetLoader<AnySource>>,
    pub scoreboard: Arc<Scoreboard>,
}

impl AppState {
    pub fn new(loader: DatasetLoader<AnySource>, scoreboard: Scoreboard) -> Self {
        Self::with_library(Library::default(), loader, scoreboard)
    }

    pub fn with_library(library: Library, loader: DatasetLoader<AnySource>, scoreboard: Scoreboard) -> Self {
        AppState {
            library: library::shared(library),
            loader: Arc::new(loader),
            scoreboard: Arc::new(scoreboard),
        }
    }

    /// Run the startup load sequence in the background.
    pub fn spawn_reload(&self) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            load_library(&state.loader, &state.library).await;
        })
    }
}

pub async fn run_server(config: &RuntimeConfig) -> std::io::Result<()> {
    let state = AppState::new(config.loader(), config.scoreboard());
    tracing::info!(source = %state.loader.source().describe(), "loading datasets");
    state.spawn_reload();

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "muster server listening");
    axum::serve(listener, routes::router(state)).await
}
