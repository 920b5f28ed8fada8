//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use duet_shared::time::Clock;
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    },
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, JoinRoomUseCase, RelaySignalUseCase, SweepRoomsUseCase,
    },
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
    sweeper::spawn_sweeper,
};

/// WebSocket signaling server
///
/// This struct encapsulates the wired use cases and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::in_memory(Arc::new(SystemClock), Duration::from_secs(1));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// Handler から参照するユースケース群
    app_state: Arc<AppState>,
    /// SweepRoomsUseCase（Room 終了判定のユースケース）
    sweep_rooms_usecase: Arc<SweepRoomsUseCase>,
    /// sweeper の実行間隔
    sweep_interval: Duration,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `app_state` - UseCases used by the HTTP and WebSocket handlers
    /// * `sweep_rooms_usecase` - UseCase run by the lifecycle sweeper
    /// * `sweep_interval` - Period of the lifecycle sweeper
    pub fn new(
        app_state: AppState,
        sweep_rooms_usecase: Arc<SweepRoomsUseCase>,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            app_state: Arc::new(app_state),
            sweep_rooms_usecase,
            sweep_interval,
        }
    }

    /// Wire the server on top of the in-memory repository
    pub fn in_memory(clock: Arc<dyn Clock>, sweep_interval: Duration) -> Self {
        // Initialize dependencies in order:
        // 1. Repository
        // 2. MessagePusher
        // 3. UseCases
        // 4. AppState

        // 1. Create Repository (in-memory room registry and identity directory)
        let repository = Arc::new(InMemorySessionRepository::default());

        // 2. Create MessagePusher (WebSocket implementation)
        let message_pusher = Arc::new(WebSocketMessagePusher::default());

        // 3. Create UseCases
        let connect_participant_usecase =
            Arc::new(ConnectParticipantUseCase::new(message_pusher.clone()));
        let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        ));
        let join_room_usecase = Arc::new(JoinRoomUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        ));
        let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(message_pusher.clone()));
        let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
        let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository.clone()));
        let sweep_rooms_usecase = Arc::new(SweepRoomsUseCase::new(
            repository,
            message_pusher,
            clock,
        ));

        // 4. Create AppState
        let app_state = AppState {
            connect_participant_usecase,
            disconnect_participant_usecase,
            join_room_usecase,
            relay_signal_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
        };

        Self::new(app_state, sweep_rooms_usecase, sweep_interval)
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the WebSocket signaling server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Signaling server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// The lifecycle sweeper runs for as long as the server does.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();

        let (sweeper_tx, sweeper_rx) = watch::channel(false);
        let sweeper = spawn_sweeper(
            self.sweep_rooms_usecase.clone(),
            self.sweep_interval,
            sweeper_rx,
        );

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        // sweeper が既に終了していても送信失敗は無視してよい
        let _ = sweeper_tx.send(true);
        if let Err(e) = sweeper.await {
            tracing::warn!("Sweeper task ended abnormally: {}", e);
        }

        result
    }
}
