//! Module wiring and server lifecycle: database, broker, the three
//! service modules, the calendar's sync consumer and the merged HTTP
//! router, with signal-driven graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use calendar::domain::repo::CalendarRepository;
use calendar::domain::service::CalendarService;
use calendar::domain::sync::CalendarChangeHandler;
use calendar::infra::storage::repo::SeaOrmCalendarRepository;
use events::domain::service::EventsService;
use events::infra::blob::InMemoryBlobStore;
use events::infra::storage::repo::SeaOrmEventsRepository;
use runtime::AppConfig;
use syncmq::{Broker, ConnectOpts, InMemoryBroker, SyncConsumer, SyncProducer};
use users::domain::service::UsersService;
use users::infra::storage::repo::SeaOrmUsersRepository;

pub async fn run(config: AppConfig) -> Result<()> {
    let db = connect_and_migrate(&config).await?;

    // One process hosts every service, so the queue lives in-process;
    // a networked broker client would plug into the same port.
    let broker: Arc<dyn Broker> = Arc::new(InMemoryBroker::new());
    let opts = ConnectOpts {
        attempts: config.broker.connect_attempts,
        delay: Duration::from_secs(config.broker.connect_delay_secs),
    };
    let producer = SyncProducer::connect(broker.clone(), &opts)
        .await
        .context("broker connection failed")?;

    let events_svc = Arc::new(EventsService::new(
        Arc::new(SeaOrmEventsRepository::new(db.clone())),
        Arc::new(InMemoryBlobStore::new()),
        producer.clone(),
    ));
    let users_svc = Arc::new(UsersService::new(
        Arc::new(SeaOrmUsersRepository::new(db.clone())),
        producer,
    ));
    let calendar_repo: Arc<dyn CalendarRepository> =
        Arc::new(SeaOrmCalendarRepository::new(db.clone()));
    let calendar_svc = Arc::new(CalendarService::new(calendar_repo.clone()));

    let consumer = Arc::new(SyncConsumer::new(
        broker.clone(),
        Arc::new(CalendarChangeHandler::new(calendar_repo)),
    ));
    consumer
        .connect(&opts)
        .await
        .context("broker connection failed")?;
    let cancel = CancellationToken::new();
    let consumer_task = tokio::spawn(consumer.run(cancel.clone()));

    let app = Router::new()
        .merge(events::api::rest::router(events_svc))
        .merge(calendar::api::rest::router(calendar_svc))
        .merge(users::api::rest::router(users_svc))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Stop the consumer after the HTTP surface is gone; an in-flight
    // unacked message stays pending for redelivery on next startup.
    info!("shutting down sync consumer");
    cancel.cancel();
    match consumer_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "sync consumer exited with error"),
        Err(e) => error!(error = %e, "sync consumer task panicked"),
    }
    info!("shutdown complete");
    Ok(())
}

async fn connect_and_migrate(config: &AppConfig) -> Result<DatabaseConnection> {
    info!(url = %config.database.url, "connecting to database");
    let db = Database::connect(&config.database.url)
        .await
        .context("database connection failed")?;

    events::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .context("events migrations failed")?;
    calendar::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .context("calendar migrations failed")?;
    users::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .context("users migrations failed")?;
    Ok(db)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install SIGINT handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received"),
        _ = terminate => info!("SIGTERM received"),
    }
}
