use actix_web::web::Data;
use notepad::notestore::BoxedNoteStore;
use notepad_web::configuration::CONFIGURATION;
use notepad_web::startup::run;
use notepad_web::telemetry::{get_subscriber, init_tracing};
use std::net::TcpListener;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber(&*CONFIGURATION).with(tracing_subscriber::fmt::layer());
    init_tracing(subscriber);

    let note_store: BoxedNoteStore = CONFIGURATION
        .get_note_store()
        .await
        .map_err(std::io::Error::other)?;
    info!(administrator = %note_store.administrator(), "note store ready");

    let mut events = note_store.subscribe();
    actix_web::rt::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => info!(?event, "note event"),
                Err(RecvError::Lagged(missed)) => warn!(missed, "note event log fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let note_store = Data::new(note_store);
    let listener = TcpListener::bind((CONFIGURATION.host.as_str(), CONFIGURATION.port))?;
    info!(address = %listener.local_addr()?, "listening");
    run(listener, note_store.clone())?.await?;

    if let Some(ref dir) = CONFIGURATION.backupto {
        note_store
            .backup(Box::new(dir.clone()))
            .await
            .map_err(std::io::Error::other)?;
        info!(dir = %dir, "note store backed up");
    }
    opentelemetry::global::shutdown_tracer_provider();
    Ok(())
}
