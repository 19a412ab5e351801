//! Invoice Dashboard Example
//!
//! Serves the invoice form actions over HTTP:
//!
//! ```sh
//! cargo run --example dashboard                      # defaults, in-memory store
//! cargo run --example dashboard -- dashboard.yaml    # YAML config
//! cargo run --example dashboard --features postgres -- dashboard.yaml
//! ```
//!
//! Then submit forms, e.g.:
//!
//! ```sh
//! curl -i -d 'customerId=c1&amount=50&status=pending' http://127.0.0.1:3000/dashboard/invoices
//! ```

use invoice_actions::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(path)?,
        None => AppConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    let store = build_store(&config).await?;

    let builder = ServerBuilder::from_config(&config)
        .with_shared_store(store)
        .with_event_bus(1024);

    if let Some(bus) = builder.event_bus() {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            while let Ok(envelope) = rx.recv().await {
                tracing::info!(
                    action = envelope.event.action(),
                    invoice_id = envelope.event.invoice_id(),
                    "invoice event"
                );
            }
        });
    }

    let path = &config.dashboard.invoices_path;
    println!("\n🌐 Server running on http://{}", config.server.address());
    println!("\n  🔷 Invoice routes:");
    println!("    GET    {}              - Invoice list (cached)", path);
    println!("    POST   {}              - Create invoice (form)", path);
    println!("    POST   {}/{{id}}/edit    - Update invoice (form)", path);
    println!("    POST   {}/{{id}}/delete  - Delete invoice", path);
    println!("\n  🔷 Health:");
    println!("    GET    /health");

    builder.serve(&config.server.address()).await
}

#[cfg(feature = "postgres")]
async fn build_store(config: &AppConfig) -> Result<Arc<dyn InvoiceStore>> {
    use invoice_actions::storage::postgres::ensure_schema;
    use sqlx::postgres::PgPoolOptions;

    let Some(url) = &config.database.url else {
        tracing::info!("No database url configured, using in-memory store");
        return Ok(Arc::new(InMemoryInvoiceStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(url)
        .await?;
    ensure_schema(&pool).await?;
    tracing::info!("Connected to PostgreSQL");

    Ok(Arc::new(PostgresInvoiceStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn build_store(config: &AppConfig) -> Result<Arc<dyn InvoiceStore>> {
    if config.database.url.is_some() {
        tracing::warn!(
            "database.url is set but the `postgres` feature is disabled; using in-memory store"
        );
    }
    Ok(Arc::new(InMemoryInvoiceStore::new()))
}
