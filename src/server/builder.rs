//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_invoice_routes, health_routes};
use crate::config::AppConfig;
use crate::core::actions::InvoiceActions;
use crate::core::cache::ViewCache;
use crate::core::events::EventBus;
use crate::core::store::InvoiceStore;
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the invoice dashboard server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryInvoiceStore::new())
///     .with_invoices_path("/dashboard/invoices")
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn InvoiceStore>>,
    views: Arc<ViewCache>,
    invoices_path: String,
    event_bus: Option<Arc<EventBus>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            views: Arc::new(ViewCache::new()),
            invoices_path: AppConfig::default().dashboard.invoices_path,
            event_bus: None,
            custom_routes: Vec::new(),
        }
    }

    /// Create a builder using the dashboard settings of `config`
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new().with_invoices_path(config.dashboard.invoices_path.clone())
    }

    /// Set the invoice store (required)
    pub fn with_store(self, store: impl InvoiceStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set an invoice store that is also used elsewhere
    pub fn with_shared_store(mut self, store: Arc<dyn InvoiceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Share a view cache with the caller (e.g. to inspect revalidations)
    pub fn with_view_cache(mut self, views: Arc<ViewCache>) -> Self {
        self.views = views;
        self
    }

    /// Path of the invoice list view and redirect target
    pub fn with_invoices_path(mut self, path: impl Into<String>) -> Self {
        self.invoices_path = path.into();
        self
    }

    /// Enable the event bus for real-time notifications
    ///
    /// # Arguments
    ///
    /// * `capacity` - Buffer size for the broadcast channel (recommended: 1024)
    pub fn with_event_bus(mut self, capacity: usize) -> Self {
        self.event_bus = Some(Arc::new(EventBus::new(capacity)));
        self
    }

    /// The configured event bus, for subscribing before the server starts
    pub fn event_bus(&self) -> Option<Arc<EventBus>> {
        self.event_bus.clone()
    }

    /// Add routes that don't belong to the invoice actions
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state
    pub fn build_state(&self) -> Result<AppState> {
        let store = self
            .store
            .clone()
            .ok_or_else(|| anyhow!("InvoiceStore is required. Call .with_store()"))?;

        if !self.invoices_path.starts_with('/') {
            return Err(anyhow!(
                "Invoices path must start with '/': {}",
                self.invoices_path
            ));
        }

        let mut actions =
            InvoiceActions::new(store.clone(), self.views.clone(), self.invoices_path.clone());
        if let Some(bus) = &self.event_bus {
            actions = actions.with_event_bus(bus.clone());
        }

        Ok(AppState {
            actions,
            store,
            views: self.views.clone(),
        })
    }

    /// Build the final router
    ///
    /// Merges health routes, invoice routes and custom routes, wrapped in a
    /// request tracing layer.
    pub fn build(self) -> Result<Router> {
        let state = self.build_state()?;

        let mut app = health_routes().merge(build_invoice_routes(state, &self.invoices_path));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryInvoiceStore;

    #[test]
    fn test_build_without_store_fails() {
        let result = ServerBuilder::new().build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_built_router_serves_health_and_invoice_routes() {
        let router = ServerBuilder::new()
            .with_store(InMemoryInvoiceStore::new())
            .with_invoices_path("/billing")
            .build()
            .expect("build should produce a Router");
        let server = axum_test::TestServer::try_new(router).unwrap();

        server.get("/health").await.assert_status_ok();
        let list: serde_json::Value = server.get("/billing").await.json();
        assert_eq!(list["count"], 0);
        server
            .post("/billing/missing/delete")
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_relative_invoices_path_rejected() {
        let result = ServerBuilder::new()
            .with_store(InMemoryInvoiceStore::new())
            .with_invoices_path("invoices")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_from_config_uses_dashboard_path() {
        let mut config = AppConfig::default();
        config.dashboard.invoices_path = "/billing".to_string();
        let state = ServerBuilder::from_config(&config)
            .with_store(InMemoryInvoiceStore::new())
            .build_state()
            .unwrap();
        assert_eq!(state.actions.invoices_path(), "/billing");
    }

    #[test]
    fn test_event_bus_is_exposed_before_build() {
        let builder = ServerBuilder::new().with_event_bus(16);
        let bus = builder.event_bus().expect("bus configured");
        let _rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);
    }
}
