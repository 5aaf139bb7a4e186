//! # Shopfront Register
//!
//! Parent container for the Shopfront view-models: owns the data, implements
//! the handler traits, and runs a scripted register session.
//!
//! ## Module Organization
//! ```text
//! shopfront_register/
//! ├── lib.rs      ◄─── You are here (startup & run)
//! ├── state.rs    ◄─── StoreState: in-memory data + handler impls
//! ├── seed.rs     ◄─── Sample catalog, customers, suppliers, POs
//! ├── session.rs  ◄─── Scripted sale and back-office round
//! ├── widget.rs   ◄─── Simulated checkout widget
//! └── error.rs    ◄─── RegisterError
//! ```

pub mod error;
pub mod seed;
pub mod session;
pub mod state;
pub mod widget;

use std::path::PathBuf;

use chrono::Utc;
use shopfront_core::UserRole;
use shopfront_ui::ShopConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::RegisterResult;
use session::RegisterSession;
use state::StoreState;
use widget::SimulatedWidget;

/// Runs the register.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (RUST_LOG or "info,shopfront=debug")             │
/// │  2. Load shopfront.toml (argument path, else platform config dir)       │
/// │     + SHOPFRONT_* environment overrides                                 │
/// │  3. Seed the in-memory store                                            │
/// │  4. Run the register session against the simulated widget              │
/// │  5. Print the receipt and the order JSON                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config_path: Option<PathBuf>) -> RegisterResult<()> {
    init_tracing();
    info!("Starting Shopfront register");

    let config = ShopConfig::load(config_path)?;
    info!(
        store = %config.store.name,
        currency = %config.currency.code,
        tax = %config.tax_label(),
        "Configuration loaded"
    );

    let today = Utc::now().date_naive();
    let state = StoreState::seeded(today, config.currency.decimals);
    let widget = SimulatedWidget::new();

    let mut session = RegisterSession::new(config);
    let report = session.run(&state, &widget, UserRole::Admin, today).await?;

    println!("{}", report.receipt);
    println!("{}", report.order.to_json()?);
    if let Some(po) = &report.delivered_po {
        info!(order_number = %po, "Purchase order received");
    }
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront_ui=trace` - Trace the view-models only
/// - Default: INFO, DEBUG for the shopfront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopfront=debug"));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
