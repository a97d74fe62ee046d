//! Test harnesses for integration testing.
//!
//! [`TestHarness`] runs the full router over an in-memory store and needs no
//! external services. [`PgTestHarness`] talks to a shared Postgres container
//! that is started and migrated once, on first use.

use anyhow::{Context, Result};
use axum::Router;
use routing_core::kernel::{MemoryRoutingStore, PgRoutingStore, ServerDeps};
use routing_core::server::{build_app, AppOptions};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use super::TestClient;

/// Initialize tracing once for the whole test binary.
///
/// Run tests with: RUST_LOG=debug cargo test -- --nocapture
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Each test gets its own empty in-memory graph and a router over it.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let response = ctx.client().get("/events").await;
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub deps: ServerDeps,
    pub app: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }

    async fn teardown(self) {
        // The in-memory store is dropped with the harness
    }
}

impl TestHarness {
    pub fn new() -> Self {
        init_tracing();
        let deps = ServerDeps::new(Arc::new(MemoryRoutingStore::new()));
        let app = build_app(deps.clone(), AppOptions::default());
        Self { deps, app }
    }

    /// HTTP client that drives the router in-process.
    pub fn client(&self) -> TestClient {
        TestClient::new(self.app.clone())
    }
}

/// Shared Postgres container that persists across all tests in a binary.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        init_tracing();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Harness backed by the shared Postgres container.
///
/// Tests share one database, so they must only assert on rows they created.
pub struct PgTestHarness {
    pub db_pool: PgPool,
    pub deps: ServerDeps,
    pub app: Router,
}

impl AsyncTestContext for PgTestHarness {
    async fn setup() -> Self {
        Self::new()
            .await
            .expect("Failed to create Postgres test harness")
    }

    async fn teardown(self) {
        self.db_pool.close().await;
    }
}

impl PgTestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;
        let deps = ServerDeps::new(Arc::new(PgRoutingStore::new(db_pool.clone())));
        let app = build_app(deps.clone(), AppOptions::default());

        Ok(Self {
            db_pool,
            deps,
            app,
        })
    }

    pub fn client(&self) -> TestClient {
        TestClient::new(self.app.clone())
    }
}
