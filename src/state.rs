use std::sync::Arc;

use crate::{
    catalog::Catalog,
    config::AppConfig,
    customers::CustomerDirectory,
    error::AppResult,
    fixtures::{self, FixtureSource},
    services::auth_service::AdminAccount,
    store::OrderStore,
};

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderStore,
    pub catalog: Arc<Catalog>,
    pub customers: Arc<CustomerDirectory>,
    pub admin: Arc<AdminAccount>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Loads the fixtures and the admin account.
    pub async fn bootstrap(config: AppConfig) -> AppResult<Self> {
        let orders = OrderStore::init(&FixtureSource, config.simulated_latency).await?;
        let catalog = Catalog::new(fixtures::products(), fixtures::categories());
        for product in catalog.disallowed_images(&config.image_domains) {
            tracing::warn!(
                product_id = %product.id,
                image = %product.image,
                "image host not in IMAGE_DOMAINS"
            );
        }
        let customers = CustomerDirectory::new(fixtures::customers()?);
        let admin = AdminAccount::new(&config.admin_email, &config.admin_password_hash)?;

        Ok(Self {
            orders,
            catalog: Arc::new(catalog),
            customers: Arc::new(customers),
            admin: Arc::new(admin),
            config: Arc::new(config),
        })
    }

    /// Releases the in-memory order state.
    pub async fn dispose(&self) {
        self.orders.dispose().await;
    }
}
