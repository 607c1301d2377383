use std::sync::Arc;

use academy_core::Clock;
use storage::repository::Storage;

use crate::achievements::AchievementService;
use crate::auth::{AuthService, IdentityProvider, InMemoryIdentityProvider};
use crate::catalog::Catalog;
use crate::certificates::CertificateService;
use crate::error::AppServicesError;
use crate::flow::CourseFlowService;
use crate::identity_client::HttpIdentityProvider;
use crate::profile_service::ProfileService;

/// Assembles the app-facing services around one storage backend and one
/// catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    auth: Arc<AuthService>,
    flow: Arc<CourseFlowService>,
    profiles: Arc<ProfileService>,
    achievements: Arc<AchievementService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// The identity provider comes from the environment when configured and
    /// falls back to the local in-memory provider otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        catalog: Catalog,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let provider: Arc<dyn IdentityProvider> = match HttpIdentityProvider::from_env() {
            Some(remote) => Arc::new(remote),
            None => {
                log::info!("no identity provider configured, using the local one");
                Arc::new(InMemoryIdentityProvider::new())
            }
        };
        Ok(Self::assemble(storage, catalog, clock, provider))
    }

    /// Build services over in-memory storage and identity, for tests.
    #[must_use]
    pub fn new_in_memory(catalog: Catalog, clock: Clock) -> Self {
        Self::assemble(
            Storage::in_memory(),
            catalog,
            clock,
            Arc::new(InMemoryIdentityProvider::new()),
        )
    }

    fn assemble(
        storage: Storage,
        catalog: Catalog,
        clock: Clock,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let auth = Arc::new(AuthService::new(provider));
        let achievements = Arc::new(AchievementService::new(
            clock,
            Arc::clone(&storage.achievements),
        ));
        let profiles = Arc::new(ProfileService::new(clock, Arc::clone(&storage.profiles)));
        let flow = Arc::new(CourseFlowService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&achievements),
            CertificateService::new(clock),
            Arc::clone(&profiles),
        ));

        Self {
            catalog,
            auth,
            flow,
            profiles,
            achievements,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn flow(&self) -> Arc<CourseFlowService> {
        Arc::clone(&self.flow)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn achievements(&self) -> Arc<AchievementService> {
        Arc::clone(&self.achievements)
    }
}
