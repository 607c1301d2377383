use std::path::PathBuf;
use std::sync::Arc;

use services::{AchievementService, AuthService, Catalog, CourseFlowService, ProfileService};

/// What the composition root (e.g. `crates/app`) exposes to the UI.
pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<Catalog>;
    fn auth(&self) -> Arc<AuthService>;
    fn flow(&self) -> Arc<CourseFlowService>;
    fn profiles(&self) -> Arc<ProfileService>;
    fn achievements(&self) -> Arc<AchievementService>;

    /// Directory where downloaded certificates are written.
    fn certificates_dir(&self) -> PathBuf;
}

/// Service handles every view can reach without prop threading.
///
/// Constructed once at the application root and injected via Dioxus context;
/// views read services from here and the session from its own signal.
#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<Catalog>,
    auth: Arc<AuthService>,
    flow: Arc<CourseFlowService>,
    profiles: Arc<ProfileService>,
    achievements: Arc<AchievementService>,
    certificates_dir: PathBuf,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            auth: app.auth(),
            flow: app.flow(),
            profiles: app.profiles(),
            achievements: app.achievements(),
            certificates_dir: app.certificates_dir(),
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

    #[must_use]
    pub fn certificates_dir(&self) -> PathBuf {
        self.certificates_dir.clone()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
