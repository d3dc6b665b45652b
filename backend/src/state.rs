use crate::config::Config;
use crate::db::schema::Schema;
use crate::db::{self, Database};
use crate::error::{HelperError, Result};
use crate::platform::account::{AccountId, SqliteAccountService};
use crate::platform::media::SqliteMediaService;
use crate::platform::tag::SqliteTagService;
use crate::platform::{AccountService, MediaService, TagService};
use crate::render::{FileRenderer, Renderer};
use common::model::permission::{
    AccountPermission, PermissionQuery, PermissionState, PermissionType,
};
use common::MODULE_NAME;
use log::{info, warn};
use std::sync::Arc;

/// Shared by every handler through `web::Data`.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub schema: Schema,
    pub accounts: Arc<dyn AccountService>,
    pub media: Arc<dyn MediaService>,
    pub tags: Arc<dyn TagService>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    /// Installs the tables and wires the SQLite-backed collaborators.
    pub fn from_config(config: Config) -> Result<Self> {
        let db = Database::new(&config.database);
        let schema = Schema::new();
        db::install(&db, &schema, &config.media_root)?;

        let media: Arc<dyn MediaService> =
            Arc::new(SqliteMediaService::new(db.clone(), &config.media_root));
        let state = Self {
            accounts: Arc::new(SqliteAccountService::new(db.clone())),
            tags: Arc::new(SqliteTagService::new(db.clone())),
            renderer: Arc::new(FileRenderer::new(media.clone(), &config.fonts_dir)),
            media,
            schema,
            db,
            config,
        };

        if let Some(admin) = state.config.admin_account {
            state.grant_module(admin)?;
        }
        Ok(state)
    }

    fn query(
        &self,
        account: AccountId,
        permission: PermissionType,
        category: PermissionState,
        element: Option<i64>,
    ) -> PermissionQuery {
        PermissionQuery {
            account: account.0,
            permission,
            unit: self.config.org_id,
            app: Some(self.config.app_name.clone()),
            module: MODULE_NAME.to_string(),
            category: Some(category),
            element,
        }
    }

    /// Fails with `PermissionDenied` unless `account` holds `permission`.
    pub fn require(
        &self,
        account: AccountId,
        permission: PermissionType,
        category: PermissionState,
        element: Option<i64>,
    ) -> Result<()> {
        if account.is_null() {
            warn!("Anonymous request denied {:?} on {:?}", permission, category);
            return Err(HelperError::PermissionDenied);
        }
        let query = self.query(account, permission, category, element);
        if self.accounts.has_permission(&query)? {
            Ok(())
        } else {
            warn!(
                "Account {} denied {:?} on {:?} {:?}",
                account.0, permission, category, element
            );
            Err(HelperError::PermissionDenied)
        }
    }

    /// Gives the creator of an entity owner rights on it.
    pub fn grant_owner(&self, account: AccountId, category: PermissionState, element: i64) -> Result<()> {
        self.accounts.grant(&AccountPermission {
            account: account.0,
            unit: self.config.org_id,
            app: Some(self.config.app_name.clone()),
            module: MODULE_NAME.to_string(),
            from: MODULE_NAME.to_string(),
            category: Some(category),
            element: Some(element),
            permission: PermissionType::OWNER,
        })
    }

    /// Every permission on everything in the module, for any app.
    pub fn grant_module(&self, account: i64) -> Result<()> {
        self.accounts.grant(&AccountPermission {
            account,
            unit: self.config.org_id,
            app: None,
            module: MODULE_NAME.to_string(),
            from: MODULE_NAME.to_string(),
            category: None,
            element: None,
            permission: PermissionType::ALL,
        })?;
        info!("Granted all {} permissions to account {}", MODULE_NAME, account);
        Ok(())
    }

    /// A language that has label tables, for views and exports.
    pub fn language(&self, explicit: Option<&str>, accept_language: Option<&str>) -> String {
        crate::lang::negotiate(explicit, accept_language, &self.config.default_language)
    }
}
