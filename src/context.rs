use crate::api::{SessionRestore, StoreClient};
use crate::content::{CatalogSection, StaticPage};
use crate::core::prelude::*;
use crate::editor::DraftBook;
use crate::session::{SessionContext, TokenStore};
use std::sync::{Arc, RwLock};

/// Everything a command needs: configuration, session, store client and
/// the open drafts of this run.
#[derive(Debug)]
pub struct AdminContext {
    config: RwLock<Config>,
    session: Arc<SessionContext>,
    client: StoreClient,
    catalog_drafts: DraftBook<CatalogSection>,
    page_drafts: DraftBook<StaticPage>,
}

impl AdminContext {
    pub fn new(config: Config) -> Result<Self> {
        let store = TokenStore::new(&config)?;
        Self::with_parts(config, store)
    }

    pub fn with_parts(config: Config, token_store: TokenStore) -> Result<Self> {
        let session = Arc::new(SessionContext::new(token_store));
        let client = StoreClient::new(&config.api, Arc::clone(&session))?;
        Ok(Self {
            config: RwLock::new(config),
            session,
            client,
            catalog_drafts: DraftBook::new(),
            page_drafts: DraftBook::new(),
        })
    }

    /// Builds the context and verifies a stored token, if any.
    pub async fn bootstrap(config: Config) -> Result<(Arc<Self>, SessionRestore)> {
        let ctx = Arc::new(Self::new(config)?);
        let restore = ctx.client.restore_session().await?;
        match &restore {
            SessionRestore::Restored(user) => log::info!("Session restored for {}", user.email),
            SessionRestore::Expired => log::info!("Stored session expired"),
            SessionRestore::Anonymous => log::debug!("No stored session"),
        }
        Ok((ctx, restore))
    }

    pub fn client(&self) -> &StoreClient {
        &self.client
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn catalog_drafts(&self) -> &DraftBook<CatalogSection> {
        &self.catalog_drafts
    }

    pub fn page_drafts(&self) -> &DraftBook<StaticPage> {
        &self.page_drafts
    }

    pub fn config(&self) -> Config {
        self.config
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn update_config(&self, f: impl FnOnce(&mut Config)) -> Config {
        let mut config = self.config.write().unwrap_or_else(|p| p.into_inner());
        f(&mut config);
        config.clone()
    }

    /// Fails when no bearer token is held.
    pub fn require_session(&self) -> Result<()> {
        if self.session.bearer().is_some() {
            Ok(())
        } else {
            Err(AppError::Auth(crate::t!("auth.required")))
        }
    }
}
