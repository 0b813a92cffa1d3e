use surrealdb::{
    Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::notify::FcmClient;

#[derive(Debug, Clone)]
pub struct AppState {
    pub sdb: Surreal<Any>,
    pub fcm: FcmClient,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> Result<Self> {
        // credential problems must surface here, before any request is served
        let fcm = FcmClient::new(config.service_account.clone())?;

        let sdb = any::connect(config.db.endpoint.as_str()).await?;
        if !config.db.endpoint.starts_with("mem:") {
            sdb.signin(Root {
                username: &config.db.username,
                password: &config.db.password,
            })
            .await?;
        }
        sdb.use_ns(config.db.namespace.as_str())
            .use_db(config.db.database.as_str())
            .await?;

        Ok(Self { sdb, fcm })
    }
}
