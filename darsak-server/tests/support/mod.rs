#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Result, anyhow};
use axum_test::TestServer;
use chrono::Duration;
use darsak_core::application::unit_of_work::AppUnitOfWork;
use darsak_core::database::InMemoryStore;
use darsak_core::devices::DeviceLimitPolicy;
use darsak_model::{
    ContentId, ContentItem, Profile, Role, SubjectId, UnitId, UserId,
};
use darsak_server::{
    AppState,
    auth::issue_token,
    create_app,
    infra::config::{
        AuthConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
        ServerConfig,
    },
};

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const AUDIENCE: &str = "authenticated";

pub fn test_config(devices: DeviceLimitPolicy) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://darsak@localhost/unused".into(),
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: SECRET.into(),
            audience: Some(AUDIENCE.into()),
            leeway_secs: 0,
        },
        devices,
        cors: CorsConfig::default(),
        metadata: ConfigMetadata::default(),
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: InMemoryStore,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        Self::with_policy(DeviceLimitPolicy::default())
    }

    pub fn with_policy(policy: DeviceLimitPolicy) -> Result<Self> {
        let store = InMemoryStore::new();
        let state = AppState::new(
            Arc::new(test_config(policy)),
            AppUnitOfWork::in_memory(&store),
        );
        let server = TestServer::builder()
            .build(create_app(state))
            .map_err(|err| anyhow!(err.to_string()))?;
        Ok(Self { server, store })
    }

    /// Seed a profile and return a bearer header value for it.
    pub fn sign_in(&self, profile: Profile) -> String {
        let id = profile.id;
        self.store.upsert_profile(profile);
        bearer_for(id)
    }

    pub fn student(&self) -> (UserId, String) {
        let id = UserId::new();
        (id, self.sign_in(Profile::student(id)))
    }

    pub fn admin(&self) -> (UserId, String) {
        let id = UserId::new();
        (id, self.sign_in(Profile::student(id).with_role(Role::Admin)))
    }

    pub fn seed(&self, item: ContentItem) -> ContentId {
        let id = item.id;
        self.store.upsert_content(item);
        id
    }
}

pub fn lesson() -> ContentItem {
    ContentItem::new(ContentId::new(), UnitId::new(), SubjectId::new())
}

pub fn bearer_for(user: UserId) -> String {
    let ttl = Duration::minutes(5);
    let token = issue_token(SECRET, user.to_uuid(), Some(AUDIENCE), ttl)
        .expect("sign test token");
    format!("Bearer {token}")
}
