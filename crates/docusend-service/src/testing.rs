//! Shared fixtures for service unit tests.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use docusend_auth::PasswordHasher;
use docusend_core::config::VerificationConfig;
use docusend_core::config::storage::LocalStorageConfig;
use docusend_database::Repositories;
use docusend_database::repositories::ResourceRepository;
use docusend_entity::resource::{CreateResource, ResourceKind, ShareableResource};
use docusend_storage::{LocalStorageProvider, StorageManager};

use crate::share::AccessService;

pub struct Fixture {
    pub repos: Repositories,
    pub storage: Arc<StorageManager>,
    pub hasher: Arc<PasswordHasher>,
    pub access: AccessService,
    pub owner: Uuid,
    _dir: tempfile::TempDir,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_verification(VerificationConfig::default()).await
    }

    pub async fn with_verification(verification: VerificationConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStorageProvider::new(&LocalStorageConfig {
            root_path: dir.path().to_string_lossy().into_owned(),
            ..LocalStorageConfig::default()
        })
        .await
        .unwrap();
        let storage = Arc::new(StorageManager::from_local(local, Duration::from_secs(3600)));
        let repos = Repositories::in_memory();
        let hasher = Arc::new(PasswordHasher::new());
        let access = AccessService::new(
            &repos,
            storage.clone(),
            hasher.clone(),
            verification,
        );
        Self {
            repos,
            storage,
            hasher,
            access,
            owner: Uuid::new_v4(),
            _dir: dir,
        }
    }

    /// A public, requirement-free document customised by `edit`.
    pub async fn resource(&self, edit: impl FnOnce(&mut CreateResource)) -> ShareableResource {
        let mut data = CreateResource {
            owner_id: self.owner,
            name: "deck.pdf".into(),
            kind: ResourceKind::Document,
            storage_path: format!("{}/deck.pdf", self.owner),
            is_public: true,
            is_expiring: false,
            expires_at: None,
            require_email: false,
            require_password: false,
            password_hash: None,
            require_nda: false,
            nda_text: None,
            allow_download: true,
            feedback_enabled: false,
        };
        edit(&mut data);
        self.repos.resources.create(&data).await.unwrap()
    }

    /// Turn on the password requirement with `password`.
    pub fn protect(&self, data: &mut CreateResource, password: &str) {
        data.require_password = true;
        data.password_hash = Some(self.hasher.hash_password(password).unwrap());
    }
}
