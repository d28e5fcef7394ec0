use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use async_trait::async_trait;
use auth::ManualClock;
use auth::PasswordHasher;
use auth::TokenConfig;
use auth::TokenEngine;
use branch_service::branch::errors::BranchError;
use branch_service::branch::models::Branch;
use branch_service::branch::models::BranchId;
use branch_service::branch::models::Login;
use branch_service::branch::ports::BranchRepository;
use branch_service::domain::branch::service::BranchService;
use branch_service::inbound::http::router::create_router;
use chrono::Utc;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_EXPIRATION_MILLIS: u64 = 3_600_000;

/// Branch store kept in memory for tests
#[derive(Default)]
pub struct InMemoryBranchRepository {
    branches: RwLock<HashMap<String, Branch>>,
}

impl InMemoryBranchRepository {
    pub fn insert(&self, branch: Branch) {
        self.branches
            .write()
            .unwrap()
            .insert(branch.login.as_str().to_string(), branch);
    }
}

#[async_trait]
impl BranchRepository for InMemoryBranchRepository {
    async fn find_by_login(&self, login: &Login) -> Result<Option<Branch>, BranchError> {
        Ok(self.branches.read().unwrap().get(login.as_str()).cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryBranchRepository>,
    pub token_engine: Arc<TokenEngine>,
    pub clock: Arc<ManualClock>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryBranchRepository::default());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let token_engine = Arc::new(TokenEngine::with_clock(
            TokenConfig::new(TEST_SECRET, TEST_EXPIRATION_MILLIS),
            clock.clone(),
        ));

        let branch_service = Arc::new(BranchService::new(
            Arc::clone(&repository),
            Arc::clone(&token_engine),
        ));
        let router = create_router(branch_service, Arc::clone(&token_engine));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            token_engine,
            clock,
            api_client: reqwest::Client::new(),
        }
    }

    /// Register a branch with an Argon2 hash of `password`
    pub fn seed_branch(&self, id: i32, login: &str, password: &str, active: Option<bool>) {
        let password_hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");

        self.repository.insert(Branch {
            id: BranchId(id),
            name: format!("Filial {}", id),
            login: Login::new(login.to_string()).expect("Invalid test login"),
            password_hash,
            active,
        });
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }
}
