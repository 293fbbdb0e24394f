//! In-memory test doubles for the identity and catalog stores.
//!
//! Same contract as the MongoDB-backed implementations, with failure toggles
//! so tests can force any step of the registration saga to fail.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use mg_config::JwtSettings;
use mg_platform::{
    AuthResult, CatalogStore, Credentials, IdentityGateway, MenuItem, Order, PasswordPolicy,
    PlatformError, Principal, RegistrationRequest, RegistrationService, Restaurant,
    RestaurantDraft, Result, StoredClaim, TokenService,
};

static INIT_LOGGING: std::sync::Once = std::sync::Once::new();

/// Initialize tracing once per test binary so RUST_LOG works in tests.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| mg_common::init_logging("mg-platform-tests"));
}

/// In-memory identity store.
pub struct InMemoryIdentity {
    principals: Mutex<Vec<Principal>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_add_role: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_claims: AtomicBool,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self {
            principals: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            fail_add_role: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
            fail_claims: AtomicBool::new(false),
        }
    }

    pub fn principal_count(&self) -> usize {
        self.principals.lock().len()
    }

    pub fn get(&self, id: &str) -> Option<Principal> {
        self.principals.lock().iter().find(|p| p.id == id).cloned()
    }

    /// Seed a principal directly, bypassing policy checks.
    pub fn seed(&self, principal: Principal) {
        self.principals.lock().push(principal);
    }
}

#[async_trait]
impl IdentityGateway for InMemoryIdentity {
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>> {
        Ok(self
            .principals
            .lock()
            .iter()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        Ok(self
            .principals
            .lock()
            .iter()
            .find(|p| p.username == username)
            .cloned())
    }

    async fn create(&self, username: &str, email: &str, password: &str) -> Result<Principal> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(PlatformError::CredentialPolicy(vec![
                "Identity store unavailable.".to_string(),
            ]));
        }
        if let Err(errors) = PasswordPolicy::default().validate(password) {
            return Err(PlatformError::CredentialPolicy(errors));
        }

        let mut principals = self.principals.lock();
        if principals
            .iter()
            .any(|p| p.email == email || p.username == username)
        {
            return Err(PlatformError::duplicate("Principal", "email", email));
        }

        let principal = Principal::new(username, email).with_password_hash(password);
        principals.push(principal.clone());
        Ok(principal)
    }

    async fn add_role(&self, principal: &Principal, role: &str) -> Result<()> {
        if self.fail_add_role.load(Ordering::SeqCst) {
            return Err(PlatformError::internal("role store unavailable"));
        }
        let mut principals = self.principals.lock();
        if let Some(stored) = principals.iter_mut().find(|p| p.id == principal.id) {
            if !stored.roles.iter().any(|r| r == role) {
                stored.roles.push(role.to_string());
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(PlatformError::internal("identity store unavailable"));
        }
        self.principals.lock().retain(|p| p.id != id);
        self.deleted.lock().push(id.to_string());
        Ok(())
    }

    async fn check_password(&self, principal: &Principal, password: &str) -> Result<bool> {
        // The fake stores the plaintext where the real service stores a hash.
        Ok(principal.password_hash.as_deref() == Some(password))
    }

    async fn claims(&self, principal: &Principal) -> Result<Vec<StoredClaim>> {
        if self.fail_claims.load(Ordering::SeqCst) {
            return Err(PlatformError::internal("claim store unavailable"));
        }
        Ok(self
            .get(&principal.id)
            .map(|p| p.claims)
            .unwrap_or_default())
    }

    async fn roles(&self, principal: &Principal) -> Result<Vec<String>> {
        Ok(self.get(&principal.id).map(|p| p.roles).unwrap_or_default())
    }
}

/// In-memory catalog store.
pub struct InMemoryCatalog {
    restaurants: Mutex<Vec<Restaurant>>,
    pub orders: Mutex<Vec<Order>>,
    pub menu_items: Mutex<Vec<MenuItem>>,
    pub fail_insert: AtomicBool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            restaurants: Mutex::new(Vec::new()),
            orders: Mutex::new(Vec::new()),
            menu_items: Mutex::new(Vec::new()),
            fail_insert: AtomicBool::new(false),
        }
    }

    pub fn restaurant_count(&self) -> usize {
        self.restaurants.lock().len()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn find(&self, id: i64) -> Result<Option<Restaurant>> {
        Ok(self
            .restaurants
            .lock()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Restaurant>> {
        Ok(self.restaurants.lock().clone())
    }

    async fn insert(&self, restaurant: &Restaurant) -> Result<()> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(PlatformError::internal("catalog store unavailable"));
        }
        self.restaurants.lock().push(restaurant.clone());
        Ok(())
    }

    async fn update(&self, restaurant: &Restaurant) -> Result<()> {
        let mut restaurants = self.restaurants.lock();
        if let Some(stored) = restaurants.iter_mut().find(|r| r.id == restaurant.id) {
            *stored = restaurant.clone();
        }
        Ok(())
    }

    async fn remove(&self, id: i64) -> Result<bool> {
        let mut restaurants = self.restaurants.lock();
        let before = restaurants.len();
        restaurants.retain(|r| r.id != id);
        Ok(restaurants.len() < before)
    }

    async fn orders_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .lock()
            .iter()
            .filter(|o| o.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn menu_items_by_restaurant(&self, restaurant_id: i64) -> Result<Vec<MenuItem>> {
        Ok(self
            .menu_items
            .lock()
            .iter()
            .filter(|m| m.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }
}

/// Token service with test settings (7 day validity).
pub fn test_token_service() -> Arc<TokenService> {
    let settings = JwtSettings {
        key: Some("integration-test-signing-key".to_string()),
        issuer: "mealgate".to_string(),
        audience: "mealgate".to_string(),
        duration_in_days: Some("7".to_string()),
    };
    Arc::new(TokenService::new(&settings).unwrap())
}

pub struct TestHarness {
    pub identity: Arc<InMemoryIdentity>,
    pub catalog: Arc<InMemoryCatalog>,
    pub tokens: Arc<TokenService>,
    pub registration: RegistrationService,
}

impl TestHarness {
    pub fn new() -> Self {
        init_logging();
        let identity = Arc::new(InMemoryIdentity::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let tokens = test_token_service();
        let registration = RegistrationService::new(
            identity.clone() as Arc<dyn IdentityGateway>,
            catalog.clone() as Arc<dyn CatalogStore>,
            tokens.clone(),
        );
        Self {
            identity,
            catalog,
            tokens,
            registration,
        }
    }
}

pub fn request(username: &str, email: &str, password: &str) -> RegistrationRequest {
    RegistrationRequest {
        credentials: Credentials {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        },
        restaurant: RestaurantDraft::new("Pasta Palace", "1 Via Roma"),
    }
}

pub fn assert_success(result: &AuthResult) {
    assert!(
        result.is_authenticated,
        "Expected success, got failure: {:?}",
        result.message
    );
}
