use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use mockall::mock;
use shop_engine::{
    auth::{TokenCodec, TokenError},
    db_types::{NewUserAccount, UserAccount},
    UserApiError,
    UserManagement,
};

mock! {
    pub UserManager {}
    impl UserManagement for UserManager {
        async fn create_user(&self, user: NewUserAccount) -> Result<i64, UserApiError>;
        async fn fetch_user_by_username(&self, username: &str) -> Result<Option<UserAccount>, UserApiError>;
        async fn fetch_user_by_id(&self, id: i64) -> Result<Option<UserAccount>, UserApiError>;
    }
}

/// Wraps a real codec and counts how often the gate asks it to verify a token.
pub struct CountingCodec<C> {
    inner: C,
    verifications: Arc<AtomicUsize>,
}

impl<C: TokenCodec> CountingCodec<C> {
    pub fn new(inner: C) -> (Self, Arc<AtomicUsize>) {
        let verifications = Arc::new(AtomicUsize::new(0));
        (Self { inner, verifications: Arc::clone(&verifications) }, verifications)
    }
}

impl<C: TokenCodec> TokenCodec for CountingCodec<C> {
    fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.inner.issue(subject)
    }

    fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(token)
    }
}
