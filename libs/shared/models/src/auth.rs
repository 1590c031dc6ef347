use std::sync::RwLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Manager,
    Dentist,
    Customer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Explicit session state shared by every transport.
///
/// Constructed once by the shell and passed to gateway constructors, so
/// tests can inject a fake session instead of reading ambient storage.
/// `clear` is what the transport's 401 interceptor calls.
#[derive(Debug, Default)]
pub struct SessionContext {
    inner: RwLock<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }

    pub fn set(&self, session: Session) {
        *self.inner.write().expect("session lock poisoned") = Some(session);
    }

    pub fn clear(&self) {
        *self.inner.write().expect("session lock poisoned") = None;
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|session| session.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session {
            token: "test-token".to_string(),
            user: User {
                id: 1,
                email: "manager@nicedentist.com".to_string(),
                name: "Test Manager".to_string(),
                role: UserRole::Manager,
            },
        }
    }

    #[test]
    fn test_session_set_and_clear() {
        let context = SessionContext::new();
        assert!(!context.is_authenticated());
        assert_eq!(context.token(), None);

        context.set(test_session());
        assert!(context.is_authenticated());
        assert_eq!(context.token().as_deref(), Some("test-token"));

        context.clear();
        assert!(!context.is_authenticated());
        assert_eq!(context.current_user(), None);
    }

    #[test]
    fn test_role_wire_format() {
        let role: UserRole = serde_json::from_str("\"Manager\"").unwrap();
        assert_eq!(role, UserRole::Manager);
        assert_eq!(serde_json::to_string(&UserRole::Dentist).unwrap(), "\"Dentist\"");
    }
}
