use std::rc::Rc;

use yew::{Reducible, UseReducerHandle};

use crate::api::{ApiClient, Transport};
use crate::error::ApiResult;
use crate::models::User;
use crate::storage::KeyValueStore;

/// The signed-in user for this tab, restored from storage on start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self { user: None, is_loading: true }
    }
}

pub enum SessionAction {
    Restored(Option<User>),
    SignedIn(User),
    SignedOut,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let user = match action {
            SessionAction::Restored(user) => user,
            SessionAction::SignedIn(user) => Some(user),
            SessionAction::SignedOut => None,
        };
        Rc::new(Session { user, is_loading: false })
    }
}

pub type SessionHandle = UseReducerHandle<Session>;

/// Reads the persisted user without touching the network.
pub fn restore<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>) -> SessionAction {
    let user = client.current_user();
    match &user {
        Some(user) => log::info!("restored session for {}", user.email),
        None => log::debug!("no stored session"),
    }
    SessionAction::Restored(user)
}

pub async fn login<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    email: &str,
    password: &str,
) -> ApiResult<SessionAction> {
    let response = client.login(email, password).await?;
    log::info!("signed in as {}", response.user.email);
    Ok(SessionAction::SignedIn(response.user))
}

/// Creates the account, then signs in with the same credentials.
pub async fn register<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    email: &str,
    password: &str,
) -> ApiResult<SessionAction> {
    let created = client.register(email, password).await?;
    log::info!("registered {}", created.email);
    login(client, email, password).await
}

pub fn logout<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>) -> SessionAction {
    client.logout();
    log::info!("signed out");
    SessionAction::SignedOut
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::transport::testing::RecordingTransport;
    use crate::config::{TOKEN_KEY, USER_KEY};
    use crate::storage::MemoryStorage;

    fn client(transport: &RecordingTransport, storage: &MemoryStorage) -> ApiClient<RecordingTransport, MemoryStorage> {
        ApiClient::new("http://api.test", transport.clone(), storage.clone())
    }

    fn login_ok(transport: &RecordingTransport) {
        transport.respond(200, json!({ "token": "jwt-1", "user": { "id": "u1", "email": "noa@example.com" } }));
    }

    #[test]
    fn restore_reads_storage_without_requests() {
        let transport = RecordingTransport::default();
        let storage = MemoryStorage::default();
        storage.set(USER_KEY, r#"{"id":"u1","email":"noa@example.com"}"#);

        let session = Rc::new(Session::default()).reduce(restore(&client(&transport, &storage)));

        assert!(!session.is_loading);
        assert!(session.is_authenticated());
        assert_eq!(session.email(), Some("noa@example.com"));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn restore_without_record_finishes_loading_signed_out() {
        let session = Rc::new(Session::default())
            .reduce(restore(&client(&RecordingTransport::default(), &MemoryStorage::default())));
        assert!(!session.is_loading);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn login_persists_and_authenticates() {
        let transport = RecordingTransport::default();
        let storage = MemoryStorage::default();
        login_ok(&transport);

        let action = block_on(login(&client(&transport, &storage), "noa@example.com", "secret1")).unwrap();
        let session = Rc::new(Session::default()).reduce(action);

        assert!(session.is_authenticated());
        assert!(storage.contains(TOKEN_KEY));
        assert!(storage.contains(USER_KEY));
    }

    #[test]
    fn failed_login_leaves_storage_empty() {
        let transport = RecordingTransport::default();
        let storage = MemoryStorage::default();
        transport.respond(401, json!({ "error": "Invalid credentials" }));

        let err = block_on(login(&client(&transport, &storage), "noa@example.com", "bad")).err();

        assert_eq!(err.map(|e| e.to_string()), Some("Invalid credentials".to_string()));
        assert!(!storage.contains(TOKEN_KEY));
    }

    #[test]
    fn register_signs_in_immediately() {
        let transport = RecordingTransport::default();
        let storage = MemoryStorage::default();
        transport.respond(201, json!({ "id": "u1", "email": "noa@example.com" }));
        login_ok(&transport);

        let action = block_on(register(&client(&transport, &storage), "noa@example.com", "secret1")).unwrap();

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["http://api.test/auth/register", "http://api.test/auth/login"]);
        assert!(Rc::new(Session::default()).reduce(action).is_authenticated());
    }

    #[test]
    fn failed_registration_skips_login() {
        let transport = RecordingTransport::default();
        transport.respond(409, json!({ "error": "User already exists" }));

        let result = block_on(register(&client(&transport, &MemoryStorage::default()), "noa@example.com", "secret1"));

        assert!(result.is_err());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn logout_clears_storage_and_session() {
        let transport = RecordingTransport::default();
        let storage = MemoryStorage::default();
        login_ok(&transport);
        let client = client(&transport, &storage);
        let session = Rc::new(Session::default())
            .reduce(block_on(login(&client, "noa@example.com", "secret1")).unwrap());

        let session = session.reduce(logout(&client));

        assert!(!session.is_authenticated());
        assert!(!storage.contains(TOKEN_KEY));
        assert!(!storage.contains(USER_KEY));
    }
}
