/// Access gate module
///
/// Once per application load the gate asks the key host whether a usable
/// API key is selected; until it answers the UI shows a checking splash.
/// The host is an injected capability (it may be absent entirely) so the
/// gate can be exercised in tests against a scripted fake instead of
/// ambient environment state.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub mod env_host;

pub use env_host::EnvKeyHost;

/// Marker the provider puts in its "entity not found" failures; a key
/// selection error containing it gets the specific remediation message
const NOT_FOUND_MARKER: &str = "Requested entity was not found";

/// Whether the session may talk to the image model.
///
/// Transitions are Checking -> Granted or Checking -> Denied at startup,
/// and Denied -> Granted after a successful key selection. Never
/// Granted -> Denied within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    /// Startup query still running
    Checking,
    /// A key is selected; the generator screen is available
    Granted,
    /// No usable key; the selection screen is shown
    Denied,
}

/// User-facing access failures. Display strings are shown verbatim in
/// the selection screen's error banner; the underlying host message is
/// logged at the gate boundary instead of leaking into the UI.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("API key host not detected. Please run this app in an environment that provides one.")]
    EnvironmentUnavailable,

    #[error("Key selection failed. Please try selecting a valid project again.")]
    ProjectNotFound,

    #[error("An unexpected error occurred during key selection.")]
    Unknown,
}

/// External capability for API key management.
///
/// Host failures are plain messages; the gate owns their classification.
#[async_trait]
pub trait KeyHost: Send + Sync {
    /// Is a usable key currently selected?
    async fn has_selected_key(&self) -> Result<bool, String>;

    /// Open the host's key selection flow. Returning Ok means the user
    /// completed it; the gate treats that as granted without a second
    /// confirmation query.
    async fn open_key_selector(&self) -> Result<(), String>;
}

/// Shared handle so the host can travel into background tasks
pub type SharedKeyHost = Arc<dyn KeyHost>;

/// Startup check, run once per application load.
///
/// Fail-safe: an absent host or a host error resolves to Denied. This
/// never errors out and never leaves the gate in Checking.
pub async fn check_access(host: Option<SharedKeyHost>) -> AccessState {
    let Some(host) = host else {
        eprintln!("⚠️  No API key host available. Defaulting to no access.");
        return AccessState::Denied;
    };

    match host.has_selected_key().await {
        Ok(true) => AccessState::Granted,
        Ok(false) => AccessState::Denied,
        Err(message) => {
            eprintln!("⚠️  Error checking API key status: {}", message);
            AccessState::Denied
        }
    }
}

/// User-triggered key selection.
///
/// Ok means the selector ran without error and the caller should move
/// the gate to Granted (optimistic: the host is not asked to confirm the
/// new key actually works). Failures are classified for the UI; the user
/// may retry any number of times, no backoff.
pub async fn request_access(host: Option<SharedKeyHost>) -> Result<(), AccessError> {
    let Some(host) = host else {
        return Err(AccessError::EnvironmentUnavailable);
    };

    host.open_key_selector().await.map_err(|message| {
        eprintln!("❌ Key selection failed: {}", message);
        if message.contains(NOT_FOUND_MARKER) {
            AccessError::ProjectNotFound
        } else {
            AccessError::Unknown
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted host for gate tests
    struct FakeHost {
        has_key: Result<bool, String>,
        selector: Result<(), String>,
    }

    #[async_trait]
    impl KeyHost for FakeHost {
        async fn has_selected_key(&self) -> Result<bool, String> {
            self.has_key.clone()
        }

        async fn open_key_selector(&self) -> Result<(), String> {
            self.selector.clone()
        }
    }

    fn host(has_key: Result<bool, String>, selector: Result<(), String>) -> SharedKeyHost {
        Arc::new(FakeHost { has_key, selector })
    }

    #[tokio::test]
    async fn test_check_access_absent_host_is_denied() {
        assert_eq!(check_access(None).await, AccessState::Denied);
    }

    #[tokio::test]
    async fn test_check_access_reflects_host_answer() {
        let granted = host(Ok(true), Ok(()));
        assert_eq!(check_access(Some(granted)).await, AccessState::Granted);

        let denied = host(Ok(false), Ok(()));
        assert_eq!(check_access(Some(denied)).await, AccessState::Denied);
    }

    #[tokio::test]
    async fn test_check_access_host_error_is_denied_not_propagated() {
        let failing = host(Err("backend exploded".to_string()), Ok(()));
        assert_eq!(check_access(Some(failing)).await, AccessState::Denied);
    }

    #[tokio::test]
    async fn test_request_access_absent_host_makes_no_call() {
        assert_eq!(
            request_access(None).await,
            Err(AccessError::EnvironmentUnavailable)
        );
    }

    #[tokio::test]
    async fn test_request_access_success_is_ok() {
        let h = host(Ok(false), Ok(()));
        assert_eq!(request_access(Some(h)).await, Ok(()));
    }

    #[tokio::test]
    async fn test_request_access_classifies_not_found() {
        let h = host(
            Ok(false),
            Err("400: Requested entity was not found.".to_string()),
        );
        let err = request_access(Some(h)).await.unwrap_err();
        assert_eq!(err, AccessError::ProjectNotFound);
        assert_eq!(
            err.to_string(),
            "Key selection failed. Please try selecting a valid project again."
        );
    }

    #[tokio::test]
    async fn test_request_access_other_failures_are_generic() {
        let h = host(Ok(false), Err("quota exceeded".to_string()));
        let err = request_access(Some(h)).await.unwrap_err();
        assert_eq!(err, AccessError::Unknown);
        assert_eq!(
            err.to_string(),
            "An unexpected error occurred during key selection."
        );
    }
}
