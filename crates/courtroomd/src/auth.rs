//! Player identity selection.
//!
//! The guest/registered split is a startup decision: build the one provider
//! the config asks for and hand it to the controller, rather than sniffing
//! the environment at call sites.

use courtroom_common::{CourtroomConfig, PlayerMode, GUEST_UID};

/// The identity owning a session's stats record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub uid: String,
    pub display_name: String,
}

/// Capability interface for "who is playing".
pub trait AuthProvider: Send + Sync {
    fn player(&self) -> PlayerIdentity;

    /// Whether this identity persists to the remote record store.
    fn is_registered(&self) -> bool;
}

/// Anonymous on-device session.
pub struct GuestAuth;

impl AuthProvider for GuestAuth {
    fn player(&self) -> PlayerIdentity {
        PlayerIdentity {
            uid: GUEST_UID.to_string(),
            display_name: "Anonymous Judge".to_string(),
        }
    }

    fn is_registered(&self) -> bool {
        false
    }
}

/// Identity taken from configuration for a signed-in player.
pub struct RegisteredAuth {
    identity: PlayerIdentity,
}

impl RegisteredAuth {
    pub fn new(uid: &str, display_name: &str) -> Self {
        let display_name = if display_name.is_empty() {
            "Anonymous Judge"
        } else {
            display_name
        };
        Self {
            identity: PlayerIdentity {
                uid: uid.to_string(),
                display_name: display_name.to_string(),
            },
        }
    }
}

impl AuthProvider for RegisteredAuth {
    fn player(&self) -> PlayerIdentity {
        self.identity.clone()
    }

    fn is_registered(&self) -> bool {
        true
    }
}

/// Build the provider the config selects.
///
/// Registered mode without a uid degrades to a guest session rather than
/// failing: there is no identity to key a remote record on.
pub fn provider_from_config(config: &CourtroomConfig) -> Box<dyn AuthProvider> {
    match config.player.mode {
        PlayerMode::Guest => Box::new(GuestAuth),
        PlayerMode::Registered if config.player.uid.is_empty() => Box::new(GuestAuth),
        PlayerMode::Registered => Box::new(RegisteredAuth::new(
            &config.player.uid,
            &config.player.display_name,
        )),
    }
}
