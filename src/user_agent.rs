//! User-Agent string sent with every request to the remote file server.

/// Default User-Agent for remote requests (identifies the service and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("charfetch/{version}")
}
