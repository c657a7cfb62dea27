//! User-Agent string for Figma API and asset requests.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/figma-fetch";

/// Default User-Agent for API requests.
#[must_use]
pub(crate) fn default_api_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("figma-fetch/{version} (+{PROJECT_UA_URL})")
}
