//! Native backend capability detection.
//!
//! The native backend is trusted everywhere except on the legacy EdgeHTML
//! engine, whose PBKDF2/HMAC/digest implementations cannot be relied on.
//! Detection is a pure function of a platform identifier (a user-agent
//! string or a short platform id). The process-wide value is evaluated at
//! most once and is immutable afterwards.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Environment variable consulted when the process capability is read
/// before [`init_process_capability`] was called.
pub const PLATFORM_ENV_VAR: &str = "DUALCRYPT_PLATFORM";

/// Short platform ids that denote the legacy EdgeHTML engine.
const LEGACY_PLATFORM_IDS: [&str; 2] = ["edge", "edge-legacy"];

/// User-agent product token of EdgeHTML, including its leading separator so
/// products such as `Knowledge/` do not match. Chromium Edge uses `Edg/`
/// and is trusted.
const LEGACY_UA_TOKEN: &str = " edge/";

static PROCESS_CAPABILITY: OnceLock<NativeCapability> = OnceLock::new();

/// Whether the native backend may be used for runtime-selected operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCapability {
    trusted: bool,
}

impl NativeCapability {
    /// Native backend trusted.
    pub const TRUSTED: Self = Self { trusted: true };

    /// Native backend untrusted; runtime-selected operations use software.
    pub const UNTRUSTED: Self = Self { trusted: false };

    /// Returns `true` if the native backend is trustworthy.
    #[must_use]
    pub const fn is_trusted(self) -> bool {
        self.trusted
    }
}

impl Default for NativeCapability {
    fn default() -> Self {
        Self::TRUSTED
    }
}

/// Evaluate the capability for a platform identifier.
///
/// Accepts either a full user-agent string or a short platform id such as
/// `"chrome"` or `"edge"`. Matching is case-insensitive.
#[must_use]
pub fn detect(platform: &str) -> NativeCapability {
    let platform = platform.trim().to_ascii_lowercase();
    let legacy = LEGACY_PLATFORM_IDS.contains(&platform.as_str())
        || platform.contains(LEGACY_UA_TOKEN);
    if legacy {
        NativeCapability::UNTRUSTED
    } else {
        NativeCapability::TRUSTED
    }
}

/// Evaluate and pin the process-wide capability.
///
/// The first call wins; later calls return the pinned value and ignore
/// their argument.
pub fn init_process_capability(platform: &str) -> NativeCapability {
    *PROCESS_CAPABILITY.get_or_init(|| evaluate(platform))
}

/// Process-wide capability.
///
/// If [`init_process_capability`] has not run yet, the platform is read
/// from [`PLATFORM_ENV_VAR`] (empty when unset) and pinned.
#[must_use]
pub fn process_capability() -> NativeCapability {
    *PROCESS_CAPABILITY.get_or_init(|| capability_from_env(std::env::var(PLATFORM_ENV_VAR)))
}

/// Returns `true` if the native backend is trusted for this process.
#[must_use]
pub fn native_backend_trusted() -> bool {
    process_capability().is_trusted()
}

/// Capability for the value of [`PLATFORM_ENV_VAR`]. Unset or non-UTF-8
/// values count as an empty platform.
fn capability_from_env(value: Result<String, std::env::VarError>) -> NativeCapability {
    evaluate(value.as_deref().unwrap_or_default())
}

fn evaluate(platform: &str) -> NativeCapability {
    let capability = detect(platform);
    tracing::info!(
        platform = %platform,
        trusted = capability.is_trusted(),
        "Native crypto capability detected"
    );
    capability
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
