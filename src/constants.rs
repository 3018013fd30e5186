//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Per-request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum accepted request body in bytes (1 MB)
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// CACHE DEFAULTS
// =============================================================================

/// Default lifetime of a cached view in seconds
pub const DEFAULT_VIEW_CACHE_TTL_SECS: u64 = 300;

/// How long an invalidated view key refuses writes, covering loads already in flight
pub const VIEW_INVALIDATION_HOLD_SECS: u64 = REQUEST_TIMEOUT_SECS;

/// Cache keys for rendered views
pub mod cache_keys {
    /// Public home listing (approved solutions)
    pub const APPROVED_LISTING: &str = "view:solutions:approved";

    /// Admin dashboard listing (every solution)
    pub const ADMIN_LISTING: &str = "view:solutions:all";

    /// Value stored under an invalidated key; never valid JSON
    pub const TOMBSTONE: &str = "\u{0}invalidated";

    /// Detail view of a single solution
    pub fn detail(id: &str) -> String {
        format!("view:solutions:detail:{}", id)
    }
}

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 1;

/// Name of the cookie carrying the admin session token
pub const ADMIN_AUTH_COOKIE_NAME: &str = "admin_auth_token";

/// Subject claim stamped into admin session tokens
pub const ADMIN_TOKEN_SUBJECT: &str = "admin";

/// Login entry point of the admin dashboard
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

// =============================================================================
// SOLUTIONS
// =============================================================================

/// Author stamped on every stored solution
pub const SOLUTION_AUTHOR: &str = "CSES Solver Team";

/// Language stored for code sections submitted without one
pub const DEFAULT_CODE_LANGUAGE: &str = "plaintext";

/// Slug used when a title has no ASCII alphanumerics at all
pub const FALLBACK_SLUG: &str = "solution";

/// Maximum number of suffixed slug candidates tried before giving up
pub const MAX_SLUG_ATTEMPTS: u32 = 100;

/// Shown instead of the content of a solution awaiting approval
pub const PENDING_APPROVAL_MESSAGE: &str =
    "This solution is currently under review and not yet publicly visible.";

// =============================================================================
// VALIDATION
// =============================================================================

/// Minimum solution title length
pub const MIN_TITLE_LENGTH: u64 = 3;

/// Maximum solution title length
pub const MAX_TITLE_LENGTH: u64 = 256;

/// Maximum content length of a single section
pub const MAX_SECTION_CONTENT_LENGTH: u64 = 65535;

// =============================================================================
// AI ASSISTANT DEFAULTS
// =============================================================================

/// Default chat model requested from the assistant endpoint
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Default assistant request timeout in seconds
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 20;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api";
