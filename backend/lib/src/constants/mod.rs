//! Configuration constants for the wallet demo backend

/// Test constants for use across all backend tests
#[cfg(test)]
pub mod test;

/// Default server configuration
pub mod server {
    /// Default HTTP listening host
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default HTTP server port
    pub const DEFAULT_PORT: u16 = 8080;
}

/// Authentication and session configuration
pub mod auth {
    /// Name of the signed session cookie
    pub const SESSION_COOKIE: &str = "siwe-session";

    /// Length of the sign-in challenge nonce, in characters
    pub const NONCE_LENGTH: usize = 32;

    /// Default session lifetime (one week)
    pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

    /// Minimum accepted length for the cookie-signing secret
    pub const MIN_SESSION_SECRET_LEN: usize = 32;

    /// Development-only signing secret. Override in any real deployment.
    pub const DEV_SESSION_SECRET: &str =
        "insecure-dev-session-secret-change-me-0123456789abcdef0123456789";

    /// Challenge endpoint path, shared between routes and tests
    pub const AUTH_SIWE_ENDPOINT: &str = "/api/auth/siwe";
}

/// Database configuration
pub mod database {
    /// Default maximum database connections
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// Default database connection timeout in seconds
    pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 10;

    /// Default PostgreSQL database URL
    pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/wallet_demo";
}

/// Demo ledger values.
///
/// Balances and fees are hard-coded mocks; no real accounting backs them.
pub mod ledger {
    /// Minimum BTC withdrawal amount
    pub const BTC_MIN_WITHDRAWAL: &str = "0.001";

    /// Minimum ETH withdrawal amount
    pub const ETH_MIN_WITHDRAWAL: &str = "0.01";

    /// Demo BTC balance shown to every user
    pub const DEMO_BTC_BALANCE: &str = "0.00542";

    /// Demo ETH balance shown to every user
    pub const DEMO_ETH_BALANCE: &str = "0.125";

    /// Seeded demo deposit amounts, oldest last
    pub const DEMO_BTC_CONFIRMED_AMOUNT: &str = "0.00521";
    pub const DEMO_ETH_CONFIRMED_AMOUNT: &str = "0.0832";
    pub const DEMO_BTC_PENDING_AMOUNT: &str = "0.00123";

    /// Transaction hashes attached to the seeded demo deposits
    pub const DEMO_BTC_CONFIRMED_TX: &str =
        "7d2c4e1f8a9b3c5d6e7f8a9b0c1d2e3f4a5b6c7d8e9f0a1b2c3d4e5f6a7b8c9d";
    pub const DEMO_ETH_CONFIRMED_TX: &str =
        "0x1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b";
    pub const DEMO_BTC_PENDING_TX: &str =
        "2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3c";
}
