/// API base used when `API_BASE_URL` is not set at build time
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// localStorage key holding the raw bearer token
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";

/// How long the "saved" confirmation stays up before the list reloads and the form closes
pub const DEFAULT_FORM_CLOSE_DELAY_MS: u32 = 1500;

pub const DASHBOARD_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please log in again";
