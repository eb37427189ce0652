use crate::utils::constants::{DASHBOARD_PATH, LOGIN_PATH};

/// The two logical destinations of the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
}

impl Route {
    /// URL path of the page.
    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => DASHBOARD_PATH,
            Route::Login => LOGIN_PATH,
        }
    }

    /// `/login` only exists for anonymous visitors; everything else is the dashboard.
    pub fn resolve(path: &str, authenticated: bool) -> Self {
        let path = path.trim_end_matches('/');
        if path == LOGIN_PATH && !authenticated {
            Route::Login
        } else {
            Route::Dashboard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_only_when_anonymous() {
        assert_eq!(Route::resolve("/login", false), Route::Login);
        assert_eq!(Route::resolve("/login/", false), Route::Login);
        assert_eq!(Route::resolve("/login", true), Route::Dashboard);
    }

    #[test]
    fn everything_else_is_dashboard() {
        assert_eq!(Route::resolve("/", false), Route::Dashboard);
        assert_eq!(Route::resolve("", true), Route::Dashboard);
        assert_eq!(Route::resolve("/products/3", false), Route::Dashboard);
    }

    #[test]
    fn paths_resolve_back_to_their_route() {
        assert_eq!(Route::resolve(Route::Login.path(), false), Route::Login);
        assert_eq!(Route::resolve(Route::Dashboard.path(), false), Route::Dashboard);
    }
}
