use yew::Callback;

use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

/// Provided by `App`; emitting a route switches the page.
pub type Navigator = Callback<Route>;

/// The two gated page shells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    /// Login and register: only for signed-out visitors.
    Auth,
    Dashboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Loading,
    Render,
    Redirect(Route),
}

pub fn gate(shell: Shell, session: &Session) -> Gate {
    if session.is_loading {
        return Gate::Loading;
    }
    match (shell, session.is_authenticated()) {
        (Shell::Auth, true) => Gate::Redirect(Route::Dashboard),
        (Shell::Dashboard, false) => Gate::Redirect(Route::Login),
        _ => Gate::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn signed_in() -> Session {
        Session {
            user: Some(User { id: "u1".to_string(), email: "a@b.co".to_string() }),
            is_loading: false,
        }
    }

    fn signed_out() -> Session {
        Session { user: None, is_loading: false }
    }

    #[test]
    fn both_shells_wait_for_restoration() {
        assert_eq!(gate(Shell::Auth, &Session::default()), Gate::Loading);
        assert_eq!(gate(Shell::Dashboard, &Session::default()), Gate::Loading);
    }

    #[test]
    fn auth_shell_sends_signed_in_users_to_dashboard() {
        assert_eq!(gate(Shell::Auth, &signed_in()), Gate::Redirect(Route::Dashboard));
        assert_eq!(gate(Shell::Auth, &signed_out()), Gate::Render);
    }

    #[test]
    fn dashboard_sends_visitors_to_login() {
        assert_eq!(gate(Shell::Dashboard, &signed_out()), Gate::Redirect(Route::Login));
        assert_eq!(gate(Shell::Dashboard, &signed_in()), Gate::Render);
    }
}
