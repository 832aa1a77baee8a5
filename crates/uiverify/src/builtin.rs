//! Built-in verification flows for the todo application.
//!
//! Each flow declares a random `username` (`testuser_` plus 8 characters) and
//! the fixed `password`, so repeated runs never collide on account names.

use crate::locator::Locator;
use crate::scenario::Scenario;
use crate::step::Step;

/// Prefix of generated account names
pub const USERNAME_PREFIX: &str = "testuser_";

/// Password used for every generated account
pub const PASSWORD: &str = "Password123!";

/// Text of the todo created by the `new-ui` flow
pub const NEW_TODO: &str = "My new todo";

/// Names of the built-in scenarios, in run order
pub const NAMES: [&str; 3] = ["signup-login-filters", "error-messages", "new-ui"];

/// All built-in scenarios, in run order
#[must_use]
pub fn all() -> Vec<Scenario> {
    vec![signup_login_filters(), error_messages(), new_ui()]
}

/// Look up a built-in scenario by name
#[must_use]
pub fn find(name: &str) -> Option<Scenario> {
    match name {
        "signup-login-filters" => Some(signup_login_filters()),
        "error-messages" => Some(error_messages()),
        "new-ui" => Some(new_ui()),
        _ => None,
    }
}

fn account(name: &str) -> Scenario {
    Scenario::new(name)
        .random_var("username", USERNAME_PREFIX)
        .var("password", PASSWORD)
}

fn sign_up(open_form: &str) -> [Step; 5] {
    [
        Step::click_button(open_form),
        Step::fill("Username", "{username}"),
        Step::fill("Password", "{password}"),
        Step::fill("Confirm Password", "{password}"),
        Step::click_button("Create Account"),
    ]
}

fn sign_in(username: &str, password: &str) -> [Step; 3] {
    [
        Step::fill("Username", username),
        Step::fill("Password", password),
        Step::click_button("Sign In"),
    ]
}

fn filter_controls() -> Locator {
    Locator::text("Search & Filters").ancestor(2)
}

/// Sign up, log in, and capture the filter controls before and after
/// selecting "Completed".
#[must_use]
pub fn signup_login_filters() -> Scenario {
    account("signup-login-filters")
        .with_description("Sign up, log in, and capture the filter controls")
        .step(Step::navigate("/"))
        .steps(sign_up("Sign Up"))
        .step(Step::assert_visible("Account created successfully!"))
        .steps(sign_in("{username}", "{password}"))
        .step(Step::assert_visible("Todo Dashboard"))
        .step(Step::screenshot_region("filter-controls.png", filter_controls()))
        .step(Step::click_button("Completed"))
        .step(Step::screenshot_region(
            "filter-controls-completed.png",
            filter_controls(),
        ))
}

/// Login error notifications for an unknown user and a wrong password.
#[must_use]
pub fn error_messages() -> Scenario {
    account("error-messages")
        .with_description("Show login errors for unknown users and wrong passwords")
        .step(Step::navigate("/"))
        .steps(sign_in("nonexistentuser", "password"))
        .step(Step::assert_visible("User not found"))
        .step(Step::screenshot("error-user-not-found.png"))
        .steps(sign_up("Don't have an account? Sign Up"))
        .step(Step::assert_visible("Signup successful! Please log in."))
        .steps(sign_in("{username}", "wrongpassword"))
        .step(Step::assert_visible("Incorrect password"))
        .step(Step::screenshot("error-incorrect-password.png"))
}

/// Walk the redesigned login page and dashboard: add a todo, then filter.
#[must_use]
pub fn new_ui() -> Scenario {
    account("new-ui")
        .with_description("Capture the login page and dashboard, add and filter a todo")
        .step(Step::navigate("/"))
        .step(Step::screenshot("login-page-new.png"))
        .steps(sign_up("Don't have an account? Sign Up"))
        .step(Step::assert_visible("Signup successful! Please log in."))
        .steps(sign_in("{username}", "{password}"))
        .step(Step::assert_visible("TodoApp"))
        .step(Step::screenshot("dashboard-new.png"))
        .step(Step::fill("What needs to be done?", NEW_TODO))
        .step(Step::click_button("Add Todo"))
        .step(Step::assert_visible(NEW_TODO))
        .step(Step::screenshot("dashboard-with-todo-new.png"))
        .step(Step::click_button("Completed"))
        .step(Step::screenshot("dashboard-filtered-new.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_validate() {
        for scenario in all() {
            scenario.validate().unwrap();
        }
    }

    #[test]
    fn test_names_match_scenarios() {
        let names: Vec<_> = all().into_iter().map(|s| s.name).collect();
        assert_eq!(names, NAMES);
        for name in NAMES {
            assert_eq!(find(name).map(|s| s.name), Some(name.to_string()));
        }
        assert!(find("missing").is_none());
    }

    #[test]
    fn test_fresh_username_per_resolution() {
        let scenario = signup_login_filters();
        let first = scenario.resolve_vars();
        let second = scenario.resolve_vars();
        assert!(first["username"].starts_with(USERNAME_PREFIX));
        assert_eq!(first["username"].len(), USERNAME_PREFIX.len() + 8);
        assert_ne!(first["username"], second["username"]);
        assert_eq!(first["password"], PASSWORD);
    }

    #[test]
    fn test_signup_fills_confirm_password() {
        let scenario = error_messages();
        assert!(scenario
            .step_list()
            .contains(&Step::fill("Confirm Password", "{password}")));
    }

    #[test]
    fn test_filter_screenshots_capture_region() {
        let shots: Vec<_> = signup_login_filters()
            .step_list()
            .iter()
            .filter_map(|s| match s {
                Step::Screenshot { path, region } => Some((path.clone(), region.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(shots.len(), 2);
        assert!(shots.iter().all(|(_, r)| r.as_ref() == Some(&filter_controls())));
    }
}
