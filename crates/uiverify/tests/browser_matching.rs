//! Accessible matching against real Chromium pages.
//!
//! Each test loads a small `data:` document and drives it through
//! `CdpSession`, so the in-page label, role and text rules are exercised
//! exactly as scenarios use them. Run with
//! `cargo test -p uiverify --features browser -- --ignored`.

#![cfg(feature = "browser")]

use uiverify::{BrowserConfig, CdpSession, Locator, Session, VerifyError};

/// Inputs echo `name=value` into `#out`; the echo is what tests assert on.
const ECHO: &str = r#"<p id="out"></p>
<script>
  document.addEventListener('input', (e) => {
    document.getElementById('out').textContent = e.target.name + '=' + e.target.value;
  });
</script>"#;

fn data_url(body: &str) -> String {
    let html = format!("<!doctype html><html><body>{body}</body></html>");
    let encoded: String = html
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() {
                char::from(b).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect();
    format!("data:text/html;charset=utf-8,{encoded}")
}

async fn open(body: &str) -> CdpSession {
    let config = BrowserConfig::default().with_no_sandbox();
    let mut session = CdpSession::launch(&config).await.unwrap();
    session.navigate(&data_url(body)).await.unwrap();
    session
}

mod label_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_label_sources() {
        let body = format!(
            r#"<span id="u">Username</span>
            <input name="user" aria-labelledby="u">
            <label for="mail">Email</label><input id="mail" name="mail">
            <label>Nickname <input name="nick"></label>
            <input name="todo" placeholder="What needs to be done?">
            {ECHO}"#
        );
        let mut session = open(&body).await;

        for (label, echo) in [
            ("Username", "user=alice"),
            ("Email", "mail=a@b.test"),
            ("Nickname", "nick=al"),
            ("What needs to be done?", "todo=milk"),
        ] {
            let value = echo.split_once('=').unwrap().1;
            session.fill(&Locator::label(label), value).await.unwrap();
            assert!(session.is_text_visible(echo).await.unwrap(), "{label}");
        }
        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_exact_label_beats_substring() {
        let body = format!(
            r#"<label for="p1">Password</label><input id="p1" name="pw" type="password">
            <label for="p2">Confirm Password</label><input id="p2" name="confirm" type="password">
            {ECHO}"#
        );
        let mut session = open(&body).await;

        session.fill(&Locator::label("Password"), "s3cret").await.unwrap();
        assert!(session.is_text_visible("pw=s3cret").await.unwrap());
        session.fill(&Locator::label("Confirm Password"), "again").await.unwrap();
        assert!(session.is_text_visible("confirm=again").await.unwrap());
        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_required_marker_ignored() {
        let body = format!(r#"<label for="e">Email *</label><input id="e" name="email">{ECHO}"#);
        let mut session = open(&body).await;

        session.fill(&Locator::label("Email"), "x@y.test").await.unwrap();
        assert!(session.is_text_visible("email=x@y.test").await.unwrap());
        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_hidden_control_not_counted() {
        let body = format!(
            r#"<input name="old" aria-label="Username" style="display:none">
            <input name="user" aria-label="Username">
            {ECHO}"#
        );
        let mut session = open(&body).await;

        session.fill(&Locator::label("Username"), "bob").await.unwrap();
        assert!(session.is_text_visible("user=bob").await.unwrap());
        session.close().await.unwrap();
    }
}

mod role_tests {
    use super::*;

    const CLICKED: &str = r#"<p id="out"></p>
<script>
  document.addEventListener('click', (e) => {
    const t = e.target.closest('button, input, a');
    if (t) document.getElementById('out').textContent = 'clicked ' + t.id;
  });
</script>"#;

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_implicit_button_roles() {
        let body = format!(
            r#"<input id="submit" type="submit" value="Sign In">
            <button id="plain">Add Todo</button>
            {CLICKED}"#
        );
        let mut session = open(&body).await;

        session.click(&Locator::role("button", "Sign In")).await.unwrap();
        assert!(session.is_text_visible("clicked submit").await.unwrap());
        session.click(&Locator::role("button", "Add Todo")).await.unwrap();
        assert!(session.is_text_visible("clicked plain").await.unwrap());
        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_substring_name_when_no_exact() {
        let body = format!(
            r#"<button id="signup">Don't have an account? Sign Up</button>{CLICKED}"#
        );
        let mut session = open(&body).await;

        session.click(&Locator::role("button", "Sign Up")).await.unwrap();
        assert!(session.is_text_visible("clicked signup").await.unwrap());
        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_hidden_button_skipped_and_duplicates_rejected() {
        let body = format!(
            r#"<button id="gone" style="visibility:hidden">Save</button>
            <button id="save">Save</button>
            <button>Delete</button><button>Delete</button>
            {CLICKED}"#
        );
        let mut session = open(&body).await;

        session.click(&Locator::role("button", "Save")).await.unwrap();
        assert!(session.is_text_visible("clicked save").await.unwrap());

        let err = session
            .click(&Locator::role("button", "Delete"))
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::ElementNotFound { matches: 2, .. }));
        session.close().await.unwrap();
    }
}

mod text_tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_hidden_exact_does_not_shadow_visible_substring() {
        let mut session = open(
            r#"<div style="display:none">User not found</div>
            <p>Error: User not found</p>"#,
        )
        .await;

        assert!(session.is_text_visible("User not found").await.unwrap());
        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_only_hidden_text_is_not_visible() {
        let mut session = open(
            r#"<div style="display:none">Incorrect password</div>
            <template><p>Incorrect password</p></template>"#,
        )
        .await;

        assert!(!session.is_text_visible("Incorrect password").await.unwrap());
        session.close().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires chromium"]
    async fn test_region_screenshot_uses_ancestor() {
        let mut session = open(
            r#"<section style="padding:20px">
              <div><h2>Search &amp; Filters</h2></div>
              <button>All</button><button>Completed</button>
            </section>"#,
        )
        .await;

        let region = Locator::text("Search & Filters").ancestor(2);
        let png = session.screenshot(Some(&region)).await.unwrap();
        assert!(png.starts_with(b"\x89PNG"));

        let err = session
            .screenshot(Some(&Locator::text("No such heading")))
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::ElementNotFound { matches: 0, .. }));
        session.close().await.unwrap();
    }
}
