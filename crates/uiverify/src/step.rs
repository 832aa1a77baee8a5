//! Scenario steps and `{placeholder}` interpolation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::locator::Locator;
use crate::result::{VerifyError, VerifyResult};

/// Resolved scenario variables
pub type Vars = BTreeMap<String, String>;

/// A single UI interaction. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Load a URL; relative URLs are joined to the configured base URL
    Navigate {
        /// Target URL
        url: String,
    },
    /// Set the value of the input with this accessible label
    Fill {
        /// Accessible label text
        label: String,
        /// Value to set
        value: String,
    },
    /// Click the interactive element with this role and accessible name
    Click {
        /// ARIA role
        role: String,
        /// Accessible name
        name: String,
    },
    /// Poll until an element containing the text is visible
    AssertVisible {
        /// Expected text
        text: String,
        /// Per-step override of the assertion timeout
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_ms: Option<u64>,
    },
    /// Capture the viewport, or a sub-element region, to a PNG file
    Screenshot {
        /// Output path; relative paths land in the output directory
        path: String,
        /// Element whose box is captured instead of the viewport
        #[serde(default, skip_serializing_if = "Option::is_none")]
        region: Option<Locator>,
    },
}

impl Step {
    /// Navigate step
    #[must_use]
    pub fn navigate(url: impl Into<String>) -> Self {
        Self::Navigate { url: url.into() }
    }

    /// Fill step
    #[must_use]
    pub fn fill(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Fill {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Click step
    #[must_use]
    pub fn click(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Click {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Click a button by its accessible name
    #[must_use]
    pub fn click_button(name: impl Into<String>) -> Self {
        Self::click("button", name)
    }

    /// Assert-visible step with the default timeout
    #[must_use]
    pub fn assert_visible(text: impl Into<String>) -> Self {
        Self::AssertVisible {
            text: text.into(),
            timeout_ms: None,
        }
    }

    /// Viewport screenshot step
    #[must_use]
    pub fn screenshot(path: impl Into<String>) -> Self {
        Self::Screenshot {
            path: path.into(),
            region: None,
        }
    }

    /// Region screenshot step
    #[must_use]
    pub fn screenshot_region(path: impl Into<String>, region: Locator) -> Self {
        Self::Screenshot {
            path: path.into(),
            region: Some(region),
        }
    }

    /// Short kind name, matching the YAML `type` tag
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::Fill { .. } => "fill",
            Self::Click { .. } => "click",
            Self::AssertVisible { .. } => "assert_visible",
            Self::Screenshot { .. } => "screenshot",
        }
    }

    /// Every interpolated string field of this step
    fn templates(&self) -> Vec<&str> {
        match self {
            Self::Navigate { url } => vec![url.as_str()],
            Self::Fill { label, value } => vec![label.as_str(), value.as_str()],
            Self::Click { role, name } => vec![role.as_str(), name.as_str()],
            Self::AssertVisible { text, .. } => vec![text.as_str()],
            Self::Screenshot { path, region } => {
                let mut out = vec![path.as_str()];
                if let Some(region) = region {
                    out.extend(selector_templates(region));
                }
                out
            }
        }
    }

    /// Names of every variable this step references
    pub fn placeholders(&self) -> VerifyResult<Vec<String>> {
        let mut names = Vec::new();
        for template in self.templates() {
            names.extend(placeholders(template)?);
        }
        Ok(names)
    }

    /// Copy of this step with all placeholders substituted from `vars`
    pub fn resolve(&self, vars: &Vars) -> VerifyResult<Self> {
        let r = |s: &str| interpolate(s, vars);
        Ok(match self {
            Self::Navigate { url } => Self::Navigate { url: r(url)? },
            Self::Fill { label, value } => Self::Fill {
                label: r(label)?,
                value: r(value)?,
            },
            Self::Click { role, name } => Self::Click {
                role: r(role)?,
                name: r(name)?,
            },
            Self::AssertVisible { text, timeout_ms } => Self::AssertVisible {
                text: r(text)?,
                timeout_ms: *timeout_ms,
            },
            Self::Screenshot { path, region } => Self::Screenshot {
                path: r(path)?,
                region: region.as_ref().map(|l| resolve_locator(l, vars)).transpose()?,
            },
        })
    }
}

fn selector_templates(locator: &Locator) -> Vec<&str> {
    use crate::locator::Selector;
    match locator.selector() {
        Selector::Label(s) | Selector::Text(s) => vec![s.as_str()],
        Selector::Role { role, name } => vec![role.as_str(), name.as_str()],
    }
}

fn resolve_locator(locator: &Locator, vars: &Vars) -> VerifyResult<Locator> {
    use crate::locator::Selector;
    let selector = match locator.selector() {
        Selector::Label(s) => Selector::Label(interpolate(s, vars)?),
        Selector::Text(s) => Selector::Text(interpolate(s, vars)?),
        Selector::Role { role, name } => Selector::Role {
            role: interpolate(role, vars)?,
            name: interpolate(name, vars)?,
        },
    };
    Ok(Locator::from_selector(selector).ancestor(locator.ancestor_levels()))
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate { url } => write!(f, "navigate to {url}"),
            Self::Fill { label, .. } => write!(f, "fill {label:?}"),
            Self::Click { role, name } => write!(f, "click {role} {name:?}"),
            Self::AssertVisible { text, .. } => write!(f, "assert visible {text:?}"),
            Self::Screenshot { path, region: None } => write!(f, "screenshot {path}"),
            Self::Screenshot {
                path,
                region: Some(region),
            } => write!(f, "screenshot {region} to {path}"),
        }
    }
}

enum Piece<'a> {
    Literal(&'a str),
    Var(&'a str),
}

fn parse(template: &str) -> VerifyResult<Vec<Piece<'_>>> {
    let mut pieces = Vec::new();
    let mut rest = template;
    while let Some(pos) = rest.find(['{', '}']) {
        if pos > 0 {
            pieces.push(Piece::Literal(&rest[..pos]));
        }
        let tail = &rest[pos..];
        if tail.starts_with("{{") {
            pieces.push(Piece::Literal("{"));
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            pieces.push(Piece::Literal("}"));
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            return Err(VerifyError::scenario(format!(
                "unmatched '}}' in {template:?}"
            )));
        } else {
            let end = tail.find('}').ok_or_else(|| {
                VerifyError::scenario(format!("unterminated placeholder in {template:?}"))
            })?;
            let name = tail[1..end].trim();
            if name.is_empty() || name.contains('{') {
                return Err(VerifyError::scenario(format!(
                    "malformed placeholder in {template:?}"
                )));
            }
            pieces.push(Piece::Var(name));
            rest = &tail[end + 1..];
        }
    }
    if !rest.is_empty() {
        pieces.push(Piece::Literal(rest));
    }
    Ok(pieces)
}

/// Variable names referenced by `{name}` placeholders in `template`
pub fn placeholders(template: &str) -> VerifyResult<Vec<String>> {
    Ok(parse(template)?
        .into_iter()
        .filter_map(|p| match p {
            Piece::Var(name) => Some(name.to_string()),
            Piece::Literal(_) => None,
        })
        .collect())
}

/// Substitute `{name}` placeholders; `{{` and `}}` escape literal braces
pub fn interpolate(template: &str, vars: &Vars) -> VerifyResult<String> {
    let mut out = String::with_capacity(template.len());
    for piece in parse(template)? {
        match piece {
            Piece::Literal(s) => out.push_str(s),
            Piece::Var(name) => {
                let value = vars.get(name).ok_or_else(|| VerifyError::UnknownVariable {
                    name: name.to_string(),
                })?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}
