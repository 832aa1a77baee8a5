//! Accessible locators compiled to in-page scripts.
//!
//! Elements are identified the way an assistive technology would see them:
//! by accessible label, by role plus accessible name, or by visible text.
//! Structural position (CSS paths, XPath) is deliberately not offered.
//!
//! # Matching
//!
//! - Labels and names are compared after whitespace normalization and case
//!   folding; a trailing required-field marker (`*`) is ignored.
//! - An exact match wins. Only when nothing matches exactly is a substring
//!   match accepted, so `"Password"` resolves to the *Password* field even
//!   when a *Confirm Password* field is on the same form.
//! - Label and role queries are strict: the caller treats anything other
//!   than exactly one candidate as "not found".
//! - Text queries select the innermost visible elements containing the text
//!   and are lenient: region captures use the first match. Hidden elements
//!   are dropped before exact and substring matches are ranked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a locator identifies candidate elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// Form control by accessible label (`aria-label`, `<label>`, placeholder)
    Label(String),
    /// Interactive element by ARIA role and accessible name
    Role {
        /// ARIA role, e.g. `button`
        role: String,
        /// Accessible name, e.g. `Sign In`
        name: String,
    },
    /// Innermost element containing the text
    Text(String),
}

impl Selector {
    /// Script-side query object
    fn to_query_object(&self) -> serde_json::Value {
        match self {
            Self::Label(label) => serde_json::json!({ "kind": "label", "value": label }),
            Self::Role { role, name } => {
                serde_json::json!({ "kind": "role", "role": role.to_lowercase(), "name": name })
            }
            Self::Text(text) => serde_json::json!({ "kind": "text", "value": text }),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => write!(f, "label {label:?}"),
            Self::Role { role, name } => write!(f, "{role} {name:?}"),
            Self::Text(text) => write!(f, "text {text:?}"),
        }
    }
}

/// A locator: a selector plus an optional walk up the ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    #[serde(flatten)]
    selector: Selector,
    /// Number of parent hops applied after matching
    #[serde(default, skip_serializing_if = "is_zero")]
    ancestor: u32,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl Locator {
    /// Locate a form control by its accessible label
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self::from_selector(Selector::Label(label.into()))
    }

    /// Locate an element by role and accessible name
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_selector(Selector::Role {
            role: role.into(),
            name: name.into(),
        })
    }

    /// Locate the innermost element containing `text`
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_selector(Selector::Text(text.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub const fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            ancestor: 0,
        }
    }

    /// Walk `levels` parents up from each match
    #[must_use]
    pub const fn ancestor(mut self, levels: u32) -> Self {
        self.ancestor = levels;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the ancestor depth
    #[must_use]
    pub const fn ancestor_levels(&self) -> u32 {
        self.ancestor
    }

    fn query_literal(&self) -> String {
        let mut query = self.selector.to_query_object();
        query["ancestor"] = serde_json::Value::from(self.ancestor);
        query.to_string()
    }

    /// Script that sets `value` on the unique match.
    ///
    /// Evaluates to the match count; the value is only written when the count
    /// is exactly one. Input and change events are dispatched so framework
    /// bindings observe the new value.
    #[must_use]
    pub fn fill_script(&self, value: &str) -> String {
        let value = js_string(value);
        wrap(&format!(
            "const els = __uiv.resolve({q}); \
             if (els.length !== 1) return els.length; \
             __uiv.setValue(els[0], {value}); \
             return 1;",
            q = self.query_literal(),
        ))
    }

    /// Script that clicks the unique match; evaluates to the match count
    #[must_use]
    pub fn click_script(&self) -> String {
        wrap(&format!(
            "const els = __uiv.resolve({q}); \
             if (els.length !== 1) return els.length; \
             els[0].scrollIntoView({{ block: 'center', inline: 'center' }}); \
             els[0].click(); \
             return 1;",
            q = self.query_literal(),
        ))
    }

    /// Script evaluating to the document-relative box of the first match
    #[must_use]
    pub fn bounding_box_script(&self) -> String {
        wrap(&format!(
            "const els = __uiv.resolve({q}); \
             if (els.length === 0) return {{ count: 0, x: 0, y: 0, width: 0, height: 0 }}; \
             els[0].scrollIntoView({{ block: 'nearest' }}); \
             const r = els[0].getBoundingClientRect(); \
             return {{ count: els.length, x: r.left + window.scrollX, y: r.top + window.scrollY, \
                       width: r.width, height: r.height }};",
            q = self.query_literal(),
        ))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)?;
        if self.ancestor > 0 {
            write!(f, " (ancestor {})", self.ancestor)?;
        }
        Ok(())
    }
}

/// Script evaluating to `true` when a visible element contains `text`
#[must_use]
pub fn visible_text_script(text: &str) -> String {
    wrap(&format!(
        "return __uiv.textMatches({}).length > 0;",
        js_string(text)
    ))
}

/// Document-relative element box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Number of elements the locator matched
    pub count: usize,
    /// Left edge in CSS pixels
    pub x: f64,
    /// Top edge in CSS pixels
    pub y: f64,
    /// Width in CSS pixels
    pub width: f64,
    /// Height in CSS pixels
    pub height: f64,
}

impl BoundingBox {
    /// Whether the box covers any area
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

fn wrap(body: &str) -> String {
    format!("(() => {{ {PRELUDE} {body} }})()")
}

const PRELUDE: &str = r#"const __uiv = (() => {
  const norm = (s) => (s || '').replace(/\s+/g, ' ').trim().toLowerCase();
  const bare = (s) => norm(s).replace(/\s*\*$/, '');
  const visible = (el) => {
    const r = el.getBoundingClientRect();
    const st = window.getComputedStyle(el);
    return r.width > 0 && r.height > 0 && st.visibility !== 'hidden' && st.display !== 'none';
  };
  const labelsOf = (el) => {
    const out = [];
    const aria = el.getAttribute('aria-label');
    if (aria) out.push(aria);
    const by = el.getAttribute('aria-labelledby');
    if (by) out.push(by.split(/\s+/).map((id) => {
      const n = document.getElementById(id);
      return n ? n.textContent : '';
    }).join(' '));
    if (el.labels) for (const l of el.labels) out.push(l.textContent);
    const ph = el.getAttribute('placeholder');
    if (ph) out.push(ph);
    return out;
  };
  const roleOf = (el) => {
    const explicit = el.getAttribute('role');
    if (explicit) return explicit.toLowerCase();
    const tag = el.tagName.toLowerCase();
    if (tag === 'button') return 'button';
    if (tag === 'a') return el.hasAttribute('href') ? 'link' : null;
    if (tag === 'textarea') return 'textbox';
    if (tag === 'select') return 'combobox';
    if (tag === 'input') {
      const t = (el.getAttribute('type') || 'text').toLowerCase();
      if (t === 'checkbox' || t === 'radio') return t;
      if (t === 'submit' || t === 'button' || t === 'reset') return 'button';
      if (['text', 'email', 'search', 'tel', 'url'].includes(t)) return 'textbox';
    }
    return null;
  };
  const nameOf = (el) => {
    const ls = labelsOf(el).filter((l) => l && l.trim());
    if (el.getAttribute('aria-label') || el.getAttribute('aria-labelledby')) return ls[0];
    if (el.tagName === 'INPUT') return el.value || ls[0] || el.getAttribute('title') || '';
    return el.textContent || el.getAttribute('title') || ls[0] || '';
  };
  const tiered = (els, keysOf, want) => {
    const w = bare(want);
    const exact = els.filter((el) => keysOf(el).some((k) => bare(k) === w));
    if (exact.length) return exact;
    return els.filter((el) => keysOf(el).some((k) => norm(k).includes(w)));
  };
  const textMatches = (want) => {
    const w = norm(want);
    const all = Array.from(document.body ? document.body.querySelectorAll('*') : [])
      .filter((el) => !['SCRIPT', 'STYLE', 'NOSCRIPT', 'TEMPLATE'].includes(el.tagName));
    const hits = all.filter((el) => norm(el.textContent).includes(w)
      && !Array.from(el.children).some((c) => norm(c.textContent).includes(w)))
      .filter(visible);
    const exact = hits.filter((el) => norm(el.textContent) === w);
    return exact.length ? exact : hits;
  };
  const controls = 'input, textarea, select, [contenteditable="true"], [contenteditable=""], [role="textbox"], [role="combobox"], [role="searchbox"]';
  const resolve = (q) => {
    let els;
    if (q.kind === 'label') {
      els = tiered(Array.from(document.querySelectorAll(controls)).filter(visible), labelsOf, q.value);
    } else if (q.kind === 'role') {
      const pool = Array.from(document.querySelectorAll('*')).filter((el) => roleOf(el) === q.role).filter(visible);
      els = tiered(pool, (el) => [nameOf(el)], q.name);
    } else {
      els = textMatches(q.value);
    }
    return els.map((el) => {
      let n = el;
      for (let i = 0; i < (q.ancestor || 0) && n.parentElement; i++) n = n.parentElement;
      return n;
    });
  };
  const setValue = (el, v) => {
    el.focus();
    if (el.isContentEditable) {
      el.textContent = v;
    } else {
      const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype
        : el instanceof HTMLSelectElement ? HTMLSelectElement.prototype
        : HTMLInputElement.prototype;
      const desc = Object.getOwnPropertyDescriptor(proto, 'value');
      if (desc && desc.set) desc.set.call(el, v); else el.value = v;
    }
    el.dispatchEvent(new Event('input', { bubbles: true }));
    el.dispatchEvent(new Event('change', { bubbles: true }));
  };
  return { resolve, textMatches, setValue };
})();"#;
