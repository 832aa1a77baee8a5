//! Scenarios: ordered steps plus the variables they reference.
//!
//! A scenario is built from a literal list at program start (see
//! [`crate::builtin`]) or loaded from YAML:
//!
//! ```yaml
//! version: "1.0"
//! name: login-error
//! vars:
//!   username: { prefix: "testuser_" }
//!   password: "Password123!"
//! steps:
//!   - type: navigate
//!     url: /
//!   - type: fill
//!     label: Username
//!     value: "{username}"
//!   - type: click
//!     role: button
//!     name: Sign In
//!   - type: assert_visible
//!     text: User not found
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::locator::Selector;
use crate::result::{VerifyError, VerifyResult};
use crate::step::{Step, Vars};
use crate::testdata;

/// Supported scenario file version
pub const SCENARIO_VERSION: &str = "1.0";

/// Declared scenario variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variable {
    /// Fixed value
    Literal(String),
    /// Fresh random value per run: `prefix` plus `length` chars of `[a-z0-9]`
    Random {
        /// Leading fixed part
        #[serde(default)]
        prefix: String,
        /// Random part length
        #[serde(default = "default_suffix_len")]
        length: usize,
    },
}

const fn default_suffix_len() -> usize {
    testdata::DEFAULT_SUFFIX_LEN
}

impl Variable {
    /// A random variable with the default suffix length
    #[must_use]
    pub fn random(prefix: impl Into<String>) -> Self {
        Self::Random {
            prefix: prefix.into(),
            length: testdata::DEFAULT_SUFFIX_LEN,
        }
    }

    /// Produce this run's value
    #[must_use]
    pub fn generate(&self) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Random { prefix, length } => testdata::unique_name(prefix, *length),
        }
    }
}

/// An ordered list of steps representing one verification flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Variables referenced by `{name}` placeholders
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub vars: BTreeMap<String, Variable>,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    version: String,
    #[serde(flatten)]
    scenario: Scenario,
}

impl Scenario {
    /// Create an empty scenario
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            vars: BTreeMap::new(),
            steps: Vec::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare a fixed variable
    #[must_use]
    pub fn var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), Variable::Literal(value.into()));
        self
    }

    /// Declare a random variable (`prefix` + 8 random chars)
    #[must_use]
    pub fn random_var(mut self, name: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.vars.insert(name.into(), Variable::random(prefix));
        self
    }

    /// Append a step
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append several steps
    #[must_use]
    pub fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Steps in execution order
    #[must_use]
    pub fn step_list(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the scenario has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Generate this run's variable values
    #[must_use]
    pub fn resolve_vars(&self) -> Vars {
        self.vars
            .iter()
            .map(|(name, var)| (name.clone(), var.generate()))
            .collect()
    }

    /// Parse and validate a scenario from YAML
    pub fn from_yaml(yaml: &str) -> VerifyResult<Self> {
        let file: ScenarioFile = serde_yaml_ng::from_str(yaml)?;
        if file.version != SCENARIO_VERSION {
            return Err(VerifyError::scenario(format!(
                "unsupported version {:?} (expected {SCENARIO_VERSION:?})",
                file.version
            )));
        }
        file.scenario.validate()?;
        Ok(file.scenario)
    }

    /// Load a scenario file
    pub fn from_file(path: impl AsRef<Path>) -> VerifyResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml).map_err(|e| {
            VerifyError::scenario(format!("{}: {e}", path.display()))
        })
    }

    /// Serialize to the YAML file format
    pub fn to_yaml(&self) -> VerifyResult<String> {
        #[derive(Serialize)]
        struct Out<'a> {
            version: &'static str,
            #[serde(flatten)]
            scenario: &'a Scenario,
        }
        Ok(serde_yaml_ng::to_string(&Out {
            version: SCENARIO_VERSION,
            scenario: self,
        })?)
    }

    /// Check structure: non-empty name and steps, non-empty step fields,
    /// and every placeholder names a declared variable.
    pub fn validate(&self) -> VerifyResult<()> {
        if self.name.trim().is_empty() {
            return Err(VerifyError::scenario("scenario name is empty"));
        }
        if self.steps.is_empty() {
            return Err(VerifyError::scenario(format!(
                "scenario {:?} has no steps",
                self.name
            )));
        }

        for (i, step) in self.steps.iter().enumerate() {
            let index = i + 1;
            let empty = |field: &str| {
                VerifyError::scenario(format!(
                    "step {index} ({}) has an empty {field}",
                    step.kind()
                ))
            };
            match step {
                Step::Fill { label, .. } if label.trim().is_empty() => return Err(empty("label")),
                Step::Click { role, .. } if role.trim().is_empty() => return Err(empty("role")),
                Step::Click { name, .. } if name.trim().is_empty() => return Err(empty("name")),
                Step::AssertVisible { text, .. } if text.trim().is_empty() => {
                    return Err(empty("text"))
                }
                Step::AssertVisible {
                    timeout_ms: Some(0),
                    ..
                } => return Err(empty("timeout")),
                Step::Screenshot { path, .. } if path.trim().is_empty() => {
                    return Err(empty("path"))
                }
                Step::Screenshot {
                    region: Some(region),
                    ..
                } => {
                    let blank = match region.selector() {
                        Selector::Label(s) | Selector::Text(s) => s.trim().is_empty(),
                        Selector::Role { role, name } => {
                            role.trim().is_empty() || name.trim().is_empty()
                        }
                    };
                    if blank {
                        return Err(empty("region"));
                    }
                }
                _ => {}
            }

            for name in step.placeholders()? {
                if !self.vars.contains_key(&name) {
                    return Err(VerifyError::scenario(format!(
                        "step {index} ({}) references undeclared variable {name:?}",
                        step.kind()
                    )));
                }
            }
        }
        Ok(())
    }
}
