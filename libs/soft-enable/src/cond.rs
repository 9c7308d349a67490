use std::{fmt, str::FromStr};

use sea_orm::{Condition, sea_query::Expr};
use serde::{Deserialize, Serialize};

use crate::entity_traits::EnableableEntity;
use crate::error::EnableError;

/// One override entry on a query's enablement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterStage {
    /// Drop the default `enabled = true` predicate.
    RemoveDefault,
    /// Require the flag to equal the given value.
    Require(bool),
}

/// Ordered filter stages attached to a single query value.
///
/// # Policy Rules
/// 1. **No stages** → `enabled = true` (the default predicate)
/// 2. **`RemoveDefault` present** → the default predicate is not rendered
/// 3. **Each `Require(v)`** → `enabled = v`, AND-ed with the rest
///
/// Stages only accumulate, so `only_disabled().without_disabled()` renders
/// both `enabled = false` and `enabled = true` and matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnablePolicy {
    stages: Vec<FilterStage>,
}

impl EnablePolicy {
    /// Returns the stages pushed so far, oldest first.
    #[must_use]
    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// Whether the default `enabled = true` predicate is still in effect.
    #[must_use]
    pub fn default_applied(&self) -> bool {
        !self.stages.contains(&FilterStage::RemoveDefault)
    }

    /// Push a stage. Repeated stages are kept once.
    pub fn push(&mut self, stage: FilterStage) {
        if !self.stages.contains(&stage) {
            self.stages.push(stage);
        }
    }

    /// Drop the default predicate so every row matches.
    pub fn with_disabled(&mut self) {
        self.push(FilterStage::RemoveDefault);
    }

    /// Drop the default predicate and require `enabled = true` explicitly.
    pub fn without_disabled(&mut self) {
        self.push(FilterStage::RemoveDefault);
        self.push(FilterStage::Require(true));
    }

    /// Drop the default predicate and require `enabled = false`.
    pub fn only_disabled(&mut self) {
        self.push(FilterStage::RemoveDefault);
        self.push(FilterStage::Require(false));
    }

    /// Push the stages of the extension named by `mode`.
    pub fn apply_mode(&mut self, mode: DisabledMode) {
        match mode {
            DisabledMode::Without => self.without_disabled(),
            DisabledMode::With => self.with_disabled(),
            DisabledMode::Only => self.only_disabled(),
        }
    }

    /// Builds the `SeaORM` `Condition` for entity `E`.
    ///
    /// `qualified` renders `table.enabled` instead of the bare column.
    #[must_use]
    pub fn condition<E>(&self, qualified: bool) -> Condition
    where
        E: EnableableEntity,
    {
        let mut cond = Condition::all();
        if self.default_applied() {
            cond = cond.add(enabled_expr::<E>(qualified).eq(true));
        }
        for stage in &self.stages {
            if let FilterStage::Require(value) = stage {
                cond = cond.add(enabled_expr::<E>(qualified).eq(*value));
            }
        }
        cond
    }
}

/// Column expression for the enabled flag of `E`.
#[must_use]
pub fn enabled_expr<E>(qualified: bool) -> Expr
where
    E: EnableableEntity,
{
    if qualified {
        Expr::col((E::default(), E::enabled_col()))
    } else {
        Expr::col(E::enabled_col())
    }
}

/// Named visibility modes, one per query extension.
///
/// Parsed from strings so callers can pick a mode from request parameters or
/// configuration. Both `snake_case` and `camelCase` spellings are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisabledMode {
    /// Enabled rows only (`without_disabled`).
    #[default]
    #[serde(rename = "without_disabled", alias = "withoutDisabled")]
    Without,
    /// Every row (`with_disabled`).
    #[serde(rename = "with_disabled", alias = "withDisabled")]
    With,
    /// Disabled (`false`) rows only (`only_disabled`).
    #[serde(rename = "only_disabled", alias = "onlyDisabled")]
    Only,
}

impl DisabledMode {
    /// The `snake_case` extension name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Without => "without_disabled",
            Self::With => "with_disabled",
            Self::Only => "only_disabled",
        }
    }
}

impl fmt::Display for DisabledMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisabledMode {
    type Err = EnableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "without_disabled" | "withoutDisabled" => Ok(Self::Without),
            "with_disabled" | "withDisabled" => Ok(Self::With),
            "only_disabled" | "onlyDisabled" => Ok(Self::Only),
            other => Err(EnableError::InvalidCall(other.to_owned())),
        }
    }
}

/// When to prefix the enabled column with its table name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnQualification {
    /// Qualify only once the query joins other tables.
    #[default]
    Auto,
    /// Always qualify.
    Always,
}

impl ColumnQualification {
    /// Whether to render the qualified column for a query that is `joined` or not.
    #[must_use]
    pub fn qualify(self, joined: bool) -> bool {
        match self {
            Self::Auto => joined,
            Self::Always => true,
        }
    }
}
