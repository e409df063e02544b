// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Rule Macro Language
//!
//! A rule chain is a sequence of steps, each pairing a matching pattern with
//! the rest of the chain (its operand), ending in a `return`:
//!
//! ```text
//! rule_global (P1) ;; rule_global (P2) ;; rule_return (R)
//! ```
//!
//! ## Lifecycle
//!
//! An upstream parser first produces a [`RuleTemplate`] from the matching
//! pattern alone. Applying it to an operand yields an applied [`Rule`]. The
//! template is borrowed, never consumed, so one template can be applied to any
//! number of operands. Only [`Rule`] can be compiled, which makes compiling a
//! template a type error rather than a runtime check.
//!
//! ## Expansion
//!
//! [`Rule::convert_to_pattern`] converts the operand first, then looks up the
//! kind's law in [`EXPANSION_LAWS`]:
//!
//! | Kind     | Pattern                                                  |
//! |----------|----------------------------------------------------------|
//! | `Global` | `flatten(singleton(pletEnv (iterate_globally P) Q))`     |
//! | `Return` | `singleton(P)` (terminal, no operand)                    |
//!
//! `When` and `Not` are part of the rule language but have no law yet; they
//! fail with [`CampError::UnsupportedRuleKind`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{CampError, CampResult};
use crate::macros::{flatten, iterate_globally, singleton};
use crate::pattern::Pattern;

/// Rule kinds of the macro language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    When,
    Global,
    Not,
    /// Terminal element of a chain
    Return,
}

impl RuleKind {
    /// Keyword used when displaying rules
    pub fn tag(&self) -> &'static str {
        match self {
            RuleKind::When => "rule_when",
            RuleKind::Global => "rule_global",
            RuleKind::Not => "rule_not",
            RuleKind::Return => "rule_return",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::When => "When",
            RuleKind::Global => "Global",
            RuleKind::Not => "Not",
            RuleKind::Return => "Return",
        };
        f.write_str(name)
    }
}

/// Expansion law: (matching pattern, converted operand) -> pattern
pub type ExpansionLaw = fn(Pattern, Pattern) -> Pattern;

/// Kind -> expansion law for every non-terminal kind that has one
pub const EXPANSION_LAWS: &[(RuleKind, ExpansionLaw)] = &[(RuleKind::Global, global_law)];

/// Look up the expansion law for `kind`
pub fn expansion_law(kind: RuleKind) -> Option<ExpansionLaw> {
    EXPANSION_LAWS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|&(_, law)| law)
}

fn global_law(pattern: Pattern, operand: Pattern) -> Pattern {
    flatten(singleton(Pattern::let_env(iterate_globally(pattern), operand)))
}

fn return_law(pattern: Pattern) -> Pattern {
    singleton(pattern)
}

/// A rule in functional form: matching pattern set, operand not yet supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTemplate {
    kind: RuleKind,
    pattern: Arc<Pattern>,
}

impl RuleTemplate {
    fn new(kind: RuleKind, pattern: Pattern) -> Self {
        Self {
            kind,
            pattern: Arc::new(pattern),
        }
    }

    pub fn global(pattern: Pattern) -> Self {
        Self::new(RuleKind::Global, pattern)
    }

    pub fn when(pattern: Pattern) -> Self {
        Self::new(RuleKind::When, pattern)
    }

    pub fn not(pattern: Pattern) -> Self {
        Self::new(RuleKind::Not, pattern)
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Fix the operand, producing an applied rule that shares this template's pattern
    pub fn apply_to(&self, operand: Rule) -> Rule {
        trace!(kind = %self.kind, operand = %operand.kind(), "applying rule template");
        Rule::Applied(AppliedRule {
            kind: self.kind,
            pattern: Arc::clone(&self.pattern),
            operand: Box::new(operand),
        })
    }
}

/// A non-terminal rule whose operand has been fixed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRule {
    kind: RuleKind,
    pattern: Arc<Pattern>,
    operand: Box<Rule>,
}

impl AppliedRule {
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn operand(&self) -> &Rule {
        &self.operand
    }

    /// Whether this rule's pattern is the same allocation as the template's
    pub fn shares_pattern_with(&self, template: &RuleTemplate) -> bool {
        Arc::ptr_eq(&self.pattern, &template.pattern)
    }
}

/// A compilable rule: an applied step or the terminal `return`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Applied(AppliedRule),
    Return(Pattern),
}

impl Rule {
    pub fn returning(pattern: Pattern) -> Self {
        Rule::Return(pattern)
    }

    /// Build a chain by applying `templates` right-to-left onto `terminal`
    pub fn chain(templates: impl IntoIterator<Item = RuleTemplate>, terminal: Rule) -> Rule {
        let templates: Vec<RuleTemplate> = templates.into_iter().collect();
        templates
            .iter()
            .rev()
            .fold(terminal, |operand, template| template.apply_to(operand))
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Applied(rule) => rule.kind,
            Rule::Return(_) => RuleKind::Return,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        match self {
            Rule::Applied(rule) => &rule.pattern,
            Rule::Return(pattern) => pattern,
        }
    }

    pub fn operand(&self) -> Option<&Rule> {
        match self {
            Rule::Applied(rule) => Some(&rule.operand),
            Rule::Return(_) => None,
        }
    }

    /// Number of steps in the chain, terminal included
    pub fn chain_len(&self) -> usize {
        let mut len = 1;
        let mut current = self;
        while let Some(next) = current.operand() {
            len += 1;
            current = next;
        }
        len
    }

    /// Compile this rule chain into a pattern
    pub fn convert_to_pattern(&self) -> CampResult<Pattern> {
        match self {
            Rule::Return(pattern) => {
                debug!(kind = %RuleKind::Return, "expanding rule");
                Ok(return_law(pattern.clone()))
            }
            Rule::Applied(rule) => {
                let operand = rule.operand.convert_to_pattern()?;
                let law = expansion_law(rule.kind)
                    .ok_or(CampError::UnsupportedRuleKind { kind: rule.kind })?;
                debug!(kind = %rule.kind, "expanding rule");
                Ok(law(Pattern::clone(&rule.pattern), operand))
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Applied(rule) => write!(
                f,
                "{} ({}) ;; {}",
                rule.kind.tag(),
                rule.pattern,
                rule.operand
            ),
            Rule::Return(pattern) => write!(f, "{} ({})", RuleKind::Return.tag(), pattern),
        }
    }
}

impl fmt::Display for RuleTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind.tag(), self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macros::{bind, lookup};

    #[test]
    fn test_law_table_lookup() {
        assert!(expansion_law(RuleKind::Global).is_some());
        assert!(expansion_law(RuleKind::When).is_none());
        assert!(expansion_law(RuleKind::Not).is_none());
        assert!(expansion_law(RuleKind::Return).is_none());
    }

    #[test]
    fn test_return_expansion() {
        let rule = Rule::returning(lookup("x"));
        assert_eq!(rule.convert_to_pattern().unwrap(), singleton(lookup("x")));
        assert_eq!(rule.kind(), RuleKind::Return);
        assert!(rule.operand().is_none());
    }

    #[test]
    fn test_chain_len() {
        let rule = Rule::chain(
            [RuleTemplate::global(bind("a")), RuleTemplate::global(bind("b"))],
            Rule::returning(Pattern::Env),
        );
        assert_eq!(rule.chain_len(), 3);
        assert_eq!(rule.pattern(), &bind("a"));
    }

    #[test]
    fn test_display() {
        let rule = RuleTemplate::global(Pattern::It).apply_to(Rule::returning(Pattern::Env));
        assert_eq!(
            rule.to_string(),
            "rule_global ((pit )) ;; rule_return ((penv ))"
        );
        assert_eq!(RuleTemplate::not(Pattern::It).to_string(), "rule_not ((pit ))");
    }
}
