use std::collections::HashMap;

use log::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    production::{Continuation, Production, RuleBuilder},
    rules::RuleKind,
};

/// Rule registry
///
/// Owns every production of a grammar, grouped by tag in registration order.
/// Built once, then only read: evaluation keeps its cursor and tree in its own
/// context, so one registry can drive any number of parses.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<RuleKind, Vec<Production>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        RuleRegistry {
            rules: HashMap::new(),
        }
    }

    /// Registers `production` as the next alternative of its tag.
    pub fn add(&mut self, production: Production) {
        self.rules
            .entry(production.tag())
            .or_default()
            .push(production);
    }

    /// Declares and registers one alternative of `tag`.
    ///
    /// ```ignore
    /// registry.add_rule(RuleKind::Expression, |rule| rule
    ///     .with_rule([RuleKind::LogicalOr]).once());
    /// ```
    pub fn add_rule(&mut self, tag: RuleKind, definition: impl FnOnce(RuleBuilder) -> Continuation) {
        self.add(definition(Production::define(tag)).build());
    }

    /// The alternatives registered for `tag`, empty when there are none.
    pub fn lookup(&self, tag: RuleKind) -> &[Production] {
        self.rules.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, tag: RuleKind) -> bool {
        self.rules.contains_key(&tag)
    }

    /// The ordered candidate list for a rule element: every alternative of every
    /// tag, tags in the given order.
    pub fn alternatives_of(&self, tags: &[RuleKind]) -> Result<Vec<&Production>, Error> {
        let mut candidates = vec![];

        for tag in tags {
            match self.rules.get(tag) {
                Some(productions) => candidates.extend(productions.iter()),
                None => {
                    return Err(Error::new(
                        ErrorImpl::UnknownRule { rule: *tag },
                        Position::null(),
                    ))
                }
            }
        }

        Ok(candidates)
    }

    /// Checks that every rule referenced by a production is registered.
    pub fn validate(&self) -> Result<(), Error> {
        let mut tags: Vec<&RuleKind> = self.rules.keys().collect();
        tags.sort();

        for tag in tags {
            for production in &self.rules[tag] {
                if let Some(missing) = production.referenced_rules().find(|rule| !self.contains(*rule)) {
                    return Err(Error::new(
                        ErrorImpl::UnknownRule { rule: missing },
                        Position::null(),
                    ));
                }
            }
        }

        debug!("validated {} rules", self.rules.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
