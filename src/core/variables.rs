//! Identifier → value environment shared by the shell and the core.

use std::collections::{BTreeMap, HashMap};

use crate::core::chars::is_identifier_char;

pub const COMMANDS: [&str; 6] = ["set", "reset", "save", "load", "list", "savelist"];

pub const CONSTANTS: [(&str, f64); 2] = [("e", std::f64::consts::E), ("pi", std::f64::consts::PI)];

/// Read-only view the core evaluates against.
pub trait Bindings {
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl Bindings for HashMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl Bindings for BTreeMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

pub fn is_reserved_identifier(name: &str) -> bool {
    COMMANDS.contains(&name) || CONSTANTS.iter().any(|(constant, _)| *constant == name)
}

pub fn is_valid_variable_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_identifier_char) && !is_reserved_identifier(name)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variables {
    values: BTreeMap<String, f64>,
}

impl Default for Variables {
    fn default() -> Self {
        Self::new()
    }
}

impl Variables {
    /// Environment holding only the constants.
    pub fn new() -> Self {
        let values = CONSTANTS
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Constants cannot be removed.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        if is_reserved_identifier(name) {
            return None;
        }
        self.values.remove(name)
    }

    /// Drops every user variable.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn user_variables(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iter().filter(|(name, _)| !is_reserved_identifier(name))
    }
}

impl Bindings for Variables {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}
