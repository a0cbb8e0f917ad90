//! Sources of raw action inputs.

use std::collections::HashMap;

/// Supplies raw string inputs by name.
///
/// An input that is absent or empty reads as `None`.
pub trait InputSource {
    fn input(&self, name: &str) -> Option<String>;
}

/// Reads inputs the way the Actions runner exposes them: input `name` lives in
/// `INPUT_<NAME>`, upper-cased with spaces replaced by underscores. Values are
/// trimmed and a blank value reads as absent.
///
/// [`EnvInputs::from_env`] reads the process environment;
/// [`EnvInputs::from_vars`] takes a lookup closure instead.
#[derive(Debug, Clone, Copy)]
pub struct EnvInputs<F = fn(&str) -> Option<String>> {
    var: F,
}

impl EnvInputs {
    pub fn from_env() -> Self {
        EnvInputs { var: read_env_var }
    }
}

impl<F: Fn(&str) -> Option<String>> EnvInputs<F> {
    /// Reads inputs through `var`, which maps a variable name to its value.
    pub fn from_vars(var: F) -> Self {
        EnvInputs { var }
    }
}

fn read_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// The environment variable that carries input `name`.
pub fn input_var_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

impl<F: Fn(&str) -> Option<String>> InputSource for EnvInputs<F> {
    fn input(&self, name: &str) -> Option<String> {
        let value = (self.var)(&input_var_name(name))?;
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl InputSource for HashMap<String, String> {
    fn input(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn input(&self, name: &str) -> Option<String> {
        (**self).input(name)
    }
}
