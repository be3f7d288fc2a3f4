//! Parameter spaces and the parameter sets sampled from them

use crate::io::error::{ImgprocError, Result, WithPath, invalid_parameter};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Named parameters with their candidate values
///
/// Arrays are sampled uniformly; any other JSON value is used as is.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpace {
    domains: BTreeMap<String, Value>,
}

impl ParamSpace {
    /// Build a parameter space from a JSON object
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object or a parameter lists no candidates
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ImgprocError::InvalidSourceData {
                reason: "parameter space must be a JSON object".to_string(),
            });
        };
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self> {
        if let Some((name, _)) = map
            .iter()
            .find(|(_, v)| v.as_array().is_some_and(Vec::is_empty))
        {
            return Err(ImgprocError::InvalidSourceData {
                reason: format!("parameter '{name}' lists no candidate values"),
            });
        }
        Ok(Self {
            domains: map.into_iter().collect(),
        })
    }

    /// Parse a parameter space from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid parameter space
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Load a parameter space from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid parameter space
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).with_path(path)?;
        Self::from_json_str(&json).with_path(path)
    }

    /// Parameter names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    /// Draw one value for every parameter
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParamSet {
        let values = self
            .domains
            .iter()
            .map(|(name, domain)| {
                let value = match domain {
                    Value::Array(candidates) => {
                        candidates.choose(rng).cloned().unwrap_or(Value::Null)
                    }
                    fixed => fixed.clone(),
                };
                (name.clone(), value)
            })
            .collect();
        ParamSet { values }
    }
}

/// Concrete parameter values for one render
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamSet {
    values: BTreeMap<String, Value>,
}

impl ParamSet {
    /// Set a parameter value
    pub fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Raw value of a parameter
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Iterate over `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, name: &'static str) -> Result<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| invalid_parameter(name, &"<missing>", &"parameter not set"))
    }

    /// Numeric parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or not a number
    pub fn f64(&self, name: &'static str) -> Result<f64> {
        let value = self.require(name)?;
        value
            .as_f64()
            .ok_or_else(|| invalid_parameter(name, value, &"expected a number"))
    }

    /// Non-negative integer parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or not a non-negative integer
    pub fn u64(&self, name: &'static str) -> Result<u64> {
        let value = self.require(name)?;
        value
            .as_u64()
            .ok_or_else(|| invalid_parameter(name, value, &"expected a non-negative integer"))
    }

    /// String parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or not a string
    pub fn str(&self, name: &'static str) -> Result<&str> {
        let value = self.require(name)?;
        value
            .as_str()
            .ok_or_else(|| invalid_parameter(name, value, &"expected a string"))
    }
}

impl fmt::Display for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.values {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Random lower-case hexadecimal string of `len` characters
pub fn random_hex<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| char::from_digit(rng.random_range(0..16), 16).unwrap_or('0'))
        .collect()
}
