// Copyright 2025 the Charta Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::ScaleError;

/// An arbitrary mapping from keys to output values, such as series colours or
/// legend symbols.
///
/// Keys take range values in order, cycling when there are more keys than
/// values. Keys outside the domain map to the optional `unknown` value.
#[derive(Clone, Debug)]
pub struct ScaleOrdinal<T> {
    keys: Vec<String>,
    index: HashMap<String, usize>,
    range: Vec<T>,
    unknown: Option<T>,
}

impl<T: Clone> ScaleOrdinal<T> {
    /// Creates an ordinal scale.
    ///
    /// Fails with [`ScaleError::EmptyDomain`] when `range` is empty. Duplicate
    /// keys are dropped.
    pub fn new<I, K>(keys: I, range: Vec<T>) -> Result<Self, ScaleError>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        if range.is_empty() {
            return Err(ScaleError::EmptyDomain);
        }
        let mut unique = Vec::new();
        let mut index = HashMap::new();
        for key in keys {
            let key = key.into();
            if !index.contains_key(&key) {
                index.insert(key.clone(), unique.len());
                unique.push(key);
            }
        }
        Ok(Self {
            keys: unique,
            index,
            range,
            unknown: None,
        })
    }

    /// Sets the value returned for keys outside the domain.
    #[must_use]
    pub fn with_unknown(mut self, unknown: T) -> Self {
        self.unknown = Some(unknown);
        self
    }

    /// The value for `key`, or the `unknown` value.
    pub fn get(&self, key: &str) -> Option<T> {
        match self.index.get(key) {
            Some(&i) => Some(self.range[i % self.range.len()].clone()),
            None => self.unknown.clone(),
        }
    }

    /// The value for `key`; unknown keys without a fallback are an error.
    pub fn apply(&self, key: &str) -> Result<T, ScaleError> {
        self.get(key).ok_or_else(|| ScaleError::UnknownCategory { key: key.into() })
    }

    /// The keys, in order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The range values.
    pub fn range(&self) -> &[T] {
        &self.range
    }

    /// `(key, value)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), &self.range[i % self.range.len()]))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn values_cycle_in_key_order() {
        let s = ScaleOrdinal::new(["a", "b", "c"], vec![1, 2]).unwrap();
        assert_eq!(s.get("a"), Some(1));
        assert_eq!(s.get("b"), Some(2));
        assert_eq!(s.get("c"), Some(1));
        let pairs: Vec<_> = s.entries().collect();
        assert_eq!(pairs, [("a", &1), ("b", &2), ("c", &1)]);
    }

    #[test]
    fn unknown_keys() {
        let s = ScaleOrdinal::new(["a"], vec!["red"]).unwrap();
        assert_eq!(
            s.apply("z"),
            Err(ScaleError::UnknownCategory { key: "z".into() })
        );
        let s = s.with_unknown("grey");
        assert_eq!(s.apply("z"), Ok("grey"));
    }

    #[test]
    fn empty_range_is_rejected() {
        assert_eq!(
            ScaleOrdinal::<u8>::new(["a"], Vec::new()).err(),
            Some(ScaleError::EmptyDomain)
        );
    }
}
