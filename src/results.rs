//! Values paired with the non-fatal warnings collected while producing them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal diagnostic, such as an element that was recognised but ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A successfully read value plus the warnings raised while reading it,
/// in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadResult<T> {
    pub value: T,
    pub messages: Vec<Warning>,
}

impl<T> ReadResult<T> {
    pub fn new(value: T, messages: Vec<Warning>) -> Self {
        Self { value, messages }
    }

    /// A result with no warnings.
    pub fn success(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ReadResult<U> {
        ReadResult::new(f(self.value), self.messages)
    }

    /// Chain another read, keeping this result's warnings first.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> ReadResult<U>) -> ReadResult<U> {
        let mut next = f(self.value);
        let mut messages = self.messages;
        messages.append(&mut next.messages);
        ReadResult::new(next.value, messages)
    }
}

impl<T> ReadResult<Vec<T>> {
    pub fn empty() -> Self {
        Self::success(Vec::new())
    }

    /// A result carrying no value and a single warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Vec::new(), vec![Warning::new(message)])
    }

    /// Append another result's values and warnings to this one.
    pub fn extend(&mut self, other: ReadResult<Vec<T>>) {
        self.value.extend(other.value);
        self.messages.extend(other.messages);
    }
}

impl<T> FromIterator<ReadResult<Vec<T>>> for ReadResult<Vec<T>> {
    fn from_iter<I: IntoIterator<Item = ReadResult<Vec<T>>>>(iter: I) -> Self {
        let mut combined = ReadResult::empty();
        for result in iter {
            combined.extend(result);
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_keeps_warning_order() {
        let combined: ReadResult<Vec<u32>> = vec![
            ReadResult::new(vec![1], vec![Warning::new("first")]),
            ReadResult::warning("second"),
            ReadResult::new(vec![2, 3], vec![Warning::new("first")]),
        ]
        .into_iter()
        .collect();

        assert_eq!(combined.value, vec![1, 2, 3]);
        let messages: Vec<_> = combined.messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "first"]);
    }

    #[test]
    fn test_and_then_appends_messages() {
        let result = ReadResult::new(1, vec![Warning::new("a")])
            .and_then(|n| ReadResult::new(n + 1, vec![Warning::new("b")]));
        assert_eq!(result.value, 2);
        assert_eq!(result.messages, vec![Warning::new("a"), Warning::new("b")]);
    }
}
