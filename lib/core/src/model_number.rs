//! Product codes and their natural-order sort keys
//!
//! A code such as `BR-10` is split into a text prefix (`BR-`) and a numeric
//! part (`10`) so that `BR-9` orders before `BR-10`.

use crate::{Error, Result};
use std::fmt;
use std::hash::{Hash, Hasher};

pub const MAX_MODEL_NUMBER_LEN: usize = 50;

/// A manufacturer's product code with its precomputed sort key.
///
/// Identity is the code itself; the sort key only drives ordering.
#[derive(Debug, Clone)]
pub struct ModelNumber {
    value: String,
    sort_prefix: Option<String>,
    sort_number: Option<i32>,
}

impl ModelNumber {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::format("modelNumber", "cannot be empty"));
        }
        if value.chars().count() > MAX_MODEL_NUMBER_LEN {
            return Err(Error::format(
                "modelNumber",
                format!("must be {MAX_MODEL_NUMBER_LEN} characters or fewer"),
            ));
        }

        let (sort_prefix, sort_number) = parse_sort_key(&value);
        Ok(Self {
            value,
            sort_prefix,
            sort_number,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn sort_prefix(&self) -> Option<&str> {
        self.sort_prefix.as_deref()
    }

    pub fn sort_number(&self) -> Option<i32> {
        self.sort_number
    }
}

impl PartialEq for ModelNumber {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ModelNumber {}

impl Hash for ModelNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for ModelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Split a code into its leading non-digit prefix and the digit run after it.
///
/// The prefix is `None` when the code starts with a digit. The number is
/// `None` when there is no digit run or it does not fit in an `i32`; the
/// prefix is kept either way.
pub fn parse_sort_key(input: &str) -> (Option<String>, Option<i32>) {
    let digits_start = input
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(input.len());
    let prefix = (digits_start > 0).then(|| input[..digits_start].to_string());

    let rest = &input[digits_start..];
    let digits_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let number = if digits_len > 0 {
        rest[..digits_len].parse::<i32>().ok()
    } else {
        None
    };

    (prefix, number)
}
