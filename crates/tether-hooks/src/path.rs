use std::fmt;
use std::num::TryFromIntError;
use std::rc::Rc;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("property path is empty")]
    Empty,
    #[error("property path `{path}` has an empty segment at position {index}")]
    EmptySegment { path: String, index: usize },
}

/// A dotted address of one field in a store, e.g. `cart` or `product.sku-1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyPath(Rc<str>);

impl PropertyPath {
    pub fn new(path: impl AsRef<str>) -> Result<Self, PathError> {
        let path = path.as_ref();
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(index) = path.split('.').position(str::is_empty) {
            return Err(PathError::EmptySegment {
                path: path.to_string(),
                index,
            });
        }
        Ok(Self(Rc::from(path)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// `self + "." + key`. The key is appended verbatim.
    pub fn keyed(&self, key: &Key) -> PropertyPath {
        PropertyPath(Rc::from(format!("{}.{}", self.0, key)))
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PropertyPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PropertyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for PropertyPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = PathError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

/// Dynamic key appended to a keyed hook's base path.
///
/// Numeric keys are integers only. A fractional key has to be passed as
/// `Text` in whatever form the store expects. `u64` and `usize` convert
/// through `TryFrom` because values above `i64::MAX` do not fit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Text(String),
    Number(i64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Text(s) => f.write_str(s),
            Key::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Number(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Number(n.into())
    }
}

impl From<u32> for Key {
    fn from(n: u32) -> Self {
        Key::Number(n.into())
    }
}

impl TryFrom<u64> for Key {
    type Error = TryFromIntError;

    fn try_from(n: u64) -> Result<Self, Self::Error> {
        i64::try_from(n).map(Key::Number)
    }
}

impl TryFrom<usize> for Key {
    type Error = TryFromIntError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        i64::try_from(n).map(Key::Number)
    }
}
