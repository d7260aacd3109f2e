/// What a bound hook currently holds.
///
/// `NoValue` covers both "nothing delivered yet" and "the store delivered
/// undefined". A delivered null-like value (`serde_json::Value::Null`,
/// `Option::None` as a value type, ...) is a `Value` and is never confused
/// with `NoValue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Observed<T> {
    NoValue,
    Value(T),
}

impl<T> Default for Observed<T> {
    fn default() -> Self {
        Observed::NoValue
    }
}

impl<T> Observed<T> {
    pub fn is_no_value(&self) -> bool {
        matches!(self, Observed::NoValue)
    }

    pub fn is_value(&self) -> bool {
        !self.is_no_value()
    }

    pub fn as_ref(&self) -> Observed<&T> {
        match self {
            Observed::NoValue => Observed::NoValue,
            Observed::Value(v) => Observed::Value(v),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Observed::NoValue => None,
            Observed::Value(v) => Some(v),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Observed::NoValue => None,
            Observed::Value(v) => Some(v),
        }
    }

    pub fn value_or(self, default: T) -> T {
        self.into_option().unwrap_or(default)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Observed<U> {
        match self {
            Observed::NoValue => Observed::NoValue,
            Observed::Value(v) => Observed::Value(f(v)),
        }
    }

    /// `self` if it holds a value, otherwise `other`.
    pub fn or(self, other: Observed<T>) -> Observed<T> {
        match self {
            Observed::NoValue => other,
            v => v,
        }
    }
}

impl<T> From<Option<T>> for Observed<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Observed::Value(v),
            None => Observed::NoValue,
        }
    }
}
