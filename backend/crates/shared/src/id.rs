//! Common ID Types
//!
//! Type-safe wrappers around the integer primary keys used by the user,
//! role and menu tables.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::Id;
/// struct Role;
/// type RoleId = Id<Role>;
/// let id = RoleId::new(7);
/// assert_eq!(id.value(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Create from a raw key
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the raw key
    pub const fn value(&self) -> i64 {
        self.value
    }

    /// Zero is never issued as a key; hierarchies use it as "no parent"
    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }
}

// Manual impls so that marker types need no derives of their own.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self::new)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;
    struct Gadget;

    type WidgetId = Id<Widget>;
    type GadgetId = Id<Gadget>;

    #[test]
    fn test_id_type_safety() {
        let widget: WidgetId = Id::new(1);
        let gadget: GadgetId = Id::new(1);

        // Same raw key, different types
        assert_eq!(i64::from(widget), i64::from(gadget));
    }

    #[test]
    fn test_id_parse() {
        let id: WidgetId = " 42 ".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert!("abc".parse::<WidgetId>().is_err());
    }

    #[test]
    fn test_id_ordering_and_zero() {
        let mut ids = vec![WidgetId::new(3), WidgetId::new(0), WidgetId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![WidgetId::new(0), WidgetId::new(2), WidgetId::new(3)]);
        assert!(ids[0].is_zero());
    }

    #[test]
    fn test_id_serde_is_plain_integer() {
        let json = serde_json::to_string(&WidgetId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: WidgetId = serde_json::from_str("9").unwrap();
        assert_eq!(back, WidgetId::new(9));
    }
}
