//! Structured fields that PayPlug sends as either an object or `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A nested object that is either present or explicitly `null`.
///
/// Unlike an omitted `Option`, an absent value is always written out as JSON
/// `null`, matching what the API sends for e.g. `authorization` or `failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    Absent,
    Present(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Absent
    }
}

impl<T> Nullable<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Nullable::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Nullable::Absent)
    }

    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Nullable::Absent => Nullable::Absent,
            Nullable::Present(value) => Nullable::Present(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Nullable::Absent => None,
            Nullable::Present(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Nullable::Present(value),
            None => Nullable::Absent,
        }
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.into_option()
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Absent => serializer.serialize_none(),
            Nullable::Present(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Nullable::from)
    }
}
