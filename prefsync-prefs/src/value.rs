//! Declared value types for preference keys.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The declared type of a preference value.
///
/// Listeners compare against this descriptor instead of inspecting the
/// runtime value, so a key's type is known even when no value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Bool,
    Integer,
    Float,
    Text,
    Sequence,
    /// Any structured value (maps, user-defined structs).
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Sequence => "sequence",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// A type that can be stored as a preference value.
///
/// User-defined structs opt in with an empty impl and are described as
/// [`ValueType::Object`]:
///
/// ```
/// use prefsync_prefs::{PrefValue, ValueType};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Basket {
///     apples: u32,
/// }
///
/// impl PrefValue for Basket {}
///
/// assert_eq!(Basket::VALUE_TYPE, ValueType::Object);
/// ```
pub trait PrefValue: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The descriptor recorded on keys of this type.
    const VALUE_TYPE: ValueType = ValueType::Object;
}

macro_rules! impl_pref_value {
    ($value_type:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl PrefValue for $ty {
                const VALUE_TYPE: ValueType = $value_type;
            }
        )+
    };
}

impl_pref_value!(ValueType::Bool => bool);
impl_pref_value!(ValueType::Integer => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_pref_value!(ValueType::Float => f32, f64);
impl_pref_value!(ValueType::Text => String);

impl<T: PrefValue> PrefValue for Vec<T> {
    const VALUE_TYPE: ValueType = ValueType::Sequence;
}

impl<V: PrefValue> PrefValue for HashMap<String, V> {}

impl<V: PrefValue> PrefValue for BTreeMap<String, V> {}

impl<T: PrefValue> PrefValue for Option<T> {
    const VALUE_TYPE: ValueType = T::VALUE_TYPE;
}

impl PrefValue for serde_json::Value {}
