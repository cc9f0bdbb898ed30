//! Dynamic input values
//!
//! Schemas accept untyped input as a [`Value`] and hand back typed output.
//! [`Value::Ptr`] carries a shared reference so that pointer-constraint
//! schemas can return the caller's allocation unchanged.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use num_complex::{Complex32, Complex64};

use crate::foundation::TypeCode;

// ============================================================================
// VALUE
// ============================================================================

/// An untyped input or output value.
///
/// Equality is structural and looks through [`Value::Ptr`], so a pointer
/// compares equal to the value it points at.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent / nil.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    BigInt(BigInt),
    Complex(Complex64),
    String(String),
    Time(DateTime<Utc>),
    Array(Vec<Value>),
    /// Insertion-ordered mapping with string keys.
    Object(IndexMap<String, Value>),
    /// Mapping with arbitrary keys, in insertion order.
    Map(Vec<(Value, Value)>),
    /// Shared reference to a value.
    Ptr(Pointer),
}

static NIL: Value = Value::Null;

impl Value {
    /// A `'static` nil, used for absent object keys.
    pub(crate) fn nil() -> &'static Value {
        &NIL
    }

    /// Wraps `value` in a fresh shared pointer.
    pub fn ptr<T>(value: T) -> Self
    where
        T: IntoValue + Clone + Send + Sync + 'static,
    {
        Value::Ptr(Pointer::new(value))
    }

    /// Wraps an existing allocation; parsing can hand this exact `Arc` back.
    pub fn from_arc<T>(value: Arc<T>) -> Self
    where
        T: IntoValue + Clone + Send + Sync + 'static,
    {
        Value::Ptr(Pointer::from_arc(value))
    }

    /// Builds an object from key/value pairs.
    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds an array.
    pub fn array<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The type code reported as `received` in invalid-type issues.
    pub fn type_code(&self) -> TypeCode {
        match self {
            Value::Null => TypeCode::Nil,
            Value::Bool(_) => TypeCode::Bool,
            Value::Int(_) => TypeCode::Int,
            Value::Uint(_) => TypeCode::Uint,
            Value::Float(_) => TypeCode::Float64,
            Value::BigInt(_) => TypeCode::BigInt,
            Value::Complex(_) => TypeCode::Complex128,
            Value::String(_) => TypeCode::String,
            Value::Time(_) => TypeCode::Time,
            Value::Array(_) => TypeCode::Array,
            Value::Object(_) => TypeCode::Object,
            Value::Map(_) => TypeCode::Map,
            Value::Ptr(p) => p.load().type_code(),
        }
    }

    /// Dereferences pointers, borrowing when there is nothing to load.
    pub fn load(&self) -> Cow<'_, Value> {
        match self {
            Value::Ptr(p) => match p.load() {
                Value::Ptr(inner) => Cow::Owned(Value::Ptr(inner).load().into_owned()),
                other => Cow::Owned(other),
            },
            other => Cow::Borrowed(other),
        }
    }

    /// Returns the pointer if this value is one.
    pub fn pointer(&self) -> Option<&Pointer> {
        match self {
            Value::Ptr(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Ptr(p) => p
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| p.downcast_ref::<Value>().and_then(Value::as_str)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &*self.load() {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match &*self.load() {
            Value::Int(i) => Some(*i),
            Value::Uint(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match &*self.load() {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Uint(u) => Some(*u as f64),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` in an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Renders the value as a map key: strings verbatim, everything else
    /// through `Display`.
    pub fn to_key(&self) -> String {
        match &*self.load() {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Ptr(a), Value::Ptr(b)) if a.ptr_eq(b) => true,
            (Value::Ptr(a), b) => a.load() == *b,
            (a, Value::Ptr(b)) => *a == b.load(),
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Int(a), Value::Uint(b)) | (Value::Uint(b), Value::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Complex(a), Value::Complex(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Complex(c) => write!(f, "{c}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Map(entries) => {
                f.write_str("map[")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_str("]")
            }
            Value::Ptr(p) => write!(f, "&{}", p.load()),
        }
    }
}

// ============================================================================
// POINTER
// ============================================================================

type Loader = fn(&(dyn Any + Send + Sync)) -> Value;

fn load_as<T>(target: &(dyn Any + Send + Sync)) -> Value
where
    T: IntoValue + Clone + 'static,
{
    target
        .downcast_ref::<T>()
        .map_or(Value::Null, |v| v.clone().into_value())
}

/// A shared, type-erased reference with address identity.
#[derive(Clone)]
pub struct Pointer {
    target: Arc<dyn Any + Send + Sync>,
    load: Loader,
}

impl Pointer {
    /// Allocates `value` behind a new pointer.
    pub fn new<T>(value: T) -> Self
    where
        T: IntoValue + Clone + Send + Sync + 'static,
    {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an existing allocation without copying it.
    pub fn from_arc<T>(target: Arc<T>) -> Self
    where
        T: IntoValue + Clone + Send + Sync + 'static,
    {
        Self {
            target,
            load: load_as::<T>,
        }
    }

    /// Recovers the typed `Arc` when the pointee is a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.target).downcast::<T>().ok()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.target.downcast_ref::<T>()
    }

    /// Copies the pointee out as a [`Value`].
    pub fn load(&self) -> Value {
        (self.load)(&*self.target)
    }

    /// Address identity.
    pub fn ptr_eq(&self, other: &Pointer) -> bool {
        Arc::ptr_eq(&self.target, &other.target)
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pointer").field(&self.load()).finish()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Conversion of parse output back into a [`Value`].
///
/// Container schemas rebuild their value from child outputs through this
/// trait. Shared pointers convert to [`Value::Ptr`] so identity survives.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

macro_rules! into_value {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl IntoValue for $ty {
                #[inline]
                fn into_value(self) -> Value {
                    let $v = self;
                    $body
                }
            }

            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    value.into_value()
                }
            }
        )*
    };
}

into_value! {
    () => |_v| Value::Null,
    bool => |v| Value::Bool(v),
    i8 => |v| Value::Int(i64::from(v)),
    i16 => |v| Value::Int(i64::from(v)),
    i32 => |v| Value::Int(i64::from(v)),
    i64 => |v| Value::Int(v),
    u8 => |v| Value::Uint(u64::from(v)),
    u16 => |v| Value::Uint(u64::from(v)),
    u32 => |v| Value::Uint(u64::from(v)),
    u64 => |v| Value::Uint(v),
    usize => |v| Value::Uint(v as u64),
    f32 => |v| Value::Float(f64::from(v)),
    f64 => |v| Value::Float(v),
    BigInt => |v| Value::BigInt(v),
    Complex32 => |v| Value::Complex(Complex64::new(f64::from(v.re), f64::from(v.im))),
    Complex64 => |v| Value::Complex(v),
    String => |v| Value::String(v),
    &str => |v| Value::String(v.to_owned()),
    DateTime<Utc> => |v| Value::Time(v),
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: IntoValue> IntoValue for IndexMap<String, T> {
    fn into_value(self) -> Value {
        Value::Object(
            self.into_iter()
                .map(|(k, v)| (k, v.into_value()))
                .collect(),
        )
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T> IntoValue for Arc<T>
where
    T: IntoValue + Clone + Send + Sync + 'static,
{
    fn into_value(self) -> Value {
        Value::Ptr(Pointer::from_arc(self))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
