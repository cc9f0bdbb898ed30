//! Type codes
//!
//! Every schema carries a [`TypeCode`]; it is also what invalid-type issues
//! report as `expected` and `received`.

use std::fmt;

use serde::Serialize;

/// Identifies a schema family, or the runtime type of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TypeCode {
    String,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    BigInt,
    Complex64,
    Complex128,
    Time,
    Nil,
    Any,
    Unknown,
    Enum,
    Literal,
    Array,
    Tuple,
    Object,
    Record,
    Map,
    Union,
    DiscriminatedUnion,
    Intersection,
    Pipe,
    Transform,
    Lazy,
}

impl TypeCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::BigInt => "bigint",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Time => "time",
            Self::Nil => "nil",
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Enum => "enum",
            Self::Literal => "literal",
            Self::Array => "array",
            Self::Tuple => "tuple",
            Self::Object => "object",
            Self::Record => "record",
            Self::Map => "map",
            Self::Union => "union",
            Self::DiscriminatedUnion => "discriminated_union",
            Self::Intersection => "intersection",
            Self::Pipe => "pipe",
            Self::Transform => "transform",
            Self::Lazy => "lazy",
        }
    }

    /// Fixed-width and platform integers.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Integers, floats and big integers. Record keys of these types are
    /// parsed from their string form.
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || matches!(self, Self::BigInt)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
