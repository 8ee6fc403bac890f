//! # Event payloads.
//!
//! [`Payload`] is the variant value carried by every [`Event`](crate::Event).
//! The bus never inspects it; handlers decide which shape they expect and use
//! the accessors (`as_str`, `as_int`, `downcast_ref`, ...) to validate it.
//!
//! ## Example
//! ```rust
//! use globalbus::Payload;
//!
//! let p = Payload::from("hi");
//! assert_eq!(p.as_str(), Some("hi"));
//! assert_eq!(p.as_int(), None);
//!
//! #[derive(Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let p = Payload::opaque(Point { x: 1, y: 2 });
//! assert_eq!(p.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Variant payload value.
///
/// Cloning is cheap for `Text`, `Bytes` and `Opaque` (reference counted).
#[derive(Clone, Default)]
pub enum Payload {
    /// No data.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 text.
    Text(Arc<str>),
    /// Raw bytes.
    Bytes(Arc<[u8]>),
    /// Ordered sequence of payloads.
    List(Vec<Payload>),
    /// Any shared value; read back with [`Payload::downcast_ref`].
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Payload {
    /// Wraps an arbitrary value.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Payload::Opaque(Arc::new(value))
    }

    /// Short name of the variant (for validation messages).
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Null => "null",
            Payload::Bool(_) => "bool",
            Payload::Int(_) => "int",
            Payload::Float(_) => "float",
            Payload::Text(_) => "text",
            Payload::Bytes(_) => "bytes",
            Payload::List(_) => "list",
            Payload::Opaque(_) => "opaque",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Null)
    }

    /// Returns the value of a `Bool` payload.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Payload::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value of an `Int` payload.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Payload::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as `f64`; integers are widened.
    ///
    /// Integers with magnitude above 2^53 are rounded to the nearest
    /// representable `f64`; use [`Payload::as_int`] when exactness matters.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Payload::Float(f) => Some(*f),
            Payload::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Borrows the text of a `Text` payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows the bytes of a `Bytes` payload, or the UTF-8 bytes of `Text`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(b) => Some(b),
            Payload::Text(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Borrows the items of a `List` payload.
    pub fn as_list(&self) -> Option<&[Payload]> {
        match self {
            Payload::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrows the wrapped value of an `Opaque` payload as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Payload::Opaque(v) => v.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Returns the shared `Opaque` value as `Arc<T>`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Payload::Opaque(v) => Arc::clone(v).downcast::<T>().ok(),
            _ => None,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Null => f.write_str("Null"),
            Payload::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Payload::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Payload::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Payload::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Payload::Bytes(b) => write!(f, "Bytes(len={})", b.len()),
            Payload::List(items) => f.debug_tuple("List").field(items).finish(),
            Payload::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

/// Renders scalar values plainly; `Bytes` and `Opaque` render as placeholders.
impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Null => f.write_str("null"),
            Payload::Bool(b) => write!(f, "{b}"),
            Payload::Int(n) => write!(f, "{n}"),
            Payload::Float(x) => write!(f, "{x}"),
            Payload::Text(s) => f.write_str(s),
            Payload::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Payload::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Payload::Opaque(_) => f.write_str("<opaque>"),
        }
    }
}

/// Structural equality; two `Opaque` payloads are equal only if they share
/// the same allocation.
impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Null, Payload::Null) => true,
            (Payload::Bool(a), Payload::Bool(b)) => a == b,
            (Payload::Int(a), Payload::Int(b)) => a == b,
            (Payload::Float(a), Payload::Float(b)) => a == b,
            (Payload::Text(a), Payload::Text(b)) => a == b,
            (Payload::Bytes(a), Payload::Bytes(b)) => a == b,
            (Payload::List(a), Payload::List(b)) => a == b,
            (Payload::Opaque(a), Payload::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::Null
    }
}

impl From<bool> for Payload {
    fn from(v: bool) -> Self {
        Payload::Bool(v)
    }
}

impl From<i32> for Payload {
    fn from(v: i32) -> Self {
        Payload::Int(i64::from(v))
    }
}

impl From<i64> for Payload {
    fn from(v: i64) -> Self {
        Payload::Int(v)
    }
}

impl From<u32> for Payload {
    fn from(v: u32) -> Self {
        Payload::Int(i64::from(v))
    }
}

impl From<u64> for Payload {
    /// Values above `i64::MAX` are kept exact as `Opaque(u64)`.
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or_else(|_| Payload::opaque(v), Payload::Int)
    }
}

impl From<usize> for Payload {
    /// Values above `i64::MAX` are kept exact as `Opaque(usize)`.
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or_else(|_| Payload::opaque(v), Payload::Int)
    }
}

impl From<f32> for Payload {
    fn from(v: f32) -> Self {
        Payload::Float(f64::from(v))
    }
}

impl From<f64> for Payload {
    fn from(v: f64) -> Self {
        Payload::Float(v)
    }
}

impl From<&str> for Payload {
    fn from(v: &str) -> Self {
        Payload::Text(Arc::from(v))
    }
}

impl From<String> for Payload {
    fn from(v: String) -> Self {
        Payload::Text(Arc::from(v))
    }
}

impl From<Arc<str>> for Payload {
    fn from(v: Arc<str>) -> Self {
        Payload::Text(v)
    }
}

impl From<&[u8]> for Payload {
    fn from(v: &[u8]) -> Self {
        Payload::Bytes(Arc::from(v))
    }
}

impl From<Vec<u8>> for Payload {
    fn from(v: Vec<u8>) -> Self {
        Payload::Bytes(Arc::from(v))
    }
}

impl From<Vec<Payload>> for Payload {
    fn from(v: Vec<Payload>) -> Self {
        Payload::List(v)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(v: Option<T>) -> Self {
        v.map_or(Payload::Null, Into::into)
    }
}
