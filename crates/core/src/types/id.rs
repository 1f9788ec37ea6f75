//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` (the upstream store assigns integer
/// IDs) with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use marque_core::define_id;
/// define_id!(TagId);
/// define_id!(AttributeId);
///
/// let tag_id = TagId::new(1);
/// let attribute_id = AttributeId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: TagId = attribute_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(CategoryId);
define_id!(ProductId);
define_id!(ImageId);

impl CategoryId {
    /// Parent value the upstream store uses for top-level categories.
    pub const ROOT: Self = Self(0);

    /// Whether this is the "no parent" sentinel.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_transparently() {
        let id = CategoryId::new(42);
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("42"));
        let back: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(back.as_i64(), 7);
    }

    #[test]
    fn test_root_sentinel() {
        assert!(CategoryId::ROOT.is_root());
        assert!(CategoryId::default().is_root());
        assert!(!CategoryId::new(3).is_root());
    }
}
