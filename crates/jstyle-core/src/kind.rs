//! Shared node-kind plumbing for the Java and doc-comment trees.

use std::fmt::Debug;
use std::hash::Hash;

/// A closed taxonomy of node kinds that can label a [`Tree`](crate::tree::Tree).
pub trait NodeKind: Copy + Eq + Hash + Debug + 'static {
    /// Canonical SCREAMING_SNAKE name of the kind.
    fn name(self) -> &'static str;

    /// Dense index of the kind, usable as a table offset.
    fn index(self) -> usize;

    /// Whether nodes of this kind are comments rather than code.
    fn is_comment(self) -> bool {
        false
    }
}

/// Declares a node-kind enum together with its name table.
macro_rules! node_kinds {
    (
        $(#[$meta:meta])*
        pub enum $enum:ident {
            $( $variant:ident => $name:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $enum {
            $( $variant, )*
        }

        impl $enum {
            /// Every kind, in declaration order.
            pub const ALL: &'static [$enum] = &[ $( $enum::$variant, )* ];

            /// Number of kinds.
            pub const COUNT: usize = Self::ALL.len();

            /// Canonical SCREAMING_SNAKE name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( $enum::$variant => $name, )*
                }
            }

            /// Resolves a canonical name back to its kind.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some($enum::$variant), )*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use node_kinds;
