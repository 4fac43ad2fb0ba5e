//! Type-safe ID wrappers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create a new ID.
            pub const fn new(id: u64) -> Self {
                $name(id)
            }

            /// Get the raw numeric value.
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Check if this ID is zero, which the forum uses for "none".
            pub const fn is_zero(self) -> bool {
                self.0 == 0
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                $name(n)
            }
        }

        impl From<u32> for $name {
            fn from(n: u32) -> Self {
                $name(u64::from(n))
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(AlertId, "An alert identifier.");
define_id!(AttachmentId, "An attachment identifier.");
define_id!(ConversationId, "A conversation identifier.");
define_id!(ConversationMessageId, "A conversation message identifier.");
define_id!(NodeId, "A node (category, forum, page, ...) identifier.");
define_id!(PostId, "A post identifier.");
define_id!(ProfilePostId, "A profile post identifier.");
define_id!(ProfilePostCommentId, "A profile post comment identifier.");
define_id!(ThreadId, "A thread identifier.");
define_id!(UserGroupId, "A user group identifier.");
define_id!(UserId, "A user identifier.");
