//! Identifier newtypes.
//!
//! Every id is a `u32` that doubles as an index into the `Vec` owning the
//! thing it names: devices, substrate nodes and cells are numbered densely
//! from 0, flows from 1.  `u32::MAX` is reserved as "none".

use std::fmt;

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident, $tag:literal) => {
        $(#[$doc])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id at position `index`, or `None` past the `u32` range.
            #[inline]
            pub fn from_index(index: usize) -> Option<$name> {
                u32::try_from(index).ok().filter(|&n| n != u32::MAX).map($name)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }
    };
}

id_newtype! {
    /// One simulated bin or truck; bins come first, then trucks.
    DeviceId, "dev#"
}

id_newtype! {
    /// Handle returned by `Substrate::create_node`.
    NodeId, "node#"
}

id_newtype! {
    /// A base station (cell) of the access network.
    BaseStationId, "bs#"
}

id_newtype! {
    /// Flow number in first-seen order, starting at 1.
    FlowId, "flow#"
}
