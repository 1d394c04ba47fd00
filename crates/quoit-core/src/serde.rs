#![cfg(feature = "serde")]

use alloc::format;

use serde::ser::*;

use crate::colorspace::Channels;

impl Serialize for Channels {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // channel serialization is simply it's debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}
