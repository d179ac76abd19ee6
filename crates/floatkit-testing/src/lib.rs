//! Testing utilities and harness for Floatkit

pub mod host;
pub mod rule;

pub use host::*;
pub use rule::*;

pub mod prelude {
    pub use crate::host::{HostCall, RecordingHost};
    pub use crate::rule::FloatingTestRule;
    pub use floatkit_ui::prelude::*;
}
