//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                |
//! |------------|--------------------|----------------------------|
//! | `i2c`      | RegisterReader     | AXP192 over embedded-hal   |
//! |            | BrightnessWriter   |                            |
//! | `log_sink` | EventSink          | Serial log output          |
//! |            | NotificationSink   |                            |

pub mod i2c;
pub mod log_sink;
