//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter            | Implements                         | Connects to                |
//! |--------------------|------------------------------------|----------------------------|
//! | `log_sink`         | EventSink                          | Serial log output          |
//! | `task_channels`    | ActuatorPort, SystemPort           | Heater/motor/GUI task queues |
//! | `headless_display` | DisplayPort, TouchPort, VideoPort, ClockPort | Log output (no panel) |
//! | `time`             | ClockPort                          | ESP32 high-resolution timer |

pub mod headless_display;
pub mod log_sink;
pub mod task_channels;
pub mod time;

