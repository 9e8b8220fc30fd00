//! Tool definitions module.
//!
//! Each tool is defined in its own file. `net` tools fetch over the network
//! through the external fetch program; `local` tools answer in-process.

pub mod local;
pub mod net;

pub use local::{RandomTool, TimeTool};
pub use net::{CurlTool, IpInfoTool, WeatherTool};
