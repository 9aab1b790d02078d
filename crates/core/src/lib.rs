pub mod error;
pub mod sink;
pub mod source;
pub mod state;

pub use error::{Result, SensorError};
pub use sink::{CallbackSink, DisplaySink};
pub use source::SensorSource;
pub use state::{Reading, SamplerState};
