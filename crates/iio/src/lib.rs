//! Linux Industrial I/O (sysfs) sensor adapter.
//!
//! ADCs exposed by the kernel (or by a microcontroller bridge driver) show up
//! as `/sys/bus/iio/devices/iio:deviceN/` with a `name` file and one
//! `in_voltageK_raw` file per channel.

pub mod device;
pub mod ready;
pub mod source;

pub use device::{discover, IioDevice};
pub use ready::wait_until_ready;
pub use source::{parse_raw, IioSource};
