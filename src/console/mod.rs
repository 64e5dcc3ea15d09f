//! Serial command console over DMA
//!
//! One worker task, two interrupt handlers, one wake signal.
//! Zero heap allocation - all static buffers.

pub mod isr;
pub mod line_buffer;
pub mod processor;
pub mod ring;
pub mod send;
pub mod worker;

pub use line_buffer::{LineBuffer, OutputBuffer, OutputWriter};
pub use processor::CommandProcessor;
pub use ring::{DmaRegion, RingError, RxRing};
pub use worker::{ConsoleShared, ConsoleWorker};
