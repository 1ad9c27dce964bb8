//! Runtime primitives shared by the slotview crates.
//!
//! Everything here is single-threaded: the list engine runs on the thread that
//! drives the host's frame loop, so shared state is `Rc`/`RefCell` based and
//! nothing is `Send`.

pub mod collections;
mod completion;
mod event;
mod frame_clock;
mod shared;

pub use completion::{completion_pair, Completion, CompletionSource};
pub use event::{Event, SubscriptionId};
pub use frame_clock::{FrameTimeSource, ManualFrameClock};
pub use shared::Shared;
