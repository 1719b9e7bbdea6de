//! Store lifecycle notices for the UI layer (feature `emitter`).

mod notices;

pub use notices::{StoreEvent, StoreNotice, StoreNotifier};
