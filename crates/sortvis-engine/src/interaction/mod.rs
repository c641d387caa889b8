//! The interaction state machine and the views it drives.
//!
//! ```text
//!   Start --any--> Help --Enter/Esc/Click--> Config --Continue--> Sorting
//!                   ^                        |  ^                   |
//!                   +--------Help key--------+  |                run joined
//!                                               |                   v
//!                        Start <--Escape-- Config <--Enter/Esc/Bksp-- Sorted
//!                                                     Sorting <--Replay--+
//! ```

pub mod animator;
pub mod config_form;
pub mod help;
pub mod mode;
pub mod quantity;

pub use animator::Animator;
pub use config_form::{ConfigForm, FormAction, FormField};
pub use help::{HelpDocument, HelpView};
pub use mode::{Input, Key, Mode};
pub use quantity::QuantityField;
