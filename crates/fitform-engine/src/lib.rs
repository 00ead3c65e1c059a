//! fitform-engine
//!
//! The evaluation core: conditional visibility, named-formula computation,
//! completion tracking, and the in-memory form session. Everything here is
//! a pure, synchronous function of a template and the current form state —
//! no I/O, no caching across mutations.

pub mod completion;
pub mod evaluate;
pub mod session;
pub mod visibility;

pub use completion::completion_percentage;
pub use evaluate::evaluate;
pub use session::FormSession;
pub use visibility::{field_visible, section_visible, visible_fields, visible_sections};
