pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod markup;
pub mod validity;

pub use document::{Document, NodeId};
pub use element::{find_element, Element};
pub use error::DomError;
pub use event::{DispatchOutcome, Event, EventListener, EventType, ListenerId, Phase};
pub use validity::{InputType, ValidityState};
