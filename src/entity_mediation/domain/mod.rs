pub mod cursor;
pub mod entity;
pub mod entity_kind;
pub mod filter_string;
pub mod gmp_command;
pub mod session;
pub mod xml_element;

pub use entity::{Entity, EntityListing, EntityPage};
pub use entity_kind::{EmptyIdsEncoding, EntityKind};
pub use filter_string::{FilterString, SortOrder};
pub use gmp_command::GmpCommand;
pub use session::{AuthenticationInfo, Credentials, Session};
pub use xml_element::XmlElement;
