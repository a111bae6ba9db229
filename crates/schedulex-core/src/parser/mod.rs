pub mod project_xml;
pub mod raw_task;
pub mod xml_tree;

pub use project_xml::{ProjectXmlParser, ScheduleDocument};
pub use raw_task::{ExtendedAttributes, RawTask};
