/// Advanced SubStation Alpha document model
pub mod data;
/// Override tag scanning and styled segment extraction
pub mod tags;

pub use data::{AssDocument, AssEvent, AssEventKind, AssScriptInfo, AssStyle};
pub use tags::{FontProperties, StyledSegment};
