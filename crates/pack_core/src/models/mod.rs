pub mod features;
pub mod pack;
pub mod raw;
pub mod report;

pub use features::{AllowedFacts, EventKind, Evidence, Features, KeyEvent, MatchFacts};
pub use pack::{Caption, ContentPack, KeyMoment, Language, Platform};
pub use raw::{MatchMeta, RawEvent};
pub use report::{ReportStats, ValidationReport};
