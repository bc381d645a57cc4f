pub(crate) mod path;
pub use path::{NodePath, PathSegment};

pub(crate) mod record;
pub use record::{AppId, ApplicationRecord, RawApplication, SYSTEM_PREFIX, SourceFilter};

pub(crate) mod search_text;
pub use search_text::SearchText;

pub(crate) mod value;
pub use value::{Children, PropertyValue, RawNumber, RawValue};
