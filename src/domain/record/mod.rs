pub mod entity;
pub mod options;
pub mod repository;
pub mod schema;
pub mod services;
pub mod value_objects;

pub use entity::Record;
pub use options::SlugOptions;
pub use repository::{RecordStore, SlugQuery, WriteOptions};
pub use schema::{FieldSpec, SLUG_FIELD, Schema};
pub use services::{SlugGenerator, enhance_schema};
pub use value_objects::{FieldName, RecordId, Slug};
