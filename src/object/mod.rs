//! Objects: template instances, their audit actions, comments, and the
//! per-field data check against the owning template.

mod action;
mod comment;
mod data;
mod types;

pub use action::{CreateObjectAction, DeliveryStatus, ObjectAction};
pub use comment::{Comment, CreateComment, UpdateComment};
pub use data::validate_data;
pub use types::{CreateObject, Object, ObjectStatus, UpdateObject};
