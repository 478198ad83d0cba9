//! Request-pipeline adapter: validates incoming values against holder schemas.

use std::any::Any;

use serde_json::Value;

use crate::error::ValidateError;
use crate::holder::SchemaHolder;

/// Transform step for a request parameter.
///
/// A parameter whose declared metatype is not a [`SchemaHolder`] is not this
/// adapter's concern: the raw value passes through unchanged. Holder-typed
/// parameters are validated against the holder's schema; the failure carries
/// every failing field, not just the first, and serializes to the client as
/// a [`Rejection`](crate::Rejection) via
/// [`ValidateError::to_rejection`].
///
/// # Errors
///
/// `ValidateError::Invalid` on rejected payloads; other variants mean the
/// schema itself is broken.
pub fn transform(value: Value, metatype: Option<&dyn Any>) -> Result<Value, ValidateError> {
    let Some(holder) = metatype.and_then(|m| m.downcast_ref::<SchemaHolder>()) else {
        return Ok(value);
    };
    holder.schema().validate(&value)
}
