//! Form related types

use std::collections::BTreeMap;

/// Field name -> message, ordered by field name
pub type FieldErrors = BTreeMap<String, String>;
