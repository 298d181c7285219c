//! Response documents for each endpoint.
//!
//! The service schema is open: every model keeps the complete JSON document
//! it was built from, whatever its shape, including fields this crate does
//! not know about. A few well-known fields get typed accessors; they return
//! `None` when the document is not an object or lacks the field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

macro_rules! document {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            value: Value,
        }

        impl $name {
            /// Returns the value of a top-level field, if the document is an
            /// object that has it.
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.value.get(key)
            }

            /// Returns the top-level fields, if the document is an object.
            pub fn fields(&self) -> Option<&Map<String, Value>> {
                self.value.as_object()
            }

            /// Returns the document as received.
            pub fn as_value(&self) -> &Value {
                &self.value
            }

            /// Consumes the document, returning it as a JSON value.
            pub fn into_value(self) -> Value {
                self.value
            }

            /// Returns a copy of the document as a JSON value.
            pub fn to_value(&self) -> Value {
                self.value.clone()
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self { value }
            }
        }
    };
}

document!(
    /// Response of `la-to-en/{word}` and `en-to-la/{word}`.
    TranslationResponse
);

document!(
    /// Response of `auto-detect/{text}`.
    AutoDetectResponse
);

document!(
    /// Response of `latin-parse`.
    LatinParseResponse
);

document!(
    /// Response of `inflection-table`.
    InflectionTableResponse
);

impl AutoDetectResponse {
    /// The detected language, e.g. `"latin"`.
    pub fn language(&self) -> Option<&str> {
        self.get("language")?.as_str()
    }

    /// The translation payload for the detected language.
    pub fn data(&self) -> Option<&Value> {
        self.get("data")
    }
}

impl LatinParseResponse {
    /// The parsed tokens, in text order.
    pub fn tokens(&self) -> Option<&Vec<Value>> {
        self.get("tokens")?.as_array()
    }
}

impl InflectionTableResponse {
    /// The dictionary form the table was built for.
    pub fn lemma(&self) -> Option<&str> {
        self.get("lemma")?.as_str()
    }

    /// One table per matching dictionary entry.
    pub fn entries(&self) -> Option<&Vec<Value>> {
        self.get("entries")?.as_array()
    }
}
