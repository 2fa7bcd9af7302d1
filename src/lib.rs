//! **D**escriptor driven **SER**ialization and **D**eserialization.
//!
//! `dserd` converts between an in-memory object graph ([`Value`]) and JSON ([`Json`]). What is
//! written, under which key, and as which type, is not derived from the shape of the data but
//! read from per-class _field descriptors_ held in a [`Registry`]. Classes are known by name, so
//! a registry can describe data which never has a Rust type of its own.
//!
//! Features:
//! - primitive conversion with loose, dynamic-language style coercion ([`Primitive`]),
//! - nested objects, arrays of a type, and string keyed maps of a type,
//! - structural conversion of arbitrary data, bypassing descriptors,
//! - key casing transforms ([`transform`]) applied per direction,
//! - inheritance by composing a parent class's descriptors into a child,
//! - construction policies ([`Instantiation`]) and post conversion hooks,
//! - decoding _merges_ into existing targets rather than replacing them.
//!
//! # Example
//! ```rust
//! use dserd::*;
//! use serde_json::json;
//!
//! let mut registry = Registry::default();
//! registry.register("Account", "owner_name").auto_as(Primitive::Text);
//! registry.register("Account", "balance").auto_as(Primitive::Number);
//! registry.register("Account", "opened").auto_as(Primitive::Date);
//! registry.register("Account", "tags").auto_as_array(Primitive::Text);
//!
//! let config = Config::default()
//!     .encode_keys(transform::camel_case)
//!     .decode_keys(transform::camel_case);
//! let codec = Codec::with_config(registry, config);
//!
//! let account = codec
//!     .decode(
//!         &json!({
//!             "ownerName": "Jo",
//!             "balance": "12.5",
//!             "opened": "2020-02-01T00:00:00.000Z",
//!             "tags": ["a", "b"]
//!         }),
//!         "Account",
//!     )
//!     .unwrap();
//!
//! assert_eq!(account.get("owner_name").and_then(Value::str), Some("Jo"));
//! assert_eq!(account.get("balance").and_then(Value::num), Some(12.5));
//!
//! assert_eq!(
//!     codec.encode(&account, "Account").unwrap(),
//!     json!({
//!         "ownerName": "Jo",
//!         "balance": 12.5,
//!         "opened": "2020-02-01T00:00:00.000Z",
//!         "tags": ["a", "b"]
//!     })
//! );
//! ```
//!
//! # Logging
//! `dserd` emits [`tracing`](https://docs.rs/tracing) events at `debug` and `trace` level, for
//! example when loose data coerces to null or a decode target is replaced. Nothing is emitted
//! unless the application installs a subscriber.
#![warn(missing_docs)]

mod codec;
mod config;
pub mod ds;
mod error;
pub mod registry;
pub mod transform;

pub use self::codec::{decode_primitive, encode_primitive, Codec};
pub use self::config::{Config, Instantiation, KeyTransform};
pub use self::ds::*;
pub use self::error::{Error, Result};
pub use self::registry::{
    Constructor, DecodeFn, DecodeHook, DecodeOp, EncodeFn, EncodeHook, EncodeOp, FieldCodec,
    FieldDescriptor, Registry,
};
