//! Key casing transforms.
//!
//! Any `Fn(&str) -> String` can be installed as a key transform (see [`Config`]); these are the
//! common ones.
//!
//! ```rust
//! use dserd::transform::*;
//!
//! assert_eq!(no_op("value_two"), "value_two");
//! assert_eq!(camel_case("value_two"), "valueTwo");
//! assert_eq!(snake_case("valueOne"), "value_one");
//! assert_eq!(kebab_case("valueOne"), "value-one");
//! ```
//!
//! [`Config`]: crate::Config
use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase};

/// Leaves the string unchanged.
pub fn no_op(s: &str) -> String {
    s.to_owned()
}

/// `my_camel_string` to `myCamelString`.
pub fn camel_case(s: &str) -> String {
    s.to_lower_camel_case()
}

/// `MySnakeString` to `my_snake_string`.
pub fn snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// Alias of [`snake_case`].
pub fn underscore_case(s: &str) -> String {
    snake_case(s)
}

/// `my_camelCase` to `my-camel-case`.
pub fn kebab_case(s: &str) -> String {
    s.to_kebab_case()
}

/// Alias of [`kebab_case`].
pub fn dash_case(s: &str) -> String {
    kebab_case(s)
}
