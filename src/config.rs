use crate::transform;
use std::fmt;
use std::sync::Arc;

/// A key casing transform, applied to external key names.
pub type KeyTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How a decode target is produced when no existing target is supplied.
///
/// An existing target is always reused, whatever the policy.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Instantiation {
    /// Run the class's registered constructor.
    ///
    /// A class without a constructor is allocated as with [`Allocate`](Instantiation::Allocate).
    #[default]
    Construct,
    /// Produce an empty instance of the class without running its constructor.
    /// Useful when constructors have side effects.
    Allocate,
    /// Ignore the class and produce a plain container.
    /// Useful when consumers require plain, class-less data.
    Plain,
}

/// Conversion configuration held by a [`Codec`](crate::Codec).
///
/// The encode and decode key transforms are independent. Both default to the identity, and the
/// default instantiation policy is [`Instantiation::Construct`].
///
/// # Example
/// ```rust
/// # use dserd::*;
/// let config = Config::default()
///     .encode_keys(transform::camel_case)
///     .decode_keys(transform::snake_case)
///     .instantiation(Instantiation::Allocate);
///
/// assert_eq!(config.encode_key("value_two"), "valueTwo");
/// assert_eq!(config.decode_key("valueOne"), "value_one");
/// assert_eq!(config.default_instantiation(), Instantiation::Allocate);
/// ```
#[derive(Clone)]
pub struct Config {
    encode_key: KeyTransform,
    decode_key: KeyTransform,
    instantiation: Instantiation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encode_key: Arc::new(transform::no_op),
            decode_key: Arc::new(transform::no_op),
            instantiation: Instantiation::default(),
        }
    }
}

impl Config {
    /// Builder style [`set_encode_key_transform`](Config::set_encode_key_transform).
    pub fn encode_keys<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.set_encode_key_transform(Some(Arc::new(f) as KeyTransform));
        self
    }

    /// Builder style [`set_decode_key_transform`](Config::set_decode_key_transform).
    pub fn decode_keys<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.set_decode_key_transform(Some(Arc::new(f) as KeyTransform));
        self
    }

    /// Builder style [`set_default_instantiation`](Config::set_default_instantiation).
    pub fn instantiation(mut self, policy: Instantiation) -> Self {
        self.set_default_instantiation(Some(policy));
        self
    }

    /// Replace the encode key transform. `None` installs the identity.
    pub fn set_encode_key_transform(&mut self, f: Option<KeyTransform>) {
        self.encode_key = f.unwrap_or_else(|| Arc::new(transform::no_op));
    }

    /// Replace the decode key transform. `None` installs the identity.
    pub fn set_decode_key_transform(&mut self, f: Option<KeyTransform>) {
        self.decode_key = f.unwrap_or_else(|| Arc::new(transform::no_op));
    }

    /// Replace the default instantiation policy. `None` installs [`Instantiation::Construct`].
    pub fn set_default_instantiation(&mut self, policy: Option<Instantiation>) {
        self.instantiation = policy.unwrap_or_default();
    }

    /// Apply the encode key transform.
    pub fn encode_key(&self, key: &str) -> String {
        (self.encode_key)(key)
    }

    /// Apply the decode key transform.
    pub fn decode_key(&self, key: &str) -> String {
        (self.decode_key)(key)
    }

    /// The instantiation policy used when a call does not specify one.
    pub fn default_instantiation(&self) -> Instantiation {
        self.instantiation
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Config")
            .field("instantiation", &self.instantiation)
            .finish_non_exhaustive()
    }
}
