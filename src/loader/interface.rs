use crate::error::Result;

/// A source of one configuration layer.
///
/// Providers only produce a raw value. Validation and merging happen in the
/// resolver, so a provider never decides what a valid configuration is.
pub trait ConfigProvider {
    /// Human-readable origin of the layer, used in log messages.
    fn source(&self) -> String;

    /// Produces the raw layer value.
    ///
    /// # Returns
    /// * `Result<serde_json::Value>` - The unvalidated layer
    fn provide(&self) -> Result<serde_json::Value>;
}
