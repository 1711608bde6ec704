//! Custom property handlers.
//!
//! A listing type overrides how a property is rendered by registering a
//! handler under the property's name. The dispatcher consults the registry
//! before any default rule, so a registered handler fully owns the output
//! for its property.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::RenderContext;
use crate::error::{OfferError, Result};
use crate::value::PropertyValue;
use crate::xml::utils::{IMAGE_ELEMENT, IMAGES_PROPERTY};

/// Signature of a custom handler: the render context and the raw value.
pub type HandlerFn = dyn Fn(&mut RenderContext<'_>, &PropertyValue) -> Result<()> + Send + Sync;

/// Property name to handler table, held per listing type.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<HandlerFn>>,
}

impl HandlerRegistry {
    /// An empty registry: every property goes through the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `images` handler.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(IMAGES_PROPERTY, write_images);
        registry
    }

    /// Registers `handler` for `property`, replacing any previous one.
    pub fn register<F>(&mut self, property: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&mut RenderContext<'_>, &PropertyValue) -> Result<()> + Send + Sync + 'static,
    {
        self.handlers.insert(property.into(), Arc::new(handler));
        self
    }

    /// Removes the handler for `property`, returning whether one existed.
    pub fn unregister(&mut self, property: &str) -> bool {
        self.handlers.remove(property).is_some()
    }

    pub fn get(&self, property: &str) -> Option<&HandlerFn> {
        self.handlers.get(property).map(Arc::as_ref)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.handlers.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &names)
            .finish()
    }
}

/// Built-in `images` handler: one `image` leaf per list entry.
///
/// Null or an empty list writes nothing. Null entries are skipped; map or
/// list entries are [`OfferError::MalformedImages`].
pub fn write_images(ctx: &mut RenderContext<'_>, value: &PropertyValue) -> Result<()> {
    let images = match value {
        PropertyValue::Null => return Ok(()),
        PropertyValue::List(images) => images,
        _ => return Err(OfferError::MalformedImages),
    };

    for image in images {
        if image.is_null() {
            continue;
        }
        if image.as_scalar().is_none() {
            return Err(OfferError::MalformedImages);
        }
        ctx.write_element(IMAGE_ELEMENT, image, &[])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Dispatcher, RepeatedGroups};
    use crate::format::ValueFormatter;
    use crate::xml::{ElementWriter, XmlElementWriter};

    fn render_one(registry: &HandlerRegistry, name: &str, value: &PropertyValue) -> Result<String> {
        let formatter = ValueFormatter::default();
        let groups = RepeatedGroups::empty();
        let dispatcher = Dispatcher::new(&formatter, registry, &groups);
        let mut writer = XmlElementWriter::new();
        writer.open_root()?;
        writer.start_element("offer")?;
        dispatcher.render_property(&mut writer, name, value)?;
        writer.end_element()?;
        writer.flush()
    }

    #[test]
    fn test_images_handler() -> Result<()> {
        let registry = HandlerRegistry::with_defaults();
        let xml = render_one(&registry, "images", &vec!["a.jpg", "b.jpg"].into())?;
        assert_eq!(xml, "<offer><image>a.jpg</image><image>b.jpg</image></offer>");
        Ok(())
    }

    #[test]
    fn test_images_handler_empty_and_null() -> Result<()> {
        let registry = HandlerRegistry::with_defaults();
        let empty: Vec<PropertyValue> = Vec::new();
        assert_eq!(render_one(&registry, "images", &empty.into())?, "<offer></offer>");
        assert_eq!(
            render_one(&registry, "images", &PropertyValue::Null)?,
            "<offer></offer>"
        );
        Ok(())
    }

    #[test]
    fn test_images_handler_skips_null_entries() -> Result<()> {
        let registry = HandlerRegistry::with_defaults();
        let images = PropertyValue::List(vec!["a.jpg".into(), PropertyValue::Null]);
        assert_eq!(
            render_one(&registry, "images", &images)?,
            "<offer><image>a.jpg</image></offer>"
        );
        Ok(())
    }

    #[test]
    fn test_images_handler_rejects_scalar() {
        let registry = HandlerRegistry::with_defaults();
        let err = render_one(&registry, "images", &"a.jpg".into()).unwrap_err();
        assert!(matches!(err, OfferError::MalformedImages));
    }

    #[test]
    fn test_images_handler_rejects_structured_entries() {
        let registry = HandlerRegistry::with_defaults();

        let mut url = crate::value::PropertyMap::new();
        url.insert("url".to_string(), "a.jpg".into());
        let images = PropertyValue::List(vec!["b.jpg".into(), url.into()]);
        let err = render_one(&registry, "images", &images).unwrap_err();
        assert!(matches!(err, OfferError::MalformedImages));

        let nested = PropertyValue::List(vec![vec!["a.jpg"].into()]);
        let err = render_one(&registry, "images", &nested).unwrap_err();
        assert!(matches!(err, OfferError::MalformedImages));
    }

    #[test]
    fn test_handler_with_attributes() -> Result<()> {
        let mut registry = HandlerRegistry::new();
        registry.register("area", |ctx, value| {
            ctx.write_element("area", value, &[("unit", "sq. m")])
        });
        let xml = render_one(&registry, "area", &54.3.into())?;
        assert_eq!(xml, r#"<offer><area unit="sq. m">54.30</area></offer>"#);
        Ok(())
    }

    #[test]
    fn test_handler_may_write_nothing() -> Result<()> {
        let mut registry = HandlerRegistry::new();
        registry.register("secret", |_, _| Ok(()));
        assert_eq!(render_one(&registry, "secret", &"x".into())?, "<offer></offer>");
        Ok(())
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = HandlerRegistry::with_defaults();
        assert!(registry.contains("images"));
        assert_eq!(registry.len(), 1);
        assert!(registry.unregister("images"));
        assert!(!registry.unregister("images"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_debug_lists_names() {
        let mut registry = HandlerRegistry::with_defaults();
        registry.register("area", |_, _| Ok(()));
        assert_eq!(
            format!("{:?}", registry),
            r#"HandlerRegistry { handlers: ["area", "images"] }"#
        );
    }
}
