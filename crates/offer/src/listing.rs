//! A ready-made listing type.
//!
//! [`GenericListing`] covers listings that need no dedicated type: the
//! default `metro` / `room-space` groups, the built-in `images` handler and
//! an optional prepare hook. Concrete listing types with their own rules
//! implement [`Listing`] directly.

use std::fmt;
use std::sync::Arc;

use crate::dispatch::{RenderContext, RepeatedGroups};
use crate::error::Result;
use crate::handlers::HandlerRegistry;
use crate::offer::Listing;
use crate::value::{PropertyMap, PropertyValue};

type PrepareFn = dyn FnMut(&mut PropertyMap) -> Result<()> + Send;

pub struct GenericListing {
    id: Option<String>,
    properties: PropertyMap,
    handlers: Arc<HandlerRegistry>,
    repeated_groups: Arc<RepeatedGroups>,
    prepare: Option<Box<PrepareFn>>,
}

impl GenericListing {
    /// A listing with an explicit identifier.
    pub fn new(id: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::without_id(properties)
        }
    }

    /// A listing whose identifier comes from its own properties.
    pub fn without_id(properties: PropertyMap) -> Self {
        Self {
            id: None,
            properties,
            handlers: Arc::new(HandlerRegistry::with_defaults()),
            repeated_groups: Arc::new(RepeatedGroups::default()),
            prepare: None,
        }
    }

    /// Shares a handler table between listings of the same kind.
    pub fn with_handlers(mut self, handlers: Arc<HandlerRegistry>) -> Self {
        self.handlers = handlers;
        self
    }

    /// Adds one handler on top of the current table.
    pub fn with_handler<F>(mut self, property: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut RenderContext<'_>, &PropertyValue) -> Result<()> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.handlers).register(property, handler);
        self
    }

    pub fn with_repeated_groups(mut self, groups: Arc<RepeatedGroups>) -> Self {
        self.repeated_groups = groups;
        self
    }

    pub fn with_repeated_group(mut self, name: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.repeated_groups).insert(name);
        self
    }

    /// Sets the hook run before each render.
    pub fn with_prepare<F>(mut self, prepare: F) -> Self
    where
        F: FnMut(&mut PropertyMap) -> Result<()> + Send + 'static,
    {
        self.prepare = Some(Box::new(prepare));
        self
    }
}

impl Listing for GenericListing {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    fn repeated_groups(&self) -> &RepeatedGroups {
        &self.repeated_groups
    }

    fn prepare_self(&mut self) -> Result<()> {
        match self.prepare.as_mut() {
            Some(prepare) => prepare(&mut self.properties),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for GenericListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericListing")
            .field("id", &self.id)
            .field("properties", &self.properties)
            .field("handlers", &self.handlers)
            .field("repeated_groups", &self.repeated_groups)
            .field("prepare", &self.prepare.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let listing = GenericListing::new("1", PropertyMap::new());
        assert_eq!(listing.id(), Some("1"));
        assert!(listing.handlers().contains("images"));
        assert!(listing.repeated_groups().contains("metro"));
        assert!(listing.repeated_groups().contains("room-space"));
    }

    #[test]
    fn test_with_handler_does_not_touch_shared_table() {
        let shared = Arc::new(HandlerRegistry::with_defaults());
        let listing = GenericListing::new("1", PropertyMap::new())
            .with_handlers(Arc::clone(&shared))
            .with_handler("area", |_, _| Ok(()));
        assert!(listing.handlers().contains("area"));
        assert!(!shared.contains("area"));
    }

    #[test]
    fn test_prepare_hook_runs() -> Result<()> {
        let mut listing = GenericListing::new("1", PropertyMap::new()).with_prepare(|props| {
            props.insert("type".to_string(), "продажа".into());
            Ok(())
        });
        listing.prepare_self()?;
        assert_eq!(
            listing.property("type"),
            Some(&PropertyValue::String("продажа".to_string()))
        );
        Ok(())
    }
}
