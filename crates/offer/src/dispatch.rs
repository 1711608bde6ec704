//! Property dispatch.
//!
//! For each property the dispatcher picks exactly one rendering strategy, in
//! this order (first match wins):
//!
//! 1. a custom handler registered for the property name,
//! 2. a repeated group, when the name is allowlisted and the value is a list,
//! 3. a nested element, when the value is a map,
//! 4. a scalar leaf element; null values produce nothing.

use indexmap::IndexSet;
use tracing::trace;

use crate::error::{OfferError, Result};
use crate::format::ValueFormatter;
use crate::handlers::HandlerRegistry;
use crate::value::{PropertyMap, PropertyValue};
use crate::xml::ElementWriter;
use crate::xml::utils::{self, DEFAULT_REPEATED_GROUPS};

/// Property names rendered as repeated sibling groups.
///
/// Known statically by the listing type; never inferred from value shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatedGroups {
    names: IndexSet<String>,
}

impl RepeatedGroups {
    /// An empty allowlist.
    pub fn empty() -> Self {
        Self {
            names: IndexSet::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>) -> &mut Self {
        self.names.insert(name.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// `metro` and `room-space`.
impl Default for RepeatedGroups {
    fn default() -> Self {
        DEFAULT_REPEATED_GROUPS.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for RepeatedGroups {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Rendering strategy chosen for one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Handler,
    RepeatedGroup,
    Nested,
    Scalar,
}

/// Drives an [`ElementWriter`] for a tree of properties.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    formatter: &'a ValueFormatter,
    handlers: &'a HandlerRegistry,
    repeated_groups: &'a RepeatedGroups,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        formatter: &'a ValueFormatter,
        handlers: &'a HandlerRegistry,
        repeated_groups: &'a RepeatedGroups,
    ) -> Self {
        Self {
            formatter,
            handlers,
            repeated_groups,
        }
    }

    pub fn formatter(&self) -> &'a ValueFormatter {
        self.formatter
    }

    /// Decides how `name` is rendered. Deterministic and side-effect free.
    pub fn strategy(&self, name: &str, value: &PropertyValue) -> Strategy {
        if self.handlers.contains(name) {
            Strategy::Handler
        } else if self.repeated_groups.contains(name) && value.as_list().is_some() {
            Strategy::RepeatedGroup
        } else if value.as_map().is_some() {
            Strategy::Nested
        } else {
            Strategy::Scalar
        }
    }

    /// Renders one property and everything below it.
    pub fn render_property(
        &self,
        writer: &mut dyn ElementWriter,
        name: &str,
        value: &PropertyValue,
    ) -> Result<()> {
        let strategy = self.strategy(name, value);
        trace!(
            property = name,
            kind = value.kind(),
            ?strategy,
            "dispatching property"
        );

        match strategy {
            Strategy::Handler => self.invoke_handler(writer, name, value),
            Strategy::RepeatedGroup => self.write_repeated_group(writer, name, value),
            Strategy::Nested | Strategy::Scalar => self.write_element(writer, name, value, &[]),
        }
    }

    /// Renders every entry of `properties` in insertion order.
    pub fn render_properties(
        &self,
        writer: &mut dyn ElementWriter,
        properties: &PropertyMap,
    ) -> Result<()> {
        for (name, value) in properties {
            self.render_property(writer, name, value)?;
        }
        Ok(())
    }

    fn invoke_handler(
        &self,
        writer: &mut dyn ElementWriter,
        name: &str,
        value: &PropertyValue,
    ) -> Result<()> {
        let Some(handler) = self.handlers.get(name) else {
            return Err(OfferError::writer(format!(
                "no handler registered for `{}`",
                name
            )));
        };
        trace!(
            property = name,
            handler = %utils::handler_method_name(name),
            "invoking custom handler"
        );
        let mut ctx = RenderContext::new(writer, *self);
        handler(&mut ctx, value)
    }

    fn write_repeated_group(
        &self,
        writer: &mut dyn ElementWriter,
        name: &str,
        value: &PropertyValue,
    ) -> Result<()> {
        let groups = value.as_list().unwrap_or_default();
        for (index, group) in groups.iter().enumerate() {
            let Some(entries) = group.as_map() else {
                return Err(OfferError::MalformedGroup {
                    property: name.to_string(),
                    index,
                });
            };
            writer.start_element(name)?;
            self.render_properties(writer, entries)?;
            writer.end_element()?;
        }
        Ok(())
    }

    /// Writes one element for `value` with optional attributes.
    ///
    /// Null writes nothing. Scalars become a leaf with formatted text; maps
    /// become an element whose children go through [`Self::render_property`].
    /// Lists are rejected: they only render through handlers or repeated
    /// groups.
    pub fn write_element(
        &self,
        writer: &mut dyn ElementWriter,
        name: &str,
        value: &PropertyValue,
        attributes: &[(&str, &str)],
    ) -> Result<()> {
        match value {
            PropertyValue::Null => Ok(()),
            PropertyValue::List(_) => Err(OfferError::UnexpectedList {
                property: name.to_string(),
            }),
            PropertyValue::Map(entries) => {
                writer.start_element(name)?;
                for (attr, attr_value) in attributes {
                    writer.write_attribute(attr, attr_value)?;
                }
                self.render_properties(writer, entries)?;
                writer.end_element()
            }
            scalar => {
                let Some(scalar) = scalar.as_scalar() else {
                    return Ok(());
                };
                writer.start_element(name)?;
                for (attr, attr_value) in attributes {
                    writer.write_attribute(attr, attr_value)?;
                }
                writer.write_text(&self.formatter.format(scalar))?;
                writer.end_element()
            }
        }
    }
}

/// What a custom handler gets to work with.
///
/// Handlers are fully responsible for the writer calls they make; the
/// helpers here give them the same leaf and recursive rendering the
/// dispatcher uses.
pub struct RenderContext<'a> {
    writer: &'a mut dyn ElementWriter,
    dispatcher: Dispatcher<'a>,
}

impl<'a> RenderContext<'a> {
    pub fn new(writer: &'a mut dyn ElementWriter, dispatcher: Dispatcher<'a>) -> Self {
        Self { writer, dispatcher }
    }

    /// Raw access to the element writer.
    pub fn writer(&mut self) -> &mut dyn ElementWriter {
        &mut *self.writer
    }

    pub fn formatter(&self) -> &ValueFormatter {
        self.dispatcher.formatter()
    }

    /// Writes an element through the default leaf / nested path.
    pub fn write_element(
        &mut self,
        name: &str,
        value: &PropertyValue,
        attributes: &[(&str, &str)],
    ) -> Result<()> {
        self.dispatcher
            .write_element(&mut *self.writer, name, value, attributes)
    }

    /// Dispatches a property as if it appeared in the listing.
    pub fn render_property(&mut self, name: &str, value: &PropertyValue) -> Result<()> {
        self.dispatcher
            .render_property(&mut *self.writer, name, value)
    }
}
