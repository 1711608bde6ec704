//! Offer rendering entry point.
//!
//! [`OfferBuilder::render`] runs the listing's `prepare_self` hook, resolves
//! the identifier, then writes
//!
//! ```xml
//! <offer internal-id="ID">...one child per property...</offer>
//! ```
//!
//! into a fresh in-memory writer and returns the flushed text. Errors never
//! leak a partial fragment: the buffer is dropped with the writer.

use tracing::debug;

use crate::config::{EncoderConfig, IdSource};
use crate::dispatch::{Dispatcher, RepeatedGroups};
use crate::error::{OfferError, Result};
use crate::format::ValueFormatter;
use crate::handlers::HandlerRegistry;
use crate::value::{PropertyMap, PropertyValue};
use crate::xml::utils::{INTERNAL_ID_ATTRIBUTE, OFFER_ELEMENT};
use crate::xml::{ElementWriter, XmlElementWriter};

/// The capability set a concrete listing type supplies to the encoder.
pub trait Listing {
    /// Identifier supplied alongside the listing, if any.
    fn id(&self) -> Option<&str>;

    fn properties(&self) -> &PropertyMap;

    fn properties_mut(&mut self) -> &mut PropertyMap;

    /// Custom handlers for this listing type.
    fn handlers(&self) -> &HandlerRegistry;

    /// Property names rendered as repeated sibling groups.
    fn repeated_groups(&self) -> &RepeatedGroups;

    /// Hook run before any writing starts. May rewrite the property map.
    fn prepare_self(&mut self) -> Result<()> {
        Ok(())
    }

    /// Looks up a top-level property; `None` when the key is missing.
    fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties().get(name)
    }

    /// Replaces the whole property map. An empty map leaves the current one
    /// in place.
    fn fill(&mut self, data: PropertyMap) {
        if !data.is_empty() {
            *self.properties_mut() = data;
        }
    }
}

/// Renders listings into `<offer>` fragments.
///
/// Holds only configuration; every render gets its own writer, so one
/// builder can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct OfferBuilder {
    config: EncoderConfig,
    formatter: ValueFormatter,
}

impl OfferBuilder {
    /// Creates a builder after validating `config`.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|errors| OfferError::Config(errors.join("; ")))?;
        let formatter = ValueFormatter::from_config(&config);
        Ok(Self { config, formatter })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Renders a listing with the quick-xml writer.
    pub fn render<L: Listing + ?Sized>(&self, listing: &mut L) -> Result<String> {
        let mut writer = XmlElementWriter::new();
        self.render_with(&mut writer, listing)
    }

    /// Renders a listing into any [`ElementWriter`].
    pub fn render_with<L: Listing + ?Sized>(
        &self,
        writer: &mut dyn ElementWriter,
        listing: &mut L,
    ) -> Result<String> {
        listing.prepare_self()?;
        let listing = &*listing;
        let id = self.resolve_id(listing)?;

        debug!(
            offer_id = %id,
            properties = listing.properties().len(),
            "rendering offer"
        );

        let dispatcher = Dispatcher::new(
            &self.formatter,
            listing.handlers(),
            listing.repeated_groups(),
        );

        writer.open_root()?;
        writer.start_element(OFFER_ELEMENT)?;
        writer.write_attribute(INTERNAL_ID_ATTRIBUTE, &id)?;
        dispatcher.render_properties(writer, listing.properties())?;
        writer.end_element()?;
        writer.flush()
    }

    /// Resolves the `internal-id` value according to the configured source.
    pub fn resolve_id<L: Listing + ?Sized>(&self, listing: &L) -> Result<String> {
        match &self.config.id_source {
            IdSource::Explicit => listing
                .id()
                .map(str::to_string)
                .ok_or_else(|| OfferError::MissingIdentifier {
                    key: "<explicit>".to_string(),
                }),
            IdSource::Property(key) => self.id_from_property(listing, key),
            IdSource::ExplicitOrProperty(key) => match listing.id() {
                Some(id) => Ok(id.to_string()),
                None => self.id_from_property(listing, key),
            },
        }
    }

    fn id_from_property<L: Listing + ?Sized>(&self, listing: &L, key: &str) -> Result<String> {
        listing
            .property(key)
            .and_then(PropertyValue::as_scalar)
            .map(|scalar| self.formatter.format(scalar))
            .ok_or_else(|| OfferError::MissingIdentifier {
                key: key.to_string(),
            })
    }
}
