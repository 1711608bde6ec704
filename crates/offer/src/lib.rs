//! # YRL offer encoder
//!
//! Turns one real-estate listing, given as an ordered property map, into a
//! self-contained `<offer>` XML fragment for a YRL realty feed.
//!
//! ## Rendering rules
//!
//! Every property goes through the first matching rule:
//!
//! | Rule | Output |
//! |------|--------|
//! | custom handler registered for the name | whatever the handler writes |
//! | name in the repeated-group allowlist, list value | `<metro>…</metro><metro>…</metro>` |
//! | map value | `<location><region>…</region></location>` |
//! | scalar value | `<price>150000.50</price>` |
//! | null value | nothing |
//!
//! Floats are written with two fractional digits and booleans with the
//! configured yes/no tokens (`да` / `нет` by default).
//!
//! ## Example
//!
//! ```rust
//! use yrl_offer::{GenericListing, OfferBuilder, PropertyMap, PropertyValue};
//!
//! let mut properties = PropertyMap::new();
//! properties.insert("price".to_string(), PropertyValue::from(150000.5));
//! properties.insert("is-new".to_string(), PropertyValue::from(true));
//! properties.insert("images".to_string(), PropertyValue::from(vec!["a.jpg", "b.jpg"]));
//!
//! let mut listing = GenericListing::new("42", properties);
//! let xml = OfferBuilder::default().render(&mut listing)?;
//! assert_eq!(
//!     xml,
//!     "<offer internal-id=\"42\"><price>150000.50</price><is-new>да</is-new>\
//!      <image>a.jpg</image><image>b.jpg</image></offer>"
//! );
//! # Ok::<(), yrl_offer::OfferError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod handlers;
pub mod listing;
pub mod offer;
pub mod value;
pub mod xml;

pub use config::{BooleanTokens, EncoderConfig, IdSource};
pub use dispatch::{Dispatcher, RenderContext, RepeatedGroups, Strategy};
pub use error::{OfferError, Result};
pub use format::ValueFormatter;
pub use handlers::{HandlerFn, HandlerRegistry};
pub use listing::GenericListing;
pub use offer::{Listing, OfferBuilder};
pub use value::{PropertyMap, PropertyValue, Scalar, property_map_from_json};
pub use xml::{ElementWriter, XmlElementWriter};

/// Renders one listing with the default configuration and listing rules.
///
/// `id` becomes the `internal-id` attribute.
pub fn render_offer(id: impl Into<String>, properties: PropertyMap) -> Result<String> {
    let mut listing = GenericListing::new(id, properties);
    OfferBuilder::default().render(&mut listing)
}
