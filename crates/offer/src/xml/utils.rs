//! Names and helpers shared by the offer encoder.

/// Root element of every fragment.
pub const OFFER_ELEMENT: &str = "offer";

/// Attribute on the root element carrying the listing identifier.
pub const INTERNAL_ID_ATTRIBUTE: &str = "internal-id";

/// Property handled by the built-in images handler.
pub const IMAGES_PROPERTY: &str = "images";

/// Element written once per image by the images handler.
pub const IMAGE_ELEMENT: &str = "image";

/// Repeated-group properties every listing type knows about.
pub const DEFAULT_REPEATED_GROUPS: &[&str] = &["metro", "room-space"];

/// Derives the conventional handler name for a property.
///
/// Hyphens and underscores separate words and every word is capitalized, so
/// `room-space` becomes `createRoomSpaceElement`. Handlers are looked up by
/// property name; this name only shows up in log lines.
pub fn handler_method_name(property: &str) -> String {
    let words: String = property
        .split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();
    format!("create{}Element", words)
}

/// Checks whether `name` can be written as an XML element name.
///
/// Only the first character is restricted beyond the usual name characters;
/// namespaces are not interpreted.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
