//! Stack-discipline element writer over quick-xml.
//!
//! The encoder only talks to the [`ElementWriter`] trait. [`XmlElementWriter`]
//! implements it by buffering quick-xml events into memory; the start tag of
//! the innermost element is held back until its first child or text so that
//! attributes can still be added to it.

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{OfferError, Result};
use crate::xml::utils;

/// Streaming markup sink used by the encoder.
///
/// Every call either succeeds or returns [`OfferError::Writer`]; misuse is a
/// programming error in the caller, never silently repaired.
pub trait ElementWriter {
    /// Begins a new in-memory document, discarding anything written before.
    fn open_root(&mut self) -> Result<()>;

    /// Opens a child of the current element (or the root element).
    fn start_element(&mut self, name: &str) -> Result<()>;

    /// Writes an attribute on the element opened by the last `start_element`.
    ///
    /// Only valid before that element has any content.
    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()>;

    /// Appends escaped character data to the current element.
    fn write_text(&mut self, content: &str) -> Result<()>;

    /// Closes the current element with a full end tag.
    fn end_element(&mut self) -> Result<()>;

    /// Returns the finished document and resets the writer.
    fn flush(&mut self) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentState {
    /// `open_root` has not been called since the last flush
    Idle,
    /// Root element not yet closed
    Open,
    /// Root element closed; only `flush` is allowed
    Closed,
}

/// [`ElementWriter`] writing XML into a byte buffer.
pub struct XmlElementWriter {
    writer: Writer<Vec<u8>>,
    state: DocumentState,
    open_elements: Vec<String>,
    pending_start: Option<BytesStart<'static>>,
}

impl Default for XmlElementWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlElementWriter {
    /// Creates a new writer. Call [`ElementWriter::open_root`] before writing.
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
            state: DocumentState::Idle,
            open_elements: Vec::new(),
            pending_start: None,
        }
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.open_elements.len()
    }

    fn reset(&mut self) {
        self.writer = Writer::new(Vec::new());
        self.state = DocumentState::Idle;
        self.open_elements.clear();
        self.pending_start = None;
    }

    /// Writes the held-back start tag, if any.
    fn flush_pending_start(&mut self) -> Result<()> {
        if let Some(start) = self.pending_start.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }

    fn require_open(&self, operation: &str) -> Result<()> {
        match self.state {
            DocumentState::Open if !self.open_elements.is_empty() => Ok(()),
            DocumentState::Idle => Err(OfferError::writer(format!(
                "{} called before open_root",
                operation
            ))),
            _ => Err(OfferError::writer(format!(
                "{} called with no open element",
                operation
            ))),
        }
    }
}

impl ElementWriter for XmlElementWriter {
    fn open_root(&mut self) -> Result<()> {
        self.reset();
        self.state = DocumentState::Open;
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<()> {
        match self.state {
            DocumentState::Idle => {
                return Err(OfferError::writer(format!(
                    "start_element(`{}`) called before open_root",
                    name
                )));
            }
            DocumentState::Closed => {
                return Err(OfferError::writer(format!(
                    "start_element(`{}`) called after the root element was closed",
                    name
                )));
            }
            DocumentState::Open => {}
        }

        if !utils::is_valid_element_name(name) {
            return Err(OfferError::writer(format!(
                "`{}` is not a valid element name",
                name
            )));
        }

        self.flush_pending_start()?;
        self.pending_start = Some(BytesStart::new(name.to_string()));
        self.open_elements.push(name.to_string());
        Ok(())
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.require_open("write_attribute")?;
        match self.pending_start.as_mut() {
            Some(start) => {
                start.push_attribute((name, value));
                Ok(())
            }
            None => Err(OfferError::writer(format!(
                "attribute `{}` written after content of `{}`",
                name,
                self.open_elements.last().map(String::as_str).unwrap_or("")
            ))),
        }
    }

    fn write_text(&mut self, content: &str) -> Result<()> {
        self.require_open("write_text")?;
        self.flush_pending_start()?;
        // Quotes stay literal in character data; only `&`, `<` and `>` are escaped.
        let escaped = partial_escape(content);
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(escaped)))?;
        Ok(())
    }

    fn end_element(&mut self) -> Result<()> {
        self.require_open("end_element")?;
        self.flush_pending_start()?;

        let Some(name) = self.open_elements.pop() else {
            return Err(OfferError::writer("end_element called with no open element"));
        };
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;

        if self.open_elements.is_empty() {
            self.state = DocumentState::Closed;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<String> {
        match self.state {
            DocumentState::Closed => {}
            DocumentState::Idle => {
                return Err(OfferError::writer("flush called before open_root"));
            }
            DocumentState::Open => {
                let open = self.open_elements.join(" > ");
                self.reset();
                return Err(OfferError::writer(format!(
                    "flush called with open elements: {}",
                    open
                )));
            }
        }

        let writer = std::mem::replace(&mut self.writer, Writer::new(Vec::new()));
        self.reset();
        Ok(String::from_utf8(writer.into_inner())?)
    }
}
