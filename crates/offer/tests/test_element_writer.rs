//! Drives the encoder through a recording [`ElementWriter`] to check the exact
//! call sequence, independent of the quick-xml backend.

use yrl_offer::{
    ElementWriter, GenericListing, OfferBuilder, OfferError, PropertyMap, PropertyValue, Result,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    OpenRoot,
    Start(String),
    Attr(String, String),
    Text(String),
    End,
    Flush,
}

#[derive(Default)]
struct RecordingWriter {
    calls: Vec<Call>,
    depth: usize,
}

impl ElementWriter for RecordingWriter {
    fn open_root(&mut self) -> Result<()> {
        self.calls.push(Call::OpenRoot);
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<()> {
        self.depth += 1;
        self.calls.push(Call::Start(name.to_string()));
        Ok(())
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.calls.push(Call::Attr(name.to_string(), value.to_string()));
        Ok(())
    }

    fn write_text(&mut self, content: &str) -> Result<()> {
        self.calls.push(Call::Text(content.to_string()));
        Ok(())
    }

    fn end_element(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(OfferError::Writer("unbalanced end".to_string()));
        }
        self.depth -= 1;
        self.calls.push(Call::End);
        Ok(())
    }

    fn flush(&mut self) -> Result<String> {
        self.calls.push(Call::Flush);
        Ok(format!("{} calls", self.calls.len()))
    }
}

fn start(name: &str) -> Call {
    Call::Start(name.to_string())
}

fn text(content: &str) -> Call {
    Call::Text(content.to_string())
}

#[test]
fn test_call_sequence() -> Result<()> {
    let mut group = PropertyMap::new();
    group.insert("name".to_string(), "Central".into());

    let mut properties = PropertyMap::new();
    properties.insert("price".to_string(), 10.0.into());
    properties.insert("skip".to_string(), PropertyValue::Null);
    properties.insert("metro".to_string(), vec![PropertyValue::from(group)].into());

    let mut writer = RecordingWriter::default();
    let mut listing = GenericListing::new("42", properties);
    OfferBuilder::default().render_with(&mut writer, &mut listing)?;

    assert_eq!(
        writer.calls,
        vec![
            Call::OpenRoot,
            start("offer"),
            Call::Attr("internal-id".to_string(), "42".to_string()),
            start("price"),
            text("10.00"),
            Call::End,
            start("metro"),
            start("name"),
            text("Central"),
            Call::End,
            Call::End,
            Call::End,
            Call::Flush,
        ]
    );
    assert_eq!(writer.depth, 0);
    Ok(())
}

#[test]
fn test_handler_calls_pass_through_verbatim() -> Result<()> {
    let mut properties = PropertyMap::new();
    properties.insert("before".to_string(), 1.into());
    properties.insert("phone".to_string(), "+7 900".into());
    properties.insert("after".to_string(), 2.into());

    let mut listing = GenericListing::new("1", properties).with_handler("phone", |ctx, value| {
        let writer = ctx.writer();
        writer.start_element("contact")?;
        writer.write_attribute("kind", "phone")?;
        if let PropertyValue::String(number) = value {
            writer.write_text(number)?;
        }
        writer.end_element()
    });

    let mut writer = RecordingWriter::default();
    OfferBuilder::default().render_with(&mut writer, &mut listing)?;

    let body = &writer.calls[3..writer.calls.len() - 2];
    assert_eq!(
        body,
        &[
            start("before"),
            text("1"),
            Call::End,
            start("contact"),
            Call::Attr("kind".to_string(), "phone".to_string()),
            text("+7 900"),
            Call::End,
            start("after"),
            text("2"),
            Call::End,
        ]
    );
    Ok(())
}

#[test]
fn test_writer_errors_propagate() {
    let mut properties = PropertyMap::new();
    properties.insert("broken".to_string(), 1.into());

    let mut listing = GenericListing::new("1", properties).with_handler("broken", |ctx, _| {
        ctx.writer().end_element()?;
        ctx.writer().end_element()
    });

    let mut writer = RecordingWriter::default();
    let err = OfferBuilder::default()
        .render_with(&mut writer, &mut listing)
        .unwrap_err();
    assert!(matches!(err, OfferError::Writer(_)));
    assert!(!writer.calls.contains(&Call::Flush));
}
