#![allow(dead_code)]

use shelix_engine::dom::Rect;
use shelix_engine::{ChannelMessenger, Document, Engine, EngineConfig, Envelope, NodeId, OutboundMessage};
use tokio::sync::mpsc::UnboundedReceiver;

pub struct Harness {
    pub engine: Engine,
    pub rx: UnboundedReceiver<Envelope>,
}

impl Harness {
    /// Engine on an 800x600 page whose content is 3000px tall. The initial
    /// settings request is drained.
    pub fn new() -> Self {
        Self::with_page(|_| {})
    }

    pub fn with_page(build: impl FnOnce(&mut Document)) -> Self {
        let mut doc = Document::new(800.0, 600.0);
        doc.set_scroll_height(3000.0);
        build(&mut doc);
        let (messenger, mut rx) = ChannelMessenger::new();
        let engine = Engine::new(doc, EngineConfig::default(), Box::new(messenger));
        assert_eq!(rx.try_recv().map(|e| e.message).ok(), Some(OutboundMessage::SettingsGet));
        Self { engine, rx }
    }

    pub fn messages(&mut self) -> Vec<OutboundMessage> {
        let mut out = Vec::new();
        while let Ok(envelope) = self.rx.try_recv() {
            out.push(envelope.message);
        }
        out
    }

    pub fn doc(&self) -> &Document {
        self.engine.document()
    }
}

pub fn element(doc: &mut Document, tag: &str, attrs: &[(&str, &str)], y: f64) -> NodeId {
    let body = doc.body();
    let id = doc.create_element(tag);
    for (name, value) in attrs {
        doc.set_attr(id, name, value);
    }
    doc.set_rect(id, Rect::new(10.0, y, 200.0, 20.0));
    doc.append_child(body, id);
    id
}

pub fn paragraph(doc: &mut Document, text: &str, y: f64) -> NodeId {
    let p = element(doc, "p", &[], y);
    let node = doc.create_text(text);
    doc.append_child(p, node);
    p
}
