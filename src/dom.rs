// This module triggers downloads the way a web page does it by hand: a throwaway <a download> that gets clicked

use crate::{error::ExportError, export::DownloadLink, sink::DownloadSink};

/// The few document operations an anchor download needs.
pub trait Document {
    type Anchor;

    fn create_anchor(&self) -> Result<Self::Anchor, ExportError>;
    fn set_attribute(
        &self,
        anchor: &Self::Anchor,
        name: &str,
        value: &str,
    ) -> Result<(), ExportError>;
    fn append_to_body(&self, anchor: &Self::Anchor) -> Result<(), ExportError>;
    fn click(&self, anchor: &Self::Anchor);
    fn remove(&self, anchor: &Self::Anchor);
}

pub struct AnchorSink<D> {
    document: D,
}

impl<D: Document> AnchorSink<D> {
    pub fn new(document: D) -> Self {
        AnchorSink { document }
    }

    pub fn document(&self) -> &D {
        &self.document
    }
}

impl<D: Document> DownloadSink for AnchorSink<D> {
    fn download(&mut self, link: &DownloadLink) -> Result<(), ExportError> {
        let doc = &self.document;
        let anchor = doc.create_anchor()?;
        doc.set_attribute(&anchor, "href", &link.href)?;
        doc.set_attribute(&anchor, "download", &link.download)?;
        // firefox ignores clicks on anchors that aren't in the tree
        doc.append_to_body(&anchor)?;
        doc.click(&anchor);
        doc.remove(&anchor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeMap};

    use super::*;
    use crate::export::{data_uri, trigger_json_download};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Create(usize),
        SetAttribute(usize, String, String),
        Append(usize),
        Click(usize, BTreeMap<String, String>),
        Remove(usize),
    }

    #[derive(Default)]
    struct RecordingDocument {
        events: RefCell<Vec<Event>>,
        attributes: RefCell<BTreeMap<usize, BTreeMap<String, String>>>,
        body: RefCell<Vec<usize>>,
        next_id: RefCell<usize>,
        reject_append: bool,
    }

    impl RecordingDocument {
        fn events(&self) -> Vec<Event> {
            self.events.borrow().clone()
        }
    }

    impl Document for RecordingDocument {
        type Anchor = usize;

        fn create_anchor(&self) -> Result<usize, ExportError> {
            let mut next = self.next_id.borrow_mut();
            let id = *next;
            *next += 1;
            self.attributes.borrow_mut().insert(id, Default::default());
            self.events.borrow_mut().push(Event::Create(id));
            Ok(id)
        }

        fn set_attribute(
            &self,
            anchor: &usize,
            name: &str,
            value: &str,
        ) -> Result<(), ExportError> {
            self.attributes
                .borrow_mut()
                .entry(*anchor)
                .or_default()
                .insert(name.into(), value.into());
            self.events
                .borrow_mut()
                .push(Event::SetAttribute(*anchor, name.into(), value.into()));
            Ok(())
        }

        fn append_to_body(&self, anchor: &usize) -> Result<(), ExportError> {
            if self.reject_append {
                return Err(ExportError::primitive("appendChild", "HierarchyRequestError"));
            }
            self.body.borrow_mut().push(*anchor);
            self.events.borrow_mut().push(Event::Append(*anchor));
            Ok(())
        }

        fn click(&self, anchor: &usize) {
            let attributes = self.attributes.borrow()[anchor].clone();
            self.events.borrow_mut().push(Event::Click(*anchor, attributes));
        }

        fn remove(&self, anchor: &usize) {
            self.body.borrow_mut().retain(|id| id != anchor);
            self.events.borrow_mut().push(Event::Remove(*anchor));
        }
    }

    #[test]
    fn test_anchor_lifecycle() {
        let mut sink = AnchorSink::new(RecordingDocument::default());
        trigger_json_download(&mut sink, r#"{"a":1}"#, "data").unwrap();

        let href = "data:text/json;charset=utf-8,%7B%22a%22%3A1%7D".to_string();
        let attributes: BTreeMap<String, String> = [
            ("href".to_string(), href.clone()),
            ("download".to_string(), "data.json".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            sink.document().events(),
            vec![
                Event::Create(0),
                Event::SetAttribute(0, "href".into(), href),
                Event::SetAttribute(0, "download".into(), "data.json".into()),
                Event::Append(0),
                Event::Click(0, attributes),
                Event::Remove(0),
            ]
        );
        assert!(sink.document().body.borrow().is_empty());
    }

    #[test]
    fn test_empty_payload_still_clicks() {
        let mut sink = AnchorSink::new(RecordingDocument::default());
        trigger_json_download(&mut sink, "", "empty").unwrap();

        let events = sink.document().events();
        let clicks: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                Event::Click(_, attributes) => Some(attributes.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0]["href"], "data:text/json;charset=utf-8,");
        assert_eq!(clicks[0]["download"], "empty.json");
    }

    #[test]
    fn test_each_call_gets_its_own_anchor() {
        let mut sink = AnchorSink::new(RecordingDocument::default());
        trigger_json_download(&mut sink, "[1]", "one").unwrap();
        trigger_json_download(&mut sink, "[2]", "two").unwrap();

        let events = sink.document().events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, Event::Create(_)))
                .count(),
            2
        );
        assert!(events.contains(&Event::SetAttribute(1, "href".into(), data_uri("[2]"))));
        assert!(events.contains(&Event::SetAttribute(1, "download".into(), "two.json".into())));
        assert!(!events.contains(&Event::SetAttribute(1, "href".into(), data_uri("[1]"))));
        assert_eq!(events.last(), Some(&Event::Remove(1)));
        assert!(sink.document().body.borrow().is_empty());
    }

    #[test]
    fn test_rejected_append_does_not_click() {
        let mut sink = AnchorSink::new(RecordingDocument {
            reject_append: true,
            ..Default::default()
        });

        let res = trigger_json_download(&mut sink, "{}", "x");
        assert!(matches!(
            res,
            Err(ExportError::HostPrimitive {
                op: "appendChild",
                ..
            })
        ));

        let events = sink.document().events();
        assert!(!events.iter().any(|e| matches!(e, Event::Click(..))));
        assert!(sink.document().body.borrow().is_empty());
    }
}
