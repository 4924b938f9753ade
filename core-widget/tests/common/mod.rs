//! In-process host used by the integration tests.
//!
//! Elements form a small tree; the transport records each connection and the
//! method table it was given, so tests can play the part of the widget frame.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bridge_traits::error::Result;
use bridge_traits::layout::{ContainerStyle, FrameLayout, FrameStyle};
use bridge_traits::transport::{ChildConnection, FrameTransport, MethodTable};
use url::Url;

#[derive(Debug, Default)]
pub struct NodeData {
    pub tag: &'static str,
    pub src: Option<String>,
    pub style: Vec<(String, String)>,
    pub scrolling: Option<bool>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default)]
pub struct Node(Arc<Mutex<NodeData>>);

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Node(Arc::new(Mutex::new(NodeData {
            tag,
            ..NodeData::default()
        })))
    }

    pub fn tag(&self) -> &'static str {
        self.0.lock().unwrap().tag
    }

    pub fn src(&self) -> Option<String> {
        self.0.lock().unwrap().src.clone()
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.lock().unwrap().children.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0
            .lock()
            .unwrap()
            .style
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.clone())
    }

    pub fn scrolling(&self) -> Option<bool> {
        self.0.lock().unwrap().scrolling
    }

    pub fn same_as(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn append(&self, child: Node) {
        self.0.lock().unwrap().children.push(child);
    }

    fn set_style(&self, declarations: Vec<(&'static str, String)>) {
        let mut data = self.0.lock().unwrap();
        for (property, value) in declarations {
            data.style.retain(|(name, _)| name != property);
            data.style.push((property.to_string(), value));
        }
    }
}

pub struct Connection {
    pub url: Url,
    pub parent: Node,
    pub methods: MethodTable,
}

#[derive(Default)]
pub struct FakeHost {
    connections: Mutex<Vec<Connection>>,
    plain_frames: Mutex<Vec<Url>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().unwrap().len()
    }

    pub fn plain_frame_count(&self) -> usize {
        self.plain_frames.lock().unwrap().len()
    }

    /// Method table handed to the `index`-th connection.
    pub fn methods(&self, index: usize) -> MethodTable {
        self.connections.lock().unwrap()[index].methods.clone()
    }

    pub fn connected_url(&self, index: usize) -> Url {
        self.connections.lock().unwrap()[index].url.clone()
    }

    fn new_frame(url: &Url, append_to: &Node) -> Node {
        let frame = Node::new("iframe");
        frame.0.lock().unwrap().src = Some(url.to_string());
        append_to.append(frame.clone());
        frame
    }
}

impl FrameLayout for FakeHost {
    type Element = Node;

    fn insert_container(&self, parent: &Node, style: &ContainerStyle) -> Result<Node> {
        let container = Node::new("div");
        container.set_style(style.css_declarations());
        parent.append(container.clone());
        Ok(container)
    }

    fn create_frame(&self, url: &Url, append_to: &Node) -> Result<Node> {
        self.plain_frames.lock().unwrap().push(url.clone());
        Ok(Self::new_frame(url, append_to))
    }

    fn style_frame(&self, frame: &Node, style: &FrameStyle) -> Result<()> {
        frame.set_style(style.css_declarations());
        frame.0.lock().unwrap().scrolling = Some(style.scrolling);
        Ok(())
    }
}

impl FrameTransport for FakeHost {
    fn connect_to_child(
        &self,
        url: &Url,
        append_to: &Node,
        methods: MethodTable,
    ) -> Result<ChildConnection<Node>> {
        let frame = Self::new_frame(url, append_to);
        self.connections.lock().unwrap().push(Connection {
            url: url.clone(),
            parent: append_to.clone(),
            methods,
        });
        Ok(ChildConnection { frame })
    }
}
