use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use wim_protocol::FrameId;

use crate::error::GraphError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Literal(String),
    Frame(FrameId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub role: String,
    pub value: PropertyValue,
}

/// One frame instance, named `<instance_type>-<index>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub instance_type: String,
    pub index: usize,
    pub properties: Vec<Property>,
}

impl Frame {
    pub fn name(&self) -> String {
        format!("{}-{}", self.instance_type, self.index)
    }

    /// Latest value recorded for a role.
    pub fn get(&self, role: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .rev()
            .find(|p| p.role == role)
            .map(|p| &p.value)
    }
}

/// The WIM: frames in creation order, with an edge for every property that
/// refers to another frame. Frames never own each other; a reference is an
/// edge plus the target's id.
pub struct WimGraph {
    graph: Graph<Frame, String, Directed>,
    counters: HashMap<String, usize>,
}

impl WimGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            counters: HashMap::new(),
        }
    }

    /// Creates the next instance of `instance_type`, numbered from 1.
    pub fn add_frame(&mut self, instance_type: impl Into<String>) -> FrameId {
        let instance_type = instance_type.into();
        let counter = self.counters.entry(instance_type.clone()).or_insert(0);
        *counter += 1;

        let idx = self.graph.add_node(Frame {
            instance_type,
            index: *counter,
            properties: Vec::new(),
        });
        FrameId(idx.index() as u32)
    }

    pub fn add_literal(
        &mut self,
        frame: FrameId,
        role: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.frame_mut(frame)?.properties.push(Property {
            role: role.into(),
            value: PropertyValue::Literal(value.into()),
        });
        Ok(())
    }

    pub fn add_reference(
        &mut self,
        from: FrameId,
        role: impl Into<String>,
        to: FrameId,
    ) -> Result<(), GraphError> {
        let role = role.into();
        if self.graph.node_weight(Self::node(to)).is_none() {
            return Err(GraphError::UnknownFrame(to));
        }

        self.frame_mut(from)?.properties.push(Property {
            role: role.clone(),
            value: PropertyValue::Frame(to),
        });
        self.graph.add_edge(Self::node(from), Self::node(to), role);
        Ok(())
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.graph.node_weight(Self::node(id))
    }

    fn frame_mut(&mut self, id: FrameId) -> Result<&mut Frame, GraphError> {
        self.graph
            .node_weight_mut(Self::node(id))
            .ok_or(GraphError::UnknownFrame(id))
    }

    pub fn name(&self, id: FrameId) -> Option<String> {
        self.frame(id).map(Frame::name)
    }

    /// Looks a frame up by its instance name, e.g. `hit-1`.
    pub fn find(&self, name: &str) -> Option<FrameId> {
        self.frames()
            .find(|(_, frame)| frame.name() == name)
            .map(|(id, _)| id)
    }

    /// Frames in creation order.
    pub fn frames(&self) -> impl Iterator<Item = (FrameId, &Frame)> {
        self.graph
            .node_indices()
            .map(move |idx| (FrameId(idx.index() as u32), &self.graph[idx]))
    }

    /// Frames that hold a property pointing at `id`.
    pub fn referrers(&self, id: FrameId) -> Vec<FrameId> {
        let mut out: Vec<FrameId> = self
            .graph
            .edges_directed(Self::node(id), Direction::Incoming)
            .map(|edge| FrameId(edge.source().index() as u32))
            .collect();
        out.sort();
        out.dedup();
        out
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Role to rendered value, one entry per role: a repeated role keeps
    /// its first position and takes the latest value.
    pub fn properties(&self, id: FrameId) -> Vec<(&str, String)> {
        let mut out: Vec<(&str, String)> = Vec::new();
        let frame = match self.frame(id) {
            Some(frame) => frame,
            None => return out,
        };

        for property in &frame.properties {
            let value = match &property.value {
                PropertyValue::Literal(text) => text.clone(),
                PropertyValue::Frame(target) => self.name(*target).unwrap_or_default(),
            };
            match out.iter_mut().find(|(role, _)| *role == property.role) {
                Some(slot) => slot.1 = value,
                None => out.push((property.role.as_str(), value)),
            }
        }
        out
    }

    fn node(id: FrameId) -> NodeIndex {
        NodeIndex::new(id.index())
    }
}

impl Default for WimGraph {
    fn default() -> Self {
        Self::new()
    }
}

struct FrameProperties<'a>(Vec<(&'a str, String)>);

impl Serialize for FrameProperties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (role, value) in &self.0 {
            map.serialize_entry(role, value)?;
        }
        map.end()
    }
}

/// `{ "<frame name>": { "<role>": "<literal or frame name>" } }`
impl Serialize for WimGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (id, frame) in self.frames() {
            map.serialize_entry(&frame.name(), &FrameProperties(self.properties(id)))?;
        }
        map.end()
    }
}

impl fmt::Display for WimGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, frame) in self.frames() {
            writeln!(f, "{}", frame.name())?;
            for (role, value) in self.properties(id) {
                writeln!(f, "  {} - {}", role, value)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for WimGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.frames().map(|(id, frame)| (frame.name(), self.properties(id))))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_count_per_type() {
        let mut wim = WimGraph::new();
        let hit = wim.add_frame("hit");
        let man = wim.add_frame("man");
        let hit2 = wim.add_frame("hit");

        assert_eq!(wim.name(hit).as_deref(), Some("hit-1"));
        assert_eq!(wim.name(man).as_deref(), Some("man-1"));
        assert_eq!(wim.name(hit2).as_deref(), Some("hit-2"));
        assert_eq!(wim.find("hit-2"), Some(hit2));
        assert_eq!(wim.find("hit-3"), None);
    }

    #[test]
    fn test_serialization_order() {
        let mut wim = WimGraph::new();
        let verb = wim.add_frame("hit");
        let agent = wim.add_frame("man");
        let other = wim.add_frame("dog");
        wim.add_literal(verb, "fromtext", "the man hit").unwrap();
        wim.add_reference(verb, "AGENT", agent).unwrap();
        wim.add_literal(verb, "TIME", "now").unwrap();
        wim.add_reference(verb, "AGENT", other).unwrap();

        let json = serde_json::to_string(&wim).unwrap();
        assert_eq!(
            json,
            r#"{"hit-1":{"fromtext":"the man hit","AGENT":"dog-1","TIME":"now"},"man-1":{},"dog-1":{}}"#
        );
        assert_eq!(wim.frame(verb).unwrap().get("AGENT"), Some(&PropertyValue::Frame(other)));
    }

    #[test]
    fn test_references_are_edges() {
        let mut wim = WimGraph::new();
        let a = wim.add_frame("give");
        let b = wim.add_frame("take");
        let c = wim.add_frame("John");
        wim.add_reference(a, "AGENT", c).unwrap();
        wim.add_reference(b, "AGENT", c).unwrap();
        wim.add_reference(b, "SOURCE", c).unwrap();

        assert_eq!(wim.referrers(c), vec![a, b]);
        assert!(wim.referrers(a).is_empty());
        assert_eq!(
            wim.add_reference(a, "THEME", FrameId(42)),
            Err(GraphError::UnknownFrame(FrameId(42)))
        );
        assert_eq!(wim.frame(a).unwrap().properties.len(), 1);
    }
}
