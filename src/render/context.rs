//! Rendering context - read-only lookups for one render pass

use std::collections::HashMap;

use crate::model::{Diagram, MetricValues, Node, Style};

use super::link::LinkResolver;

/// Lookups built once at the start of a render and never mutated.
pub struct RenderContext<'a> {
    pub diagram: &'a Diagram,
    pub values: &'a MetricValues,
    pub links: &'a dyn LinkResolver,
    /// Nodes by label
    nodes: HashMap<&'a str, &'a Node>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        diagram: &'a Diagram,
        values: &'a MetricValues,
        links: &'a dyn LinkResolver,
    ) -> Self {
        let nodes = diagram.nodes.iter().map(|n| (n.label.as_str(), n)).collect();
        Self {
            diagram,
            values,
            links,
            nodes,
        }
    }

    pub fn node(&self, label: &str) -> Option<&'a Node> {
        self.nodes.get(label).copied()
    }

    pub fn style(&self, name: Option<&str>) -> Option<&'a Style> {
        name.and_then(|n| self.diagram.styles.get(n))
    }

    pub fn value(&self, metric: Option<&str>) -> Option<f64> {
        self.values.lookup(metric)
    }
}
