//! Flat arena scene graph.
//!
//! Nodes live in a single `Vec` and refer to their parent by index, so there
//! is no shared ownership and no interior mutability anywhere in the graph.
//! World transforms are computed on demand by walking the parent chain;
//! parents always precede children in the arena, which rules out cycles.

use thiserror::Error;

use crate::geom::Transform;

/// Handle into a [`SceneGraph`] arena. Only valid for the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneGraphError {
    #[error("node id {0} is not part of this scene graph")]
    UnknownNode(usize),
}

#[derive(Debug, Clone, PartialEq)]
struct SceneNode {
    parent: Option<NodeId>,
    local: Transform,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root node with an identity local transform.
    pub fn add_root(&mut self) -> NodeId {
        self.push(None, Transform::identity())
    }

    /// Adds a child of `parent` with an identity local transform.
    pub fn add_child(&mut self, parent: NodeId) -> Result<NodeId, SceneGraphError> {
        self.check(parent)?;
        Ok(self.push(Some(parent), Transform::identity()))
    }

    pub fn set_local_transform(
        &mut self,
        node: NodeId,
        local: Transform,
    ) -> Result<(), SceneGraphError> {
        self.check(node)?;
        self.nodes[node.0].local = local;
        Ok(())
    }

    pub fn local_transform(&self, node: NodeId) -> Result<Transform, SceneGraphError> {
        self.check(node)?;
        Ok(self.nodes[node.0].local)
    }

    /// Composes local transforms from the root down to `node`.
    pub fn world_transform(&self, node: NodeId) -> Result<Transform, SceneGraphError> {
        self.check(node)?;
        let mut world = self.nodes[node.0].local;
        let mut current = self.nodes[node.0].parent;
        while let Some(id) = current {
            world = self.nodes[id.0].local.compose(world);
            current = self.nodes[id.0].parent;
        }
        Ok(world)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, parent: Option<NodeId>, local: Transform) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode { parent, local });
        id
    }

    fn check(&self, node: NodeId) -> Result<(), SceneGraphError> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SceneGraphError::UnknownNode(node.0))
        }
    }
}
