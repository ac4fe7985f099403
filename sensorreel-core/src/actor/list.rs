use crate::{
    actor::{Actor, ActorCore, ActorId, DEFAULT_PRIORITY},
    foundation::{error::ReelResult, geometry::Rect},
    render::canvas::Canvas,
};

/// Composite actor owning an ordered collection of children.
///
/// Children are kept stably sorted by priority. A tick forwards the same `(time, view)` to every
/// child in order and then prunes the children that became terminal.
pub struct ActorList {
    core: ActorCore,
    children: Vec<Box<dyn Actor>>,
    held_out: Option<ActorId>,
}

impl Default for ActorList {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorList {
    /// Empty list with the default priority.
    pub fn new() -> Self {
        Self {
            core: ActorCore::new(DEFAULT_PRIORITY),
            children: Vec::new(),
            held_out: None,
        }
    }

    /// Add `actor`, keeping priority order. Returns its id.
    pub fn push<A: Actor>(&mut self, actor: A) -> ActorId {
        self.push_boxed(Box::new(actor))
    }

    /// Add an already boxed actor.
    pub fn push_boxed(&mut self, actor: Box<dyn Actor>) -> ActorId {
        let id = actor.id();
        self.children.push(actor);
        self.sort();
        id
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// `true` when there are no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Direct children in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Actor + 'static)> {
        self.children.iter().map(|c| c.as_ref())
    }

    /// Direct children in priority order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Actor + 'static)> {
        self.children.iter_mut().map(|c| c.as_mut())
    }

    /// Depth-first lookup by id.
    pub fn find(&self, id: ActorId) -> Option<&(dyn Actor + 'static)> {
        for child in &self.children {
            if child.id() == id {
                return Some(child.as_ref());
            }
            if let Some(found) = child.as_list().and_then(|l| l.find(id)) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first lookup by id, mutably.
    pub fn find_mut(&mut self, id: ActorId) -> Option<&mut (dyn Actor + 'static)> {
        for child in &mut self.children {
            if child.id() == id {
                return Some(child.as_mut());
            }
            if let Some(found) = child.as_list_mut().and_then(|l| l.find_mut(id)) {
                return Some(found);
            }
        }
        None
    }

    /// Skip the direct child `id` when stepping. It is still painted and pruned.
    ///
    /// The scene uses this for the ego, which it steps ahead of the rest of the tree.
    pub fn hold_out(&mut self, id: Option<ActorId>) {
        self.held_out = id;
    }

    fn sort(&mut self) {
        self.children.sort_by_key(|c| c.core().priority);
    }
}

impl Actor for ActorList {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn update(&mut self, time: f64, view: Rect) -> ReelResult<()> {
        self.sort();
        for child in &mut self.children {
            if Some(child.id()) == self.held_out {
                continue;
            }
            child.step(time, view)?;
        }
        self.children.retain(|c| !c.done());
        Ok(())
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        for child in &self.children {
            child.plot(canvas)?;
        }
        Ok(())
    }

    fn as_list(&self) -> Option<&ActorList> {
        Some(self)
    }

    fn as_list_mut(&mut self) -> Option<&mut ActorList> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/actor/list.rs"]
mod tests;
