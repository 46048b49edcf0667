use log::debug;

use crate::drawable::Drawable;

/// Committed drawables plus the stack of undone ones
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Oldest first, rendered in this order
    committed: Vec<Drawable>,
    /// Most recently undone on top
    undone: Vec<Drawable>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drawable. New work always invalidates redo.
    pub fn commit(&mut self, drawable: Drawable) {
        debug!(
            "Committing {} ({} undone dropped)",
            drawable.kind().name(),
            self.undone.len()
        );
        self.committed.push(drawable);
        self.undone.clear();
    }

    /// Move the newest committed drawable onto the undone stack.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(drawable) => {
                self.undone.push(drawable);
                true
            }
            None => {
                debug!("Nothing to undo");
                false
            }
        }
    }

    /// Restore the most recently undone drawable as the newest committed one.
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(drawable) => {
                self.committed.push(drawable);
                true
            }
            None => {
                debug!("Nothing to redo");
                false
            }
        }
    }

    /// Destructive reset of both stacks
    pub fn clear(&mut self) {
        self.committed.clear();
        self.undone.clear();
    }

    pub fn committed(&self) -> &[Drawable] {
        &self.committed
    }

    pub fn undone(&self) -> &[Drawable] {
        &self.undone
    }

    /// The newest committed drawable, which is the one a drawing session extends
    pub fn active_mut(&mut self) -> Option<&mut Drawable> {
        self.committed.last_mut()
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}
