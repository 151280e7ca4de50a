/// A stack that always holds at least its root element, so that
/// `current` never has to deal with emptiness.
#[derive(Debug, Clone)]
pub struct NonemptyStack<T> {
    items: Vec<T>,
}

impl<T> NonemptyStack<T> {
    pub fn new(root: T) -> Self {
        NonemptyStack { items: vec![root] }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Pops the top element. The root is never popped; `None` is returned
    /// when only the root remains.
    pub fn pop(&mut self) -> Option<T> {
        if self.items.len() > 1 {
            self.items.pop()
        } else {
            None
        }
    }

    pub fn current(&self) -> &T {
        self.items
            .last()
            .expect("a nonempty stack always has a root")
    }

    pub fn current_mut(&mut self) -> &mut T {
        self.items
            .last_mut()
            .expect("a nonempty stack always has a root")
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Nonempty by construction; provided for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the root if no other element is left on the stack.
    pub fn into_root(mut self) -> Result<T, Self> {
        if self.items.len() == 1 {
            Ok(self.items.remove(0))
        } else {
            Err(self)
        }
    }
}
