use std::{cell::Cell, future::Future, rc::Rc};

/// Liveness flag shared between a view and the futures it starts. Output
/// produced after `deactivate` is dropped instead of being applied.
#[derive(Debug, Clone)]
pub struct ViewScope {
    active: Rc<Cell<bool>>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn deactivate(&self) {
        self.active.set(false);
    }

    pub async fn run<F, T>(&self, future: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let output = future.await;
        self.is_active().then_some(output)
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
