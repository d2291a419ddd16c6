use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{self, Child, Node};
use crate::logging::{log, obj, v_str, Domain, Level};

pub const BUSY_LABEL: &str = "Testing...";

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonState {
    Idle,
    Busy { saved_label: Vec<Child> },
}

/// Idle/busy state of one interactive element.
#[derive(Debug, Clone)]
pub struct ButtonController {
    node: Node,
    state: Rc<RefCell<ButtonState>>,
}

impl ButtonController {
    pub fn new(node: Node) -> Self {
        Self {
            node,
            state: Rc::new(RefCell::new(ButtonState::Idle)),
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn state(&self) -> ButtonState {
        self.state.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        matches!(*self.state.borrow(), ButtonState::Busy { .. })
    }

    /// idle -> busy. The returned guard performs busy -> idle when dropped,
    /// so every exit path of the caller restores the button. A busy button is
    /// disabled and yields no guard.
    pub fn engage(&self) -> Option<BusyGuard> {
        let mut state = self.state.borrow_mut();
        if let ButtonState::Busy { .. } = *state {
            return None;
        }
        let saved_label = std::mem::take(&mut self.node.borrow_mut().children);
        dom::set_text(&self.node, BUSY_LABEL);
        dom::set_attr(&self.node, "disabled", "true");
        *state = ButtonState::Busy { saved_label };
        log(
            Level::Trace,
            Domain::Ui,
            "button_busy",
            obj(&[("label", v_str(&dom::text_content(&self.node)))]),
        );
        Some(BusyGuard {
            button: self.clone(),
        })
    }

    fn release(&self) {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), ButtonState::Idle);
        if let ButtonState::Busy { saved_label } = previous {
            self.node.borrow_mut().children = saved_label;
        }
        dom::remove_attr(&self.node, "disabled");
    }
}

#[must_use = "dropping the guard immediately returns the button to idle"]
pub struct BusyGuard {
    button: ButtonController,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.button.release();
    }
}
