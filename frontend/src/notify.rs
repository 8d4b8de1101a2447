use std::rc::Rc;

use yew::{Reducible, UseReducerHandle};

use crate::config::MAX_TOASTS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Toasts {
    next_id: u32,
    pub items: Vec<Toast>,
}

pub enum ToastAction {
    Push { kind: ToastKind, title: String, description: Option<String> },
    Dismiss(u32),
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push { kind, title, description } => {
                next.items.push(Toast { id: next.next_id, kind, title, description });
                next.next_id = next.next_id.wrapping_add(1);
                if next.items.len() > MAX_TOASTS {
                    let overflow = next.items.len() - MAX_TOASTS;
                    next.items.drain(..overflow);
                }
            }
            ToastAction::Dismiss(id) => next.items.retain(|toast| toast.id != id),
        }
        Rc::new(next)
    }
}

pub type Notifier = UseReducerHandle<Toasts>;

pub trait Notify {
    fn notify(&self, kind: ToastKind, title: &str, description: Option<&str>);

    fn success(&self, title: &str) {
        self.notify(ToastKind::Success, title, None);
    }

    fn error_with(&self, title: &str, description: &str) {
        self.notify(ToastKind::Error, title, Some(description));
    }
}

impl Notify for Notifier {
    fn notify(&self, kind: ToastKind, title: &str, description: Option<&str>) {
        self.dispatch(ToastAction::Push {
            kind,
            title: title.to_string(),
            description: description.map(str::to_string),
        });
    }
}

/// Pages read the notifier from context; without a provider messages only reach the log.
impl<N: Notify> Notify for Option<N> {
    fn notify(&self, kind: ToastKind, title: &str, description: Option<&str>) {
        match self {
            Some(notifier) => notifier.notify(kind, title, description),
            None => log::warn!("no notifier mounted, dropped {:?} toast: {}", kind, title),
        }
    }
}
