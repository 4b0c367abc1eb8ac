//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    /// Distinguishes repeated identical messages
    pub id: u32,
    pub kind: ToastKind,
    pub text: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Notification currently shown - read
    pub toast: ReadSignal<Option<ToastMessage>>,
    /// Notification currently shown - write
    set_toast: WriteSignal<Option<ToastMessage>>,
    next_toast_id: StoredValue<u32>,
}

impl AppContext {
    pub fn new(toast: (ReadSignal<Option<ToastMessage>>, WriteSignal<Option<ToastMessage>>)) -> Self {
        Self {
            toast: toast.0,
            set_toast: toast.1,
            next_toast_id: StoredValue::new(0),
        }
    }

    fn show(&self, kind: ToastKind, text: String) {
        self.next_toast_id.update_value(|id| *id += 1);
        let id = self.next_toast_id.get_value();
        self.set_toast.set(Some(ToastMessage { id, kind, text }));
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(ToastKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        let text = text.into();
        web_sys::console::warn_1(&format!("[APP] {}", text).into());
        self.show(ToastKind::Error, text);
    }

    /// Hide the toast, unless a newer one replaced it
    pub fn dismiss(&self, id: u32) {
        if self.toast.get_untracked().map(|t| t.id) == Some(id) {
            self.set_toast.set(None);
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
