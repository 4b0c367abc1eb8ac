//! List View Binding
//!
//! Connects a mounted screen to one backend list controller: opens a list
//! handle on mount, closes it on cleanup and routes every failure to the
//! toast. Results that arrive after the screen is gone are dropped.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_app_context, AppContext};
use crate::models::{ItemCard, ListKind, ListView};

#[derive(Default)]
struct Lifetime {
    /// 0 until the backend issued a handle
    handle: AtomicU64,
    closed: AtomicBool,
}

#[derive(Clone, Copy)]
pub struct ListBinding {
    pub kind: ListKind,
    pub view: RwSignal<Option<ListView>>,
    /// A refresh / load-more / upload is running
    pub busy: RwSignal<bool>,
    life: StoredValue<Arc<Lifetime>>,
    ctx: AppContext,
}

impl ListBinding {
    /// Open a list for the current component and load its first page
    pub fn mount(kind: ListKind) -> Self {
        let life = Arc::new(Lifetime::default());
        let binding = Self {
            kind,
            view: RwSignal::new(None),
            busy: RwSignal::new(true),
            life: StoredValue::new(life.clone()),
            ctx: use_app_context(),
        };

        let cleanup_life = life.clone();
        on_cleanup(move || {
            cleanup_life.closed.store(true, Ordering::SeqCst);
            let handle = cleanup_life.handle.load(Ordering::SeqCst);
            if handle != 0 {
                spawn_local(async move {
                    let _ = commands::close_list(handle).await;
                });
            }
        });

        spawn_local(async move {
            match commands::open_list(kind).await {
                Ok(opened) => {
                    life.handle.store(opened.handle, Ordering::SeqCst);
                    if life.closed.load(Ordering::SeqCst) {
                        // Unmounted while opening
                        let _ = commands::close_list(opened.handle).await;
                        return;
                    }
                    binding.view.try_set(Some(opened));
                    binding.refresh();
                }
                Err(e) => {
                    binding.busy.try_set(false);
                    binding.ctx.error(e);
                }
            }
        });

        binding
    }

    fn handle(&self) -> Option<u64> {
        let life = self.life.try_get_value()?;
        if life.closed.load(Ordering::SeqCst) {
            return None;
        }
        match life.handle.load(Ordering::SeqCst) {
            0 => None,
            handle => Some(handle),
        }
    }

    fn is_alive(&self) -> bool {
        self.handle().is_some()
    }

    fn apply(&self, result: Result<ListView, String>) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.busy.try_set(false);
        match result {
            Ok(view) => {
                self.view.try_set(Some(view));
                true
            }
            Err(e) => {
                self.ctx.error(e);
                self.resync();
                false
            }
        }
    }

    /// Pull the backend's current list state after a failed operation
    fn resync(&self) {
        let Some(handle) = self.handle() else { return };
        let binding = *self;
        spawn_local(async move {
            if let Ok(view) = commands::list_snapshot(handle).await {
                if binding.is_alive() {
                    binding.view.try_set(Some(view));
                }
            }
        });
    }

    pub fn items(&self) -> Vec<ItemCard> {
        self.view.get().map(|view| view.items).unwrap_or_default()
    }

    pub fn has_more(&self) -> bool {
        self.view.get().is_some_and(|view| view.has_more)
    }

    pub fn refresh(&self) {
        let Some(handle) = self.handle() else { return };
        let binding = *self;
        binding.busy.set(true);
        spawn_local(async move {
            binding.apply(commands::refresh_list(handle).await);
        });
    }

    pub fn load_more(&self) {
        let Some(handle) = self.handle() else { return };
        if self.busy.get_untracked() {
            return;
        }
        let binding = *self;
        binding.busy.set(true);
        spawn_local(async move {
            binding.apply(commands::load_more(handle).await);
        });
    }

    pub fn remove(&self, id: String, on_removed: impl FnOnce() + 'static) {
        let Some(handle) = self.handle() else { return };
        let binding = *self;
        spawn_local(async move {
            if binding.apply(commands::remove_item(handle, &id).await) {
                binding.ctx.success("Deleted successfully");
                on_removed();
            }
        });
    }

    pub fn upload(&self, path: String, fields: BTreeMap<String, String>, on_uploaded: impl FnOnce() + 'static) {
        let Some(handle) = self.handle() else { return };
        let binding = *self;
        binding.busy.set(true);
        spawn_local(async move {
            if binding.apply(commands::upload_item(handle, &path, &fields).await) {
                binding.ctx.success("Uploaded successfully");
                on_uploaded();
            }
        });
    }

    /// Look an item up in the backend list (detail view)
    pub fn find(&self, id: String, on_found: impl FnOnce(Option<ItemCard>) + 'static) {
        let Some(handle) = self.handle() else { return };
        let binding = *self;
        spawn_local(async move {
            match commands::find_item(handle, &id).await {
                Ok(found) if binding.is_alive() => on_found(found),
                Ok(_) => {}
                Err(e) => binding.ctx.error(e),
            }
        });
    }
}
