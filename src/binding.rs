//! Declarative sprite bindings for display surfaces.
//!
//! A binding resolves a sprite key against the registry, derives display
//! markup from the cell's value, and keeps a host-provided surface current:
//! it re-renders whenever the value changes and, for reactive keys,
//! re-resolves whenever the key changes. A never-loaded key renders the
//! placeholder markup for its mode rather than failing.

use std::sync::{Arc, Mutex, PoisonError};

use crate::cell::{ObservableCell, Subscription};
use crate::mode::RenderMode;
use crate::registry::SpriteRegistry;

/// Class marking sprite elements; [`SPRITE_STYLESHEET`] sizes their content.
pub const SPRITE_CLASS: &str = "__sprite";

/// Sizing rule for sprite elements, to be injected once into the host
/// document: child content fills the element's box.
pub const SPRITE_STYLESHEET: &str = ".__sprite>*{display:block;width:100%;height:100%;}";

/// Markup for one image value under the given render mode.
///
/// Vector values are inline markup already and pass through verbatim;
/// raster values are image URLs wrapped in an `<img>` element.
pub fn render_markup(mode: RenderMode, value: &str) -> String {
    match mode {
        RenderMode::Vector => value.to_string(),
        RenderMode::Raster => format!("<img src=\"{value}\">"),
    }
}

/// A display element the host exposes to sprite bindings.
///
/// Implementations use interior mutability; bindings call them from
/// whichever thread performs the triggering write.
pub trait SpriteSurface: Send + Sync {
    /// Mark the element with a CSS class. Called once on attach.
    fn set_class(&self, class: &str);

    /// Replace the element's inner markup.
    fn set_markup(&self, markup: &str);
}

/// Key expression a binding resolves against the registry.
#[derive(Debug)]
pub enum SpriteKey {
    /// A key fixed for the binding's lifetime.
    Fixed(String),
    /// A reactive key; the binding follows every change of the cell.
    Cell(Arc<ObservableCell>),
}

impl From<&str> for SpriteKey {
    fn from(key: &str) -> Self {
        SpriteKey::Fixed(key.to_string())
    }
}

impl From<String> for SpriteKey {
    fn from(key: String) -> Self {
        SpriteKey::Fixed(key)
    }
}

impl From<Arc<ObservableCell>> for SpriteKey {
    fn from(cell: Arc<ObservableCell>) -> Self {
        SpriteKey::Cell(cell)
    }
}

struct BindingState {
    registry: Arc<SpriteRegistry>,
    mode: RenderMode,
    surface: Arc<dyn SpriteSurface>,
    value_sub: Mutex<Option<Subscription>>,
}

impl BindingState {
    fn render(&self, value: &str) {
        self.surface.set_markup(&render_markup(self.mode, value));
    }

    /// Resolve `key`, follow its cell, and render the current value.
    ///
    /// Subscribes before the initial read so a write landing in between is
    /// re-rendered rather than lost.
    fn rebind(self: &Arc<Self>, key: &str) {
        let cell = self.registry.get(key);

        let state = Arc::clone(self);
        let sub = cell.subscribe(move |value| state.render(value));
        *self
            .value_sub
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(sub);

        self.render(&cell.get());
    }

    fn release(&self) {
        self.value_sub
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

/// A live binding from a sprite key to a display surface.
///
/// Dropping the binding detaches all subscriptions; the surface keeps its
/// last markup.
pub struct SpriteBinding {
    state: Arc<BindingState>,
    key_sub: Option<Subscription>,
}

impl SpriteBinding {
    /// Attach a binding to `surface`.
    ///
    /// Marks the surface with [`SPRITE_CLASS`] and renders immediately.
    pub fn attach(
        registry: &Arc<SpriteRegistry>,
        mode: RenderMode,
        key: impl Into<SpriteKey>,
        surface: Arc<dyn SpriteSurface>,
    ) -> Self {
        surface.set_class(SPRITE_CLASS);

        let state = Arc::new(BindingState {
            registry: Arc::clone(registry),
            mode,
            surface,
            value_sub: Mutex::new(None),
        });

        let key_sub = match key.into() {
            SpriteKey::Fixed(key) => {
                state.rebind(&key);
                None
            }
            SpriteKey::Cell(key_cell) => {
                let watcher = Arc::clone(&state);
                let sub = key_cell.subscribe(move |key| watcher.rebind(key));
                state.rebind(&key_cell.get());
                Some(sub)
            }
        };

        Self { state, key_sub }
    }

    /// Detach the binding now instead of at drop.
    pub fn detach(self) {}

    fn release(&mut self) {
        self.key_sub.take();
        self.state.release();
    }
}

impl Drop for SpriteBinding {
    fn drop(&mut self) {
        self.release();
    }
}
