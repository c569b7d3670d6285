use std::sync::{Arc, Mutex, MutexGuard};

use crate::decode::DecodedImage;

/// Hand-off point between the watcher thread and the renderer: one
/// lock-guarded image plus a generation counter so the renderer can tell
/// whether the texture it uploaded is still current.
pub struct ImageSlot {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    generation: u64,
    image: Option<Arc<DecodedImage>>,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Replace the current image. The superseded image is freed once the last
    /// outstanding snapshot drops.
    pub fn publish(&self, image: DecodedImage) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.image = Some(Arc::new(image));
    }

    /// Generation counter and current image, or None before the first
    /// publish. Returns an Arc clone so the lock is not held while rendering.
    pub fn snapshot(&self) -> Option<(u64, Arc<DecodedImage>)> {
        let inner = self.lock();
        inner
            .image
            .as_ref()
            .map(|image| (inner.generation, Arc::clone(image)))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Default for ImageSlot {
    fn default() -> Self {
        Self::new()
    }
}
