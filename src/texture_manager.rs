use egui::{Context, TextureHandle, TextureId, TextureOptions};
use std::collections::HashMap;

use crate::bitmap::Bitmap;

/// Uploads bitmaps to the GPU once and keeps the handles around.
///
/// Least recently used textures are dropped once the cache grows past
/// `max_cache_size`.
pub struct TextureManager {
    /// Cache of textures by bitmap id
    texture_cache: HashMap<usize, TextureHandle>,
    /// Tracks when each texture was last used
    last_used: HashMap<usize, u64>,
    /// Current frame counter for LRU tracking
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    pub fn get_or_create_texture(&mut self, bitmap: &Bitmap, ctx: &Context) -> TextureId {
        let key = bitmap.id();
        self.last_used.insert(key, self.current_frame);

        if let Some(handle) = self.texture_cache.get(&key) {
            return handle.id();
        }

        let max_side = ctx.input(|i| i.max_texture_side);
        let name = format!("bitmap_{}", key);
        let handle = ctx.load_texture(name, bitmap.texture_image(max_side), TextureOptions::LINEAR);
        let id = handle.id();
        self.texture_cache.insert(key, handle);
        self.prune_cache_if_needed();
        id
    }

    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }

        let mut entries: Vec<(usize, u64)> = self.last_used.iter().map(|(k, v)| (*k, *v)).collect();
        // Oldest first
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() - self.max_cache_size;
        for (key, _) in entries.into_iter().take(to_remove) {
            log::debug!("Evicting texture for bitmap {}", key);
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn contains(&self, bitmap: &Bitmap) -> bool {
        self.texture_cache.contains_key(&bitmap.id())
    }
}
