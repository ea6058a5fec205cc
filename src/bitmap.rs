use egui::{ColorImage, Pos2, Vec2};
use futures::channel::oneshot;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ImageLoadError;

// Static counter for generating unique bitmap IDs
static NEXT_BITMAP_ID: AtomicUsize = AtomicUsize::new(1);

/// A decoded image, cheap to clone
#[derive(Clone)]
pub struct Bitmap {
    id: usize,
    pixels: Arc<ColorImage>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("id", &self.id)
            .field("size", &self.pixels.size)
            .finish()
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Bitmap {
    pub fn new(pixels: ColorImage) -> Self {
        let id = NEXT_BITMAP_ID.fetch_add(1, Ordering::SeqCst);
        Self {
            id,
            pixels: Arc::new(pixels),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn pixels(&self) -> &ColorImage {
        &self.pixels
    }

    /// Pixels for uploading as a texture no wider or taller than `max_side`.
    ///
    /// Oversized images are scaled down keeping their aspect ratio; the
    /// bitmap still draws at its natural size.
    pub fn texture_image(&self, max_side: usize) -> ColorImage {
        let [width, height] = self.pixels.size;
        let longest = width.max(height);
        if longest <= max_side || max_side == 0 {
            return (*self.pixels).clone();
        }

        let scale = max_side as f64 / longest as f64;
        let fit = |side: usize| ((side as f64 * scale).round() as u32).clamp(1, max_side as u32);
        let (new_width, new_height) = (fit(width), fit(height));
        log::debug!(
            "Scaling {}x{} image to {}x{} to fit the texture limit",
            width, height, new_width, new_height
        );

        let rgba = image::RgbaImage::from_fn(width as u32, height as u32, |x, y| {
            image::Rgba(self.pixels.pixels[y as usize * width + x as usize].to_srgba_unmultiplied())
        });
        let scaled = image::imageops::resize(&rgba, new_width, new_height, image::imageops::FilterType::Triangle);
        ColorImage::from_rgba_unmultiplied([new_width as usize, new_height as usize], scaled.as_raw())
    }

    /// Natural size in surface units (one pixel per unit).
    pub fn size(&self) -> Vec2 {
        let [w, h] = self.pixels.size;
        Vec2::new(w as f32, h as f32)
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) into RGBA pixels.
pub fn decode_bitmap(bytes: &[u8]) -> Result<Bitmap, ImageLoadError> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageLoadError::Empty { width, height });
    }

    log::debug!("Decoded image: {}x{}", width, height);
    let size = [width as usize, height as usize];
    Ok(Bitmap::new(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw())))
}

pub async fn decode_bitmap_async(bytes: Vec<u8>) -> Result<Bitmap, ImageLoadError> {
    decode_bitmap(&bytes)
}

/// The uploaded image and where it currently sits on the surface
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub bitmap: Bitmap,
    pub position: Pos2,
}

impl SelectedImage {
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            bitmap,
            position: Pos2::ZERO,
        }
    }
}

type LoadResult = Result<Bitmap, ImageLoadError>;

/// Decodes images in the background and hands back the outcome.
///
/// Natively the decode runs on a worker thread. On wasm it is a local task on
/// the page's event loop: it runs after the current frame, still on the UI
/// thread.
///
/// Only the most recent load is tracked: starting a new one drops the
/// receiver of the previous load and its result is discarded.
#[derive(Default)]
pub struct ImageLoader {
    pending: Option<(String, oneshot::Receiver<LoadResult>)>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_name(&self) -> Option<&str> {
        self.pending.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn start(&mut self, name: String, bytes: Vec<u8>) {
        log::info!("Loading image {} ({} bytes)", name, bytes.len());
        let (tx, rx) = oneshot::channel();
        spawn(async move {
            // The receiver is gone if a newer load replaced this one
            let _ = tx.send(decode_bitmap_async(bytes).await);
        });
        if let Some((old, _)) = self.pending.replace((name, rx)) {
            log::debug!("Discarding pending load of {}", old);
        }
    }

    /// Returns the finished result once, or `None` while still decoding.
    pub fn poll(&mut self) -> Option<(String, LoadResult)> {
        let (_, rx) = self.pending.as_mut()?;
        let result = match rx.try_recv() {
            Ok(None) => return None,
            Ok(Some(result)) => result,
            Err(oneshot::Canceled) => Err(ImageLoadError::Cancelled),
        };
        self.pending.take().map(|(name, _)| (name, result))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn<F>(future: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    std::thread::spawn(move || futures::executor::block_on(future));
}

#[cfg(target_arch = "wasm32")]
fn spawn<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let bitmap = decode_bitmap(&png_bytes(3, 2)).unwrap();
        assert_eq!(bitmap.size(), Vec2::new(3.0, 2.0));
        assert_eq!(bitmap.pixels().pixels[0], egui::Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_bitmap(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode(_)));
    }

    #[test]
    fn test_bitmap_ids_are_unique() {
        let a = decode_bitmap(&png_bytes(1, 1)).unwrap();
        let b = decode_bitmap(&png_bytes(1, 1)).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_loader_delivers_result() {
        let mut loader = ImageLoader::new();
        assert!(loader.poll().is_none());

        loader.start("tiny.png".to_owned(), png_bytes(2, 2));
        assert!(loader.is_loading());
        assert_eq!(loader.pending_name(), Some("tiny.png"));

        let (name, result) = loop {
            if let Some(done) = loader.poll() {
                break done;
            }
            std::thread::yield_now();
        };
        assert_eq!(name, "tiny.png");
        assert!(result.is_ok());
        assert!(!loader.is_loading());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_new_load_replaces_pending_one() {
        let mut loader = ImageLoader::new();
        loader.start("first.png".to_owned(), png_bytes(2, 2));
        loader.start("second.png".to_owned(), png_bytes(3, 3));
        assert_eq!(loader.pending_name(), Some("second.png"));

        let (name, result) = loop {
            if let Some(done) = loader.poll() {
                break done;
            }
            std::thread::yield_now();
        };
        assert_eq!(name, "second.png");
        assert_eq!(result.unwrap().size(), Vec2::new(3.0, 3.0));

        // The first result never shows up
        assert!(!loader.is_loading());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_texture_image_fits_limit() {
        let bitmap = Bitmap::new(ColorImage::new([40, 10], egui::Color32::RED));
        assert_eq!(bitmap.texture_image(64).size, [40, 10]);

        let scaled = bitmap.texture_image(20);
        assert_eq!(scaled.size, [20, 5]);
        assert_eq!(scaled.pixels[0], egui::Color32::RED);
    }
}
