//! # Image Library
//!
//! The immutable table of prepared images the server hands out. It is built once at
//! startup, before the listener opens, and shared read-only with every request.
//!
//! Rotation order is insertion order: configured images first, then the placeholder.

use std::collections::HashMap;
use std::path::Path;

use axum::body::Bytes;
use eink_pack::pack::Quantization;
use eink_pack::pipeline::prepare;
use eink_pack::{Bitmap, PackedBuffer, Size};
use fast_image_resize::Resizer;
use image::GrayImage;
use tracing::{debug, info};

use crate::config::{ImageEntry, ServerConfig};
use crate::error::{ServeError, ServeResult};
use crate::placeholder;

/// One prepared image: packed panel bytes plus the dimensions they encode.
#[derive(Clone, Debug)]
pub struct CachedImage {
    name: String,
    size: Size,
    body: Bytes,
}

impl CachedImage {
    fn new(name: String, packed: PackedBuffer) -> Self {
        let size = packed.size();
        Self {
            name,
            size,
            body: Bytes::from(packed.into_bytes()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.w
    }

    pub fn height(&self) -> u32 {
        self.size.h
    }

    /// Packed bytes. Cloning is a reference-count bump.
    pub fn body(&self) -> Bytes {
        self.body.clone()
    }
}

#[derive(Debug)]
pub struct ImageLibrary {
    images: Vec<CachedImage>,
    index: HashMap<String, usize>,
}

impl ImageLibrary {
    /// Load, resize, and pack every image named by `config`.
    pub fn build(config: &ServerConfig) -> ServeResult<Self> {
        let bounds = config.display.bounds();
        let mut builder = LibraryBuilder::new(bounds, config.display.quantization());

        for entry in &config.images {
            builder.add_file(entry)?;
        }

        if config.placeholder.enabled {
            let canvas = placeholder::render(bounds, &config.placeholder);
            builder.add_luma(&config.placeholder.name, canvas)?;
        }

        builder.finish()
    }

    pub fn builder(bounds: Size, quantization: Quantization) -> LibraryBuilder {
        LibraryBuilder::new(bounds, quantization)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&CachedImage> {
        self.images.get(position)
    }

    pub fn by_name(&self, name: &str) -> Option<&CachedImage> {
        self.index.get(name).map(|&i| &self.images[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CachedImage> {
        self.images.iter()
    }
}

/// Accumulates prepared images. Reuses one resizer across all of them.
pub struct LibraryBuilder {
    resizer: Resizer,
    bounds: Size,
    quantization: Quantization,
    images: Vec<CachedImage>,
    index: HashMap<String, usize>,
}

impl LibraryBuilder {
    fn new(bounds: Size, quantization: Quantization) -> Self {
        Self {
            resizer: Resizer::new(),
            bounds,
            quantization,
            images: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Decode an image file as 8-bit luma and add it.
    pub fn add_file(&mut self, entry: &ImageEntry) -> ServeResult<&mut Self> {
        let luma = load_luma(&entry.name, &entry.path)?;
        self.add_luma(&entry.name, luma)
    }

    pub fn add_luma(&mut self, name: &str, image: GrayImage) -> ServeResult<&mut Self> {
        let size = Size::new(image.width(), image.height());
        let bitmap = Bitmap::new(size, image.into_raw()).map_err(|source| ServeError::Prepare {
            name: name.to_string(),
            source,
        })?;
        self.add_bitmap(name, &bitmap)
    }

    pub fn add_bitmap(&mut self, name: &str, bitmap: &Bitmap) -> ServeResult<&mut Self> {
        if self.index.contains_key(name) {
            return Err(ServeError::DuplicateImage(name.to_string()));
        }

        let packed = prepare(&mut self.resizer, bitmap, self.bounds, self.quantization).map_err(
            |source| ServeError::Prepare {
                name: name.to_string(),
                source,
            },
        )?;

        info!(
            name,
            source = %bitmap.size(),
            output = %packed.size(),
            bytes = packed.as_bytes().len(),
            "prepared image"
        );

        self.index.insert(name.to_string(), self.images.len());
        self.images.push(CachedImage::new(name.to_string(), packed));
        Ok(self)
    }

    pub fn finish(self) -> ServeResult<ImageLibrary> {
        if self.images.is_empty() {
            return Err(ServeError::EmptyLibrary);
        }
        Ok(ImageLibrary {
            images: self.images,
            index: self.index,
        })
    }
}

fn load_luma(name: &str, path: &Path) -> ServeResult<GrayImage> {
    debug!(name, path = %path.display(), "loading image");
    let decoded = image::open(path).map_err(|source| ServeError::ImageLoad {
        name: name.to_string(),
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decoded.into_luma8())
}
