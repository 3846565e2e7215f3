//! Imaging primitive trait and shared error type.
//!
//! The [`ImageBackend`] trait is the full contract the
//! [`Image`](super::image::Image) container imposes on an imaging library:
//! decode, encode, resample, and colorspace conversion. Nothing else in the
//! crate talks to a codec directly.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) on top of the `image`
//! crate. Tests swap in a recording mock.

use super::buffer::PixelBuffer;
use super::params::{Components, ResizeFilter};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for imaging primitives.
///
/// Implementations must preserve the component count of their input unless
/// the operation is a conversion, and must return buffers whose shape is
/// exactly what was asked for.
pub trait ImageBackend {
    /// Decode an image file into an 8-bit buffer.
    fn decode(&self, path: &Path) -> Result<PixelBuffer, BackendError>;

    /// Encode a buffer to `path`, choosing the format from the extension.
    fn encode(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), BackendError>;

    /// Resample to exactly `width × height` using `filter`.
    fn resample(
        &self,
        buffer: &PixelBuffer,
        width: u32,
        height: u32,
        filter: ResizeFilter,
    ) -> Result<PixelBuffer, BackendError>;

    /// Colorspace conversion to `target` channels.
    ///
    /// Only called for the pairs the container supports: gray to color,
    /// color to gray, and adding or dropping alpha on color.
    fn convert(&self, buffer: &PixelBuffer, target: Components)
    -> Result<PixelBuffer, BackendError>;
}

impl<B: ImageBackend + ?Sized> ImageBackend for &B {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, BackendError> {
        (**self).decode(path)
    }

    fn encode(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), BackendError> {
        (**self).encode(buffer, path)
    }

    fn resample(
        &self,
        buffer: &PixelBuffer,
        width: u32,
        height: u32,
        filter: ResizeFilter,
    ) -> Result<PixelBuffer, BackendError> {
        (**self).resample(buffer, width, height, filter)
    }

    fn convert(
        &self,
        buffer: &PixelBuffer,
        target: Components,
    ) -> Result<PixelBuffer, BackendError> {
        (**self).convert(buffer, target)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that records operations and returns zeroed buffers of
    /// the requested shape instead of doing pixel work.
    #[derive(Default)]
    pub struct MockBackend {
        pub decode_results: Mutex<Vec<PixelBuffer>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Encode {
            output: String,
            width: u32,
            height: u32,
            components: Components,
        },
        Resample {
            from: (u32, u32),
            to: (u32, u32),
            filter: ResizeFilter,
        },
        Convert {
            from: Components,
            to: Components,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_decoded(buffers: Vec<PixelBuffer>) -> Self {
            Self {
                decode_results: Mutex::new(buffers),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<PixelBuffer, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(path.to_string_lossy().to_string()));

            self.decode_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| BackendError::Decode("No mock buffer".to_string()))
        }

        fn encode(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                output: path.to_string_lossy().to_string(),
                width: buffer.width(),
                height: buffer.height(),
                components: buffer.components(),
            });
            Ok(())
        }

        fn resample(
            &self,
            buffer: &PixelBuffer,
            width: u32,
            height: u32,
            filter: ResizeFilter,
        ) -> Result<PixelBuffer, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Resample {
                from: (buffer.width(), buffer.height()),
                to: (width, height),
                filter,
            });
            Ok(PixelBuffer::zeroed(width, height, buffer.components()))
        }

        fn convert(
            &self,
            buffer: &PixelBuffer,
            target: Components,
        ) -> Result<PixelBuffer, BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Convert {
                from: buffer.components(),
                to: target,
            });
            Ok(PixelBuffer::zeroed(buffer.width(), buffer.height(), target))
        }
    }

    #[test]
    fn mock_records_decode() {
        let backend =
            MockBackend::with_decoded(vec![PixelBuffer::zeroed(8, 6, Components::Rgb)]);

        let buffer = backend.decode(Path::new("/test/image.png")).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (8, 6));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/test/image.png"));
    }

    #[test]
    fn mock_decode_without_results_errors() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.decode(Path::new("/missing.png")),
            Err(BackendError::Decode(_))
        ));
    }

    #[test]
    fn mock_records_resample() {
        let backend = MockBackend::new();
        let source = PixelBuffer::zeroed(10, 10, Components::Rgba);

        let out = backend
            .resample(&source, 4, 3, ResizeFilter::Bicubic)
            .unwrap();

        assert_eq!((out.width(), out.height()), (4, 3));
        assert_eq!(out.components(), Components::Rgba);
        assert_eq!(
            backend.get_operations(),
            vec![RecordedOp::Resample {
                from: (10, 10),
                to: (4, 3),
                filter: ResizeFilter::Bicubic,
            }]
        );
    }

    #[test]
    fn backend_reference_forwards() {
        let backend = MockBackend::new();
        let by_ref: &MockBackend = &backend;
        let source = PixelBuffer::zeroed(2, 2, Components::Gray);

        (&by_ref).convert(&source, Components::Rgb).unwrap();
        assert_eq!(backend.get_operations().len(), 1);
    }
}
