//! Background texture decoding.
//!
//! Each image decodes on its own worker thread and reports back over a
//! channel. The render thread drains the channel with [`TextureLoader::poll`]
//! once per frame.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use parallax_engine::render::{ImageData, PixelFormat};

use crate::scene::TextureSlot;

/// Why a texture could not be produced.
#[derive(Debug)]
pub enum LoadErrorKind {
    /// The file could not be opened or decoded.
    Decode(image::ImageError),
    /// The file decoded to a zero-sized image.
    Empty,
    /// The worker went away without reporting.
    WorkerLost,
}

/// A failed load, tagged with the slot and path it was for.
#[derive(Debug)]
pub struct LoadError {
    pub slot: TextureSlot,
    pub path: PathBuf,
    pub kind: LoadErrorKind,
}

impl LoadError {
    fn new(slot: TextureSlot, path: &Path, kind: LoadErrorKind) -> Self {
        Self {
            slot,
            path: path.to_path_buf(),
            kind,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.kind {
            LoadErrorKind::Decode(e) => write!(f, "failed to load {} '{path}': {e}", self.slot),
            LoadErrorKind::Empty => write!(f, "{} '{path}' has no pixels", self.slot),
            LoadErrorKind::WorkerLost => {
                write!(f, "{} loader for '{path}' stopped without a result", self.slot)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            LoadErrorKind::Decode(e) => Some(e),
            _ => None,
        }
    }
}

/// Reads and decodes one texture synchronously.
///
/// Photos become sRGB RGBA8. Depth maps keep only their red channel as R8.
pub fn load_image(slot: TextureSlot, path: &Path) -> Result<ImageData, LoadError> {
    let decoded = image::open(path).map_err(|e| LoadError::new(slot, path, LoadErrorKind::Decode(e)))?;

    let (width, height) = (decoded.width(), decoded.height());
    let (format, pixels) = match slot {
        TextureSlot::Photo => (PixelFormat::Rgba8Srgb, decoded.into_rgba8().into_raw()),
        TextureSlot::DepthMap => {
            let red: Vec<u8> = decoded.into_rgb8().pixels().map(|p| p[0]).collect();
            (PixelFormat::R8, red)
        }
    };

    ImageData::new(width, height, format, pixels)
        .ok_or_else(|| LoadError::new(slot, path, LoadErrorKind::Empty))
}

/// One finished load.
#[derive(Debug)]
pub struct LoadEvent {
    pub slot: TextureSlot,
    pub result: Result<ImageData, LoadError>,
}

/// Runs the photo and depth-map loads concurrently.
#[derive(Debug)]
pub struct TextureLoader {
    rx: Receiver<LoadEvent>,
    /// Slots that have not reported yet, with the path each was started for.
    pending: Vec<(TextureSlot, PathBuf)>,
}

impl TextureLoader {
    /// Starts both loads. Results arrive in completion order.
    pub fn spawn(photo: impl Into<PathBuf>, depth: impl Into<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel();
        let jobs = [
            (TextureSlot::Photo, photo.into()),
            (TextureSlot::DepthMap, depth.into()),
        ];

        for (slot, path) in &jobs {
            spawn_worker(*slot, path.clone(), tx.clone());
        }

        Self {
            rx,
            pending: jobs.into(),
        }
    }

    /// Drains every completion that has arrived since the last call.
    ///
    /// If the workers vanish without reporting, the remaining slots are
    /// returned as [`LoadErrorKind::WorkerLost`].
    pub fn poll(&mut self) -> Vec<LoadEvent> {
        let mut out = Vec::new();

        while !self.pending.is_empty() {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.pending.retain(|(slot, _)| *slot != event.slot);
                    out.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    out.extend(self.pending.drain(..).map(|(slot, path)| LoadEvent {
                        slot,
                        result: Err(LoadError::new(slot, &path, LoadErrorKind::WorkerLost)),
                    }));
                }
            }
        }

        out
    }

    /// True once every slot has reported.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

fn spawn_worker(slot: TextureSlot, path: PathBuf, tx: Sender<LoadEvent>) {
    let name = match slot {
        TextureSlot::Photo => "parallax-load-photo",
        TextureSlot::DepthMap => "parallax-load-depth",
    };

    let worker_tx = tx.clone();
    let worker_path = path.clone();
    let spawned = thread::Builder::new().name(name.into()).spawn(move || {
        let result = load_image(slot, &worker_path);
        // Receiver dropped means the viewer shut down; nothing to report to.
        let _ = worker_tx.send(LoadEvent { slot, result });
    });

    if let Err(e) = spawned {
        log::error!("could not start {slot} loader thread: {e}");
        let io = image::ImageError::IoError(e);
        let _ = tx.send(LoadEvent {
            slot,
            result: Err(LoadError::new(slot, &path, LoadErrorKind::Decode(io))),
        });
    }
}
