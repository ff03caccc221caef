//! Capture device backed by prerecorded frames, for headless runs and tests.

use std::{
    fs,
    path::Path,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use anyhow::{bail, Context, Result};
use image::RgbaImage;
use uuid::Uuid;

use crate::errors::DeviceError;

use super::{CaptureConstraints, CaptureDevice, FrameSource, StreamId, VideoMetadata};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Replays a fixed list of frames. Like a real camera it is exclusive: a second
/// `open` while a stream is live fails with [`DeviceError::Busy`].
#[derive(Clone)]
pub struct StillFrameDevice {
    frames: Arc<Vec<RgbaImage>>,
    live_streams: Arc<AtomicUsize>,
    opened_total: Arc<AtomicUsize>,
    forced_error: Arc<Mutex<Option<DeviceError>>>,
}

impl StillFrameDevice {
    pub fn from_frames(frames: Vec<RgbaImage>) -> Self {
        Self {
            frames: Arc::new(frames),
            live_streams: Arc::new(AtomicUsize::new(0)),
            opened_total: Arc::new(AtomicUsize::new(0)),
            forced_error: Arc::new(Mutex::new(None)),
        }
    }

    /// A single solid-color frame of the given size.
    pub fn solid(width: u32, height: u32) -> Self {
        Self::from_frames(vec![RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([40, 40, 40, 255]),
        )])
    }

    /// Loads every decodable image in `dir`, sorted by file name.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = fs::read_dir(dir)
            .with_context(|| format!("Failed to list frames in {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect::<Vec<_>>();
        paths.sort();

        let mut frames = Vec::with_capacity(paths.len());
        for path in paths {
            match image::open(&path) {
                Ok(img) => frames.push(img.to_rgba8()),
                Err(err) => log_debug!("skipping {}: {err}", path.display()),
            }
        }

        if frames.is_empty() {
            bail!("no decodable frames in {}", dir.display());
        }
        log_info!("loaded {} frames from {}", frames.len(), dir.display());
        Ok(Self::from_frames(frames))
    }

    /// Makes every following `open` fail with `err` until cleared with `None`.
    pub fn set_failure(&self, err: Option<DeviceError>) {
        *self.forced_error.lock().unwrap_or_else(|e| e.into_inner()) = err;
    }

    /// Streams opened and not yet stopped.
    pub fn live_streams(&self) -> usize {
        self.live_streams.load(Ordering::SeqCst)
    }

    pub fn opened_total(&self) -> usize {
        self.opened_total.load(Ordering::SeqCst)
    }
}

impl CaptureDevice for StillFrameDevice {
    type Stream = StillStream;

    async fn open(&self, constraints: &CaptureConstraints) -> Result<StillStream, DeviceError> {
        if let Some(err) = self
            .forced_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(err);
        }
        if self.frames.is_empty() {
            return Err(DeviceError::NotFound);
        }
        if self
            .live_streams
            .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(DeviceError::Busy);
        }
        self.opened_total.fetch_add(1, Ordering::SeqCst);

        log_debug!(
            "still device opened (requested {:?} {}x{})",
            constraints.facing_mode,
            constraints.ideal_width,
            constraints.ideal_height
        );

        Ok(StillStream {
            id: Uuid::new_v4(),
            frames: Arc::clone(&self.frames),
            cursor: 0,
            playing: false,
            live: Some(Arc::clone(&self.live_streams)),
        })
    }
}

pub struct StillStream {
    id: StreamId,
    frames: Arc<Vec<RgbaImage>>,
    cursor: usize,
    playing: bool,
    /// Present until the stream is stopped; releasing it frees the device.
    live: Option<Arc<AtomicUsize>>,
}

impl StillStream {
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl FrameSource for StillStream {
    fn id(&self) -> StreamId {
        self.id
    }

    async fn metadata(&mut self) -> Result<VideoMetadata, DeviceError> {
        let first = self
            .frames
            .first()
            .ok_or_else(|| DeviceError::Other("stream has no frames".into()))?;
        Ok(VideoMetadata {
            width: first.width(),
            height: first.height(),
        })
    }

    fn play(&mut self) -> Result<(), DeviceError> {
        if self.live.is_none() {
            return Err(DeviceError::Other("stream already stopped".into()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn grab_frame(&mut self) -> Option<RgbaImage> {
        self.live.as_ref()?;
        let frame = self.frames.get(self.cursor)?.clone();
        if self.playing {
            self.cursor = (self.cursor + 1) % self.frames.len();
        }
        Some(frame)
    }

    fn stop(&mut self) {
        self.playing = false;
        if let Some(live) = self.live.take() {
            live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for StillStream {
    fn drop(&mut self) {
        self.stop();
    }
}
