//! Background asset loading
//!
//! [`AssetLoader`] owns a worker thread that decodes assets from disk and
//! hands the results back over a channel. The owner polls once per frame on
//! its own thread, so every completed load is applied exactly once, in
//! whatever order the loads finish.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use crate::{Asset, AssetError};

struct LoadRequest<K> {
    slot: K,
    path: PathBuf,
}

/// Result of a background load
pub struct LoadResult<K, T> {
    /// Caller-chosen slot the asset belongs to
    pub slot: K,
    /// Path the asset was read from
    pub path: PathBuf,
    /// The decoded asset or the reason it could not be loaded
    pub result: Result<T, AssetError>,
}

/// Background loader for one asset type using a dedicated worker thread
///
/// # Example
/// ```ignore
/// let mut loader = AssetLoader::<EntityKey, TextureData>::new();
/// loader.load_async(body_key, "assets/earth/earth.jpg");
///
/// // Later, once per frame:
/// for done in loader.poll_all() {
///     match done.result {
///         Ok(texture) => renderer.set_texture(done.slot, &texture),
///         Err(e) => log::warn!("{}: {}", done.path.display(), e),
///     }
/// }
/// ```
pub struct AssetLoader<K, T> {
    sender: Sender<LoadRequest<K>>,
    receiver: Receiver<LoadResult<K, T>>,
    pending: usize,
    _asset: PhantomData<fn() -> T>,
}

impl<K: Send + 'static, T: Asset> AssetLoader<K, T> {
    /// Create a new loader with a background worker thread
    ///
    /// The worker thread runs until the loader is dropped.
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel::<LoadRequest<K>>();
        let (result_tx, result_rx) = channel::<LoadResult<K, T>>();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                let result = T::load_from_file(&request.path);
                let load_result = LoadResult {
                    slot: request.slot,
                    path: request.path,
                    result,
                };
                // If the receiver is dropped, we stop
                if result_tx.send(load_result).is_err() {
                    break;
                }
            }
        });

        Self {
            sender: request_tx,
            receiver: result_rx,
            pending: 0,
            _asset: PhantomData,
        }
    }

    /// Request an asset to be loaded in the background
    pub fn load_async(&mut self, slot: K, path: impl Into<PathBuf>) {
        let path = path.into();
        log::debug!("Queued asset load: {}", path.display());
        let request = LoadRequest { slot, path };
        if self.sender.send(request).is_ok() {
            self.pending += 1;
        }
    }

    /// Collect all completed loads (non-blocking)
    pub fn poll_all(&mut self) -> Vec<LoadResult<K, T>> {
        let results: Vec<_> = self.receiver.try_iter().collect();
        self.pending = self.pending.saturating_sub(results.len());
        results
    }

    /// Number of requests that have not been polled yet
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// True when every queued request has been polled
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }
}

impl<K: Send + 'static, T: Asset> Default for AssetLoader<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
