use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::core::bounds::TileIndex;
use crate::core::geo::TileCoord;
use crate::{MapError, Result};

#[cfg(feature = "debug")]
use log;

/// Work for whatever fetches and displays tiles.
///
/// `index` is the unwrapped grid position the tile is placed at. Wrapped
/// copies of one `coord` have distinct indices, so an `Unload` only refers
/// to the copy at its `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileRequest {
    /// Start fetching the tile at `url`
    Load {
        coord: TileCoord,
        index: TileIndex,
        url: String,
    },
    /// The tile left the working rectangle; drop or recycle it
    Unload { coord: TileCoord, index: TileIndex },
}

impl TileRequest {
    pub fn coord(&self) -> TileCoord {
        match self {
            TileRequest::Load { coord, .. } | TileRequest::Unload { coord, .. } => *coord,
        }
    }

    pub fn index(&self) -> TileIndex {
        match self {
            TileRequest::Load { index, .. } | TileRequest::Unload { index, .. } => *index,
        }
    }
}

/// Hands tile requests from the layer to a fetcher over a channel.
///
/// The layer only enqueues; draining and the actual network work happen on
/// the receiving side, which may live on another thread.
#[derive(Debug, Clone)]
pub struct TileLoader {
    tx: Sender<TileRequest>,
}

impl TileLoader {
    /// Create a loader that reports requests on `tx`.
    pub fn new(tx: Sender<TileRequest>) -> Self {
        Self { tx }
    }

    /// Create a loader together with the receiving end of its queue
    pub fn channel() -> (Self, Receiver<TileRequest>) {
        let (tx, rx) = unbounded();
        (Self::new(tx), rx)
    }

    /// Number of requests not yet taken by a fetcher
    pub fn queued(&self) -> usize {
        self.tx.len()
    }

    pub fn queue_load(&self, coord: TileCoord, index: TileIndex, url: String) -> Result<()> {
        #[cfg(feature = "debug")]
        log::trace!("queue load {} at ({}, {}) ({})", coord, index.x, index.y, url);

        self.send(TileRequest::Load { coord, index, url })
    }

    pub fn queue_unload(&self, coord: TileCoord, index: TileIndex) -> Result<()> {
        #[cfg(feature = "debug")]
        log::trace!("queue unload {} at ({}, {})", coord, index.x, index.y);

        self.send(TileRequest::Unload { coord, index })
    }

    fn send(&self, request: TileRequest) -> Result<()> {
        self.tx.send(request).map_err(|e| {
            MapError::Loader(format!("no fetcher listening, dropped request for {}", e.0.coord()))
        })
    }
}
