use tracing::{debug, info, warn};

use crate::config::{ScreenEdge, ScreenMetrics};

/// Reserved screen area in edge-offset terms, the shape window-manager
/// strut protocols expect. At most one side is non-zero for this panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strut {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Strut {
    /// The strut for the collapsed band. This is the only rectangle the
    /// panel ever reserves: the ephemeral sub-panels are never part of
    /// the announcement.
    pub fn for_band(edge: ScreenEdge, band_width: i32) -> Self {
        match edge {
            ScreenEdge::Left => Strut {
                left: band_width,
                ..Strut::default()
            },
            ScreenEdge::Right => Strut {
                right: band_width,
                ..Strut::default()
            },
        }
    }

    /// Thickness along the reserved edge
    pub fn thickness(&self) -> i32 {
        self.left.max(self.right).max(self.top).max(self.bottom)
    }

    /// The reserved rectangle in screen coordinates
    pub fn screen_rect(&self, screen: ScreenMetrics) -> crate::geometry::Rect {
        use crate::geometry::Rect;
        if self.left > 0 {
            Rect::new(0, 0, self.left, screen.height)
        } else if self.right > 0 {
            Rect::new(screen.width - self.right, 0, self.right, screen.height)
        } else if self.top > 0 {
            Rect::new(0, 0, screen.width, self.top)
        } else if self.bottom > 0 {
            Rect::new(0, screen.height - self.bottom, screen.width, self.bottom)
        } else {
            Rect::default()
        }
    }
}

/// Window-manager side of the reservation protocol. The production
/// implementation is the layer-shell exclusive zone; tests install a
/// recording mock.
pub trait StrutSink {
    fn announce(&self, strut: &Strut) -> anyhow::Result<()>;
}

/// Single call site for area reservation.
///
/// Deduplicates idempotent repeat announcements and degrades silently
/// when the protocol is unavailable: the panel then operates as a plain
/// always-on-top overlay, which is a valid mode, not an error.
pub struct ReservationClient {
    sink: Box<dyn StrutSink>,
    announced: Option<Strut>,
    degraded: bool,
}

impl ReservationClient {
    pub fn new(sink: Box<dyn StrutSink>) -> Self {
        Self {
            sink,
            announced: None,
            degraded: false,
        }
    }

    pub fn announce(&mut self, strut: Strut) {
        if self.announced == Some(strut) {
            debug!(?strut, "reservation unchanged, skipping re-announce");
            return;
        }

        match self.sink.announce(&strut) {
            Ok(()) => {
                if self.degraded {
                    info!("area reservation recovered");
                    self.degraded = false;
                }
                self.announced = Some(strut);
            }
            Err(e) => {
                if !self.degraded {
                    warn!("area reservation unavailable, continuing as overlay: {e}");
                    self.degraded = true;
                }
            }
        }
    }

    /// The strut currently held by the window manager, if any
    pub fn announced(&self) -> Option<Strut> {
        self.announced
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct RecordingSink {
        calls: Arc<Mutex<Vec<Strut>>>,
        fail: bool,
    }

    impl StrutSink for RecordingSink {
        fn announce(&self, strut: &Strut) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("no supporting window manager");
            }
            self.calls.lock().push(*strut);
            Ok(())
        }
    }

    #[test]
    fn test_band_strut_right_edge() {
        let strut = Strut::for_band(ScreenEdge::Right, 60);
        assert_eq!(strut.right, 60);
        assert_eq!(strut.left + strut.top + strut.bottom, 0);
        assert_eq!(strut.thickness(), 60);

        let rect = strut.screen_rect(ScreenMetrics::new(1920, 1080));
        assert_eq!(rect, crate::geometry::Rect::new(1860, 0, 60, 1080));
    }

    #[test]
    fn test_repeat_announce_is_deduplicated() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut client = ReservationClient::new(Box::new(RecordingSink {
            calls: calls.clone(),
            fail: false,
        }));

        let strut = Strut::for_band(ScreenEdge::Right, 60);
        client.announce(strut);
        client.announce(strut);
        client.announce(strut);

        assert_eq!(calls.lock().len(), 1);
        assert_eq!(client.announced(), Some(strut));
    }

    #[test]
    fn test_failure_degrades_without_error() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut client = ReservationClient::new(Box::new(RecordingSink {
            calls,
            fail: true,
        }));

        client.announce(Strut::for_band(ScreenEdge::Left, 48));
        assert!(client.is_degraded());
        assert_eq!(client.announced(), None);
    }
}
