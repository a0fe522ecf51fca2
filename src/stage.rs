use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    canvas::{Color, Sketch, Typeface, clear_pixmap, new_pixmap},
    core::{FrameIndex, Surface, WallClock},
    error::EaselResult,
    module::{FrameLoop, TickCtx},
};

/// Cancellation handle for one animated invocation.
///
/// Once [`cancel`] returns, the stage delivers no further `advance` calls to
/// that invocation, ever.
///
/// [`cancel`]: CancelHandle::cancel
#[derive(Clone, Debug)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

struct LiveLoop {
    frame_loop: Box<dyn FrameLoop>,
    cancel: CancelHandle,
}

/// A raster surface plus its frame scheduler.
///
/// The stage owns the pixmap exclusively for its lifetime and holds at most
/// one live animation loop. Art modules only ever see a borrowed [`Sketch`];
/// they never touch the pixmap directly.
pub struct Stage {
    surface: Surface,
    pixmap: vello_cpu::Pixmap,
    typeface: Option<Typeface>,
    live: Option<LiveLoop>,
    frame: FrameIndex,
}

impl Stage {
    pub fn new(surface: Surface) -> EaselResult<Self> {
        Self::with_typeface(surface, None)
    }

    pub fn with_typeface(surface: Surface, typeface: Option<Typeface>) -> EaselResult<Self> {
        Ok(Self {
            surface,
            pixmap: new_pixmap(surface)?,
            typeface,
            live: None,
            frame: FrameIndex(0),
        })
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn typeface(&self) -> Option<&Typeface> {
        self.typeface.as_ref()
    }

    /// Premultiplied RGBA8 pixel bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub fn has_live_loop(&self) -> bool {
        self.live.is_some()
    }

    pub fn sketch(&self) -> EaselResult<Sketch> {
        Sketch::with_typeface(self.surface, self.typeface.clone())
    }

    /// Reset the surface to `color`; every invocation starts from here.
    pub fn clear(&mut self, color: Color) {
        clear_pixmap(&mut self.pixmap, color);
    }

    /// Flush a finished sketch onto the surface.
    pub fn present(&mut self, sketch: Sketch) -> EaselResult<()> {
        sketch.finish(&mut self.pixmap)
    }

    /// Install `frame_loop` as this stage's single live loop, tearing down
    /// any previous one first. Returns the new loop's cancel handle, or
    /// `None` for single-shot pieces so callers can treat both classes
    /// identically.
    pub fn adopt(&mut self, frame_loop: Option<Box<dyn FrameLoop>>) -> Option<CancelHandle> {
        self.cancel_live();
        self.frame = FrameIndex(0);
        frame_loop.map(|frame_loop| {
            let cancel = CancelHandle::new();
            self.live = Some(LiveLoop {
                frame_loop,
                cancel: cancel.clone(),
            });
            cancel
        })
    }

    /// Cancel and drop the live loop, if any.
    pub fn cancel_live(&mut self) {
        if let Some(live) = self.live.take() {
            live.cancel.cancel();
        }
    }

    /// Advance the live loop by one frame. Returns `true` if a frame was
    /// drawn. A loop whose handle was cancelled out-of-band is pruned here
    /// without being advanced; a loop that errors is logged, torn down and
    /// replaced by the error placeholder.
    pub fn tick(&mut self, clock: WallClock) -> EaselResult<bool> {
        let Some(live) = self.live.as_mut() else {
            return Ok(false);
        };
        if live.cancel.is_cancelled() {
            self.live = None;
            return Ok(false);
        }

        self.frame = self.frame.next();
        let tick = TickCtx {
            frame: self.frame,
            clock,
        };

        let mut sketch = Sketch::with_typeface(self.surface, self.typeface.clone())?;
        match live.frame_loop.advance(&mut sketch, &tick) {
            Ok(()) => {
                sketch.finish(&mut self.pixmap)?;
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(%err, frame = self.frame.0, "frame loop failed; tearing down");
                self.cancel_live();
                crate::loader::paint_placeholder(self)?;
                Ok(false)
            }
        }
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        self.cancel_live();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Sketch;
    use crate::error::EaselResult;

    struct CountingLoop {
        frames: Arc<AtomicUsize>,
    }

    use std::sync::atomic::AtomicUsize;

    impl FrameLoop for CountingLoop {
        fn advance(&mut self, sketch: &mut Sketch, _tick: &TickCtx) -> EaselResult<()> {
            self.frames.fetch_add(1, Ordering::SeqCst);
            sketch.fill_rect(0.0, 0.0, 4.0, 4.0, Color::BLACK);
            Ok(())
        }
    }

    fn counting_stage() -> (Stage, Arc<AtomicUsize>, CancelHandle) {
        let mut stage = Stage::new(Surface::new(16, 16).unwrap()).unwrap();
        let frames = Arc::new(AtomicUsize::new(0));
        let cancel = stage
            .adopt(Some(Box::new(CountingLoop {
                frames: frames.clone(),
            })))
            .unwrap();
        (stage, frames, cancel)
    }

    #[test]
    fn tick_advances_until_cancelled() {
        let (mut stage, frames, cancel) = counting_stage();
        assert!(stage.tick(WallClock::fixed(0, 0, 0, 0)).unwrap());
        assert!(stage.tick(WallClock::fixed(0, 0, 0, 0)).unwrap());
        assert_eq!(frames.load(Ordering::SeqCst), 2);

        cancel.cancel();
        assert!(!stage.tick(WallClock::fixed(0, 0, 0, 0)).unwrap());
        assert!(!stage.has_live_loop());
        assert_eq!(frames.load(Ordering::SeqCst), 2, "no advance after cancel");
    }

    #[test]
    fn adopt_tears_down_previous_loop() {
        let (mut stage, old_frames, old_cancel) = counting_stage();
        let new_frames = Arc::new(AtomicUsize::new(0));
        stage.adopt(Some(Box::new(CountingLoop {
            frames: new_frames.clone(),
        })));

        assert!(old_cancel.is_cancelled());
        stage.tick(WallClock::fixed(0, 0, 0, 0)).unwrap();
        assert_eq!(old_frames.load(Ordering::SeqCst), 0);
        assert_eq!(new_frames.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn adopt_none_returns_no_handle() {
        let mut stage = Stage::new(Surface::new(8, 8).unwrap()).unwrap();
        assert!(stage.adopt(None).is_none());
        assert!(!stage.has_live_loop());
        assert!(!stage.tick(WallClock::fixed(0, 0, 0, 0)).unwrap());
    }

    struct FailingLoop;

    impl FrameLoop for FailingLoop {
        fn advance(&mut self, _sketch: &mut Sketch, _tick: &TickCtx) -> EaselResult<()> {
            Err(crate::error::EaselError::render("synthetic failure"))
        }
    }

    #[test]
    fn failing_loop_degrades_to_placeholder() {
        let mut stage = Stage::new(Surface::new(32, 32).unwrap()).unwrap();
        stage.adopt(Some(Box::new(FailingLoop)));
        assert!(!stage.tick(WallClock::fixed(0, 0, 0, 0)).unwrap());
        assert!(!stage.has_live_loop());
        assert!(stage.pixels().iter().any(|&b| b != 0));
    }
}
