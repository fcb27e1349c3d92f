//! The download pipeline: preview → SVG → pixels → PNG → sink.
//!
//! The first download request only starts loading the rasterizer; the user
//! clicks again once it is ready. There is no queued retry.

use super::artifact::{timestamp_now, ExportArtifact};
use super::rasterizer::{encode_png, FontLoader, RasterOptions, Rasterizer, RasterizerState};
use super::sink::ExportSink;
use super::svg::render_card_svg;
use crate::card::{CardLayout, PreviewState};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::sync::mpsc::{channel, TryRecvError};
use std::sync::Arc;
use std::thread;

/// What a download request did.
#[derive(Debug)]
pub enum ExportOutcome {
    /// Rasterizer was missing; loading has started
    LoadStarted,
    /// Rasterizer is still loading from an earlier request
    StillLoading,
    /// Image delivered; carries the sink's message
    Delivered(String),
    /// Rendering or delivery failed
    Failed(Error),
}

/// Completion of a background rasterizer load.
#[derive(Debug)]
pub enum LoadEvent {
    Ready { faces: usize },
    Failed(Error),
}

/// Owns the rasterizer lifecycle and the chosen sink.
pub struct ExportPipeline {
    state: RasterizerState,
    loader: Arc<dyn FontLoader>,
    sink: Box<dyn ExportSink>,
    options: RasterOptions,
}

impl ExportPipeline {
    pub fn new(
        loader: Arc<dyn FontLoader>,
        sink: Box<dyn ExportSink>,
        options: RasterOptions,
    ) -> Self {
        Self {
            state: RasterizerState::NoRasterizer,
            loader,
            sink,
            options,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RasterizerState::Loading(_))
    }

    #[cfg(test)]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, RasterizerState::Ready(_))
    }

    pub fn state_label(&self) -> &'static str {
        self.state.label()
    }

    /// Handle one download click.
    pub fn request(&mut self, preview: &PreviewState) -> ExportOutcome {
        match &self.state {
            RasterizerState::NoRasterizer => {
                self.start_loading();
                match self.state {
                    RasterizerState::Loading(_) => ExportOutcome::LoadStarted,
                    _ => ExportOutcome::Failed(Error::FontLoad(
                        "could not start the font loader".to_string(),
                    )),
                }
            }
            RasterizerState::Loading(_) => ExportOutcome::StillLoading,
            RasterizerState::Ready(rasterizer) => {
                match export(rasterizer, preview, &self.options, self.sink.as_ref()) {
                    Ok(message) => ExportOutcome::Delivered(message),
                    Err(e) => {
                        warn!("Export failed: {}", e);
                        ExportOutcome::Failed(e)
                    }
                }
            }
        }
    }

    /// Check on a background load. Returns `Some` exactly once per load.
    pub fn poll(&mut self) -> Option<LoadEvent> {
        let RasterizerState::Loading(rx) = &self.state else {
            return None;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(Error::FontLoad(
                "font loader stopped unexpectedly".to_string(),
            )),
        };

        match result {
            Ok(db) => {
                let rasterizer = Rasterizer::new(db);
                let faces = rasterizer.face_count();
                info!("Rasterizer ready with {} font faces", faces);
                self.state = RasterizerState::Ready(rasterizer);
                Some(LoadEvent::Ready { faces })
            }
            Err(e) => {
                warn!("Rasterizer load failed: {}", e);
                self.state = RasterizerState::NoRasterizer;
                Some(LoadEvent::Failed(e))
            }
        }
    }

    fn start_loading(&mut self) {
        let (tx, rx) = channel();
        let loader = Arc::clone(&self.loader);

        let spawned = thread::Builder::new()
            .name("font-loader".to_string())
            .spawn(move || {
                // The receiver may be gone if the app closed mid-load
                let _ = tx.send(loader.load());
            });

        match spawned {
            Ok(_) => {
                debug!("Font loader thread started");
                self.state = RasterizerState::Loading(rx);
            }
            Err(e) => warn!("Failed to spawn font loader: {}", e),
        }
    }
}

/// Render `preview` and hand the image to `sink`.
fn export(
    rasterizer: &Rasterizer,
    preview: &PreviewState,
    options: &RasterOptions,
    sink: &dyn ExportSink,
) -> Result<String> {
    let layout = CardLayout::compute(preview);
    let svg = render_card_svg(&layout);
    let image = rasterizer.rasterize(&svg, options)?;
    let png = encode_png(&image)?;
    let artifact = ExportArtifact::new(png, image.width(), image.height(), timestamp_now());

    debug!(
        "Rendered {} ({}x{}, {} bytes) for sink '{}'",
        artifact.filename,
        artifact.width,
        artifact.height,
        artifact.png.len(),
        sink.name()
    );
    sink.deliver(&artifact)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use resvg::usvg::fontdb;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Loader returning an empty database, or failing.
    pub(crate) struct FakeLoader {
        pub fail: bool,
    }

    impl FontLoader for FakeLoader {
        fn load(&self) -> Result<fontdb::Database> {
            if self.fail {
                Err(Error::FontLoad("no fonts".to_string()))
            } else {
                Ok(fontdb::Database::new())
            }
        }
    }

    /// Sink that keeps every artifact it receives.
    #[derive(Clone, Default)]
    pub(crate) struct MemorySink {
        pub artifacts: Arc<Mutex<Vec<ExportArtifact>>>,
        pub fail: bool,
    }

    impl ExportSink for MemorySink {
        fn deliver(&self, artifact: &ExportArtifact) -> Result<String> {
            if self.fail {
                return Err(Error::HostSave("disk full".to_string()));
            }
            self.artifacts.lock().unwrap().push(artifact.clone());
            Ok("saved".to_string())
        }

        fn name(&self) -> &'static str {
            "memory"
        }
    }

    pub(crate) fn pipeline(fail_load: bool, sink: MemorySink) -> ExportPipeline {
        ExportPipeline::new(
            Arc::new(FakeLoader { fail: fail_load }),
            Box::new(sink),
            RasterOptions::default(),
        )
    }

    /// Poll until the background load reports back.
    pub(crate) fn wait_for_load(pipeline: &mut ExportPipeline) -> LoadEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(event) = pipeline.poll() {
                return event;
            }
            assert!(Instant::now() < deadline, "font loader timed out");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_first_request_starts_loading_without_artifact() {
        let sink = MemorySink::default();
        let mut pipeline = pipeline(false, sink.clone());

        let outcome = pipeline.request(&PreviewState::new());

        assert!(matches!(outcome, ExportOutcome::LoadStarted));
        assert!(pipeline.is_loading());
        assert!(sink.artifacts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_request_while_loading_does_not_reload() {
        let mut pipeline = pipeline(false, MemorySink::default());
        pipeline.request(&PreviewState::new());

        // Either still loading or already finished, never a second load
        if pipeline.is_loading() {
            assert!(matches!(
                pipeline.request(&PreviewState::new()),
                ExportOutcome::StillLoading
            ));
        }
    }

    #[test]
    fn test_ready_then_export_delivers_png() {
        let sink = MemorySink::default();
        let mut pipeline = pipeline(false, sink.clone());
        pipeline.request(&PreviewState::new());

        assert!(matches!(
            wait_for_load(&mut pipeline),
            LoadEvent::Ready { faces: 0 }
        ));
        assert!(pipeline.is_ready());
        assert!(pipeline.poll().is_none());

        let outcome = pipeline.request(&PreviewState::new());
        assert!(matches!(outcome, ExportOutcome::Delivered(ref m) if m == "saved"));

        let artifacts = sink.artifacts.lock().unwrap();
        assert_eq!(artifacts.len(), 1);
        let artifact = &artifacts[0];
        assert_eq!(&artifact.png[..4], b"\x89PNG");
        assert_eq!(artifact.width, (crate::card::layout::CARD_WIDTH * 2.0) as u32);
        assert!(artifact.filename.starts_with("文摘_"));
    }

    #[test]
    fn test_load_failure_returns_to_no_rasterizer() {
        let mut pipeline = pipeline(true, MemorySink::default());
        pipeline.request(&PreviewState::new());

        assert!(matches!(wait_for_load(&mut pipeline), LoadEvent::Failed(_)));
        assert_eq!(pipeline.state_label(), "no-rasterizer");

        // Manual retry starts a fresh load
        assert!(matches!(
            pipeline.request(&PreviewState::new()),
            ExportOutcome::LoadStarted
        ));
    }

    #[test]
    fn test_sink_failure_reported() {
        let sink = MemorySink {
            fail: true,
            ..MemorySink::default()
        };
        let mut pipeline = pipeline(false, sink);
        pipeline.request(&PreviewState::new());
        wait_for_load(&mut pipeline);

        assert!(matches!(
            pipeline.request(&PreviewState::new()),
            ExportOutcome::Failed(Error::HostSave(_))
        ));
        assert!(pipeline.is_ready());
    }
}
