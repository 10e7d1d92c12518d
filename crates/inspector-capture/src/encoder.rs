use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::CaptureConfig;
use crate::error::CaptureError;
use crate::frame::write_frame;

/// A frame waiting to be encoded.
struct EncodeJob {
    index: u64,
    image: RgbaImage,
}

/// What the encoder pool produced once drained.
#[derive(Debug, Clone, Default)]
pub struct EncoderReport {
    /// Written files, ordered by frame index.
    pub written: Vec<PathBuf>,
    /// Frames that reached a worker but could not be written.
    pub failed: usize,
}

#[derive(Default)]
struct EncoderResults {
    written: Vec<(u64, PathBuf)>,
    failed: usize,
}

/// Bounded queue of frames feeding a pool of PNG encoders.
/// Owns a background tokio runtime; `submit` never blocks the frame callback.
pub struct FrameEncoder {
    runtime: tokio::runtime::Runtime,
    sender: Option<mpsc::Sender<EncodeJob>>,
    workers: Vec<JoinHandle<()>>,
    results: Arc<Mutex<EncoderResults>>,
}

impl FrameEncoder {
    /// Start `encoder_workers` tasks writing frames into `output_dir`.
    pub fn new(config: &CaptureConfig, output_dir: PathBuf) -> Result<Self, CaptureError> {
        config.validate()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.encoder_workers)
            .thread_name("frame-encoder")
            .enable_all()
            .build()
            .map_err(CaptureError::Runtime)?;

        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        let receiver = Arc::new(tokio::sync::Mutex::new(receiver));
        let results = Arc::new(Mutex::new(EncoderResults::default()));
        let output_dir = Arc::new(output_dir);

        let workers = (0..config.encoder_workers)
            .map(|worker| {
                runtime.spawn(run_worker(
                    worker,
                    Arc::clone(&receiver),
                    Arc::clone(&output_dir),
                    Arc::clone(&results),
                ))
            })
            .collect();

        Ok(Self {
            runtime,
            sender: Some(sender),
            workers,
            results,
        })
    }

    /// Queue a frame for encoding. Fails with `QueueFull` instead of waiting
    /// when every slot is taken.
    pub fn submit(&self, index: u64, image: RgbaImage) -> Result<(), CaptureError> {
        let sender = self.sender.as_ref().ok_or(CaptureError::EncoderClosed)?;
        sender
            .try_send(EncodeJob { index, image })
            .map_err(|e| match e {
                TrySendError::Full(_) => CaptureError::QueueFull(index),
                TrySendError::Closed(_) => CaptureError::EncoderClosed,
            })
    }

    /// Close the queue, wait for queued frames to finish, and report.
    /// Blocks the calling thread; do not call from inside an async runtime.
    pub fn finish(mut self) -> EncoderReport {
        self.sender = None;

        let workers = std::mem::take(&mut self.workers);
        self.runtime.block_on(async {
            for handle in workers {
                if let Err(e) = handle.await {
                    warn!("Frame encoder worker stopped abnormally: {}", e);
                }
            }
        });

        let mut results = std::mem::take(&mut *self.results.lock());
        results.written.sort_by_key(|(index, _)| *index);
        EncoderReport {
            written: results.written.into_iter().map(|(_, path)| path).collect(),
            failed: results.failed,
        }
    }
}

async fn run_worker(
    worker: usize,
    receiver: Arc<tokio::sync::Mutex<mpsc::Receiver<EncodeJob>>>,
    output_dir: Arc<PathBuf>,
    results: Arc<Mutex<EncoderResults>>,
) {
    loop {
        let job = receiver.lock().await.recv().await;
        let Some(job) = job else {
            break;
        };

        let index = job.index;
        let dir = Arc::clone(&output_dir);
        let outcome =
            tokio::task::spawn_blocking(move || write_frame(&dir, job.index, &job.image)).await;

        match outcome {
            Ok(Ok(path)) => {
                debug!("Encoder {} saved frame {} to {}", worker, index, path.display());
                results.lock().written.push((index, path));
            }
            Ok(Err(e)) => {
                warn!("Failed to save frame {}: {}", index, e);
                results.lock().failed += 1;
            }
            Err(e) => {
                warn!("Encoding task for frame {} did not complete: {}", index, e);
                results.lock().failed += 1;
            }
        }
    }
    debug!("Encoder {} finished", worker);
}
