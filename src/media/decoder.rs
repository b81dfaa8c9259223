// SPDX-License-Identifier: MPL-2.0
//! Async video frame decoder using FFmpeg.
//!
//! Decoding runs on a Tokio blocking thread (FFmpeg types are not `Send`).
//! The UI talks to it through a command channel and receives
//! [`DecoderEvent`]s on a bounded channel. Position, duration and the latest
//! frame are also published in a [`SharedPlayback`] snapshot so the surface
//! can answer queries synchronously. Sound, when the source has any, is
//! decoded in the same loop by an [`AudioTrack`] and controlled through
//! shared [`AudioControls`](super::audio_output::AudioControls).

use super::audio::AudioTrack;
use super::audio_output::AudioControlsHandle;
use super::Frame;
use crate::error::{Error, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, Once, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// FFmpeg timestamps in the container context use microseconds.
const AV_TIME_BASE: f64 = 1_000_000.0;

/// Wall-clock period between progress reports while playing.
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Frames this far before a seek target are still shown.
const SEEK_TOLERANCE_SECS: f64 = 0.05;

static FFMPEG_INIT: Once = Once::new();

/// Initializes FFmpeg once, with networking for URL sources and the log
/// level lowered to errors.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Decode(format!("FFmpeg initialization failed: {e}")));
            return;
        }
        ffmpeg_next::format::network::init();

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Position, duration and latest frame, written by the decoder thread.
#[derive(Debug, Clone)]
pub struct SharedPlayback {
    pub position_secs: f64,
    /// `NaN` until the container reports a duration.
    pub duration_secs: f64,
    pub latest_frame: Option<Frame>,
}

impl Default for SharedPlayback {
    fn default() -> Self {
        Self {
            position_secs: 0.0,
            duration_secs: f64::NAN,
            latest_frame: None,
        }
    }
}

pub type SharedPlaybackHandle = Arc<Mutex<SharedPlayback>>;

/// Locks the snapshot, recovering from a poisoned lock (the data is plain
/// values, always consistent).
pub fn lock(shared: &SharedPlaybackHandle) -> MutexGuard<'_, SharedPlayback> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Commands sent to the decoder task.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoderCommand {
    /// Start or resume playback.
    Play,

    /// Pause playback, keeping the position.
    Pause,

    /// Seek to an absolute position in seconds.
    Seek { target_secs: f64 },

    /// Change the frame pacing rate.
    SetRate(f64),

    /// Stop decoding and clean up resources.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// A new frame is ready for display.
    FrameReady(Frame),

    /// Decoder is waiting for data (opening, seeking, resuming).
    BufferingStarted,

    /// The first frame after buffering was decoded.
    BufferingEnded,

    /// Periodic position report while playing.
    Progress {
        position_secs: f64,
        duration_secs: f64,
    },

    /// Playback reached the end of the source.
    EndOfStream,

    /// An error occurred while opening or decoding.
    Error(String),
}

/// Async video decoder that runs in a Tokio blocking task.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,

    /// Bounded to keep at most a couple of frames in flight.
    event_rx: mpsc::Receiver<DecoderEvent>,

    shared: SharedPlaybackHandle,

    audio: AudioControlsHandle,
}

impl AsyncDecoder {
    /// Starts decoding `source`, a local path or a URL FFmpeg can open.
    ///
    /// The decoder starts paused and decodes a single poster frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] for a local path that does not exist. Failures
    /// to open or decode the source are reported as [`DecoderEvent::Error`].
    pub fn new(source: &str) -> Result<Self> {
        if !is_remote(source) && !Path::new(source).exists() {
            return Err(Error::Io(format!("Video file not found: {source}")));
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);
        let shared: SharedPlaybackHandle = Arc::default();
        let audio: AudioControlsHandle = Arc::default();

        let source = source.to_string();
        let shared_for_task = Arc::clone(&shared);
        let audio_for_task = Arc::clone(&audio);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = Self::decoder_loop_blocking(
                &source,
                command_rx,
                &event_tx,
                &shared_for_task,
                &audio_for_task,
            ) {
                tracing::error!(%source, error = %e, "decoder stopped");
                let _ = event_tx.blocking_send(DecoderEvent::Error(e.to_string()));
            }
        });

        Ok(Self {
            command_tx,
            event_rx,
            shared,
            audio,
        })
    }

    /// Returns a sender for commands; clones stay valid after the decoder
    /// handle is dropped but the task exits on its own once events can no
    /// longer be delivered.
    pub fn command_sender(&self) -> mpsc::UnboundedSender<DecoderCommand> {
        self.command_tx.clone()
    }

    /// Returns the shared position/duration/frame snapshot.
    pub fn shared(&self) -> SharedPlaybackHandle {
        Arc::clone(&self.shared)
    }

    /// Returns the volume/mute/pause controls of the audio output.
    pub fn audio_controls(&self) -> AudioControlsHandle {
        Arc::clone(&self.audio)
    }

    /// Sends a command to the decoder task.
    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::MediaUnavailable)
    }

    /// Receives the next event, or `None` once the decoder task has ended.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    fn decoder_loop_blocking(
        source: &str,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: &mpsc::Sender<DecoderEvent>,
        shared: &SharedPlaybackHandle,
        audio_controls: &AudioControlsHandle,
    ) -> Result<()> {
        init_ffmpeg()?;
        let _ = event_tx.blocking_send(DecoderEvent::BufferingStarted);

        let mut ictx = ffmpeg_next::format::input(&source)
            .map_err(|e| Error::Decode(format!("Failed to open {source}: {e}")))?;

        let duration_secs = if ictx.duration() > 0 {
            ictx.duration() as f64 / AV_TIME_BASE
        } else {
            f64::NAN
        };
        lock(shared).duration_secs = duration_secs;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| Error::Decode("No video stream found".to_string()))?;
        let video_stream_index = input.index();

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Decode(format!("Failed to create codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Decode(format!("Failed to create video decoder: {e}")))?;

        let width = decoder.width();
        let height = decoder.height();

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Decode(format!("Failed to create scaler: {e}")))?;

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let mut rate = 1.0_f64;
        let mut audio = match AudioTrack::open(&ictx, Arc::clone(audio_controls), rate) {
            Ok(track) => track,
            Err(e) => {
                tracing::warn!(%source, error = %e, "playing without sound");
                None
            }
        };
        let audio_stream_index = audio.as_ref().map(AudioTrack::stream_index);

        let mut is_playing = false;
        let mut playback_start_time: Option<Instant> = None;
        let mut first_pts: Option<f64> = None;
        let mut current_pts_secs: f64 = 0.0;
        let mut decode_single_frame = true; // poster frame
        let mut buffering = true;
        let mut at_end = false;
        let mut skip_until: Option<f64> = None;
        let mut last_progress: Option<Instant> = None;

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => {
                    let resume_from = if at_end { 0.0 } else { current_pts_secs };
                    if !is_playing && (resume_from > 0.0 || at_end) {
                        // RangeTo lets FFmpeg land on the keyframe before the target
                        let timestamp = (resume_from * AV_TIME_BASE) as i64;
                        if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                            let _ = event_tx.blocking_send(DecoderEvent::Error(format!(
                                "Resume seek failed: {e}"
                            )));
                        } else {
                            decoder.flush();
                            if let Some(track) = audio.as_mut() {
                                track.flush();
                            }
                            skip_until = Some(resume_from);
                        }
                    }
                    audio_controls.set_paused(false);
                    at_end = false;
                    is_playing = true;
                    playback_start_time = Some(Instant::now());
                    first_pts = None;
                    last_progress = None;
                    buffering = true;
                    let _ = event_tx.blocking_send(DecoderEvent::BufferingStarted);
                }
                Ok(DecoderCommand::Pause) => {
                    audio_controls.set_paused(true);
                    is_playing = false;
                    playback_start_time = None;
                    first_pts = None;
                }
                Ok(DecoderCommand::Seek { target_secs }) => {
                    let timestamp = (target_secs * AV_TIME_BASE) as i64;
                    if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                        let _ = event_tx
                            .blocking_send(DecoderEvent::Error(format!("Seek failed: {e}")));
                    } else {
                        decoder.flush();
                        if let Some(track) = audio.as_mut() {
                            track.flush();
                        }
                        current_pts_secs = target_secs;
                        lock(shared).position_secs = target_secs;
                        skip_until = Some(target_secs);
                        at_end = false;
                        playback_start_time = Some(Instant::now());
                        first_pts = None;
                        buffering = true;
                        let _ = event_tx.blocking_send(DecoderEvent::BufferingStarted);
                        if !is_playing {
                            decode_single_frame = true;
                        }
                    }
                }
                Ok(DecoderCommand::SetRate(new_rate)) => {
                    rate = new_rate;
                    if let Some(track) = audio.as_mut() {
                        if let Err(e) = track.set_playback_rate(new_rate) {
                            tracing::warn!(error = %e, rate = new_rate, "audio rate unchanged");
                        }
                    }
                    // Rebase pacing on the next frame
                    if is_playing {
                        playback_start_time = Some(Instant::now());
                        first_pts = None;
                    }
                }
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !is_playing && !decode_single_frame {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let mut frame_decoded = false;
            let mut channel_closed = false;
            for (stream, packet) in ictx.packets() {
                if Some(stream.index()) == audio_stream_index {
                    if let Some(track) = audio.as_mut() {
                        track.decode_packet(&packet, skip_until);
                    }
                    continue;
                }
                if stream.index() != video_stream_index {
                    continue;
                }

                if let Err(e) = decoder.send_packet(&packet) {
                    let _ = event_tx
                        .blocking_send(DecoderEvent::Error(format!("Packet send failed: {e}")));
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Video::empty();
                if decoder.receive_frame(&mut decoded_frame).is_err() {
                    continue;
                }

                let pts_secs = decoded_frame
                    .timestamp()
                    .map_or(0.0, |pts| pts as f64 * time_base_f64);

                // Decoding from the keyframe before a seek target
                if let Some(target) = skip_until {
                    if pts_secs + SEEK_TOLERANCE_SECS < target {
                        continue;
                    }
                    skip_until = None;
                }

                let mut rgb_frame = ffmpeg_next::frame::Video::empty();
                if let Err(e) = scaler.run(&decoded_frame, &mut rgb_frame) {
                    let _ = event_tx
                        .blocking_send(DecoderEvent::Error(format!("Scaling failed: {e}")));
                    continue;
                }
                let rgba_data = Self::extract_rgba_data(&rgb_frame);

                if let Some(start_time) = playback_start_time {
                    let first = *first_pts.get_or_insert(pts_secs);
                    let frame_delay = ((pts_secs - first) / rate).max(0.0);
                    let target_time = start_time + Duration::from_secs_f64(frame_delay);
                    let now = Instant::now();
                    if target_time > now {
                        std::thread::sleep(target_time - now);
                    }
                }

                current_pts_secs = pts_secs;
                let frame = Frame {
                    rgba_data: Arc::new(rgba_data),
                    width,
                    height,
                    pts_secs,
                };
                {
                    let mut snapshot = lock(shared);
                    snapshot.position_secs = pts_secs;
                    snapshot.latest_frame = Some(frame.clone());
                }

                if buffering {
                    buffering = false;
                    let _ = event_tx.blocking_send(DecoderEvent::BufferingEnded);
                }

                if event_tx.blocking_send(DecoderEvent::FrameReady(frame)).is_err() {
                    channel_closed = true;
                    break;
                }

                if is_playing && last_progress.is_none_or(|t| t.elapsed() >= PROGRESS_INTERVAL) {
                    last_progress = Some(Instant::now());
                    let _ = event_tx.blocking_send(DecoderEvent::Progress {
                        position_secs: pts_secs,
                        duration_secs,
                    });
                }

                frame_decoded = true;
                decode_single_frame = false;
                break;
            }

            if channel_closed {
                break;
            }

            if !frame_decoded {
                at_end = true;
                is_playing = false;
                playback_start_time = None;
                first_pts = None;
                decode_single_frame = false;
                skip_until = None;
                if buffering {
                    buffering = false;
                    let _ = event_tx.blocking_send(DecoderEvent::BufferingEnded);
                }
                if event_tx.blocking_send(DecoderEvent::EndOfStream).is_err() {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Extracts RGBA data from a decoded frame, handling stride correctly.
    fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
        let width = frame.width();
        let height = frame.height();
        let data = frame.data(0);
        let stride = frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let row_start = (y * stride as u32) as usize;
            let row_end = row_start + (width * 4) as usize;
            rgba_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        rgba_bytes
    }
}

impl Drop for AsyncDecoder {
    fn drop(&mut self) {
        let _ = self.command_tx.send(DecoderCommand::Stop);
    }
}

/// Returns true for sources FFmpeg opens through a protocol (`http://`,
/// `rtsp://`, ...) rather than from the filesystem.
#[must_use]
pub fn is_remote(source: &str) -> bool {
    source.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_sources_are_detected() {
        assert!(is_remote("https://example.com/a.mp4"));
        assert!(is_remote("rtsp://camera.local/stream"));
        assert!(!is_remote("/home/user/video.mp4"));
        assert!(!is_remote("C:\\videos\\clip.mp4"));
        assert!(!is_remote("://missing-scheme"));
    }

    #[tokio::test]
    async fn decoder_fails_for_nonexistent_file() {
        let result = AsyncDecoder::new("/nonexistent/video.mp4");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn invalid_file_reports_error_event() {
        let temp_dir = tempfile::tempdir().unwrap();
        let video_path = temp_dir.path().join("broken.mp4");
        std::fs::write(&video_path, b"not a video").unwrap();

        let mut decoder = AsyncDecoder::new(video_path.to_str().unwrap()).unwrap();

        let mut saw_error = false;
        while let Ok(Some(event)) =
            tokio::time::timeout(Duration::from_secs(5), decoder.recv_event()).await
        {
            if matches!(event, DecoderEvent::Error(_)) {
                saw_error = true;
                break;
            }
        }
        assert!(saw_error, "opening garbage should report an error");
    }

    #[test]
    fn shared_snapshot_starts_with_unknown_duration() {
        let shared = SharedPlayback::default();
        assert!(shared.duration_secs.is_nan());
        assert_eq!(shared.position_secs, 0.0);
        assert!(shared.latest_frame.is_none());
    }
}
