// SPDX-License-Identifier: MPL-2.0
//! Iced subscription for one decode session.
//!
//! The subscription owns the [`AsyncDecoder`]. It is identified by its
//! [`PlaybackSession`]; when the application stops returning it (track
//! change, shutdown) Iced drops the stream, which drops the decoder and
//! stops the decode thread.

use super::decoder::{AsyncDecoder, DecoderEvent};
use super::surface::FfmpegSurface;
use super::{Frame, SurfaceEvent};
use iced::futures::{SinkExt, Stream};
use iced::stream;

/// Identity of a decode session: a new id restarts decoding even for the
/// same source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaybackSession {
    pub id: u64,
    pub source: String,
}

/// Messages emitted by the playback subscription.
#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// Decoder started; the surface is ready to be driven.
    Started {
        session_id: u64,
        surface: FfmpegSurface,
    },

    /// A new frame is ready for display.
    FrameReady { session_id: u64, frame: Frame },

    /// A surface notification.
    Event {
        session_id: u64,
        event: SurfaceEvent,
    },
}

impl PlaybackMessage {
    #[must_use]
    pub fn session_id(&self) -> u64 {
        match self {
            PlaybackMessage::Started { session_id, .. }
            | PlaybackMessage::FrameReady { session_id, .. }
            | PlaybackMessage::Event { session_id, .. } => *session_id,
        }
    }
}

/// Creates the playback subscription for `session`.
pub fn playback(session: PlaybackSession) -> iced::Subscription<PlaybackMessage> {
    iced::Subscription::run_with(session, playback_stream)
}

fn playback_stream(session: &PlaybackSession) -> impl Stream<Item = PlaybackMessage> {
    let session_id = session.id;
    let source = session.source.clone();

    stream::channel(100, move |mut output| async move {
        let mut decoder = match AsyncDecoder::new(&source) {
            Ok(decoder) => decoder,
            Err(e) => {
                tracing::error!(%source, error = %e, "cannot start decoder");
                let _ = output
                    .send(PlaybackMessage::Event {
                        session_id,
                        event: SurfaceEvent::Failed(e.to_string()),
                    })
                    .await;
                return;
            }
        };

        let surface = FfmpegSurface::new(
            decoder.command_sender(),
            decoder.shared(),
            decoder.audio_controls(),
        );
        let _ = output
            .send(PlaybackMessage::Started {
                session_id,
                surface,
            })
            .await;

        while let Some(event) = decoder.recv_event().await {
            if output
                .send(playback_message(session_id, event))
                .await
                .is_err()
            {
                break;
            }
        }
        tracing::debug!(session_id, "decode session ended");
    })
}

/// Wraps one decoder notification for the application. Frames go to the
/// canvas, everything else to the shell.
fn playback_message(session_id: u64, event: DecoderEvent) -> PlaybackMessage {
    let event = match event {
        DecoderEvent::FrameReady(frame) => {
            return PlaybackMessage::FrameReady { session_id, frame };
        }
        DecoderEvent::BufferingStarted => SurfaceEvent::BufferingStarted,
        DecoderEvent::BufferingEnded => SurfaceEvent::BufferingEnded,
        DecoderEvent::Progress {
            position_secs,
            duration_secs,
        } => SurfaceEvent::Progress {
            position_secs,
            duration_secs,
        },
        DecoderEvent::EndOfStream => SurfaceEvent::Ended,
        DecoderEvent::Error(message) => SurfaceEvent::Failed(message),
    };
    PlaybackMessage::Event { session_id, event }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_event(message: PlaybackMessage) -> Option<SurfaceEvent> {
        match message {
            PlaybackMessage::Event { event, .. } => Some(event),
            _ => None,
        }
    }

    #[test]
    fn decoder_events_map_to_surface_events() {
        assert_eq!(
            surface_event(playback_message(1, DecoderEvent::BufferingStarted)),
            Some(SurfaceEvent::BufferingStarted)
        );
        assert_eq!(
            surface_event(playback_message(
                1,
                DecoderEvent::Progress {
                    position_secs: 3.0,
                    duration_secs: 10.0
                }
            )),
            Some(SurfaceEvent::Progress {
                position_secs: 3.0,
                duration_secs: 10.0
            })
        );
        assert_eq!(
            surface_event(playback_message(1, DecoderEvent::EndOfStream)),
            Some(SurfaceEvent::Ended)
        );
        assert_eq!(
            surface_event(playback_message(1, DecoderEvent::Error("boom".into()))),
            Some(SurfaceEvent::Failed("boom".into()))
        );
    }

    #[test]
    fn frames_go_to_the_canvas_not_the_shell() {
        let frame = Frame {
            rgba_data: std::sync::Arc::new(vec![0; 4]),
            width: 1,
            height: 1,
            pts_secs: 2.5,
        };
        let message = playback_message(7, DecoderEvent::FrameReady(frame));
        assert_eq!(message.session_id(), 7);
        assert!(matches!(
            message,
            PlaybackMessage::FrameReady { ref frame, .. } if frame.pts_secs == 2.5
        ));
    }

    #[test]
    fn session_identity_includes_id() {
        let first = PlaybackSession {
            id: 1,
            source: "a.mp4".into(),
        };
        let restarted = PlaybackSession { id: 2, ..first.clone() };
        assert_ne!(first, restarted);
    }
}
