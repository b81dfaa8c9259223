// SPDX-License-Identifier: MPL-2.0
//! [`MediaSurface`] backed by the FFmpeg decoder.

use super::audio_output::AudioControlsHandle;
use super::decoder::{lock, DecoderCommand, SharedPlaybackHandle};
use super::{Frame, MediaSurface, SeekTarget};
use crate::error::{Error, Result};
use crate::player::{PlaybackRate, Volume};
use tokio::sync::mpsc;

/// Cloneable handle to one decode session.
///
/// Queries read the snapshot published by the decoder thread; commands go
/// through its command channel and fail with [`Error::MediaUnavailable`]
/// once the session has ended. Volume and mute are written straight to the
/// audio output controls.
#[derive(Clone)]
pub struct FfmpegSurface {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    shared: SharedPlaybackHandle,
    audio: AudioControlsHandle,
}

impl FfmpegSurface {
    pub fn new(
        command_tx: mpsc::UnboundedSender<DecoderCommand>,
        shared: SharedPlaybackHandle,
        audio: AudioControlsHandle,
    ) -> Self {
        Self {
            command_tx,
            shared,
            audio,
        }
    }

    fn send(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::MediaUnavailable)
    }

    fn ensure_running(&self) -> Result<()> {
        if self.command_tx.is_closed() {
            Err(Error::MediaUnavailable)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for FfmpegSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FfmpegSurface")
            .field("running", &!self.command_tx.is_closed())
            .field("volume", &self.audio.volume())
            .field("muted", &self.audio.is_muted())
            .finish()
    }
}

impl MediaSurface for FfmpegSurface {
    fn current_time(&self) -> f64 {
        lock(&self.shared).position_secs
    }

    fn duration(&self) -> f64 {
        lock(&self.shared).duration_secs
    }

    fn seek_to(&mut self, target: SeekTarget) -> Result<()> {
        let Some(target_secs) = target.resolve(self.duration()) else {
            tracing::debug!(?target, "seek ignored until the duration is known");
            return Ok(());
        };
        self.send(DecoderCommand::Seek { target_secs })
    }

    fn set_playing(&mut self, playing: bool) -> Result<()> {
        self.send(if playing {
            DecoderCommand::Play
        } else {
            DecoderCommand::Pause
        })
    }

    fn set_volume(&mut self, volume: Volume) -> Result<()> {
        self.ensure_running()?;
        self.audio.set_volume(volume.value());
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        self.ensure_running()?;
        self.audio.set_muted(muted);
        Ok(())
    }

    fn set_playback_rate(&mut self, rate: PlaybackRate) -> Result<()> {
        self.send(DecoderCommand::SetRate(rate.value()))
    }

    fn current_frame(&self) -> Option<Frame> {
        lock(&self.shared).latest_frame.clone()
    }
}
