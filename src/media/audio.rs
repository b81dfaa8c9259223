// SPDX-License-Identifier: MPL-2.0
//! Audio track of a decode session.
//!
//! Audio packets come out of the same demuxer as the video, so they are
//! decoded in the video loop as they are read. That keeps both streams on
//! one clock: the loop is paced by video presentation and audio is queued
//! at the same rate. Samples are resampled to the device format, and to
//! `device_rate / playback_rate` so faster playback consumes media time
//! faster (pitch follows, like a tape).

use super::audio_output::{AudioControlsHandle, AudioOutput};
use crate::error::{Error, Result};
use ffmpeg_next::format::context::Input;
use ffmpeg_next::software::resampling;

/// Lowest resampler output rate, reached at the fastest playback rate.
const MIN_OUTPUT_RATE: u32 = 8_000;

/// Decoder, resampler and device output for one audio stream.
pub struct AudioTrack {
    stream_index: usize,
    time_base_secs: f64,
    decoder: ffmpeg_next::decoder::Audio,
    resampler: resampling::Context,
    output: AudioOutput,
    playback_rate: f64,
}

impl AudioTrack {
    /// Opens the best audio stream of `ictx` on the default output device.
    ///
    /// Returns `Ok(None)` when the source has no audio.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the stream cannot be decoded or
    /// resampled, and [`Error::Io`] if no output device can be opened.
    pub fn open(
        ictx: &Input,
        controls: AudioControlsHandle,
        playback_rate: f64,
    ) -> Result<Option<Self>> {
        let Some(input) = ictx.streams().best(ffmpeg_next::media::Type::Audio) else {
            return Ok(None);
        };
        let stream_index = input.index();
        let time_base = input.time_base();
        let time_base_secs = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Decode(format!("Failed to create audio codec context: {e}")))?;
        let decoder = context_decoder
            .decoder()
            .audio()
            .map_err(|e| Error::Decode(format!("Failed to create audio decoder: {e}")))?;

        let output = AudioOutput::new(controls)?;
        let resampler = build_resampler(&decoder, &output, playback_rate)?;

        Ok(Some(Self {
            stream_index,
            time_base_secs,
            decoder,
            resampler,
            output,
            playback_rate,
        }))
    }

    #[must_use]
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Decodes one packet and queues its samples.
    ///
    /// Frames that end before `skip_until` are dropped, as the video loop
    /// does after a seek lands on an earlier keyframe.
    pub fn decode_packet(&mut self, packet: &ffmpeg_next::Packet, skip_until: Option<f64>) {
        if let Err(e) = self.decoder.send_packet(packet) {
            tracing::debug!(error = %e, "audio packet rejected");
            return;
        }

        let mut decoded = ffmpeg_next::frame::Audio::empty();
        while self.decoder.receive_frame(&mut decoded).is_ok() {
            let pts_secs = decoded
                .timestamp()
                .map_or(0.0, |pts| pts as f64 * self.time_base_secs);
            let frame_secs = if decoded.rate() > 0 {
                decoded.samples() as f64 / f64::from(decoded.rate())
            } else {
                0.0
            };
            if skip_until.is_some_and(|target| pts_secs + frame_secs < target) {
                continue;
            }

            let mut resampled = ffmpeg_next::frame::Audio::empty();
            if let Err(e) = self.resampler.run(&decoded, &mut resampled) {
                tracing::warn!(error = %e, "audio resampling failed");
                continue;
            }
            let samples = extract_samples(&resampled, self.output.config().channels);
            let accepted = self.output.queue(&samples);
            if accepted < samples.len() {
                tracing::debug!(dropped = samples.len() - accepted, "audio buffer full");
            }
        }
    }

    /// Discards decoder state and queued samples after a seek.
    pub fn flush(&mut self) {
        self.decoder.flush();
        self.output.clear();
    }

    /// Rebuilds the resampler for a new playback rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the resampler cannot be created; the
    /// previous one stays in place.
    pub fn set_playback_rate(&mut self, playback_rate: f64) -> Result<()> {
        if (playback_rate - self.playback_rate).abs() < f64::EPSILON {
            return Ok(());
        }
        self.resampler = build_resampler(&self.decoder, &self.output, playback_rate)?;
        self.playback_rate = playback_rate;
        self.output.clear();
        Ok(())
    }
}

fn build_resampler(
    decoder: &ffmpeg_next::decoder::Audio,
    output: &AudioOutput,
    playback_rate: f64,
) -> Result<resampling::Context> {
    let config = output.config();
    let layout = match config.channels {
        1 => ffmpeg_next::ChannelLayout::MONO,
        _ => ffmpeg_next::ChannelLayout::STEREO,
    };
    resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
        layout,
        resampled_rate(config.sample_rate, playback_rate),
    )
    .map_err(|e| Error::Decode(format!("Failed to create audio resampler: {e}")))
}

/// Rate to resample to so that `device_rate` playback runs at
/// `playback_rate` times real time.
#[must_use]
pub fn resampled_rate(device_rate: u32, playback_rate: f64) -> u32 {
    if !playback_rate.is_finite() || playback_rate <= 0.0 {
        return device_rate;
    }
    let rate = (f64::from(device_rate) / playback_rate).round();
    (rate as u32).max(MIN_OUTPUT_RATE)
}

/// Reads packed `f32` samples out of a resampled frame.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
    let count = frame.samples() * channels as usize;
    frame.data(0)[..]
        .chunks_exact(4)
        .take(count)
        .map(|bytes| f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_speed_keeps_device_rate() {
        assert_eq!(resampled_rate(48_000, 1.0), 48_000);
    }

    #[test]
    fn faster_playback_resamples_lower() {
        assert_eq!(resampled_rate(48_000, 2.0), 24_000);
        assert_eq!(resampled_rate(44_100, 1.5), 29_400);
        assert_eq!(resampled_rate(48_000, 4.0), 12_000);
    }

    #[test]
    fn slower_playback_resamples_higher() {
        assert_eq!(resampled_rate(48_000, 0.5), 96_000);
        assert_eq!(resampled_rate(48_000, 0.75), 64_000);
    }

    #[test]
    fn invalid_rate_falls_back_to_device_rate() {
        assert_eq!(resampled_rate(48_000, 0.0), 48_000);
        assert_eq!(resampled_rate(48_000, f64::NAN), 48_000);
    }

    #[test]
    fn output_rate_has_a_floor() {
        assert_eq!(resampled_rate(8_000, 4.0), MIN_OUTPUT_RATE);
    }
}
