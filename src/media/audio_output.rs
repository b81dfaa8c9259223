// SPDX-License-Identifier: MPL-2.0
//! Audio output through cpal.
//!
//! The decode thread queues interleaved `f32` samples into a bounded buffer
//! that the device callback drains. Volume, mute and pause live in
//! [`AudioControls`], a set of atomics the UI thread writes directly and the
//! callback reads on every period.

use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Seconds of audio the buffer holds before new samples are dropped.
const BUFFER_SECS: usize = 2;

/// Just below full scale; `i16` conversion overflows at exactly 1.0.
const MAX_SAMPLE: f32 = 0.999_999_9;

/// Playback parameters shared between the UI and the device callback.
#[derive(Debug)]
pub struct AudioControls {
    /// `f32` bits of the linear volume in 0.0..=1.0.
    volume_bits: AtomicU32,
    muted: AtomicBool,
    paused: AtomicBool,
}

pub type AudioControlsHandle = Arc<AudioControls>;

impl AudioControls {
    /// Starts paused, like the decoder.
    #[must_use]
    pub fn new(volume: f32, muted: bool) -> Self {
        Self {
            volume_bits: AtomicU32::new(volume.to_bits()),
            muted: AtomicBool::new(muted),
            paused: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    pub fn set_volume(&self, volume: f32) {
        self.volume_bits.store(volume.to_bits(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Multiplier applied to each sample.
    ///
    /// The slider is linear but hearing is not, so the volume is squared:
    /// half the slider is about -12 dB.
    #[must_use]
    pub fn gain(&self) -> f32 {
        if self.is_muted() {
            0.0
        } else {
            let volume = self.volume();
            volume * volume
        }
    }
}

impl Default for AudioControls {
    fn default() -> Self {
        Self::new(1.0, false)
    }
}

/// Sample rate and channel count the decoder must resample to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutputConfig {
    pub sample_rate: u32,
    /// 1 (mono) or 2 (stereo); wider layouts are downmixed to stereo.
    pub channels: u16,
}

type SampleBuffer = Arc<Mutex<VecDeque<f32>>>;

fn lock(buffer: &SampleBuffer) -> MutexGuard<'_, VecDeque<f32>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An open output stream on the default device.
///
/// `cpal::Stream` is not `Send` on every platform, so the output is created
/// and kept on the decode thread.
pub struct AudioOutput {
    buffer: SampleBuffer,
    capacity: usize,
    config: AudioOutputConfig,
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device and starts its stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if there is no output device, its configuration
    /// cannot be read, its sample format is unsupported or the stream does
    /// not start.
    pub fn new(controls: AudioControlsHandle) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Io("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Io(format!("Failed to get audio config: {e}")))?;

        let config = AudioOutputConfig {
            sample_rate: supported_config.sample_rate(),
            channels: supported_config.channels().min(2),
        };
        let mut stream_config: cpal::StreamConfig = supported_config.config();
        stream_config.channels = config.channels;

        let capacity = config.sample_rate as usize * config.channels as usize * BUFFER_SECS;
        let buffer: SampleBuffer = Arc::new(Mutex::new(VecDeque::with_capacity(capacity)));

        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &stream_config, Arc::clone(&buffer), controls)?
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &stream_config, Arc::clone(&buffer), controls)?
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &stream_config, Arc::clone(&buffer), controls)?
            }
            other => {
                return Err(Error::Io(format!("Unsupported audio sample format: {other:?}")));
            }
        };

        stream
            .play()
            .map_err(|e| Error::Io(format!("Failed to start audio stream: {e}")))?;

        tracing::debug!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            "audio output started"
        );

        Ok(Self {
            buffer,
            capacity,
            config,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: SampleBuffer,
        controls: AudioControlsHandle,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    fill_output(data, &mut lock(&buffer), &controls);
                },
                |err| tracing::warn!(error = %err, "audio output error"),
                None,
            )
            .map_err(|e| Error::Io(format!("Failed to build audio stream: {e}")))
    }

    #[must_use]
    pub fn config(&self) -> AudioOutputConfig {
        self.config
    }

    /// Queues interleaved samples and returns how many were accepted.
    pub fn queue(&self, samples: &[f32]) -> usize {
        push_bounded(&mut lock(&self.buffer), samples, self.capacity)
    }

    /// Drops everything queued, after a seek.
    pub fn clear(&self) {
        lock(&self.buffer).clear();
    }
}

/// Appends as many samples as fit under `capacity`; the rest are dropped.
fn push_bounded(buffer: &mut VecDeque<f32>, samples: &[f32], capacity: usize) -> usize {
    let accepted = capacity.saturating_sub(buffer.len()).min(samples.len());
    buffer.extend(&samples[..accepted]);
    accepted
}

/// Fills one device period.
///
/// While paused the buffer is left untouched and silence is written. Muted
/// output still consumes samples so the audio stays in step with the video.
fn fill_output<T: cpal::SizedSample + cpal::FromSample<f32>>(
    data: &mut [T],
    buffer: &mut VecDeque<f32>,
    controls: &AudioControls,
) {
    if controls.is_paused() {
        data.fill(T::from_sample(0.0f32));
        return;
    }

    let gain = controls.gain();
    for sample in data.iter_mut() {
        let value = buffer.pop_front().unwrap_or(0.0) * gain;
        *sample = T::from_sample(value.clamp(-1.0, MAX_SAMPLE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn playing(volume: f32) -> AudioControls {
        let controls = AudioControls::new(volume, false);
        controls.set_paused(false);
        controls
    }

    #[test]
    fn controls_start_paused() {
        let controls = AudioControls::new(0.5, true);
        assert!(controls.is_paused());
        assert!(controls.is_muted());
        assert_abs_diff_eq!(controls.volume(), 0.5);
    }

    #[test]
    fn gain_is_squared_volume() {
        assert_abs_diff_eq!(playing(0.5).gain(), 0.25);
        assert_abs_diff_eq!(playing(1.0).gain(), 1.0);
        assert_abs_diff_eq!(playing(0.0).gain(), 0.0);
    }

    #[test]
    fn muting_zeroes_gain_and_keeps_volume() {
        let controls = playing(0.8);
        controls.set_muted(true);
        assert_abs_diff_eq!(controls.gain(), 0.0);
        assert_abs_diff_eq!(controls.volume(), 0.8);
    }

    #[test]
    fn output_applies_volume() {
        let controls = playing(0.5);
        let mut buffer: VecDeque<f32> = [0.8, -0.4].into_iter().collect();
        let mut data = [0.0f32; 2];
        fill_output(&mut data, &mut buffer, &controls);
        assert_abs_diff_eq!(data[0], 0.2);
        assert_abs_diff_eq!(data[1], -0.1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn muted_output_is_silent_but_consumes() {
        let controls = playing(1.0);
        controls.set_muted(true);
        let mut buffer: VecDeque<f32> = [0.5; 4].into_iter().collect();
        let mut data = [1.0f32; 3];
        fill_output(&mut data, &mut buffer, &controls);
        assert_eq!(data, [0.0; 3]);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn paused_output_keeps_the_buffer() {
        let controls = AudioControls::new(1.0, false);
        let mut buffer: VecDeque<f32> = [0.5; 4].into_iter().collect();
        let mut data = [1.0f32; 4];
        fill_output(&mut data, &mut buffer, &controls);
        assert_eq!(data, [0.0; 4]);
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn underrun_pads_with_silence() {
        let controls = playing(1.0);
        let mut buffer: VecDeque<f32> = [0.5].into_iter().collect();
        let mut data = [1.0f32; 3];
        fill_output(&mut data, &mut buffer, &controls);
        assert_abs_diff_eq!(data[0], 0.5);
        assert_eq!(&data[1..], &[0.0, 0.0]);
    }

    #[test]
    fn full_scale_is_clipped() {
        let controls = playing(1.0);
        let mut buffer: VecDeque<f32> = [1.5, -1.5].into_iter().collect();
        let mut data = [0i16; 2];
        fill_output(&mut data, &mut buffer, &controls);
        assert!(data[0] > 32_000);
        assert!(data[1] < -32_000);
    }

    #[test]
    fn queue_drops_samples_past_capacity() {
        let mut buffer = VecDeque::new();
        assert_eq!(push_bounded(&mut buffer, &[0.1; 6], 8), 6);
        assert_eq!(push_bounded(&mut buffer, &[0.2; 6], 8), 2);
        assert_eq!(push_bounded(&mut buffer, &[0.3; 6], 8), 0);
        assert_eq!(buffer.len(), 8);
    }
}
