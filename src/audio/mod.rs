//! Audio output — the metronome click.
//!
//! The click is rendered once when the device opens and handed to a
//! [`ClickVoice`] on the cpal thread. Each beat only pushes a
//! [`ClickCommand::Trigger`] through a lock-free ring buffer.

pub mod callback;
pub mod click;
pub mod command;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::traits::{Producer, Split};
use ringbuf::{HeapProd, HeapRb};
use thiserror::Error;

pub use callback::ClickVoice;
pub use click::{generate_click, interleave};
pub use command::ClickCommand;

/// Pending commands the UI thread may queue ahead of the audio thread.
const COMMAND_QUEUE_LEN: usize = 32;

/// Seed for the click's noise burst.
const CLICK_SEED: u64 = 0xC11C;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device")]
    NoOutputDevice,
    #[error("audio device: {0}")]
    Device(String),
    #[error("audio stream: {0}")]
    Stream(String),
    #[error("click queue full")]
    QueueFull,
}

/// Metronome click on the default output device.
pub struct ClickEngine {
    // Dropping the stream stops playback.
    _stream: cpal::Stream,
    commands: HeapProd<ClickCommand>,
    device_name: String,
}

impl ClickEngine {
    pub fn new() -> Result<Self, AudioError> {
        let device = cpal::default_host()
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        let config = supported.config();
        let sample_rate = config.sample_rate.0;

        let click = interleave(&generate_click(sample_rate, CLICK_SEED), config.channels);
        let (commands, consumer) = HeapRb::<ClickCommand>::new(COMMAND_QUEUE_LEN).split();
        let mut voice = ClickVoice::new(consumer, click);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| voice.render(data),
                |err| tracing::warn!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| AudioError::Stream(e.to_string()))?;
        stream.play().map_err(|e| AudioError::Stream(e.to_string()))?;

        tracing::info!(
            device = %device_name,
            sample_rate,
            channels = config.channels,
            "click output ready"
        );
        Ok(Self {
            _stream: stream,
            commands,
            device_name,
        })
    }

    fn send(&mut self, cmd: ClickCommand) -> Result<(), AudioError> {
        self.commands
            .try_push(cmd)
            .map_err(|_| AudioError::QueueFull)
    }

    /// Sound one click.
    pub fn click(&mut self) -> Result<(), AudioError> {
        self.send(ClickCommand::Trigger)
    }

    pub fn set_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        self.send(ClickCommand::SetVolume(volume))
    }

    /// Cut off a click that is still ringing.
    pub fn silence(&mut self) -> Result<(), AudioError> {
        self.send(ClickCommand::Silence)
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}
