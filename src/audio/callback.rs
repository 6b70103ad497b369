//! Click voice — runs inside the cpal output callback.
//!
//! Holds the pre-rendered, interleaved click and a play cursor. Each output
//! block first applies pending [`ClickCommand`]s, then copies whatever is
//! left of the click and pads the block with silence.

use ringbuf::traits::Consumer;
use ringbuf::HeapCons;

use super::command::ClickCommand;

pub struct ClickVoice {
    commands: HeapCons<ClickCommand>,
    click: Vec<f32>,
    /// Next sample of `click` to play; `None` while idle.
    cursor: Option<usize>,
    volume: f32,
}

impl ClickVoice {
    pub fn new(commands: HeapCons<ClickCommand>, click: Vec<f32>) -> Self {
        Self {
            commands,
            click,
            cursor: None,
            volume: 1.0,
        }
    }

    /// Fill one interleaved output block.
    pub fn render(&mut self, output: &mut [f32]) {
        while let Some(cmd) = self.commands.try_pop() {
            match cmd {
                ClickCommand::Trigger => self.cursor = Some(0),
                ClickCommand::SetVolume(v) => self.volume = v.clamp(0.0, 1.0),
                ClickCommand::Silence => self.cursor = None,
            }
        }

        let mut written = 0;
        if let Some(pos) = self.cursor {
            let remaining = &self.click[pos.min(self.click.len())..];
            written = remaining.len().min(output.len());
            for (out, &s) in output.iter_mut().zip(&remaining[..written]) {
                *out = s * self.volume;
            }
            let next = pos + written;
            self.cursor = (next < self.click.len()).then_some(next);
        }
        output[written..].fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbuf::{
        traits::{Producer, Split},
        HeapProd, HeapRb,
    };

    fn voice(click: Vec<f32>) -> (HeapProd<ClickCommand>, ClickVoice) {
        let (prod, cons) = HeapRb::<ClickCommand>::new(8).split();
        (prod, ClickVoice::new(cons, click))
    }

    #[test]
    fn idle_voice_writes_silence() {
        let (_prod, mut v) = voice(vec![1.0; 4]);
        let mut out = vec![7.0f32; 8];
        v.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn trigger_plays_click_once() {
        let (mut prod, mut v) = voice(vec![0.1, 0.2, 0.3]);
        prod.try_push(ClickCommand::Trigger).unwrap();

        let mut out = vec![9.0f32; 5];
        v.render(&mut out);
        assert_eq!(out, vec![0.1, 0.2, 0.3, 0.0, 0.0]);

        v.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn click_spans_blocks() {
        let (mut prod, mut v) = voice(vec![0.5; 6]);
        prod.try_push(ClickCommand::Trigger).unwrap();

        let mut first = vec![0.0f32; 4];
        let mut second = vec![0.0f32; 4];
        v.render(&mut first);
        v.render(&mut second);
        assert_eq!(first, vec![0.5; 4]);
        assert_eq!(second, vec![0.5, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn retrigger_restarts_from_top() {
        let (mut prod, mut v) = voice(vec![1.0, 2.0, 3.0, 4.0]);
        prod.try_push(ClickCommand::Trigger).unwrap();
        let mut out = vec![0.0f32; 2];
        v.render(&mut out);

        prod.try_push(ClickCommand::Trigger).unwrap();
        v.render(&mut out);
        assert_eq!(out, vec![1.0, 2.0]);
    }

    #[test]
    fn volume_scales_and_clamps() {
        let (mut prod, mut v) = voice(vec![0.8]);
        prod.try_push(ClickCommand::SetVolume(0.5)).unwrap();
        prod.try_push(ClickCommand::Trigger).unwrap();
        let mut out = vec![0.0f32; 1];
        v.render(&mut out);
        assert!((out[0] - 0.4).abs() < 1e-6);

        prod.try_push(ClickCommand::SetVolume(4.0)).unwrap();
        prod.try_push(ClickCommand::Trigger).unwrap();
        v.render(&mut out);
        assert!((out[0] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn silence_cuts_click() {
        let (mut prod, mut v) = voice(vec![1.0; 8]);
        prod.try_push(ClickCommand::Trigger).unwrap();
        prod.try_push(ClickCommand::Silence).unwrap();
        let mut out = vec![0.0f32; 8];
        v.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn empty_click_is_harmless() {
        let (mut prod, mut v) = voice(Vec::new());
        prod.try_push(ClickCommand::Trigger).unwrap();
        let mut out = vec![3.0f32; 2];
        v.render(&mut out);
        assert_eq!(out, vec![0.0, 0.0]);
        v.render(&mut out);
        assert_eq!(out, vec![0.0, 0.0]);
    }
}
