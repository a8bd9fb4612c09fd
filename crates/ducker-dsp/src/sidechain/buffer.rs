//! Per-channel FIFO of captured sidechain audio.
//!
//! Written by the source's capture callback, drained by the audio thread.
//! A single mutex guards every channel so they always move in lockstep; each
//! critical section is a bounded copy with no allocation once the backlog
//! capacity has been reserved.

use std::collections::VecDeque;
use std::iter;

use ducker_core::{CapturedAudio, Mutex};

struct Backlog {
    channels: Vec<VecDeque<f32>>,
    /// Largest block seen from either side.
    max_frames: usize,
}

impl Backlog {
    fn buffered(&self) -> usize {
        self.channels.first().map_or(0, VecDeque::len)
    }
}

pub struct SidechainBuffer {
    inner: Mutex<Backlog>,
}

impl SidechainBuffer {
    pub fn new(channels: usize) -> Self {
        Self {
            inner: Mutex::new(Backlog {
                channels: vec![VecDeque::new(); channels],
                max_frames: 0,
            }),
        }
    }

    pub fn channels(&self) -> usize {
        self.inner.lock().channels.len()
    }

    /// Re-shape to `channels`, dropping everything buffered.
    pub fn set_channels(&self, channels: usize) {
        let mut inner = self.inner.lock();
        inner.channels.resize_with(channels, VecDeque::new);
        inner.channels.iter_mut().for_each(VecDeque::clear);
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .channels
            .iter_mut()
            .for_each(VecDeque::clear);
    }

    /// Frames currently buffered per channel.
    pub fn buffered_frames(&self) -> usize {
        self.inner.lock().buffered()
    }

    /// High-water mark of block sizes seen so far.
    pub fn max_frames(&self) -> usize {
        self.inner.lock().max_frames
    }

    /// Append one captured block.
    ///
    /// Muted blocks append silence so the backlog keeps time with the source.
    /// Channels missing from `block` are padded with silence. The oldest frames
    /// are dropped first so the backlog never exceeds twice the high-water mark.
    pub fn push(&self, block: &CapturedAudio<'_>) {
        let frames = block.frames;
        let mut inner = self.inner.lock();

        inner.max_frames = inner.max_frames.max(frames);
        let cap = inner.max_frames * 2;
        if cap == 0 || inner.channels.is_empty() {
            return;
        }

        let excess = (inner.buffered() + frames).saturating_sub(cap);

        for (index, channel) in inner.channels.iter_mut().enumerate() {
            if excess > 0 {
                channel.drain(..excess.min(channel.len()));
            }
            channel.reserve(cap.saturating_sub(channel.len()));

            match block.data.get(index) {
                Some(samples) if !block.muted => {
                    let available = samples.len().min(frames);
                    channel.extend(samples[..available].iter().copied());
                    channel.extend(iter::repeat(0.0).take(frames - available));
                }
                _ => channel.extend(iter::repeat(0.0).take(frames)),
            }
        }
    }

    /// Move the oldest `frames` samples of each channel into `out`.
    ///
    /// If fewer than `frames` are buffered nothing is consumed, `out` is
    /// zero-filled and `false` is returned. Channels beyond the buffer's own
    /// count are zero-filled either way.
    pub fn pop_into<S: AsMut<[f32]>>(&self, out: &mut [S], frames: usize) -> bool {
        let (popped, filled) = {
            let mut inner = self.inner.lock();
            inner.max_frames = inner.max_frames.max(frames);

            let ready = !inner.channels.is_empty() && inner.buffered() >= frames;
            if ready {
                for (index, channel) in inner.channels.iter_mut().enumerate() {
                    let mut drained = channel.drain(..frames);
                    if let Some(dst) = out.get_mut(index) {
                        for sample in dst.as_mut().iter_mut().take(frames) {
                            *sample = drained.next().unwrap_or(0.0);
                        }
                    }
                }
            }
            (ready, if ready { inner.channels.len() } else { 0 })
        };

        for dst in out.iter_mut().skip(filled) {
            let dst = dst.as_mut();
            let len = frames.min(dst.len());
            dst[..len].fill(0.0);
        }

        popped
    }
}

impl Default for SidechainBuffer {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_block(buffer: &SidechainBuffer, value: f32, frames: usize, muted: bool) {
        let left = vec![value; frames];
        let right = vec![-value; frames];
        let data: [&[f32]; 2] = [&left, &right];
        buffer.push(&CapturedAudio::new(&data, muted));
    }

    fn lengths(buffer: &SidechainBuffer) -> Vec<usize> {
        buffer
            .inner
            .lock()
            .channels
            .iter()
            .map(VecDeque::len)
            .collect()
    }

    #[test]
    fn test_push_then_pop_in_order() {
        let buffer = SidechainBuffer::new(2);
        push_block(&buffer, 0.25, 64, false);
        push_block(&buffer, 0.5, 64, false);

        let mut out = vec![vec![0.0f32; 64]; 2];
        assert!(buffer.pop_into(&mut out, 64));
        assert!(out[0].iter().all(|&s| s == 0.25));
        assert!(out[1].iter().all(|&s| s == -0.25));

        assert!(buffer.pop_into(&mut out, 64));
        assert!(out[0].iter().all(|&s| s == 0.5));
        assert_eq!(buffer.buffered_frames(), 0);
    }

    #[test]
    fn test_short_backlog_zero_fills_without_consuming() {
        let buffer = SidechainBuffer::new(2);
        push_block(&buffer, 0.75, 100, false);

        let mut out = vec![vec![1.0f32; 128]; 2];
        assert!(!buffer.pop_into(&mut out, 128));
        assert!(out.iter().all(|ch| ch.iter().all(|&s| s == 0.0)));
        assert_eq!(buffer.buffered_frames(), 100);
    }

    #[test]
    fn test_muted_block_pushes_silence() {
        let buffer = SidechainBuffer::new(2);
        push_block(&buffer, 0.9, 32, true);
        assert_eq!(buffer.buffered_frames(), 32);

        let mut out = vec![vec![1.0f32; 32]; 2];
        assert!(buffer.pop_into(&mut out, 32));
        assert!(out.iter().all(|ch| ch.iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn test_backlog_capped_at_twice_high_water_mark() {
        let buffer = SidechainBuffer::new(2);
        for i in 0..1000 {
            push_block(&buffer, i as f32, 480, false);
            assert!(buffer.buffered_frames() <= 2 * buffer.max_frames());
        }
        assert_eq!(buffer.max_frames(), 480);
        assert_eq!(buffer.buffered_frames(), 960);

        // The newest audio survives the trimming.
        let mut out = vec![vec![0.0f32; 480]; 2];
        assert!(buffer.pop_into(&mut out, 480));
        assert_eq!(out[0][0], 998.0);
        assert!(buffer.pop_into(&mut out, 480));
        assert_eq!(out[0][0], 999.0);
    }

    #[test]
    fn test_channels_stay_in_lockstep() {
        let buffer = SidechainBuffer::new(4);

        // A stereo source feeding a four-channel pipeline.
        push_block(&buffer, 0.5, 256, false);
        assert_eq!(lengths(&buffer), vec![256; 4]);

        let mono = [0.1f32; 100];
        buffer.push(&CapturedAudio::new(&[&mono[..]], false));
        assert_eq!(lengths(&buffer), vec![356; 4]);

        let mut out = vec![vec![0.0f32; 200]; 2];
        assert!(buffer.pop_into(&mut out, 200));
        assert_eq!(lengths(&buffer), vec![156; 4]);
    }

    #[test]
    fn test_short_channel_is_padded() {
        let buffer = SidechainBuffer::new(2);
        let left = [0.5f32; 64];
        let right = [0.5f32; 16];
        let data: [&[f32]; 2] = [&left, &right];
        buffer.push(&CapturedAudio::new(&data, false));

        let mut out = vec![vec![0.0f32; 64]; 2];
        assert!(buffer.pop_into(&mut out, 64));
        assert_eq!(out[1][15], 0.5);
        assert_eq!(out[1][16], 0.0);
    }

    #[test]
    fn test_pop_raises_high_water_mark() {
        let buffer = SidechainBuffer::new(1);
        let mut out = vec![vec![0.0f32; 1024]];
        buffer.pop_into(&mut out, 1024);
        assert_eq!(buffer.max_frames(), 1024);
    }

    #[test]
    fn test_set_channels_clears() {
        let buffer = SidechainBuffer::new(2);
        push_block(&buffer, 0.5, 64, false);

        buffer.set_channels(6);
        assert_eq!(buffer.channels(), 6);
        assert_eq!(lengths(&buffer), vec![0; 6]);
    }

    #[test]
    fn test_extra_output_channels_zero_filled() {
        let buffer = SidechainBuffer::new(1);
        let mono = [0.3f32; 8];
        buffer.push(&CapturedAudio::new(&[&mono[..]], false));

        let mut out = vec![vec![1.0f32; 8]; 2];
        assert!(buffer.pop_into(&mut out, 8));
        assert_eq!(out[0][0], 0.3);
        assert!(out[1].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_concurrent_push_and_pop() {
        use std::sync::Arc;
        use std::thread;

        let buffer = Arc::new(SidechainBuffer::new(2));
        let producer = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                for _ in 0..2000 {
                    push_block(&buffer, 0.5, 128, false);
                }
            })
        };

        let mut out = vec![vec![0.0f32; 128]; 2];
        for _ in 0..2000 {
            if buffer.pop_into(&mut out, 128) {
                assert!(out[0].iter().all(|&s| s == 0.5));
                assert!(out[1].iter().all(|&s| s == -0.5));
            }
            let lens = lengths(&buffer);
            assert_eq!(lens[0], lens[1]);
        }

        producer.join().unwrap();
        assert!(buffer.buffered_frames() <= 256);
    }
}
