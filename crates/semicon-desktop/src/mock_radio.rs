//! Fake packet radio producing random sensor packets on random pipes.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use semicon_core::consts::TRANSFER_SIZE;
use semicon_core::Radio;

// Pipe 0 carries acks only
const PIPES: u8 = 6;

pub struct MockRadio {
    rng: SmallRng,
    queue: VecDeque<(u8, Vec<u8>)>,
}

impl MockRadio {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            queue: VecDeque::new(),
        }
    }

    /// Queue between one and `max` random packets. Returns how many were queued.
    pub fn burst(&mut self, max: usize) -> usize {
        let count = self.rng.random_range(1..=max.max(1));
        for _ in 0..count {
            let pipe = self.rng.random_range(1..PIPES);
            let len = self.rng.random_range(1..=TRANSFER_SIZE);
            let mut data = vec![0u8; len];
            self.rng.fill(&mut data[..]);
            self.queue.push_back((pipe, data));
        }
        count
    }

    pub fn push(&mut self, pipe: u8, data: &[u8]) {
        self.queue.push_back((pipe, data.to_vec()));
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

impl Radio for MockRadio {
    fn readable_pipe(&mut self) -> Option<u8> {
        self.queue.front().map(|(pipe, _)| *pipe)
    }

    fn receive(&mut self, _pipe: u8, buf: &mut [u8]) -> usize {
        let Some((_, data)) = self.queue.pop_front() else {
            return 0;
        };
        let len = data.len().min(buf.len());
        buf[..len].copy_from_slice(&data[..len]);
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semicon_core::radio;
    use semicon_core::{Console, Discard, ThreadMode};

    #[test]
    fn test_burst_stays_within_bounds() {
        let mut radio = MockRadio::new(7);
        for _ in 0..20 {
            let queued = radio.burst(4);
            assert!((1..=4).contains(&queued));
        }
        for (pipe, data) in &radio.queue {
            assert!((1..PIPES).contains(pipe));
            assert!((1..=TRANSFER_SIZE).contains(&data.len()));
        }
    }

    #[test]
    fn test_drain_empties_the_queue() {
        let mut radio = MockRadio::new(1);
        let queued = radio.burst(5);
        let mut console: Console<Discard, ThreadMode, 1024> = Console::new(Discard, ThreadMode);

        assert_eq!(radio::drain(&mut radio, &mut console), queued);
        assert_eq!(radio.queued(), 0);

        let text = String::from_utf8(console.buffered().to_vec()).unwrap();
        assert_eq!(text.matches("rx ").count(), queued);
    }

    #[test]
    fn test_pushed_packet_is_dumped() {
        let mut radio = MockRadio::new(0);
        radio.push(1, &[0xde, 0xad]);
        let mut console: Console<Discard, ThreadMode, 64> = Console::new(Discard, ThreadMode);

        radio::drain(&mut radio, &mut console);
        assert_eq!(console.buffered(), b"nrf event\nrx de ad \n");
    }
}
