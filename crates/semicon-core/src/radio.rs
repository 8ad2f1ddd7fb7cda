//! Sensor radio drain - prints every packet waiting in the radio as a hex dump.
//!
//! Runs from the radio's event callback in task context, never from the
//! interrupt itself.

use crate::consts::TRANSFER_SIZE;
use crate::output::DebugOutput;

/// Receive side of a packet radio with numbered pipes.
///
/// Implementations open and close the underlying device around each call,
/// so the device is only held for one operation at a time.
pub trait Radio {
    /// Pipe with a packet waiting, if any. Pipe 0 reads as nothing waiting.
    fn readable_pipe(&mut self) -> Option<u8>;

    /// Read the next packet from `pipe` into `buf`; returns its length.
    fn receive(&mut self, pipe: u8, buf: &mut [u8]) -> usize;
}

/// Drain every waiting packet, printing `rx <hex dump>` per packet.
///
/// Returns the number of packets read.
pub fn drain<R, O>(radio: &mut R, out: &mut O) -> usize
where
    R: Radio + ?Sized,
    O: DebugOutput + ?Sized,
{
    out.print("nrf event\n");

    let mut rx = [0u8; TRANSFER_SIZE];
    let mut packets = 0;
    while let Some(pipe) = radio.readable_pipe().filter(|&pipe| pipe != 0) {
        let len = radio.receive(pipe, &mut rx).min(TRANSFER_SIZE);
        packets += 1;
        if len > 0 {
            out.print("rx ");
            out.dump(&rx[..len]);
            out.print("\n");
        }
    }
    packets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::context::ThreadMode;
    use crate::test_support::Capture;
    use std::collections::VecDeque;

    struct ScriptedRadio {
        packets: VecDeque<(u8, Vec<u8>)>,
    }

    impl Radio for ScriptedRadio {
        fn readable_pipe(&mut self) -> Option<u8> {
            self.packets.front().map(|(pipe, _)| *pipe)
        }

        fn receive(&mut self, _pipe: u8, buf: &mut [u8]) -> usize {
            let Some((_, data)) = self.packets.pop_front() else {
                return 0;
            };
            let len = data.len().min(buf.len());
            buf[..len].copy_from_slice(&data[..len]);
            len
        }
    }

    #[test]
    fn test_drain_dumps_each_packet() {
        let mut radio = ScriptedRadio {
            packets: VecDeque::from([(1, vec![0x00, 0xab]), (3, vec![0xff])]),
        };
        let mut console: Console<Capture, ThreadMode, 256> = Console::new(Capture::default(), ThreadMode);

        assert_eq!(drain(&mut radio, &mut console), 2);
        assert_eq!(console.buffered(), b"nrf event\nrx 00 ab \nrx ff \n");
    }

    #[test]
    fn test_drain_with_nothing_waiting() {
        let mut radio = ScriptedRadio { packets: VecDeque::new() };
        let mut console: Console<Capture, ThreadMode, 64> = Console::new(Capture::default(), ThreadMode);

        assert_eq!(drain(&mut radio, &mut console), 0);
        assert_eq!(console.buffered(), b"nrf event\n");
    }

    #[test]
    fn test_pipe_zero_stops_the_drain() {
        let mut radio = ScriptedRadio {
            packets: VecDeque::from([(0, vec![0x01]), (1, vec![0x02])]),
        };
        let mut console: Console<Capture, ThreadMode, 64> = Console::new(Capture::default(), ThreadMode);

        assert_eq!(drain(&mut radio, &mut console), 0);
        assert_eq!(console.buffered(), b"nrf event\n");
        assert_eq!(radio.packets.len(), 2);
    }

    #[test]
    fn test_empty_packet_prints_nothing() {
        let mut radio = ScriptedRadio {
            packets: VecDeque::from([(2, Vec::new())]),
        };
        let mut console: Console<Capture, ThreadMode, 64> = Console::new(Capture::default(), ThreadMode);

        assert_eq!(drain(&mut radio, &mut console), 1);
        assert_eq!(console.buffered(), b"nrf event\n");
    }
}
