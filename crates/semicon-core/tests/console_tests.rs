//! Console behaviour tests through the public API

use semicon_core::consts::DROPPED_MARKER;
use semicon_core::format::{self, Fixed2};
use semicon_core::{
    Append, Console, ConsoleConfig, Flush, IrqFlag, OutputBuffer, ThreadMode, Transport,
    TransportError,
};

const CAP: usize = 128;

#[derive(Default)]
struct Debugger {
    writes: Vec<Vec<u8>>,
}

impl Debugger {
    fn sent(&self) -> Vec<u8> {
        self.writes.concat()
    }
}

impl Transport for Debugger {
    fn write(&mut self, handle: u32, bytes: &[u8]) -> Result<(), TransportError> {
        assert_eq!(handle, 2, "console output goes to the debugger's stderr");
        self.writes.push(bytes.to_vec());
        Ok(())
    }
}

fn console() -> Console<Debugger, ThreadMode, CAP> {
    // Overflow tests need drop-and-mark, whatever the crate features say
    let config = ConsoleConfig { auto_flush: false, ..ConsoleConfig::DEFAULT };
    Console::with_config(Debugger::default(), ThreadMode, config)
}

#[test]
fn test_hex_round_trips_for_every_byte() {
    for v in 0..=255u8 {
        let digits = format::hex(v);
        let text = std::str::from_utf8(&digits).unwrap();
        assert_eq!(text.len(), 2);
        assert_eq!(u8::from_str_radix(text, 16).unwrap(), v);
    }
}

#[test]
fn test_appends_below_capacity_sum_up() {
    let mut buffer: OutputBuffer<CAP> = OutputBuffer::new();
    let sizes = [3usize, 10, 0, 41, 60];
    for n in sizes {
        assert_eq!(buffer.append(&vec![b'.'; n]), Append::Stored);
    }
    assert_eq!(buffer.len(), sizes.iter().sum::<usize>());
    assert_eq!(buffer.stats().marked, 0);
}

#[test]
fn test_block_of_capacity_size_is_dropped() {
    let mut buffer: OutputBuffer<CAP> = OutputBuffer::new();
    buffer.append(b"abc");
    assert_eq!(buffer.append(&[0u8; CAP]), Append::TooLarge);
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.append(&[0u8; 3 * CAP]), Append::TooLarge);
    assert_eq!(buffer.as_bytes(), b"abc");
}

#[test]
fn test_overflow_at_capacity_transmits_marker() {
    let mut con = console();
    for _ in 0..CAP - 1 {
        con.write_char(b'o');
    }
    assert_eq!(con.pending(), CAP - 1);

    con.write_char(b'n');
    assert_eq!(con.stats().marked, 1);

    assert_eq!(con.flush(), Flush::Sent);
    let sent = con.transport().sent();
    assert_eq!(&sent[..DROPPED_MARKER.len()], DROPPED_MARKER);
    assert_eq!(&sent[DROPPED_MARKER.len()..], b"n");
    assert!(!sent.contains(&b'o'));
}

#[test]
fn test_flush_in_interrupt_leaves_buffer() {
    let irq = IrqFlag::new();
    let mut con: Console<Debugger, &IrqFlag, CAP> = Console::new(Debugger::default(), &irq);
    con.print("pending\n");

    irq.enter();
    assert_eq!(con.flush(), Flush::Deferred);
    assert_eq!(con.pending(), 8);
    irq.exit();

    assert_eq!(con.flush(), Flush::Sent);
    assert_eq!(con.transport().sent(), b"pending\n");
}

#[test]
fn test_flush_with_logging_disabled_skips_transport() {
    let mut con = console();
    con.print("secret");
    con.disable_log();

    assert_eq!(con.flush(), Flush::Disabled);
    assert_eq!(con.pending(), 0);
    assert!(con.transport().writes.is_empty());
}

#[test]
fn test_float_formatting() {
    assert_eq!(Fixed2(-3.4567).to_string(), "-3.45");
    assert_eq!(Fixed2(0.0).to_string(), "0.00");
    assert_eq!(Fixed2(100.999).to_string(), "100.99");

    let mut con = console();
    con.print_float(-3.4567);
    assert_eq!(con.buffered(), b"-3.45");
}

#[test]
fn test_dump_format() {
    let mut con = console();
    con.dump(&[0x00, 0xab, 0xff]);
    assert_eq!(con.buffered(), b"00 ab ff ");
}

#[test]
fn test_disable_buffer_flushes_pending_first() {
    let mut con = console();
    con.print("first ");

    assert_eq!(con.disable_buffer(), Flush::Sent);
    con.print("second");

    assert!(!con.is_buffer_enabled());
    assert_eq!(con.pending(), 0);
    assert_eq!(con.transport().writes[0], b"first ");
    assert_eq!(con.transport().sent(), b"first second");
}

#[test]
fn test_auto_flush_config_keeps_everything() {
    let config = ConsoleConfig { auto_flush: true, ..ConsoleConfig::DEFAULT };
    let mut con: Console<Debugger, ThreadMode, 32> = Console::with_config(Debugger::default(), ThreadMode, config);

    let text = "0123456789".repeat(10);
    con.print(&text);
    con.flush();

    assert_eq!(con.transport().sent(), text.as_bytes());
    assert_eq!(con.stats().marked, 0);
}

#[test]
fn test_newline_output_is_bare_lf_by_default() {
    let mut con = console();
    con.print("a\r\nb\n");
    con.flush();
    assert_eq!(con.transport().sent(), b"a\nb\n");
    assert!(!con.is_mid_line());
}
