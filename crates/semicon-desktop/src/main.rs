//! Desktop simulator for the semihosting console.
//!
//! The "target" is this process: a main loop driven by the TUI, an interrupt
//! handler simulated by a ticker thread, and a debugger that collects every
//! SYS_WRITE on a channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::LevelFilter;
use semicon_core::{Console, ConsoleConfig, ConsoleLogger, IrqFlag, SharedConsole};

mod debugger;
mod mock_radio;
mod sim_tui;

use debugger::HostDebugger;
use mock_radio::MockRadio;

pub type SimConsole = SharedConsole<HostDebugger, &'static IrqFlag>;

/// Set while the ticker thread plays interrupt handler. There is one
/// simulated core, so the whole process counts as handler mode meanwhile.
static IRQ: IrqFlag = IrqFlag::new();

const IRQ_PERIOD: Duration = Duration::from_millis(500);
const RADIO_SEED: u64 = 0x5eed;

fn main() -> anyhow::Result<()> {
    let (tx, debugger_rx) = channel();
    let debugger = HostDebugger::new(tx);
    let attached = debugger.attachment();

    let config = ConsoleConfig {
        auto_flush: true,
        ..ConsoleConfig::DEFAULT
    };
    let console: &'static SimConsole = Box::leak(Box::new(SharedConsole::new(
        Console::with_config(debugger, &IRQ, config),
    )));

    let logger = Box::leak(Box::new(ConsoleLogger::new(console, LevelFilter::Debug)));
    semicon_core::logger::init(logger);

    let irq_running = Arc::new(AtomicBool::new(true));
    let quit = Arc::new(AtomicBool::new(false));
    let ticker = {
        let irq_running = Arc::clone(&irq_running);
        let quit = Arc::clone(&quit);
        thread::spawn(move || {
            let mut tick = 0u32;
            while !quit.load(Ordering::Relaxed) {
                thread::sleep(IRQ_PERIOD);
                if irq_running.load(Ordering::Relaxed) {
                    timer_interrupt(console, tick);
                    tick = tick.wrapping_add(1);
                }
            }
        })
    };

    let sim = sim_tui::Sim {
        console,
        debugger_rx,
        attached,
        irq_running,
        radio: MockRadio::new(RADIO_SEED),
    };
    let result = sim_tui::run(sim);

    quit.store(true, Ordering::Relaxed);
    let _ = ticker.join();

    result?;
    Ok(())
}

/// Body of the simulated timer handler. Its flush is always deferred.
fn timer_interrupt(console: &SimConsole, tick: u32) {
    IRQ.enter();
    console.print_fmt(format_args!("irq tick {} vbat=", tick));
    console.print_float(3.3 + (tick % 10) as f32 * 0.1);
    console.print(" status=");
    console.print_hex((tick & 0xff) as u8);
    console.print("\n");
    console.flush();
    IRQ.exit();
}
