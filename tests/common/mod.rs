//! Fake hardware shared by the console integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Mutex;

use dma_line_console::console::isr;
use dma_line_console::hal::{DmaRx, DmaTx, IdleLine, TxRegister};
use dma_line_console::logging::LogStream;
use dma_line_console::{
    AtomicWake, CommandProcessor, ConsoleConfig, ConsoleHealth, ConsoleShared, ConsoleWorker,
    DmaRegion, SpinPermit, WakeSignal,
};

pub const BANNER: &str = "welcome\r\n>";

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Invoke(String),
    Send(Vec<u8>),
    Wait { permit_held: bool },
}

/// Everything the "hardware" side owns: DMA memory, wire, interrupts.
pub struct Hw<const N: usize> {
    pub region: DmaRegion<N>,
    received: AtomicUsize,
    pub started: AtomicBool,
    pub tx_in_flight: AtomicBool,
    /// Complete every DMA send immediately.
    pub auto_complete: AtomicBool,
    pub wire: Mutex<Vec<u8>>,
    pub events: Mutex<Vec<Event>>,
    wake: AtomicWake,
    pub permit: SpinPermit,
    pub health: ConsoleHealth,
    pub log: LogStream,
}

impl<const N: usize> Hw<N> {
    pub fn new() -> Self {
        Self {
            region: DmaRegion::new(),
            received: AtomicUsize::new(0),
            started: AtomicBool::new(false),
            tx_in_flight: AtomicBool::new(false),
            auto_complete: AtomicBool::new(true),
            wire: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            wake: AtomicWake::new(),
            permit: SpinPermit::new(),
            health: ConsoleHealth::new(),
            log: LogStream::new(),
        }
    }

    /// DMA engine writes `bytes` into the region.
    pub fn receive(&self, bytes: &[u8]) {
        for &b in bytes {
            let pos = self.received.fetch_add(1, Ordering::SeqCst);
            self.region.store(pos, b);
        }
    }

    /// Idle-line interrupt.
    pub fn line_idle(&self) {
        let mut flag = IdleFlag(true);
        isr::on_uart_interrupt(&mut flag, self);
    }

    /// Bytes arrive, then the line goes quiet.
    pub fn burst(&self, bytes: &[u8]) {
        self.receive(bytes);
        self.line_idle();
    }

    /// Transmit-complete interrupt for the in-flight transfer.
    pub fn complete_tx(&self) {
        self.tx_in_flight.store(false, Ordering::SeqCst);
        isr::on_tx_complete(self);
    }

    pub fn wire_string(&self) -> String {
        String::from_utf8(self.wire.lock().unwrap().clone()).unwrap()
    }

    pub fn clear_wire(&self) {
        self.wire.lock().unwrap().clear();
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn invocations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Invoke(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    pub fn shared(&self) -> ConsoleShared<'_, Self, SpinPermit> {
        ConsoleShared {
            wake: self,
            permit: &self.permit,
            health: &self.health,
            log: &self.log,
        }
    }

    pub fn port(&self) -> FakePort<'_, N> {
        FakePort { hw: self }
    }
}

impl<const N: usize> WakeSignal for Hw<N> {
    fn notify_from_isr(&self) -> bool {
        self.wake.notify_from_isr()
    }

    fn wait(&self) {
        self.events.lock().unwrap().push(Event::Wait {
            permit_held: self.permit.is_held(),
        });
        self.wake.wait();
    }
}

pub struct IdleFlag(pub bool);

impl IdleLine for IdleFlag {
    fn idle_flag_set(&self) -> bool {
        self.0
    }

    fn clear_idle_flag(&mut self) {
        self.0 = false;
    }
}

pub struct FakePort<'a, const N: usize> {
    pub hw: &'a Hw<N>,
}

impl<const N: usize> DmaRx for FakePort<'_, N> {
    fn start_continuous_receive(&mut self, cells: &[AtomicU8]) {
        assert_eq!(cells.len(), N);
        self.hw.started.store(true, Ordering::SeqCst);
    }

    fn remaining_count(&self) -> usize {
        N - self.hw.received.load(Ordering::SeqCst) % N
    }
}

impl<const N: usize> DmaTx for FakePort<'_, N> {
    fn send_async(&mut self, data: &[u8]) {
        assert!(
            !self.hw.tx_in_flight.swap(true, Ordering::SeqCst),
            "second transfer started before the first completed"
        );
        self.hw.wire.lock().unwrap().extend_from_slice(data);
        self.hw.events.lock().unwrap().push(Event::Send(data.to_vec()));

        if self.hw.auto_complete.load(Ordering::SeqCst) {
            self.hw.complete_tx();
        }
    }

    fn tx_busy(&self) -> bool {
        self.hw.tx_in_flight.load(Ordering::SeqCst)
    }
}

impl<const N: usize> TxRegister for FakePort<'_, N> {
    fn write_data(&mut self, byte: u8) {
        assert!(
            !self.hw.tx_in_flight.load(Ordering::SeqCst),
            "blocking send while DMA transfer in flight"
        );
        self.hw.wire.lock().unwrap().push(byte);
    }

    fn transmit_complete(&self) -> bool {
        true
    }
}

/// Processor that replays scripted responses and records every call.
pub struct ScriptedProcessor<'a, const N: usize> {
    hw: &'a Hw<N>,
    script: Vec<(&'static str, bool)>,
    pub registered: bool,
    /// Output buffer was all zero on every call.
    pub always_cleared: bool,
    /// A DMA transfer was in flight during some call.
    pub ran_during_tx: bool,
}

impl<'a, const N: usize> ScriptedProcessor<'a, N> {
    /// Responds with `script` in order, then with nothing.
    pub fn new(hw: &'a Hw<N>, script: &[(&'static str, bool)]) -> Self {
        Self {
            hw,
            script: script.iter().rev().copied().collect(),
            registered: false,
            always_cleared: true,
            ran_during_tx: false,
        }
    }

    /// Never responds.
    pub fn silent(hw: &'a Hw<N>) -> Self {
        Self::new(hw, &[])
    }
}

impl<const N: usize> CommandProcessor for ScriptedProcessor<'_, N> {
    fn register_commands(&mut self) {
        self.registered = true;
    }

    fn process(&mut self, line: &str, output: &mut [u8]) -> bool {
        self.hw.events.lock().unwrap().push(Event::Invoke(line.to_string()));
        if output.iter().any(|&b| b != 0) {
            self.always_cleared = false;
        }
        if self.hw.tx_in_flight.load(Ordering::SeqCst) {
            self.ran_during_tx = true;
        }

        let (text, more) = self.script.pop().unwrap_or(("", false));
        output[..text.len()].copy_from_slice(text.as_bytes());
        more
    }
}

pub type TestWorker<'a, const N: usize, const LINE: usize> =
    ConsoleWorker<'a, FakePort<'a, N>, ScriptedProcessor<'a, N>, Hw<N>, SpinPermit, LINE, 128>;

pub fn config() -> ConsoleConfig {
    ConsoleConfig {
        banner: BANNER,
        prompt: "\n->",
    }
}

/// Worker already started, banner cleared from the wire and events.
pub fn started_worker<'a, const N: usize, const LINE: usize>(
    hw: &'a Hw<N>,
    processor: ScriptedProcessor<'a, N>,
) -> TestWorker<'a, N, LINE> {
    let mut worker = ConsoleWorker::new(hw.port(), processor, hw.region.cells(), hw.shared(), config());
    worker.start();
    hw.clear_wire();
    hw.events.lock().unwrap().clear();
    worker
}
