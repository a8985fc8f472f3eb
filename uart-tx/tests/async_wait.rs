//! Awaiting transfers from an async task while a plain thread plays the
//! transmit interrupt.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use uart_tx::{Completion, Transmitter, TxError};

mod common;
use common::FakeUart;

type Serial = Arc<Mutex<Transmitter<'static, 'static, FakeUart>>>;

/// Services the transmitter until the buffer in flight is done.
fn spawn_interrupt(serial: &Serial) -> thread::JoinHandle<usize> {
    let serial = serial.clone();
    thread::spawn(move || {
        let mut fired = 0;
        loop {
            let mut serial = serial.lock().unwrap();
            if !serial.is_busy() {
                return fired;
            }
            serial.on_interrupt();
            fired += 1;
            drop(serial);
            thread::sleep(Duration::from_micros(200));
        }
    })
}

#[tokio::test]
async fn wait_resumes_after_last_byte() {
    static TX_DONE: Completion = Completion::new();
    let serial: Serial = Arc::new(Mutex::new(Transmitter::new(FakeUart::ready(), &TX_DONE)));

    let transfer = serial.lock().unwrap().start(b"Hola Mundo\r\n").unwrap();
    assert!(transfer.is_pending());
    let isr = spawn_interrupt(&serial);

    assert_eq!(transfer.wait().await, Ok(()));
    assert_eq!(isr.join().unwrap(), 11);

    let serial = serial.lock().unwrap();
    assert_eq!(serial.hardware().written, b"Hola Mundo\r\n");
    assert!(!serial.hardware().armed);
}

#[tokio::test]
async fn sequential_sends_each_wait_for_completion() {
    static TX_DONE: Completion = Completion::new();
    let serial: Serial = Arc::new(Mutex::new(Transmitter::new(FakeUart::ready(), &TX_DONE)));

    for message in [&b"Hola"[..], &b"Mundo"[..]] {
        let transfer = serial.lock().unwrap().start(message).unwrap();
        let isr = spawn_interrupt(&serial);
        transfer.wait().await.unwrap();
        isr.join().unwrap();
    }

    assert_eq!(serial.lock().unwrap().hardware().written, b"HolaMundo");
}

#[tokio::test]
async fn already_resolved_transfer_returns_immediately() {
    let completion = Completion::new();
    let mut serial = Transmitter::new(FakeUart::ready(), &completion);

    let transfer = serial.start(b"ok").unwrap();
    assert!(serial.on_interrupt());

    let outcome = tokio::time::timeout(Duration::from_millis(100), transfer.wait()).await;
    assert_eq!(outcome, Ok(Ok(())));
}

#[tokio::test]
async fn stalled_line_never_completes() {
    let completion = Completion::new();
    let mut serial = Transmitter::new(FakeUart::stalled(), &completion);

    let transfer = serial.start(b"stalled").unwrap();
    for _ in 0..8 {
        assert!(!serial.on_interrupt());
    }

    assert!(
        tokio::time::timeout(Duration::from_millis(20), transfer.wait())
            .await
            .is_err()
    );
    assert_eq!(serial.progress().sent, 1);
}

#[tokio::test]
async fn abort_wakes_the_parked_task() {
    static TX_DONE: Completion = Completion::new();
    let serial: Serial = Arc::new(Mutex::new(Transmitter::new(FakeUart::stalled(), &TX_DONE)));

    let transfer = serial.lock().unwrap().start(b"Mundo").unwrap();
    let aborter = {
        let serial = serial.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            let aborted = serial.lock().unwrap().abort();
            aborted
        })
    };

    assert_eq!(
        transfer.wait().await,
        Err(TxError::Aborted { sent: 1, total: 5 })
    );
    assert!(aborter.join().unwrap().is_ok());
}
