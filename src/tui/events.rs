use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CEvent, KeyEvent};

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Key presses and periodic ticks from a background thread. The tick rate can
/// be changed while running; the next wait picks it up.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    tick_rate_ms: Arc<AtomicU64>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let rate = Arc::new(AtomicU64::new(tick_rate_ms.max(1)));
        let thread_rate = Arc::clone(&rate);

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let tick_rate = Duration::from_millis(thread_rate.load(Ordering::Relaxed));
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(CEvent::Key(key)) => {
                            if tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            rx,
            tick_rate_ms: rate,
        }
    }

    pub fn set_tick_rate(&self, tick_rate_ms: u64) {
        let tick_rate_ms = tick_rate_ms.max(1);
        if self.tick_rate_ms.swap(tick_rate_ms, Ordering::Relaxed) != tick_rate_ms {
            log::debug!("tick rate now {}ms", tick_rate_ms);
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
