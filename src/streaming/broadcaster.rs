//! Text-line broadcast server over TCP
//!
//! The broadcaster owns the listener and the connected-client list, and is
//! serviced continuously from the foreground thread: accept new clients,
//! drain the line queue, write each line (newline-terminated UTF-8) to every
//! connected client, prune clients whose writes fail.
//!
//! Producers on other threads enqueue through [`BroadcastHandle`], backed by
//! a bounded lock-free queue. Enqueue never blocks and never observes
//! network state, so the sampling path and the I/O path share no lock.
//! Inbound client bytes are ignored; the protocol is broadcast-only.

use crate::error::{Error, Result};
use crossbeam_queue::ArrayQueue;
use log::{debug, info, warn};
use std::io::Write;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Bounded line queue: ~20 minutes of readings at the default 5 s interval
const QUEUE_CAPACITY: usize = 256;

/// Max lines drained per service pass, so accepts are never starved
const DRAIN_BATCH: usize = 50;

/// Idle sleep when there is nothing to accept or send
const IDLE_SLEEP: Duration = Duration::from_millis(10);

/// Cross-thread enqueue capability for broadcast lines
///
/// Cheap to clone; all clones feed the same queue. Enqueue is fire-and-forget:
/// when the queue is full the line is dropped with a debug log.
#[derive(Clone)]
pub struct BroadcastHandle {
    queue: Arc<ArrayQueue<String>>,
}

impl BroadcastHandle {
    /// Standalone handle with its own queue (testing and custom wiring)
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: Arc::new(ArrayQueue::new(capacity)),
        }
    }

    /// Queue one text line for broadcast to all connected clients
    ///
    /// Non-blocking. Zero connected clients, a full queue, and client send
    /// errors are all absorbed here or in the service loop; none of them
    /// propagate back to the producer.
    pub fn broadcast_text(&self, line: String) {
        if self.queue.push(line).is_err() {
            debug!("Broadcast queue full, dropping line");
        }
    }

    /// Dequeue one pending line (consumer side)
    pub(crate) fn try_pop(&self) -> Option<String> {
        self.queue.pop()
    }
}

/// TCP broadcast server for newline-delimited text
pub struct TcpBroadcaster {
    listener: TcpListener,
    clients: Vec<TcpStream>,
    queue: Arc<ArrayQueue<String>>,
    published: u64,
    dropped_clients: u64,
}

impl TcpBroadcaster {
    /// Bind the broadcast listener
    ///
    /// The listener is non-blocking; clients are accepted during
    /// [`service_loop`](Self::service_loop) passes.
    pub fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        info!("Broadcast listener bound to {}", listener.local_addr()?);

        Ok(Self {
            listener,
            clients: Vec::new(),
            queue: Arc::new(ArrayQueue::new(QUEUE_CAPACITY)),
            published: 0,
            dropped_clients: 0,
        })
    }

    /// Bind with a bounded retry loop
    ///
    /// Retries every `delay` up to `max_attempts` times, then fails startup
    /// with [`Error::BindFailed`]. Intended for boot ordering races where the
    /// network interface comes up after the daemon.
    pub fn bind_with_retry(addr: &str, max_attempts: u32, delay: Duration) -> Result<Self> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match Self::bind(addr) {
                Ok(broadcaster) => return Ok(broadcaster),
                Err(e) if attempt < max_attempts => {
                    warn!(
                        "Bind attempt {}/{} for {} failed: {}, retrying in {:?}",
                        attempt, max_attempts, addr, e, delay
                    );
                    thread::sleep(delay);
                }
                Err(e) => {
                    warn!("Giving up binding {} after {} attempts: {}", addr, attempt, e);
                    return Err(Error::BindFailed {
                        addr: addr.to_string(),
                        attempts: attempt,
                    });
                }
            }
        }
    }

    /// Address the listener is actually bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Enqueue capability for producer threads
    pub fn handle(&self) -> BroadcastHandle {
        BroadcastHandle {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Number of currently connected clients
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Service the broadcaster until the running flag clears
    ///
    /// Runs on the foreground thread for the process lifetime. Sleeps
    /// briefly only when a pass had nothing to do.
    pub fn service_loop(&mut self, running: &AtomicBool) {
        while running.load(Ordering::Relaxed) {
            let idle = self.service();
            if idle {
                thread::sleep(IDLE_SLEEP);
            }
        }
        info!(
            "Broadcaster exiting ({} lines published, {} clients dropped)",
            self.published, self.dropped_clients
        );
    }

    /// One service pass: accept pending clients, drain queued lines
    ///
    /// Returns true when the pass had no work (caller may sleep).
    pub fn service(&mut self) -> bool {
        let mut idle = true;

        // Accept new client connections (non-blocking)
        match self.listener.accept() {
            Ok((stream, addr)) => {
                idle = false;
                if let Err(e) = stream.set_nonblocking(false) {
                    warn!("Failed to set blocking mode for client {}: {}", addr, e);
                } else {
                    info!("Client connected: {}", addr);
                    self.clients.push(stream);
                }
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                // No new connections
            }
            Err(e) => {
                warn!("Error accepting client connection: {}", e);
            }
        }

        // Drain queued lines, bounded per pass
        let mut batch = 0;
        while let Some(line) = self.queue.pop() {
            idle = false;
            self.broadcast_line(&line);
            self.published += 1;

            batch += 1;
            if batch >= DRAIN_BATCH {
                break;
            }
        }

        idle
    }

    /// Write one newline-terminated line to every client, pruning dead ones
    fn broadcast_line(&mut self, line: &str) {
        if self.clients.is_empty() {
            return;
        }

        let mut frame = Vec::with_capacity(line.len() + 1);
        frame.extend_from_slice(line.as_bytes());
        frame.push(b'\n');

        let mut dropped = 0u64;
        self.clients.retain_mut(|client| match client.write_all(&frame) {
            Ok(_) => true,
            Err(e) => {
                if let Ok(addr) = client.peer_addr() {
                    debug!("Client {} disconnected: {}", addr, e);
                } else {
                    debug!("Client disconnected: {}", e);
                }
                dropped += 1;
                false
            }
        });
        self.dropped_clients += dropped;
    }
}
