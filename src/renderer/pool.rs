use std::panic::{self, AssertUnwindSafe};
use std::thread::JoinHandle;

use anyhow::Context;
use crossbeam::channel::{self, Receiver, Sender};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed-size worker pool over a FIFO job queue.
///
/// Jobs may be queued before or after `start()`; each queued job runs
/// exactly once. `stop()` closes the queue, waits for the workers to drain
/// every remaining job and joins them, so it doubles as a completion
/// barrier.
pub struct ThreadPool {
    num_threads: u32,
    sender: Option<Sender<Job>>,
    receiver: Receiver<Job>,
    workers: Vec<JoinHandle<()>>,
}

impl ThreadPool {
    pub fn new(num_threads: u32) -> Self {
        let (sender, receiver) = channel::unbounded();
        Self {
            num_threads: num_threads.max(1),
            sender: Some(sender),
            receiver,
            workers: Vec::new(),
        }
    }

    pub fn num_threads(&self) -> u32 {
        self.num_threads
    }

    pub fn start(&mut self) -> anyhow::Result<()> {
        for tid in 0..self.num_threads {
            let receiver = self.receiver.clone();
            let worker = std::thread::Builder::new()
                .name(format!("render-worker-{}", tid))
                .spawn(move || worker_loop(receiver))
                .context("failed to spawn render worker")?;
            self.workers.push(worker);
        }
        Ok(())
    }

    pub fn queue_job<F: FnOnce() + Send + 'static>(&self, job: F) {
        match &self.sender {
            Some(sender) => {
                // Unbounded queue: send only fails once the pool stopped.
                let _ = sender.send(Box::new(job));
            }
            None => log::warn!("job queued after stop() was dropped"),
        }
    }

    /// Close the queue, drain it, and join every worker. When this returns,
    /// all previously queued jobs have completed.
    pub fn stop(&mut self) {
        self.sender.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop(receiver: Receiver<Job>) {
    // recv() errors only when every sender is gone and the queue is empty,
    // which is exactly the drain-then-exit condition stop() relies on.
    while let Ok(job) = receiver.recv() {
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            log::error!("render job panicked; its scanlines are left unfinished");
        }
    }
}
