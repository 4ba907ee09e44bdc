use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// A fixed-size pool of detached worker threads.
///
/// Workers are deliberately never joined: a run that hangs strands its
/// worker, and the pool, later batches, and process exit must all proceed
/// regardless. Dropping the pool closes the queue; idle workers drain what
/// remains and exit, stranded ones are abandoned.
pub(crate) struct Pool {
    queue: Sender<Job>,
}

impl Pool {
    /// Spawn `size` workers draining a shared job queue.
    pub(crate) fn new(size: usize) -> Self {
        let (queue, jobs) = channel::<Job>();
        let jobs = Arc::new(Mutex::new(jobs));
        for n in 0..size {
            let jobs = Arc::clone(&jobs);
            thread::Builder::new()
                .name(format!("hangcheck-worker-{}", n))
                .spawn(move || worker(&jobs))
                .unwrap();
        }
        Pool { queue }
    }

    /// Enqueue one job.
    ///
    /// If every worker is already gone the job is dropped; the affected run
    /// never counts down and surfaces as a stall instead.
    pub(crate) fn submit(&self, job: impl FnOnce() + Send + 'static) {
        let _ = self.queue.send(Box::new(job));
    }
}

fn worker(jobs: &Mutex<Receiver<Job>>) {
    loop {
        // Release the queue lock before running the job, or a single slow
        // run would serialize the whole pool.
        let job = match jobs.lock().unwrap().recv() {
            Ok(job) => job,
            Err(_) => return,
        };
        job();
    }
}
