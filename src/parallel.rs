use std::thread;
use std::sync::mpsc;
use std::sync::{ Arc, Mutex, PoisonError };

use log::{ debug, error, trace };

use crate::world::World;
use crate::camera::Camera;
use crate::canvas::Canvas;

pub enum Message {
    Row(usize),
    Terminate,
}

struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    fn new(id: usize, world: Arc<World>, camera: Arc<Camera>,
        canvas: Arc<Mutex<Canvas>>,
        receiver: Arc<Mutex<mpsc::Receiver<Message>>>) -> Worker {

        let thread = thread::spawn(move || loop {
            // Obtain the message being executed. A closed channel ends the
            // worker just like `Terminate`.
            let message = match receiver.lock() {
                Ok(receiver) => receiver.recv(),
                Err(_) => break,
            };

            match message {
                Ok(Message::Row(y)) => {
                    // Color the row, then hold the canvas lock only to copy
                    // it in.
                    trace!("worker {} rendering row {}", id, y);
                    let row = camera.render_row(&world, y);
                    canvas.lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .write_row(y, &row);
                },

                Ok(Message::Terminate) | Err(_) => {
                    // Exit the worker thread loop, terminating the thread.
                    break;
                }
            }
        });

        Worker { id, thread: Some(thread) }
    }
}

/// A fixed pool of render threads fed over a channel.
///
/// Every worker shares the same read-only `World` and `Camera` and writes
/// finished rows into a shared `Canvas`. Dropping the pool waits for all
/// queued rows to finish.
pub struct ThreadPool {
    workers: Vec<Worker>,
    sender: mpsc::Sender<Message>,
}

impl ThreadPool {
    pub fn new(size: usize, world: World, camera: Camera,
        canvas: Arc<Mutex<Canvas>>) -> ThreadPool {
        // There should be at least one thread to run workers.
        let size = size.max(1);

        let (sender, receiver) = mpsc::channel();

        let world = Arc::new(world);
        let camera = Arc::new(camera);
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            workers.push(Worker::new(
                id,
                Arc::clone(&world),
                Arc::clone(&camera),
                Arc::clone(&canvas),
                Arc::clone(&receiver)
            ));
        }

        ThreadPool { workers, sender }
    }

    pub fn execute(&mut self, message: Message) {
        if self.sender.send(message).is_err() {
            error!("render workers have all exited; message dropped");
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        for _ in &self.workers {
            // Workers that already exited no longer need telling.
            let _ = self.sender.send(Message::Terminate);
        }

        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                if thread.join().is_err() {
                    error!("render worker {} panicked", worker.id);
                }
            }
        }
    }
}

/// Renders a world on `threads` worker threads, one row per message.
///
/// The result is identical to `Camera::render`; only the order in which
/// pixels are computed differs.
pub fn render(world: World, camera: Camera, threads: usize) -> Canvas {
    let vsize = camera.vsize;
    let hsize = camera.hsize;
    let canvas = Arc::new(Mutex::new(Canvas::new(hsize, vsize)));

    debug!("rendering {}x{} pixels on {} threads", hsize, vsize, threads.max(1));
    {
        let mut thread_pool = ThreadPool::new(
            threads, world, camera, Arc::clone(&canvas)
        );

        for y in 0..vsize {
            thread_pool.execute(Message::Row(y));
        }
    }

    // Every worker has been joined, so this is the last handle.
    let image = match Arc::try_unwrap(canvas) {
        Ok(canvas) => canvas.into_inner().unwrap_or_else(PoisonError::into_inner),
        Err(shared) => {
            let canvas = shared.lock().unwrap_or_else(PoisonError::into_inner);
            canvas.clone()
        },
    };

    image
}

#[cfg(test)]
fn default_scene_camera(hsize: usize, vsize: usize) -> Camera {
    use crate::tuple::Tuple;
    use crate::matrix::Matrix;

    Camera::new(hsize, vsize, std::f64::consts::PI / 3.0)
        .with_transform(Matrix::view_transform(
            Tuple::point(0.0, 1.5, -5.0),
            Tuple::point(0.0, 0.0, 0.0),
            Tuple::vector(0.0, 1.0, 0.0),
        ))
        .unwrap()
}

#[test]
fn parallel_matches_sequential() {
    let world: World = Default::default();
    let camera = default_scene_camera(24, 16);

    let sequential = camera.render(&world);
    let parallel = render(world, camera, 4);

    assert_eq!(parallel, sequential);
}

#[test]
fn more_threads_than_rows() {
    let world: World = Default::default();
    let camera = default_scene_camera(5, 2);

    let sequential = camera.render(&world);
    assert_eq!(render(world, camera, 8), sequential);
}

#[test]
fn zero_threads_still_renders() {
    let world: World = Default::default();
    let camera = default_scene_camera(6, 4);

    let sequential = camera.render(&world);
    assert_eq!(render(world, camera, 0), sequential);
}
