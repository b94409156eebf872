use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures_util::future::LocalBoxFuture;

use super::controller::{KeyOutcome, PlayTicket, PlayerController};
use super::keyboard::KeyPress;
#[cfg(test)]
use super::state::PlaybackState;
use super::surface::{DisplaySurface, MediaEvent, MediaEventSink, PlaybackSurface};

type SpawnFn = dyn Fn(LocalBoxFuture<'static, ()>);
type SleepFn = dyn Fn(Duration) -> LocalBoxFuture<'static, ()>;

/// How the handle runs delayed play attempts on the current platform.
#[derive(Clone)]
pub struct TaskRuntime {
    spawn: Rc<SpawnFn>,
    sleep: Rc<SleepFn>,
}

impl TaskRuntime {
    pub fn new(
        spawn: impl Fn(LocalBoxFuture<'static, ()>) + 'static,
        sleep: impl Fn(Duration) -> LocalBoxFuture<'static, ()> + 'static,
    ) -> Self {
        Self {
            spawn: Rc::new(spawn),
            sleep: Rc::new(sleep),
        }
    }
}

/// Shared, UI-thread-confined owner of a [`PlayerController`].
///
/// Platform callbacks go through here so that any [`PlayTicket`] the
/// controller hands back is waited out and played. Borrows of the controller
/// never live across an `await`.
pub struct PlayerHandle<M, D> {
    inner: Rc<RefCell<PlayerController<M, D>>>,
    runtime: TaskRuntime,
}

impl<M, D> Clone for PlayerHandle<M, D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

impl<M, D> PartialEq for PlayerHandle<M, D> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<M, D> PlayerHandle<M, D>
where
    M: PlaybackSurface + 'static,
    D: DisplaySurface + 'static,
{
    /// Wraps the controller and subscribes it to the media handle's events.
    pub fn new(controller: PlayerController<M, D>, runtime: TaskRuntime) -> Self {
        let handle = Self {
            inner: Rc::new(RefCell::new(controller)),
            runtime,
        };
        let sink = handle.event_sink();
        handle.inner.borrow_mut().media_mut().subscribe(sink);
        handle
    }

    pub fn toggle(&self) {
        let ticket = self.inner.borrow_mut().toggle();
        self.follow(ticket);
    }

    pub fn set_volume(&self, percent: u8) {
        self.inner.borrow_mut().set_volume(percent);
    }

    /// Returns `true` when the key was consumed.
    pub fn key(&self, press: &KeyPress) -> bool {
        let outcome = self.inner.borrow_mut().key(press);
        match outcome {
            KeyOutcome::Ignored => false,
            KeyOutcome::Handled(ticket) => {
                self.follow(ticket);
                true
            }
        }
    }

    pub fn media_event(&self, event: MediaEvent) {
        let ticket = self.inner.borrow_mut().media_event(event);
        self.follow(ticket);
    }

    pub fn online(&self) {
        let ticket = self.inner.borrow_mut().online();
        self.follow(ticket);
    }

    pub fn offline(&self) {
        self.inner.borrow_mut().offline();
    }

    pub fn visibility_changed(&self, hidden: bool) {
        self.inner.borrow_mut().visibility_changed(hidden);
    }

    pub fn dismiss_error_message(&self) {
        self.inner.borrow_mut().dismiss_error_message();
    }

    fn event_sink(&self) -> MediaEventSink {
        let weak = WeakHandle {
            inner: Rc::downgrade(&self.inner),
            runtime: self.runtime.clone(),
        };
        Rc::new(move |event| {
            if let Some(handle) = weak.upgrade() {
                handle.media_event(event);
            }
        })
    }

    /// Waits out the ticket's delay, plays, and chains any fallback ticket.
    fn follow(&self, ticket: Option<PlayTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        let handle = self.clone();
        let task = async move {
            (handle.runtime.sleep)(ticket.delay()).await;
            let outcome = handle.inner.borrow_mut().begin_play(&ticket);
            let Some(outcome) = outcome else {
                return;
            };
            let result = outcome.await;
            let next = handle.inner.borrow_mut().play_settled(&ticket, result);
            handle.follow(next);
        };
        (self.runtime.spawn)(Box::pin(task));
    }
}

/// Held by the media element's listeners so they do not keep the player alive.
struct WeakHandle<M, D> {
    inner: Weak<RefCell<PlayerController<M, D>>>,
    runtime: TaskRuntime,
}

impl<M, D> WeakHandle<M, D> {
    fn upgrade(&self) -> Option<PlayerHandle<M, D>> {
        Some(PlayerHandle {
            inner: self.inner.upgrade()?,
            runtime: self.runtime.clone(),
        })
    }
}

#[cfg(test)]
impl<M, D> PlayerHandle<M, D> {
    pub fn state(&self) -> PlaybackState {
        self.inner.borrow().state()
    }

    pub fn volume(&self) -> u8 {
        self.inner.borrow().volume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::player::error::PlayRejection;
    use crate::player::state::Phase;
    use crate::player::testing::{settle, FakeDisplay, FakeMedia};
    use futures_util::future::{self, FutureExt};

    type Queue = Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>;

    /// Queues spawned tasks; sleeps complete immediately but are recorded.
    fn queued_runtime() -> (TaskRuntime, Queue, Rc<RefCell<Vec<Duration>>>) {
        let queue: Queue = Rc::default();
        let sleeps: Rc<RefCell<Vec<Duration>>> = Rc::default();
        let runtime = TaskRuntime::new(
            {
                let queue = queue.clone();
                move |task| queue.borrow_mut().push(task)
            },
            {
                let sleeps = sleeps.clone();
                move |delay| {
                    sleeps.borrow_mut().push(delay);
                    future::ready(()).boxed_local()
                }
            },
        );
        (runtime, queue, sleeps)
    }

    fn run_queued(queue: &Queue) {
        loop {
            let next = queue.borrow_mut().pop();
            let Some(task) = next else {
                break;
            };
            settle(task);
        }
    }

    fn handle(
        endpoints: &[&str],
        media: FakeMedia,
    ) -> (
        PlayerHandle<FakeMedia, FakeDisplay>,
        Queue,
        Rc<RefCell<Vec<Duration>>>,
        FakeDisplay,
    ) {
        let display = FakeDisplay::default();
        let config = PlayerConfig {
            endpoints: endpoints.iter().map(|url| url.to_string()).collect(),
            ..PlayerConfig::default()
        };
        let controller =
            PlayerController::new(config, media, display.clone()).expect("controller");
        let (runtime, queue, sleeps) = queued_runtime();
        (PlayerHandle::new(controller, runtime), queue, sleeps, display)
    }

    #[test]
    fn toggle_runs_play_after_settle_delay() {
        let media = FakeMedia::default();
        let (player, queue, sleeps, display) = handle(&["http://a/1"], media.clone());

        player.toggle();
        assert_eq!(player.state().phase(), Phase::Loading);
        assert_eq!(queue.borrow().len(), 1);

        run_queued(&queue);
        assert_eq!(player.state().phase(), Phase::Playing);
        assert_eq!(*sleeps.borrow(), vec![Duration::from_millis(100)]);
        assert_eq!(display.status(), "Live");
    }

    #[test]
    fn fallback_cascade_uses_fallback_delay() {
        let media = FakeMedia::with_outcomes([
            Err(PlayRejection::Other("refused".into())),
            Err(PlayRejection::Other("refused".into())),
        ]);
        let (player, queue, sleeps, _display) =
            handle(&["http://a/1", "http://b/2", "http://c/3"], media.clone());

        player.toggle();
        run_queued(&queue);

        assert_eq!(player.state().phase(), Phase::Playing);
        assert_eq!(
            media.played_sources(),
            ["http://a/1", "http://b/2", "http://c/3"]
        );
        assert_eq!(
            *sleeps.borrow(),
            vec![
                Duration::from_millis(100),
                Duration::from_millis(500),
                Duration::from_millis(500),
            ]
        );
    }

    #[test]
    fn media_events_reach_controller_through_subscription() {
        let media = FakeMedia::default();
        let (player, _queue, _sleeps, display) = handle(&["http://a/1"], media.clone());

        media.emit(MediaEvent::Error { code: Some(2) });
        assert_eq!(player.state().phase(), Phase::Error);
        assert_eq!(display.message_count(), 1);
    }

    #[test]
    fn pending_retry_is_dropped_after_user_pause() {
        let media = FakeMedia::with_outcomes([Err(PlayRejection::Other("refused".into()))]);
        let (player, queue, _sleeps, _display) =
            handle(&["http://a/1", "http://b/2"], media.clone());

        player.toggle();
        // Run only the first attempt; it schedules the fallback.
        let first = queue.borrow_mut().pop().expect("task");
        settle(first);
        assert_eq!(queue.borrow().len(), 1);

        player.toggle();
        run_queued(&queue);
        assert_eq!(media.played_sources(), ["http://a/1"]);
        assert_eq!(player.state().phase(), Phase::Idle);
    }

    #[test]
    fn keys_report_whether_they_were_consumed() {
        let media = FakeMedia::default();
        let (player, queue, _sleeps, _display) = handle(&["http://a/1"], media);

        assert!(!player.key(&KeyPress::new("a", "KeyA")));
        assert!(player.key(&KeyPress::new("ArrowDown", "ArrowDown")));
        assert_eq!(player.volume(), 75);
        assert!(player.key(&KeyPress::new(" ", "Space")));
        run_queued(&queue);
        assert_eq!(player.state().phase(), Phase::Playing);
    }

    #[test]
    fn sink_outliving_player_is_inert() {
        let media = FakeMedia::default();
        let (player, _queue, _sleeps, _display) = handle(&["http://a/1"], media.clone());
        drop(player);
        media.emit(MediaEvent::Playing);
    }
}
